use detect::{CapabilityFlags, DetectError, FeatureId, Hardware, Snapshot};
use log::{debug, error, info};
use std::process::ExitCode;

use crate::args::{Arguments, DumpArguments, QueryArguments, SubCommandEnum};

mod args;

const EXIT_SUCCESS: u8 = 0;
const EXIT_UNSUPPORTED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn query(args: QueryArguments) -> Result<u8, DetectError> {
    let flags = match &args.snapshot {
        Some(path) => {
            let snapshot = Snapshot::load(path)?;
            debug!("loaded {} leaves from {path}", snapshot.leaves.len());
            CapabilityFlags::probe(&snapshot)
        }
        None => {
            detect::initialize();
            *detect::registry().flags()
        }
    };
    if let Some(name) = &args.feature {
        let feature: FeatureId = name.parse()?;
        let supported = flags.get(feature);
        println!("{feature}: {supported}");
        return Ok(if supported {
            EXIT_SUCCESS
        } else {
            EXIT_UNSUPPORTED
        });
    }
    for feature in FeatureId::ALL {
        println!("{feature}: {}", flags.get(feature));
    }
    println!("level: {}", flags.level());
    Ok(EXIT_SUCCESS)
}

fn dump(args: DumpArguments) -> Result<u8, DetectError> {
    let snapshot = Snapshot::capture(&Hardware);
    match &args.output {
        Some(path) => {
            snapshot.save(path)?;
            info!("snapshot has been saved to {path}");
        }
        None => print!("{}", snapshot.to_toml()?),
    }
    Ok(EXIT_SUCCESS)
}

fn main() -> ExitCode {
    let args: Arguments = argh::from_env();
    let mut log_builder = env_logger::builder();
    if args.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();
    debug!("arguments: {args:#?}");

    let result = match args.cmd {
        SubCommandEnum::Query(query_args) => query(query_args),
        SubCommandEnum::Dump(dump_args) => dump(dump_args),
    };
    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("{err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
