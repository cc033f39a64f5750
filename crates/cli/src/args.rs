use argh::FromArgs;

#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand)]
pub enum SubCommandEnum {
    Query(QueryArguments),
    Dump(DumpArguments),
}

#[derive(FromArgs, Debug, PartialEq)]
/// report CPU capabilities
#[argh(subcommand, name = "query")]
pub struct QueryArguments {
    /// read CPUID data from a TOML snapshot instead of this CPU
    #[argh(option)]
    pub snapshot: Option<String>,

    /// only report one feature: [`avx2`, `avx512`, `vnni`, `avx512_bf16`, `avx_vnni`, `amx_tile`]
    #[argh(option)]
    pub feature: Option<String>,
}

#[derive(FromArgs, Debug, PartialEq)]
/// record the CPUID data of this CPU as a TOML snapshot
#[argh(subcommand, name = "dump")]
pub struct DumpArguments {
    /// output file path, stdout if omitted
    #[argh(option, short = 'o')]
    pub output: Option<String>,
}

#[derive(FromArgs, Debug)]
/// `cpucaps` CLI
pub struct Arguments {
    #[argh(subcommand)]
    pub cmd: SubCommandEnum,

    /// verbose
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}
