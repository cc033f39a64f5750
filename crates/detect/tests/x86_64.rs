#![cfg(target_arch = "x86_64")]

use detect::{FeatureId, Hardware, Level, Snapshot};

fn avx512() -> bool {
    std::is_x86_feature_detected!("avx512f")
        && std::is_x86_feature_detected!("avx512vl")
        && std::is_x86_feature_detected!("avx512bw")
        && std::is_x86_feature_detected!("avx512dq")
}

fn v2() -> bool {
    std::is_x86_feature_detected!("cmpxchg16b")
        && std::is_x86_feature_detected!("fxsr")
        && std::is_x86_feature_detected!("popcnt")
        && std::is_x86_feature_detected!("sse")
        && std::is_x86_feature_detected!("sse2")
        && std::is_x86_feature_detected!("sse3")
        && std::is_x86_feature_detected!("sse4.1")
        && std::is_x86_feature_detected!("sse4.2")
        && std::is_x86_feature_detected!("ssse3")
}

#[test]
fn print() {
    detect::initialize();
    assert!(detect::registry().is_initialized());
    for feature in FeatureId::ALL {
        println!("{feature}: {}", detect::is_supported(feature));
    }
    println!("level: {}", detect::level());
}

#[test]
fn agrees_with_std() {
    assert_eq!(
        detect::is_cpu_support_avx2(),
        std::is_x86_feature_detected!("avx2")
    );
    assert_eq!(detect::is_cpu_support_avx512(), avx512());
    assert_eq!(
        detect::is_cpu_support_vnni(),
        std::is_x86_feature_detected!("avx512vnni")
    );
    assert_eq!(detect::level() >= Level::V2, v2());
}

#[test]
fn captured_snapshot_matches_hardware() {
    let snapshot = Snapshot::capture(&Hardware);
    let restored = Snapshot::from_toml(&snapshot.to_toml().unwrap()).unwrap();
    let flags = detect::CapabilityFlags::probe(&restored);
    assert_eq!(&flags, detect::registry().flags());
}
