pub mod cpuid;
pub mod error;
pub mod feature;
pub mod features;
pub mod flags;
pub mod registry;
pub mod snapshot;

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

pub use cpuid::{CpuidResult, CpuidSource, Hardware};
pub use error::DetectError;
pub use feature::FeatureId;
pub use features::Features;
pub use flags::{CapabilityFlags, Level};
pub use registry::CapabilityRegistry;
pub use snapshot::Snapshot;

static REGISTRY: CapabilityRegistry<Hardware> = CapabilityRegistry::new(Hardware);

/// Probes the CPU now instead of on the first query.
pub fn initialize() {
    REGISTRY.initialize();
}

pub fn registry() -> &'static CapabilityRegistry<Hardware> {
    &REGISTRY
}

pub fn is_supported(feature: FeatureId) -> bool {
    REGISTRY.is_supported(feature)
}

pub fn level() -> Level {
    REGISTRY.level()
}

pub fn is_cpu_support_avx2() -> bool {
    is_supported(FeatureId::Avx2)
}

pub fn is_cpu_support_avx512() -> bool {
    is_supported(FeatureId::Avx512)
}

pub fn is_cpu_support_vnni() -> bool {
    is_supported(FeatureId::Vnni)
}

pub fn is_cpu_support_avx512_bf16() -> bool {
    is_supported(FeatureId::Avx512Bf16)
}

pub fn is_cpu_support_avx_vnni() -> bool {
    is_supported(FeatureId::AvxVnni)
}

pub fn is_cpu_support_amx_tile() -> bool {
    is_supported(FeatureId::AmxTile)
}
