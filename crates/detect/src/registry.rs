use crate::cpuid::CpuidSource;
use crate::feature::FeatureId;
use crate::flags::{CapabilityFlags, Level};
use std::sync::OnceLock;

/// Answers "does this CPU support X?" from a probe that runs at most once.
///
/// Concurrent first callers block on the same initialization; all of them
/// see the complete [`CapabilityFlags`].
pub struct CapabilityRegistry<S> {
    source: S,
    flags: OnceLock<CapabilityFlags>,
}

impl<S> CapabilityRegistry<S> {
    pub const fn new(source: S) -> Self {
        Self {
            source,
            flags: OnceLock::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.flags.get().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: CpuidSource> CapabilityRegistry<S> {
    pub fn flags(&self) -> &CapabilityFlags {
        self.flags.get_or_init(|| {
            let flags = CapabilityFlags::probe(&self.source);
            log::debug!(
                "detected CPU capabilities: level = {}, features = {:?}",
                flags.level(),
                flags.features()
            );
            flags
        })
    }

    pub fn initialize(&self) {
        self.flags();
    }

    pub fn is_supported(&self, feature: FeatureId) -> bool {
        self.flags().get(feature)
    }

    pub fn level(&self) -> Level {
        self.flags().level()
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for CapabilityRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("source", &self.source)
            .field("flags", &self.flags.get())
            .finish()
    }
}
