use crate::cpuid::{CpuidResult, CpuidSource};
use crate::error::DetectError;
use crate::features::{
    LEAF_BASIC, LEAF_EXTENDED_BASIC, LEAF_EXTENDED_FEATURES, LEAF_EXTENDED_INFO, LEAF_FEATURES,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const OSXSAVE: u32 = 1 << 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafRecord {
    pub leaf: u32,
    #[serde(default)]
    pub subleaf: u32,
    #[serde(default)]
    pub eax: u32,
    #[serde(default)]
    pub ebx: u32,
    #[serde(default)]
    pub ecx: u32,
    #[serde(default)]
    pub edx: u32,
}

impl LeafRecord {
    fn result(&self) -> CpuidResult {
        CpuidResult::new(self.eax, self.ebx, self.ecx, self.edx)
    }
}

/// A recorded set of CPUID answers.
///
/// Leaves that were not recorded read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub xcr0: u64,
    #[serde(default, rename = "leaf")]
    pub leaves: Vec<LeafRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `result` for `(leaf, subleaf)`, replacing any earlier record.
    pub fn with_leaf(mut self, leaf: u32, subleaf: u32, result: CpuidResult) -> Self {
        self.leaves.retain(|x| (x.leaf, x.subleaf) != (leaf, subleaf));
        self.leaves.push(LeafRecord {
            leaf,
            subleaf,
            eax: result.eax,
            ebx: result.ebx,
            ecx: result.ecx,
            edx: result.edx,
        });
        self
    }

    pub fn with_xcr0(mut self, xcr0: u64) -> Self {
        self.xcr0 = xcr0;
        self
    }

    /// Records every leaf the decoder reads from `source`.
    ///
    /// XCR0 is only read when CPUID reports OSXSAVE, and recorded as `0`
    /// otherwise.
    pub fn capture(source: &impl CpuidSource) -> Self {
        let mut snapshot = Snapshot::new();
        let basic = source.cpuid(LEAF_BASIC, 0);
        snapshot = snapshot.with_leaf(LEAF_BASIC, 0, basic);
        if basic.eax >= LEAF_FEATURES {
            let r = source.cpuid(LEAF_FEATURES, 0);
            snapshot = snapshot.with_leaf(LEAF_FEATURES, 0, r);
            if r.ecx & OSXSAVE != 0 {
                snapshot = snapshot.with_xcr0(source.xgetbv());
            }
        }
        if basic.eax >= LEAF_EXTENDED_FEATURES {
            let r = source.cpuid(LEAF_EXTENDED_FEATURES, 0);
            snapshot = snapshot.with_leaf(LEAF_EXTENDED_FEATURES, 0, r);
            if r.eax >= 1 {
                let r = source.cpuid(LEAF_EXTENDED_FEATURES, 1);
                snapshot = snapshot.with_leaf(LEAF_EXTENDED_FEATURES, 1, r);
            }
        }
        let extended = source.cpuid(LEAF_EXTENDED_BASIC, 0);
        snapshot = snapshot.with_leaf(LEAF_EXTENDED_BASIC, 0, extended);
        if (LEAF_EXTENDED_INFO..=0x8000_ffff).contains(&extended.eax) {
            let r = source.cpuid(LEAF_EXTENDED_INFO, 0);
            snapshot = snapshot.with_leaf(LEAF_EXTENDED_INFO, 0, r);
        }
        snapshot
    }

    pub fn from_toml(s: &str) -> Result<Self, DetectError> {
        let snapshot: Snapshot = toml::from_str(s)?;
        for (i, x) in snapshot.leaves.iter().enumerate() {
            if snapshot.leaves[..i]
                .iter()
                .any(|y| (y.leaf, y.subleaf) == (x.leaf, x.subleaf))
            {
                return Err(DetectError::DuplicateLeaf {
                    leaf: x.leaf,
                    subleaf: x.subleaf,
                });
            }
        }
        Ok(snapshot)
    }

    pub fn to_toml(&self) -> Result<String, DetectError> {
        Ok(toml::to_string(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DetectError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DetectError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

impl CpuidSource for Snapshot {
    fn cpuid(&self, leaf: u32, subleaf: u32) -> CpuidResult {
        self.leaves
            .iter()
            .find(|x| x.leaf == leaf && x.subleaf == subleaf)
            .map(LeafRecord::result)
            .unwrap_or(CpuidResult::ZERO)
    }

    fn xgetbv(&self) -> u64 {
        self.xcr0
    }
}
