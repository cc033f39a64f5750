use crate::cpuid::CpuidSource;
use crate::feature::FeatureId;
use crate::features::Features;
use std::fmt::Display;

/// x86-64 microarchitecture levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Baseline,
    V2,
    V3,
    V4,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Baseline => write!(f, "x86-64"),
            Level::V2 => write!(f, "x86-64-v2"),
            Level::V3 => write!(f, "x86-64-v3"),
            Level::V4 => write!(f, "x86-64-v4"),
        }
    }
}

const V2: Features = Features::CMPXCHG16B
    .union(Features::FXSR)
    .union(Features::POPCNT)
    .union(Features::SSE)
    .union(Features::SSE2)
    .union(Features::SSE3)
    .union(Features::SSE4_1)
    .union(Features::SSE4_2)
    .union(Features::SSSE3);

const V3: Features = V2
    .union(Features::AVX)
    .union(Features::AVX2)
    .union(Features::BMI1)
    .union(Features::BMI2)
    .union(Features::F16C)
    .union(Features::FMA)
    .union(Features::LZCNT)
    .union(Features::MOVBE)
    .union(Features::XSAVE)
    .union(Features::YMM_STATE);

const V4: Features = V3
    .union(Features::AVX512F)
    .union(Features::AVX512BW)
    .union(Features::AVX512CD)
    .union(Features::AVX512DQ)
    .union(Features::AVX512VL)
    .union(Features::ZMM_STATE);

const AVX512: Features = Features::AVX512F
    .union(Features::AVX512VL)
    .union(Features::AVX512BW)
    .union(Features::AVX512DQ)
    .union(Features::ZMM_STATE);

/// What the CPU supports, decided once and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityFlags {
    avx2: bool,
    avx512: bool,
    vnni: bool,
    avx512_bf16: bool,
    avx_vnni: bool,
    amx_tile: bool,
    level: Level,
    features: Features,
}

impl CapabilityFlags {
    pub fn probe(source: &impl CpuidSource) -> Self {
        Self::from_features(Features::probe(source))
    }

    pub fn from_features(f: Features) -> Self {
        let ymm = f.contains(Features::YMM_STATE);
        let zmm = f.contains(Features::ZMM_STATE);
        let level = if f.contains(V4) {
            Level::V4
        } else if f.contains(V3) {
            Level::V3
        } else if f.contains(V2) {
            Level::V2
        } else {
            Level::Baseline
        };
        Self {
            avx2: f.contains(Features::AVX2) && ymm,
            avx512: f.contains(AVX512),
            vnni: f.contains(Features::AVX512_VNNI) && zmm,
            avx512_bf16: f.contains(Features::AVX512_BF16) && zmm,
            avx_vnni: f.contains(Features::AVX_VNNI) && ymm,
            amx_tile: f.contains(Features::AMX_TILE),
            level,
            features: f,
        }
    }

    pub fn get(&self, feature: FeatureId) -> bool {
        match feature {
            FeatureId::Avx2 => self.avx2,
            FeatureId::Avx512 => self.avx512,
            FeatureId::Vnni => self.vnni,
            FeatureId::Avx512Bf16 => self.avx512_bf16,
            FeatureId::AvxVnni => self.avx_vnni,
            FeatureId::AmxTile => self.amx_tile,
        }
    }

    pub fn supports_avx2(&self) -> bool {
        self.avx2
    }

    pub fn supports_avx512(&self) -> bool {
        self.avx512
    }

    pub fn supports_vnni(&self) -> bool {
        self.vnni
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The decoded bits the flags were derived from.
    pub fn features(&self) -> Features {
        self.features
    }

    pub fn supported(&self) -> impl Iterator<Item = FeatureId> + '_ {
        FeatureId::ALL.into_iter().filter(move |&x| self.get(x))
    }
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self::from_features(Features::empty())
    }
}
