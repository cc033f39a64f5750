use crate::error::DetectError;
use std::fmt::Display;
use std::str::FromStr;

/// A CPU capability that can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureId {
    Avx2,
    /// AVX512F, AVX512VL, AVX512BW and AVX512DQ together.
    Avx512,
    /// AVX512_VNNI.
    Vnni,
    Avx512Bf16,
    /// The VEX-encoded VNNI instructions.
    AvxVnni,
    AmxTile,
}

impl FeatureId {
    pub const ALL: [FeatureId; 6] = [
        FeatureId::Avx2,
        FeatureId::Avx512,
        FeatureId::Vnni,
        FeatureId::Avx512Bf16,
        FeatureId::AvxVnni,
        FeatureId::AmxTile,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            FeatureId::Avx2 => "avx2",
            FeatureId::Avx512 => "avx512",
            FeatureId::Vnni => "vnni",
            FeatureId::Avx512Bf16 => "avx512_bf16",
            FeatureId::AvxVnni => "avx_vnni",
            FeatureId::AmxTile => "amx_tile",
        }
    }
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureId {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureId::ALL
            .into_iter()
            .find(|x| x.name() == s.trim())
            .ok_or_else(|| DetectError::UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for x in FeatureId::ALL {
            assert_eq!(x.to_string().parse::<FeatureId>().unwrap(), x);
        }
    }

    #[test]
    fn unknown_name() {
        let e = "sse9".parse::<FeatureId>().unwrap_err();
        assert!(matches!(e, DetectError::UnknownFeature(ref s) if s == "sse9"));
    }
}
