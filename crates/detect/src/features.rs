use crate::cpuid::CpuidSource;
use bitflags::bitflags;

bitflags! {
    /// Raw instruction-set bits decoded from CPUID, plus the register state
    /// the OS has enabled through XCR0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u64 {
        const SSE = 1 << 0;
        const SSE2 = 1 << 1;
        const FXSR = 1 << 2;
        const SSE3 = 1 << 3;
        const SSSE3 = 1 << 4;
        const SSE4_1 = 1 << 5;
        const SSE4_2 = 1 << 6;
        const POPCNT = 1 << 7;
        const CMPXCHG16B = 1 << 8;
        const MOVBE = 1 << 9;
        const XSAVE = 1 << 10;
        const OSXSAVE = 1 << 11;
        const AVX = 1 << 12;
        const F16C = 1 << 13;
        const FMA = 1 << 14;
        const BMI1 = 1 << 15;
        const BMI2 = 1 << 16;
        const LZCNT = 1 << 17;
        const AVX2 = 1 << 18;
        const AVX512F = 1 << 19;
        const AVX512DQ = 1 << 20;
        const AVX512CD = 1 << 21;
        const AVX512BW = 1 << 22;
        const AVX512VL = 1 << 23;
        const AVX512_VNNI = 1 << 24;
        const AVX512_BF16 = 1 << 25;
        const AVX_VNNI = 1 << 26;
        const AMX_TILE = 1 << 27;
        /// XMM and YMM state is saved by the OS.
        const YMM_STATE = 1 << 32;
        /// Opmask, ZMM_Hi256 and Hi16_ZMM state is saved by the OS.
        const ZMM_STATE = 1 << 33;
    }
}

pub const LEAF_BASIC: u32 = 0;
pub const LEAF_FEATURES: u32 = 1;
pub const LEAF_EXTENDED_FEATURES: u32 = 7;
pub const LEAF_EXTENDED_BASIC: u32 = 0x8000_0000;
pub const LEAF_EXTENDED_INFO: u32 = 0x8000_0001;

const XCR0_YMM: u64 = 0b0000_0110;
const XCR0_ZMM: u64 = 0b1110_0110;

#[inline(always)]
fn bit(register: u32, index: u32) -> bool {
    register & (1 << index) != 0
}

impl Features {
    /// Decodes the bits this crate cares about.
    ///
    /// Every leaf is read only after the maximum leaf (or subleaf) reported
    /// by the CPU says it exists. A leaf that does not exist contributes
    /// nothing.
    pub fn probe(source: &impl CpuidSource) -> Self {
        let mut f = Features::empty();
        let max_leaf = source.cpuid(LEAF_BASIC, 0).eax;
        if max_leaf >= LEAF_FEATURES {
            let r = source.cpuid(LEAF_FEATURES, 0);
            f.set(Features::SSE3, bit(r.ecx, 0));
            f.set(Features::SSSE3, bit(r.ecx, 9));
            f.set(Features::FMA, bit(r.ecx, 12));
            f.set(Features::CMPXCHG16B, bit(r.ecx, 13));
            f.set(Features::SSE4_1, bit(r.ecx, 19));
            f.set(Features::SSE4_2, bit(r.ecx, 20));
            f.set(Features::MOVBE, bit(r.ecx, 22));
            f.set(Features::POPCNT, bit(r.ecx, 23));
            f.set(Features::XSAVE, bit(r.ecx, 26));
            f.set(Features::OSXSAVE, bit(r.ecx, 27));
            f.set(Features::AVX, bit(r.ecx, 28));
            f.set(Features::F16C, bit(r.ecx, 29));
            f.set(Features::FXSR, bit(r.edx, 24));
            f.set(Features::SSE, bit(r.edx, 25));
            f.set(Features::SSE2, bit(r.edx, 26));
        }
        if max_leaf >= LEAF_EXTENDED_FEATURES {
            let r = source.cpuid(LEAF_EXTENDED_FEATURES, 0);
            f.set(Features::BMI1, bit(r.ebx, 3));
            f.set(Features::AVX2, bit(r.ebx, 5));
            f.set(Features::BMI2, bit(r.ebx, 8));
            f.set(Features::AVX512F, bit(r.ebx, 16));
            f.set(Features::AVX512DQ, bit(r.ebx, 17));
            f.set(Features::AVX512CD, bit(r.ebx, 28));
            f.set(Features::AVX512BW, bit(r.ebx, 30));
            f.set(Features::AVX512VL, bit(r.ebx, 31));
            f.set(Features::AVX512_VNNI, bit(r.ecx, 11));
            f.set(Features::AMX_TILE, bit(r.edx, 24));
            let max_subleaf = r.eax;
            if max_subleaf >= 1 {
                let r = source.cpuid(LEAF_EXTENDED_FEATURES, 1);
                f.set(Features::AVX_VNNI, bit(r.eax, 4));
                f.set(Features::AVX512_BF16, bit(r.eax, 5));
            }
        }
        // Without extended leaves the CPU may echo the highest basic leaf
        // here, so the answer has to look like an extended leaf index.
        let max_extended = source.cpuid(LEAF_EXTENDED_BASIC, 0).eax;
        if (LEAF_EXTENDED_INFO..=0x8000_ffff).contains(&max_extended) {
            let r = source.cpuid(LEAF_EXTENDED_INFO, 0);
            f.set(Features::LZCNT, bit(r.ecx, 5));
        }
        if f.contains(Features::OSXSAVE) {
            let xcr0 = source.xgetbv();
            f.set(Features::YMM_STATE, xcr0 & XCR0_YMM == XCR0_YMM);
            f.set(Features::ZMM_STATE, xcr0 & XCR0_ZMM == XCR0_ZMM);
        }
        f
    }
}
