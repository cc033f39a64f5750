use crate::cpuid::CpuidResult;
use std::arch::x86_64::{__cpuid_count, _xgetbv};

const OSXSAVE: u32 = 1 << 27;

pub fn cpuid(leaf: u32, subleaf: u32) -> CpuidResult {
    // CPUID is always available on x86_64.
    #[allow(unused_unsafe)]
    let r = unsafe { __cpuid_count(leaf, subleaf) };
    CpuidResult::new(r.eax, r.ebx, r.ecx, r.edx)
}

/// Reads XCR0, or returns `0` if the OS has not enabled XSAVE.
pub fn xcr0() -> u64 {
    if cpuid(0, 0).eax < 1 || cpuid(1, 0).ecx & OSXSAVE == 0 {
        return 0;
    }
    // SAFETY: OSXSAVE is set, so XGETBV is enabled.
    unsafe { xgetbv0() }
}

#[allow(unused_unsafe)]
#[target_feature(enable = "xsave")]
unsafe fn xgetbv0() -> u64 {
    unsafe { _xgetbv(0) }
}
