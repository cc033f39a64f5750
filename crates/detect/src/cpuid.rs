/// Register values returned by one CPUID query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuidResult {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

impl CpuidResult {
    pub const ZERO: Self = Self {
        eax: 0,
        ebx: 0,
        ecx: 0,
        edx: 0,
    };

    pub const fn new(eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
        Self { eax, ebx, ecx, edx }
    }
}

/// Where CPU identification data comes from.
///
/// Implementations answer any `(leaf, subleaf)` pair. Whether the answer is
/// meaningful is decided by the caller, which checks the maximum leaf first.
pub trait CpuidSource {
    fn cpuid(&self, leaf: u32, subleaf: u32) -> CpuidResult;

    /// The value of XCR0. Only consulted when CPUID reports OSXSAVE.
    fn xgetbv(&self) -> u64;
}

impl<T: CpuidSource + ?Sized> CpuidSource for &T {
    fn cpuid(&self, leaf: u32, subleaf: u32) -> CpuidResult {
        (**self).cpuid(leaf, subleaf)
    }

    fn xgetbv(&self) -> u64 {
        (**self).xgetbv()
    }
}

/// The CPU this process is running on.
///
/// On architectures without CPUID every query reads as zero, so nothing is
/// reported as supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hardware;

#[cfg(target_arch = "x86_64")]
impl CpuidSource for Hardware {
    fn cpuid(&self, leaf: u32, subleaf: u32) -> CpuidResult {
        crate::x86_64::cpuid(leaf, subleaf)
    }

    fn xgetbv(&self) -> u64 {
        crate::x86_64::xcr0()
    }
}

#[cfg(not(target_arch = "x86_64"))]
impl CpuidSource for Hardware {
    fn cpuid(&self, _: u32, _: u32) -> CpuidResult {
        CpuidResult::ZERO
    }

    fn xgetbv(&self) -> u64 {
        0
    }
}
