//! Tier probing per architecture.

use super::Capability;

#[cfg(target_arch = "x86_64")]
pub(super) fn detect() -> Capability {
    x86::detect()
}

#[cfg(target_arch = "aarch64")]
pub(super) fn detect() -> Capability {
    if std::arch::is_aarch64_feature_detected!("neon") {
        Capability::Vector128
    } else {
        Capability::Baseline
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(super) fn detect() -> Capability {
    Capability::Baseline
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use super::Capability;
    use core::arch::x86_64::*;
    use raw_cpuid::CpuId;

    /// XCR0 bits for XMM and YMM state.
    const XCR0_AVX: u64 = 0b110;
    /// XCR0 bits for XMM, YMM, opmask, ZMM_Hi256 and Hi16_ZMM state.
    const XCR0_AVX512: u64 = 0b1110_0110;

    /// CPUID flags relevant to tier selection.
    #[derive(Default)]
    struct Flags {
        sse41: bool,
        osxsave: bool,
        avx: bool,
        avx2: bool,
        avx512f: bool,
        avx512bw: bool,
    }

    fn read_flags() -> Flags {
        let cpuid = CpuId::new();
        let mut flags = Flags::default();
        if let Some(info) = cpuid.get_feature_info() {
            flags.sse41 = info.has_sse41();
            flags.osxsave = info.has_oxsave();
            flags.avx = info.has_avx();
        }
        if let Some(ext) = cpuid.get_extended_feature_info() {
            flags.avx2 = ext.has_avx2();
            flags.avx512f = ext.has_avx512f();
            flags.avx512bw = ext.has_avx512bw();
        }
        flags
    }

    pub(super) fn detect() -> Capability {
        let flags = read_flags();
        // XGETBV faults unless the OS set CR4.OSXSAVE.
        let xcr0 = if flags.osxsave {
            // SAFETY: OSXSAVE is reported, so XGETBV is enabled.
            unsafe { read_xcr0() }
        } else {
            0
        };

        for tier in [
            Capability::Vector512,
            Capability::Vector256,
            Capability::Vector128,
        ] {
            if tier_flags_present(tier, &flags, xcr0) && std_agrees(tier) && execute(tier) {
                return tier;
            }
        }
        Capability::Baseline
    }

    /// Each tier also requires every narrower tier.
    fn tier_flags_present(tier: Capability, flags: &Flags, xcr0: u64) -> bool {
        match tier {
            Capability::Vector512 => {
                flags.avx512f
                    && flags.avx512bw
                    && xcr0 & XCR0_AVX512 == XCR0_AVX512
                    && tier_flags_present(Capability::Vector256, flags, xcr0)
            }
            Capability::Vector256 => {
                flags.avx
                    && flags.avx2
                    && xcr0 & XCR0_AVX == XCR0_AVX
                    && tier_flags_present(Capability::Vector128, flags, xcr0)
            }
            Capability::Vector128 => flags.sse41,
            Capability::Baseline => true,
        }
    }

    fn std_agrees(tier: Capability) -> bool {
        match tier {
            Capability::Vector512 => {
                is_x86_feature_detected!("avx512f")
                    && is_x86_feature_detected!("avx512bw")
                    && std_agrees(Capability::Vector256)
            }
            Capability::Vector256 => {
                is_x86_feature_detected!("avx")
                    && is_x86_feature_detected!("avx2")
                    && std_agrees(Capability::Vector128)
            }
            Capability::Vector128 => is_x86_feature_detected!("sse4.1"),
            Capability::Baseline => true,
        }
    }

    /// Runs one instruction of an already accepted tier.
    ///
    /// This never rejects a tier: an unsupported instruction faults instead
    /// of returning. Rejection happens through the flag and XCR0 checks.
    fn execute(tier: Capability) -> bool {
        // SAFETY: each probe runs only after CPUID, XCR0 and std detection all
        // reported the tier, so its instructions are supported and enabled.
        unsafe {
            match tier {
                Capability::Vector512 => probe_avx512bw(),
                Capability::Vector256 => probe_avx2(),
                Capability::Vector128 => probe_sse41(),
                Capability::Baseline => true,
            }
        }
    }

    #[target_feature(enable = "xsave")]
    unsafe fn read_xcr0() -> u64 {
        _xgetbv(0)
    }

    #[target_feature(enable = "sse4.1")]
    unsafe fn probe_sse41() -> bool {
        let a = _mm_set1_epi32(3);
        _mm_cvtsi128_si32(_mm_mullo_epi32(a, a)) == 9
    }

    #[target_feature(enable = "avx2")]
    unsafe fn probe_avx2() -> bool {
        let a = _mm256_set1_epi32(21);
        let sum = _mm256_add_epi32(a, a);
        _mm_cvtsi128_si32(_mm256_castsi256_si128(sum)) == 42
    }

    #[target_feature(enable = "avx512f,avx512bw")]
    unsafe fn probe_avx512bw() -> bool {
        let a = _mm512_set1_epi16(7);
        let sum = _mm512_add_epi16(a, a);
        _mm_cvtsi128_si32(_mm512_castsi512_si128(sum)) == (14 << 16) | 14
    }

}
