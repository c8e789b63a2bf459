//! Processor capability detection.
//!
//! [`capability`] probes the executing CPU once per process and caches the
//! highest usable vector tier. Probing never fails: anything unexpected
//! resolves to [`Capability::Baseline`], which every resampler supports.
//! [`cpu_info`] reports advisory topology and cache sizes, and the thread
//! hint set through [`set_thread_number`] is read by the parallel driver.

mod probe;
mod topology;

pub use topology::{CpuInfo, DEFAULT_L1_DATA, DEFAULT_L2, DEFAULT_L3};

use crate::trace::trace_event;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Hardware vector tier, ordered from portable to widest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Portable scalar code; always available.
    Baseline,
    /// 128-bit vectors (SSE4.1 on x86_64, NEON on aarch64).
    Vector128,
    /// 256-bit vectors (AVX2 with OS-enabled YMM state).
    Vector256,
    /// 512-bit vectors (AVX-512F/BW with OS-enabled ZMM and opmask state).
    Vector512,
}

impl Capability {
    /// Every tier in ascending order.
    pub const ALL: [Capability; 4] = [
        Capability::Baseline,
        Capability::Vector128,
        Capability::Vector256,
        Capability::Vector512,
    ];

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Capability::Baseline => "baseline",
            Capability::Vector128 => "vector128",
            Capability::Vector256 => "vector256",
            Capability::Vector512 => "vector512",
        }
    }

    /// Vector register width in bits (0 for the scalar baseline).
    pub const fn width_bits(self) -> usize {
        match self {
            Capability::Baseline => 0,
            Capability::Vector128 => 128,
            Capability::Vector256 => 256,
            Capability::Vector512 => 512,
        }
    }
}

static CAPABILITY: OnceLock<Capability> = OnceLock::new();
static CPU_INFO: OnceLock<CpuInfo> = OnceLock::new();
static THREAD_NUMBER: AtomicUsize = AtomicUsize::new(0);

/// Probes the processor without caching.
///
/// Tiers are tried from the widest down. A tier is accepted when its CPUID
/// flags and those of every narrower tier are set, and XCR0 shows the OS saves
/// the matching register state. One instruction of the accepted tier is then
/// executed as a sanity check; it cannot reject a tier, since an unsupported
/// instruction faults rather than returning.
pub fn detect() -> Capability {
    probe::detect()
}

/// Returns the process-wide capability, probing on first use.
pub fn capability() -> Capability {
    *CAPABILITY.get_or_init(|| {
        let detected = detect();
        trace_event!("capability_detected", tier = detected.name());
        detected
    })
}

/// Returns process-wide topology and cache facts, gathered on first use.
pub fn cpu_info() -> CpuInfo {
    *CPU_INFO.get_or_init(topology::gather)
}

/// Sets the requested worker count, clamped to `[1, logical threads]`.
///
/// Returns the stored value.
pub fn set_thread_number(threads: usize) -> usize {
    let clamped = threads.clamp(1, cpu_info().logical_threads.max(1));
    THREAD_NUMBER.store(clamped, Ordering::Relaxed);
    clamped
}

/// Returns the requested worker count (all logical threads when unset).
pub fn thread_number() -> usize {
    match THREAD_NUMBER.load(Ordering::Relaxed) {
        0 => cpu_info().logical_threads.max(1),
        n => n,
    }
}
