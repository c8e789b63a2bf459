//! Thread, socket and cache enumeration.
//!
//! These numbers are sizing hints only; no resampler depends on them for
//! correctness.

/// L1 data cache size assumed when the platform does not report one.
pub const DEFAULT_L1_DATA: usize = 32 * 1024;
/// L2 cache size assumed when the platform does not report one.
pub const DEFAULT_L2: usize = 256 * 1024;
/// L3 cache size assumed when the platform does not report one.
pub const DEFAULT_L3: usize = 2 * 1024 * 1024;

/// Advisory processor topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuInfo {
    /// Hardware threads available to the process.
    pub logical_threads: usize,
    /// Physical cores.
    pub physical_cores: usize,
    /// Processor packages.
    pub sockets: usize,
    /// L1 data cache per core, in bytes.
    pub l1_data: usize,
    /// L2 cache, in bytes.
    pub l2: usize,
    /// L3 cache, in bytes.
    pub l3: usize,
}

#[derive(Default)]
struct CacheSizes {
    l1_data: Option<usize>,
    l2: Option<usize>,
    l3: Option<usize>,
}

impl CacheSizes {
    fn is_complete(&self) -> bool {
        self.l1_data.is_some() && self.l2.is_some() && self.l3.is_some()
    }

    fn fill_from(&mut self, other: CacheSizes) {
        self.l1_data = self.l1_data.or(other.l1_data);
        self.l2 = self.l2.or(other.l2);
        self.l3 = self.l3.or(other.l3);
    }
}

pub(super) fn gather() -> CpuInfo {
    let logical_threads = num_cpus::get().max(1);
    let physical_cores = num_cpus::get_physical().clamp(1, logical_threads);

    let mut caches = cpuid_caches();
    if !caches.is_complete() {
        caches.fill_from(sysfs_caches());
    }

    CpuInfo {
        logical_threads,
        physical_cores,
        sockets: sysfs_sockets(logical_threads).unwrap_or(1),
        l1_data: caches.l1_data.unwrap_or(DEFAULT_L1_DATA),
        l2: caches.l2.unwrap_or(DEFAULT_L2),
        l3: caches.l3.unwrap_or(DEFAULT_L3),
    }
}

#[cfg(target_arch = "x86_64")]
fn cpuid_caches() -> CacheSizes {
    use raw_cpuid::{CacheType, CpuId};

    let mut sizes = CacheSizes::default();
    let Some(params) = CpuId::new().get_cache_parameters() else {
        return sizes;
    };
    for cache in params {
        let bytes = cache.associativity()
            * cache.physical_line_partitions()
            * cache.coherency_line_size()
            * cache.sets();
        match (cache.level(), cache.cache_type()) {
            (1, CacheType::Data) => sizes.l1_data = Some(bytes),
            (2, CacheType::Data | CacheType::Unified) => sizes.l2 = Some(bytes),
            (3, CacheType::Data | CacheType::Unified) => sizes.l3 = Some(bytes),
            _ => {}
        }
    }
    sizes
}

#[cfg(not(target_arch = "x86_64"))]
fn cpuid_caches() -> CacheSizes {
    CacheSizes::default()
}

#[cfg(target_os = "linux")]
fn sysfs_caches() -> CacheSizes {
    use std::fs;

    let mut sizes = CacheSizes::default();
    for index in 0..8 {
        let dir = format!("/sys/devices/system/cpu/cpu0/cache/index{index}");
        let Ok(level) = fs::read_to_string(format!("{dir}/level")) else {
            break;
        };
        let kind = fs::read_to_string(format!("{dir}/type")).unwrap_or_default();
        let size = fs::read_to_string(format!("{dir}/size"))
            .ok()
            .and_then(|text| parse_cache_size(&text));
        match (level.trim(), kind.trim()) {
            ("1", "Data") => sizes.l1_data = size,
            ("2", "Data" | "Unified") => sizes.l2 = size,
            ("3", "Data" | "Unified") => sizes.l3 = size,
            _ => {}
        }
    }
    sizes
}

#[cfg(not(target_os = "linux"))]
fn sysfs_caches() -> CacheSizes {
    CacheSizes::default()
}

#[cfg(target_os = "linux")]
fn sysfs_sockets(logical_threads: usize) -> Option<usize> {
    use std::collections::BTreeSet;

    let mut packages = BTreeSet::new();
    for cpu in 0..logical_threads {
        let path = format!("/sys/devices/system/cpu/cpu{cpu}/topology/physical_package_id");
        if let Ok(text) = std::fs::read_to_string(path) {
            if let Ok(id) = text.trim().parse::<i64>() {
                packages.insert(id);
            }
        }
    }
    (!packages.is_empty()).then_some(packages.len())
}

#[cfg(not(target_os = "linux"))]
fn sysfs_sockets(_logical_threads: usize) -> Option<usize> {
    None
}

/// Parses sysfs cache sizes such as `32K`, `1024K` or `8M`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cache_size(text: &str) -> Option<usize> {
    let text = text.trim();
    let (digits, scale) = match text.as_bytes().last()? {
        b'K' | b'k' => (&text[..text.len() - 1], 1024),
        b'M' | b'm' => (&text[..text.len() - 1], 1024 * 1024),
        b'G' | b'g' => (&text[..text.len() - 1], 1024 * 1024 * 1024),
        _ => (text, 1),
    };
    digits.parse::<usize>().ok().map(|v| v * scale)
}
