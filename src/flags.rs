use std::path::PathBuf;

use crate::memory::CacheConfig;
use crate::memory::WriteHitPolicy;
use crate::memory::WriteMissPolicy;

xflags::xflags! {
    /// Trace-driven set-associative cache simulator.
    cmd CacheSimArgs {
        /// Path to the trace file to simulate.
        required trace: PathBuf

        /// Cache size in bytes (default: 16384).
        optional -s, --size bytes: usize

        /// Number of ways per set (default: 1, direct-mapped).
        optional -a, --assoc ways: usize

        /// Cache line size in bytes (default: 64).
        optional -l, --line-size bytes: usize

        /// Write hit policy.
        /// wb: write-back
        /// wt: write-through (default)
        optional --write-hit policy: WriteHitPolicy

        /// Write miss policy.
        /// wa: write-allocate
        /// nwa: no-write-allocate (default)
        optional --write-miss policy: WriteMissPolicy

        /// Cache hit time in clock cycles (default: 5).
        optional --hit-time cycles: u32

        /// Cache miss penalty in clock cycles (default: 100).
        optional --miss-penalty cycles: u32

        /// Memory address width in bits (default: 48).
        optional --address-width bits: u32

        /// Stop after this many memory accesses.
        optional -n, --accesses count: u64

        /// Print the tag array after the statistics.
        optional --tag-array

        /// Enables verbose mode, logging every eviction.
        optional -v, --verbose
    }
}

impl CacheSimArgs {
    /// Cache configuration with defaults filled in for missing flags
    pub fn cache_config(&self) -> CacheConfig {
        let default = CacheConfig::default();
        CacheConfig {
            cache_size: self.size.unwrap_or(default.cache_size),
            associativity: self.assoc.unwrap_or(default.associativity),
            line_size: self.line_size.unwrap_or(default.line_size),
            write_hit_policy: self
                .write_hit
                .unwrap_or(default.write_hit_policy),
            write_miss_policy: self
                .write_miss
                .unwrap_or(default.write_miss_policy),
            hit_time: self.hit_time.unwrap_or(default.hit_time),
            miss_penalty: self.miss_penalty.unwrap_or(default.miss_penalty),
            address_width: self.address_width.unwrap_or(default.address_width),
        }
    }
}
