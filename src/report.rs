//! Human-readable dumps of a cache's configuration, statistics and tag array

use std::io;
use std::io::Write;

use crate::memory::Cache;
use crate::memory::CacheConfig;
use crate::memory::WriteHitPolicy;

/// Format a statistic that may be undefined on an empty run
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) => format!("{:.*}", precision, value),
        None => "n/a".to_string(),
    }
}

pub fn write_configuration(
    out: &mut impl Write,
    config: &CacheConfig,
) -> io::Result<()> {
    writeln!(out, "CACHE CONFIGURATION")?;
    if config.cache_size >= 1024 {
        writeln!(out, "size = {} KB", config.cache_size / 1024)?;
    } else {
        writeln!(out, "size = {} B", config.cache_size)?;
    }
    writeln!(out, "associativity = {}-way", config.associativity)?;
    writeln!(out, "cache line size = {} B", config.line_size)?;
    writeln!(out, "write hit policy = {}", config.write_hit_policy)?;
    writeln!(out, "write miss policy = {}", config.write_miss_policy)?;
    writeln!(out, "cache hit time = {} CLK", config.hit_time)?;
    writeln!(out, "cache miss penalty = {} CLK", config.miss_penalty)?;
    writeln!(out, "memory address width = {} bits", config.address_width)?;
    Ok(())
}

pub fn write_statistics(out: &mut impl Write, cache: &Cache) -> io::Result<()> {
    let history = cache.history();
    writeln!(out, "STATISTICS")?;
    writeln!(out, "memory accesses = {}", history.num_access)?;
    writeln!(out, "read = {}", history.num_read)?;
    writeln!(out, "read misses = {}", history.num_read_miss)?;
    writeln!(out, "write = {}", history.num_write)?;
    writeln!(out, "write misses = {}", history.num_write_miss)?;
    writeln!(out, "evictions = {}", history.num_eviction)?;
    writeln!(out, "memory writes = {}", history.num_memory_write)?;
    writeln!(
        out,
        "average memory access time = {}",
        format_optional(cache.get_amat(), 2)
    )?;
    Ok(())
}

/// Dump every valid line, way by way. The dirty column only appears
/// under write-back.
pub fn write_tag_array(out: &mut impl Write, cache: &Cache) -> io::Result<()> {
    let write_back =
        cache.config().write_hit_policy == WriteHitPolicy::WriteBack;
    let tag_width = 4 + cache.geometry().tag_bits as usize / 4;

    writeln!(out, "TAG ARRAY")?;
    for way in 0..cache.config().associativity {
        writeln!(out, "BLOCKS {}", way)?;
        if write_back {
            writeln!(
                out,
                "{:>7}{:>6}{:>width$}",
                "index",
                "dirty",
                "tag",
                width = tag_width
            )?;
        } else {
            writeln!(
                out,
                "{:>7}{:>width$}",
                "index",
                "tag",
                width = tag_width
            )?;
        }

        for set in 0..cache.geometry().num_sets {
            let line = cache.line(way, set);
            if !line.valid {
                continue;
            }
            if write_back {
                writeln!(
                    out,
                    "{:>7}{:>6}{:>4}{:x}",
                    line.index, line.dirty as u8, "0x", line.tag
                )?;
            } else {
                writeln!(out, "{:>7}{:>4}{:x}", line.index, "0x", line.tag)?;
            }
        }
    }
    Ok(())
}
