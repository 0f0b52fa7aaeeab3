//! A simulator wrapper

use std::path::Path;

use log::info;

use crate::error::SimulatorResult;
use crate::error::TraceError;
use crate::memory::Cache;
use crate::memory::CacheConfig;
use crate::trace::TraceReader;
use crate::trace::TraceRecord;

/// Feed records to the cache in order.
///
/// With `Some(n)` for `n > 0` at most `n` records are pulled from `records`;
/// `None` or `Some(0)` runs to completion. Returns the number of accesses
/// processed by this call.
pub fn run_trace<I>(
    cache: &mut Cache,
    records: I,
    limit: Option<u64>,
) -> SimulatorResult<u64>
where
    I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
{
    let limit = limit.filter(|&n| n > 0);
    let mut records = records.into_iter();
    let mut processed = 0;

    while limit.map_or(true, |n| processed < n) {
        let Some(record) = records.next() else {
            break;
        };
        let record = record?;
        cache.access(record.access_type, record.address);
        processed += 1;
    }

    Ok(processed)
}

/// Replay an in-memory trace, same limit semantics as [`run_trace`]
pub fn replay(
    cache: &mut Cache,
    records: &[TraceRecord],
    limit: Option<u64>,
) -> u64 {
    let count = match limit.filter(|&n| n > 0) {
        Some(n) => records.len().min(usize::try_from(n).unwrap_or(usize::MAX)),
        None => records.len(),
    };
    for record in &records[..count] {
        cache.access(record.access_type, record.address);
    }
    count as u64
}

/// Run simulation on the given trace file
/// and return the cache for reporting
pub fn run(
    trace_path: impl AsRef<Path>,
    config: CacheConfig,
    limit: Option<u64>,
) -> SimulatorResult<Cache> {
    let trace_path = trace_path.as_ref();
    let mut cache = Cache::make(config)?;
    let mut reader = TraceReader::open(trace_path)?;

    let processed = run_trace(&mut cache, &mut reader, limit)?;

    let history = cache.history();
    info!(
        "{}: {} accesses, {} read misses, {} write misses, {} evictions",
        trace_path.display(),
        processed,
        history.num_read_miss,
        history.num_write_miss,
        history.num_eviction
    );

    Ok(cache)
}
