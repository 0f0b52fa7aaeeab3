use std::path::Path;

use log::info;

use cache_sim::logging;
use cache_sim::memory::Cache;
use cache_sim::memory::CacheConfig;
use cache_sim::report::format_optional;
use cache_sim::run_wrapper::replay;
use cache_sim::trace::load_trace;

const KB: usize = 1024;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(false);

    let trace_path = std::env::args()
        .nth(1)
        .ok_or("You should specify exactly one trace file")?;
    let trace_base_name = Path::new(&trace_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| trace_path.clone());
    let records = load_trace(&trace_path)?;

    std::fs::create_dir_all("eval")?;
    let output_path = format!("eval/assoc_eval_{}.csv", trace_base_name);
    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record([
        "Size (KB)",
        "Associativity",
        "Read miss rate",
        "Write miss rate",
        "Evictions",
        "Memory writes",
        "AMAT",
    ])?;

    // Cache sizes: 16KB to 256KB
    // Associativity: direct-mapped to 8-way
    for size in [16, 32, 64, 128, 256] {
        for associativity in [1, 2, 4, 8] {
            let mut cache = Cache::make(CacheConfig {
                cache_size: size * KB,
                associativity,
                ..CacheConfig::default()
            })?;
            replay(&mut cache, &records, None);

            let history = cache.history();
            info!(
                "{} KB, {}-way: AMAT = {}",
                size,
                associativity,
                format_optional(cache.get_amat(), 3)
            );
            writer.write_record([
                size.to_string(),
                associativity.to_string(),
                format_optional(history.read_miss_rate(), 4),
                format_optional(history.write_miss_rate(), 4),
                history.num_eviction.to_string(),
                history.num_memory_write.to_string(),
                format_optional(cache.get_amat(), 3),
            ])?;
        }
    }

    writer.flush()?;
    eprintln!("Wrote {}", output_path);
    Ok(())
}
