use std::path::Path;

use plotters::prelude::*;

use cache_sim::logging;
use cache_sim::memory::Cache;
use cache_sim::memory::CacheConfig;
use cache_sim::run_wrapper::replay;
use cache_sim::trace::load_trace;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(false);

    let trace_path = std::env::args()
        .nth(1)
        .ok_or("You should specify exactly one trace file")?;
    let records = load_trace(&trace_path)?;

    // Plot line series for each cache size
    // For a fixed cache size, vary the line size
    // Performance metric: overall miss rate
    // Cache sizes: 4KB, 16KB, 64KB, 256KB
    let cache_sizes = [4 * 1024, 16 * 1024, 64 * 1024, 256 * 1024];
    // Line sizes: 16B to 256B
    let line_sizes = [16, 32, 64, 128, 256];

    let mut data: Vec<Vec<(usize, f64)>> = vec![vec![]; cache_sizes.len()];
    let mut y_max: f64 = 0.;
    for (i, cache_size) in cache_sizes.iter().enumerate() {
        for line_size in line_sizes.iter() {
            let mut cache = Cache::make(CacheConfig {
                cache_size: *cache_size,
                line_size: *line_size,
                ..CacheConfig::default()
            })?;
            replay(&mut cache, &records, None);
            let miss_rate = cache.history().miss_rate().unwrap_or(0.);
            data[i].push((*line_size, miss_rate));
            y_max = y_max.max(miss_rate);
        }
    }

    let trace_base_name = Path::new(&trace_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| trace_path.clone());
    let plot_title = format!("Miss rate by line size: {}", trace_base_name);
    std::fs::create_dir_all("eval")?;
    let output_path = format!("eval/line_eval_{}.svg", trace_base_name);

    let root =
        SVGBackend::new(output_path.as_str(), (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(plot_title.as_str(), ("sans-serif", 40).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(16..256, 0.0..(y_max * 1.1).max(0.01))?;
    ctx.configure_mesh()
        .x_desc("Line size (B)")
        .y_desc("Miss rate")
        .draw()?;

    for (i, cache_size) in cache_sizes.iter().enumerate() {
        let series = data[i].iter().map(|(x, y)| (*x as i32, *y));
        let label = format!("Cache size = {} KB", cache_size / 1024);
        let color = Palette99::pick(i).to_rgba();
        ctx.draw_series(LineSeries::new(series, color))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color)
            });
    }

    ctx.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;

    eprintln!("Wrote {}", output_path);
    Ok(())
}
