use std::io;
use std::io::Write;
use std::process;

use cache_sim::error::SimulatorResult;
use cache_sim::flags::CacheSimArgs;
use cache_sim::logging;
use cache_sim::report;
use cache_sim::run_wrapper;

fn main() {
    let args = CacheSimArgs::from_env_or_exit();
    logging::init(args.verbose);

    if let Err(e) = simulate(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn simulate(args: &CacheSimArgs) -> SimulatorResult<()> {
    let cache =
        run_wrapper::run(&args.trace, args.cache_config(), args.accesses)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_configuration(&mut out, cache.config())?;
    writeln!(out)?;
    report::write_statistics(&mut out, &cache)?;
    if args.tag_array {
        writeln!(out)?;
        report::write_tag_array(&mut out, &cache)?;
    }

    Ok(())
}
