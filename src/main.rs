/*!
 * Command-line interface for ctxdump
 */

use std::process;
use std::sync::Arc;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use ctxdump::config::{Args, Config};
use ctxdump::report::Reporter;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> ctxdump::Result<()> {
    let config = Config::from_args(args)?;
    config.validate()?;
    log::debug!("Generating context for {}", config.target_dir.display());

    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
    {
        progress.set_style(style);
    }
    progress.set_prefix("Reading");
    progress.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = ctxdump::generate(&config, Arc::new(progress.clone()));
    progress.finish_and_clear();

    let report = result?;
    Reporter::new().print_report(&report);
    Ok(())
}
