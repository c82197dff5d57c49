use std::error::Error;

use clap::Parser;
use id_badges::{BadgeConfig, BatchOutcome};
use log::debug;

/// Renders every row of `employee.csv` onto an ID badge and writes them to
/// `employee_ids.pdf`, one badge per page.
///
/// Files are looked up in the directory named by `ID_BADGES_DIR` (default: the
/// current directory): `employee.csv`, `photos/` and an optional `logo.png`.
/// Fonts are searched in `ID_BADGES_FONTS_DIR` before the standard locations.
#[derive(Parser)]
#[command(author, version, about = "Batch renderer for employee ID badges")]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = BadgeConfig::from_env();
    debug!("Using input table {}", config.paths.input_csv.display());

    match id_badges::run(&config, |event| println!("{event}")) {
        Ok(BatchOutcome::Written { pages, .. }) => debug!("Batch finished with {pages} page(s)"),
        Ok(outcome) => debug!("Batch stopped early: {outcome:?}"),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
