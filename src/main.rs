mod parser;

use parser::Args;

use glacier_fronts::steps;

use log::{error, info};

use std::{process::ExitCode, time::Instant};

fn main() -> ExitCode {
    let args = Args::parse_cli();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    let (file_params, params) = args.parameters();
    info!("Measuring the part of each box {}", params.orientation);

    let now = Instant::now();
    let report = match steps::run_batch(&file_params, &params) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Measured {} of {} glaciers in {:.1}s, {} unanchored, {} problems reported",
        report.measured(),
        report.attempted(),
        now.elapsed().as_secs_f32(),
        report.unanchored(),
        report.diagnostics.len()
    );

    if report.all_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
