//! Par Bench CLI

use par_bench::config::{LoggingConfig, ReportFormat};
use par_bench::{run_all_benchmarks, BenchRunner, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config.logging)?;
    info!(
        runs = config.runs,
        workloads = ?config.workloads,
        "Configuration loaded"
    );

    let runner = BenchRunner::new(config.threads)?.with_warmup(config.warmup_trials);

    println!(
        "Parallel runtime active: rayon fork-join pool with {} worker threads ({} logical CPUs).",
        runner.num_threads(),
        num_cpus::get()
    );

    let reports = run_all_benchmarks(&config, &runner)?;

    match config.report_format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        ReportFormat::Text => {
            let multiple = reports.len() > 1;
            for report in &reports {
                if multiple {
                    println!("{}", report.header());
                }
                print!("{}", report);
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr);

    if logging.json_output {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}
