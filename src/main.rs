//! Differential refraction calculator CLI - entry point and output handling.

mod cli;
mod data;
mod error;
mod output;
#[cfg(feature = "parquet")]
mod parquet;
mod planner;
mod table_format;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    match cli::parse_cli(args) {
        Ok((source, params)) => {
            // Performance monitoring setup
            let start = if params.perf {
                Some(std::time::Instant::now())
            } else {
                None
            };

            let planner::ComputePlan { request, params } = match planner::build_job(source, params)
            {
                Ok(plan) => plan,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    std::process::exit(1);
                }
            };

            let matrix = request.compute();

            let record_count = match output::dispatch_output(&matrix, &request, &params) {
                Ok(count) => count,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    std::process::exit(1);
                }
            };

            if let Some(start_time) = start {
                let elapsed = start_time.elapsed();
                eprintln!(
                    "Processed {} records in {:.3}s ({:.0} records/sec)",
                    record_count,
                    elapsed.as_secs_f64(),
                    record_count as f64 / elapsed.as_secs_f64()
                );
            }
        }
        Err(error::CliError::Exit(message)) => {
            println!("{}", message);
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
