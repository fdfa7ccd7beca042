//! lrupool harness - smoke check and multithreaded stress test

mod report;
mod smoke;
mod stress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::stress::StressConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the basic correctness scenario on a two-slot cache
    Smoke,

    /// Hammer one shared cache from several threads
    Stress(StressConfig),
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("lrupool harness v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Smoke => {
            info!("Basic test start");
            if let Err(e) = smoke::run() {
                error!("Basic test failed: {}", e);
                return Err(e);
            }
            info!("Basic test passed");
        }
        Command::Stress(config) => {
            let report = stress::run(&config)?;
            if config.json {
                println!("{}", report.to_json()?);
            } else {
                report.log();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::LockKind;

    #[test]
    fn test_args_stress_defaults() {
        let args = Args::try_parse_from(["lrupool", "stress"]).unwrap();

        match args.command {
            Command::Stress(config) => {
                assert_eq!(config.threads, 4);
                assert_eq!(config.capacity, 50_000);
                assert_eq!(config.load_factor, 4);
                assert_eq!(config.lock, LockKind::Spin);
                assert!(!config.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_args_stress_overrides() {
        let args = Args::try_parse_from([
            "lrupool", "stress", "-t", "2", "-i", "10", "-c", "8", "-l", "1", "--lock", "mutex",
            "--json",
        ])
        .unwrap();

        match args.command {
            Command::Stress(config) => {
                assert_eq!(config.threads, 2);
                assert_eq!(config.iterations, 10);
                assert_eq!(config.capacity, 8);
                assert_eq!(config.load_factor, 1);
                assert_eq!(config.lock, LockKind::Mutex);
                assert!(config.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_args_reject_zero_threads() {
        assert!(Args::try_parse_from(["lrupool", "stress", "--threads", "0"]).is_err());
    }
}
