use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{AppConfig, CargoEnv};

/// Global tracing setup. Keep the returned guard alive for the whole
/// process, dropping it stops the background writer.
pub struct Logger;
impl Logger {
    pub fn new(config: &AppConfig) -> WorkerGuard {
        let (non_blocking, guard) = match config.cargo_env {
            CargoEnv::Development | CargoEnv::Test => tracing_appender::non_blocking(std::io::stdout()),
            CargoEnv::Production => {
                let log_directory = Self::get_log_directory(config.log_dir.clone());

                if let Err(e) = std::fs::create_dir_all(&log_directory) {
                    eprintln!("⚠️ cannot create log directory {:?}: {}, falling back to ./logs", log_directory, e);
                    std::fs::create_dir_all("logs").ok();
                    tracing_appender::non_blocking(tracing_appender::rolling::daily("logs", "daily-rewards.log"))
                } else {
                    println!("✅ logs go to {:?}", log_directory);
                    tracing_appender::non_blocking(tracing_appender::rolling::daily(
                        &log_directory,
                        "daily-rewards.log",
                    ))
                }
            }
        };

        // `RUST_LOG` wins, then the configured level for our crates.
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "daily_rewards={level},server={level},database={level},utils={level},tower_http=debug",
                level = config.rust_log
            )
            .into()
        });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(matches!(config.cargo_env, CargoEnv::Development))
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false),
            )
            .init();

        guard
    }

    fn get_log_directory(log_dir: Option<PathBuf>) -> PathBuf {
        if let Some(dir) = log_dir {
            return dir;
        }

        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                return exe_dir.join("logs");
            }
        }

        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("logs")
    }
}
