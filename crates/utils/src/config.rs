use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq)]
#[clap(rename_all = "lowercase")]
pub enum CargoEnv {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "prod")]
    Production,
    Test,
}

/// 存储后端
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Deserialize, Serialize)]
#[clap(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MongoDB (production)
    Mongo,
    /// Process-local storage, data is lost on restart
    Memory,
}

/// How a claim after a missed day treats the streak.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StreakPolicy {
    /// Keep counting no matter how long the gap was.
    #[default]
    Continue,
    /// Start over from day 1 once a calendar day was skipped.
    ResetOnGap,
}

/// 环境配置加载器
pub struct EnvLoader;

impl EnvLoader {
    /// Loads `.env.<env>` picked by `CARGO_ENV`, falling back to `.env`.
    ///
    /// Runs before the logger exists, so progress goes to stdout/stderr.
    pub fn load_env_file() -> Result<(), Box<dyn std::error::Error>> {
        let cargo_env = std::env::var("CARGO_ENV").unwrap_or_else(|_| "development".to_string());

        let env_file = Self::env_file_for(&cargo_env);

        if !std::path::Path::new(env_file).exists() {
            eprintln!("⚠️  {} not found, trying .env", env_file);
            if std::path::Path::new(".env").exists() {
                dotenvy::from_filename(".env")?;
                println!("✅ loaded .env");
            } else {
                eprintln!("❌ no env file found, using process environment and defaults");
            }
            return Ok(());
        }

        dotenvy::from_filename(env_file)?;
        println!("✅ loaded {} (CARGO_ENV={})", env_file, cargo_env);

        Ok(())
    }

    fn env_file_for(cargo_env: &str) -> &'static str {
        match cargo_env {
            "production" | "Production" | "prod" => ".env.production",
            "development" | "Development" | "dev" => ".env.development",
            "test" | "Test" => ".env.test",
            other => {
                println!("⚠️  unknown CARGO_ENV: {}, using .env.development", other);
                ".env.development"
            }
        }
    }
}

#[derive(clap::Parser, Clone, Debug)]
#[command(name = "daily-rewards", about = "Daily rewards and bonus claim API")]
pub struct AppConfig {
    #[clap(long, env, value_enum, default_value = "development")]
    pub cargo_env: CargoEnv,

    #[clap(long, env, default_value = "0.0.0.0")]
    pub app_host: String,

    #[clap(long, env, default_value = "8000")]
    pub app_port: u16,

    #[clap(long, env, value_enum, default_value = "mongo")]
    pub storage_backend: StorageBackend,

    #[clap(long, env, default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    #[clap(long, env, default_value = "daily_rewards")]
    pub mongo_db: String,

    /// Whether a missed day resets the daily streak
    #[clap(long, env, value_enum, default_value = "continue")]
    pub streak_policy: StreakPolicy,

    /// Insert the demo user when the user collection is empty
    #[clap(long, env, default_value = "true", action = clap::ArgAction::Set)]
    pub seed_demo_user: bool,

    #[clap(long, env, default_value = "info")]
    pub rust_log: String,

    /// Production log directory, defaults to `logs/` next to the executable
    #[clap(long, env)]
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// 手动创建配置实例（用于测试）
    ///
    /// Points at `MONGO_URI` / `MONGO_DB` when set so the MongoDB
    /// repository tests can reach a real server.
    pub fn new_for_test() -> Self {
        Self {
            cargo_env: CargoEnv::Test,
            app_host: "127.0.0.1".to_string(),
            app_port: 8765,
            storage_backend: StorageBackend::Memory,
            mongo_uri: std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db: std::env::var("MONGO_DB").unwrap_or_else(|_| "daily_rewards_test".to_string()),
            streak_policy: StreakPolicy::Continue,
            seed_demo_user: true,
            rust_log: "info".to_string(),
            log_dir: None,
        }
    }
}
