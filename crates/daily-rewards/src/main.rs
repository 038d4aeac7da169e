use anyhow::{Context, Result};
use clap::Parser;
use server::app::ApplicationServer;
use std::sync::Arc;
use tracing::{info, warn};
use utils::{AppConfig, EnvLoader, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    // 根据 CARGO_ENV 加载对应的环境配置文件，缺失时只用进程环境变量
    let env_loaded = EnvLoader::load_env_file();

    let config = Arc::new(AppConfig::parse());
    let _guard = Logger::new(&config);

    if let Err(e) = env_loaded {
        warn!("⚠️ no env file loaded: {}", e);
    }
    info!(
        "⚙️ starting in {:?} mode with {:?} storage",
        config.cargo_env, config.storage_backend
    );

    ApplicationServer::serve(config)
        .await
        .context("🔴 Failed to start server")?;

    Ok(())
}
