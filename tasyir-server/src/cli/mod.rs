pub mod config;
mod db;

use anyhow::Context;
use clap::Parser;
use std::{fs, path::PathBuf};

use self::config::{Config, EnvOverride};

#[derive(Parser)]
#[clap(long_about = None)]
struct Cli {
    #[clap(short, long, env = "TASYIR_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
    #[clap(
        long,
        env = "TASYIR_HOME",
        default_value = ".tasyir",
        value_name = "DIRECTORY"
    )]
    tasyir_home: String,
    #[clap(env = "PG_CON")]
    pg_con: String,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_config(cli.config, EnvOverride { db_con: cli.pg_con })?;

    run_cmd(&cli.tasyir_home, config).await?;

    Ok(())
}

async fn run_cmd(tasyir_home: &str, config: Config) -> anyhow::Result<()> {
    use tasyir_core::{Tasyir, TasyirConfig};
    tasyir_tracing::init_tracer(config.tracing)?;
    store_server_pid(tasyir_home, std::process::id())?;
    let pool = db::init_pool(&config.db).await?;
    let app_config = TasyirConfig::builder().pool(pool).build()?;
    let app = Tasyir::init(app_config).await?;
    app.bootstrap_admin(&config.admin.username, &config.admin.password)
        .await?;
    crate::server::run(config.server, app).await?;
    Ok(())
}

pub fn store_server_pid(tasyir_home: &str, pid: u32) -> anyhow::Result<()> {
    create_tasyir_dir(tasyir_home)?;
    let _ = fs::remove_file(format!("{tasyir_home}/server-pid"));
    fs::write(format!("{tasyir_home}/server-pid"), pid.to_string()).context("Writing PID file")?;
    Ok(())
}

fn create_tasyir_dir(tasyir_home: &str) -> anyhow::Result<()> {
    let _ = fs::create_dir(tasyir_home);
    Ok(())
}
