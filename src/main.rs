use std::sync::Arc;

use clap::Parser;

use linkbot::cli::{Cli, Commands};
use linkbot::config::AppConfig;
use linkbot::runtime::modes::{run_cli, run_server};
use linkbot::system::init_logging;

fn main() {
    // .env 仅作为环境变量来源，缺失不报错
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.and_then(Commands::into_cli_command) {
        None => serve(config_path),
        Some(cmd) => {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to start async runtime: {}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = runtime.block_on(run_cli(cmd, config_path)) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
    }
}

fn serve(config_path: Option<&str>) {
    let config = match AppConfig::load(config_path) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    tracing::debug!("Loaded configuration: {:?}", config);

    if let Err(e) = actix_web::rt::System::new().block_on(run_server(config)) {
        tracing::error!("Server exited with error: {:#}", e);
        std::process::exit(1);
    }
}
