use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info, LevelFilter};
use std::sync::Arc;

use mining_pool_dashboard::{
    config::Config,
    database::{init_repository, PoolRepository},
    routes::{build_cors, configure_routes},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 1. Parse command line arguments and setup logging
    let args = Args::parse();
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.to_string())).init();

    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Starting Mining Pool API...");
    info!("Configuration loaded: {:?}", config);

    // 2. Build the read-only pool store once; every worker shares it
    let repository = init_repository(&config.data).map_err(|e| {
        error!("Failed to initialize pool repository: {:#}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    info!("Serving {} mining pools", repository.len());
    let repository: Arc<dyn PoolRepository> = Arc::new(repository);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server will be available at http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(repository.clone()))
            .wrap(build_cors(&config.cors))
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
