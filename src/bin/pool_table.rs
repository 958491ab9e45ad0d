use clap::Parser;
use env_logger::Env;
use log::{info, LevelFilter};

use mining_pool_dashboard::client::{
    render::{render_detail, render_view},
    MiningPoolsApi, PoolTableView, SortColumn, DEFAULT_API_BASE_URL,
};

/// Terminal view of the mining pool table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Base URL of the mining pool API
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    /// Only show pools whose name contains this text (case-insensitive)
    #[arg(long, default_value = "")]
    filter: String,

    /// Sort by: name, hashrate, workers or reject-rate
    #[arg(long)]
    sort: Option<SortColumn>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Also show the details of this pool id
    #[arg(long)]
    details: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.to_string())).init();

    let api = MiningPoolsApi::new(&args.base_url)?;
    info!("Fetching mining pools from {}", api.base_url());

    let mut view = PoolTableView::new();
    view.load(&api).await;
    view.set_filter(args.filter);

    if let Some(column) = args.sort {
        view.select_sort(column);
        // a second click on the same header flips to descending
        if args.desc {
            view.select_sort(column);
        }
    }

    println!("{}", render_view(&view));

    if let Some(id) = args.details {
        view.open_details(&api, &id).await;
        if let Some(detail) = render_detail(&view) {
            println!();
            println!("{}", detail);
        }
    }

    Ok(())
}
