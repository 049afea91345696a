use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use log::info;

use party_planner_api::api::forum::{ForumClient, FORUM_URL_PROD};
use party_planner_api::routes;

#[derive(Parser)]
#[command(name = "party-planner-api")]
#[command(author, version, about = "JSON API over the Mario Party Legacy board downloads", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "PARTY_PLANNER_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Base URL of the forum to scrape
    #[arg(long, env = "PARTY_PLANNER_FORUM_URL", default_value = FORUM_URL_PROD)]
    forum_url: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(err) = serve(cli).await {
        eprintln!("{}", style("[ERROR]").bold().red());
        eprintln!("{:?}", style(err).red());
        std::process::exit(1);
    }
}

async fn serve(cli: Cli) -> Result<()> {
    let client = ForumClient::with_base_url(&cli.forum_url)
        .context("Failed to initialize forum client")?;
    let app = routes::router(client);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    info!("Listening on {} (forum: {})", cli.bind, cli.forum_url);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
