use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frontend::api::HttpSiteApi;
use frontend::config::SiteConfig;
use frontend::dom_ids::{PROJECTS_BODY, PROJECTS_STATUS};
use frontend::page::Page;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "frontend=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let config = SiteConfig::new_from_env()?;

    let api = Arc::new(HttpSiteApi::new(&config)?);
    info!("loading projects from {}", api.base_url());

    let mut page = Page::new(api, config);
    page.load([PROJECTS_BODY, PROJECTS_STATUS]).await;

    if let Some(listing) = page.listing() {
        println!("{}", listing.status());
        if let Some(body) = listing.body_html() {
            println!("{}", body);
        }
    }

    Ok(())
}
