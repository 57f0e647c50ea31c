use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use shared::domain::FilterSelection;
use timeline_core::{
    load_settings, HttpTimelineSource, TimelineController, TimelineSource, UnconfiguredSource,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Show your music memories as a timeline")]
struct Args {
    /// Overrides the configured API base, e.g. http://127.0.0.1:8000/api/v1
    #[arg(long)]
    api_url: Option<String>,
    /// Only show memories from this year
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    stagger_ms: Option<u64>,
    /// Print the summary dashboard instead of the timeline
    #[arg(long)]
    dashboard: bool,
    /// Print the derived view as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = Some(api_url);
    }
    if let Some(stagger_ms) = args.stagger_ms {
        settings.stagger_ms = stagger_ms;
    }

    let source: Arc<dyn TimelineSource> = match HttpTimelineSource::new(&settings) {
        Ok(source) => Arc::new(source),
        Err(error) => {
            warn!(%error, "timeline source unavailable");
            Arc::new(UnconfiguredSource)
        }
    };

    let controller = TimelineController::new(source, settings.stagger_ms);
    controller.refetch().await;
    let view = controller
        .set_filter(FilterSelection::from_year(args.year))
        .await;
    controller.teardown().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if args.dashboard {
        print!("{}", render::render_dashboard(&view));
    } else {
        print!("{}", render::render_timeline(&view));
    }

    Ok(())
}
