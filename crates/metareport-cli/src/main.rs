use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use metareport_core::Platform;
use tracing_subscriber::EnvFilter;

mod report;
mod sync;


use report::{parse_edit, ReachEdit};

#[derive(Debug, Parser)]
#[command(name = "metareport-cli")]
#[command(about = "Weekly Facebook and Instagram post reporting")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print platform stats, rankings and aggregated KPIs
    Report {
        #[command(flatten)]
        input: ReportInput,
        /// Print the full report snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the CSV export
    Export {
        #[command(flatten)]
        input: ReportInput,
        /// Output file (defaults to meta_report_split_<start>_<end>.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Correct one post's reach and show the aggregated row before and after
    Correct {
        #[command(flatten)]
        input: ReportInput,
        /// Platform of the post (facebook|fb|instagram|ig)
        #[arg(long)]
        platform: Platform,
        /// Post ID as it appears in the export
        #[arg(long)]
        post_id: String,
        /// Corrected reach value
        #[arg(long)]
        reach: String,
    },
    /// Push the week's data to the ledger spreadsheet
    Sync {
        #[command(flatten)]
        input: ReportInput,
        #[command(flatten)]
        sync: SyncArgs,
    },
}

/// Record bundle plus the manual adjustments applied on top of it.
#[derive(Debug, Args)]
struct ReportInput {
    /// JSON record bundle (period, facebook_posts, instagram_posts, instagram_stories)
    #[arg(long)]
    records: PathBuf,
    /// Manual Facebook story overlay (YAML); falls back to METAREPORT_OVERLAY_PATH
    #[arg(long)]
    overlay: Option<PathBuf>,
    /// Facebook story reach typed in by hand; overrides the overlay file
    #[arg(long)]
    fb_story_reach: Option<String>,
    /// Facebook story interactions typed in by hand; overrides the overlay file
    #[arg(long)]
    fb_story_interactions: Option<String>,
    /// Reach correction, repeatable: <platform>:<post_id>=<reach>
    #[arg(long = "edit", value_parser = parse_edit)]
    edits: Vec<ReachEdit>,
}

#[derive(Debug, Args)]
struct SyncArgs {
    /// Week label (defaults to e.g. "13th Jan - 19th Jan" from the period)
    #[arg(long)]
    week_label: Option<String>,
    /// Date range text for the overall sheet (defaults to the report period)
    #[arg(long)]
    date_range: Option<String>,
    /// Facebook stories JSON file from the parser tool
    #[arg(long)]
    fb_stories: Option<PathBuf>,
    /// Instagram follower count, passed through as typed
    #[arg(long, default_value = "")]
    ig_followers: String,
    /// Facebook follower count, passed through as typed
    #[arg(long, default_value = "")]
    fb_followers: String,
    /// Print the payload and the resulting sheet rows without posting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = metareport_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Report { input, json }) => report::run_report(&config, &input, json)?,
        Some(Commands::Export { input, out }) => {
            report::run_export(&config, &input, out.as_deref())?;
        }
        Some(Commands::Correct {
            input,
            platform,
            post_id,
            reach,
        }) => report::run_correct(&config, &input, platform, &post_id, &reach)?,
        Some(Commands::Sync { input, sync }) => sync::run_sync(&config, &input, &sync).await?,
        None => println!("metareport-cli: run with --help for commands"),
    }

    Ok(())
}
