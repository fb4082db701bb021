//! Ledger sync command handler.

use metareport_core::{AppConfig, FacebookStory};
use metareport_engine::{build_sync_payload, parse_facebook_stories, week_label, FollowerCounts};
use metareport_ledger::{write_sync, MemoryLedger, ScriptClient, SectionStatus};

use crate::report::build_session;
use crate::{ReportInput, SyncArgs};

/// Reads the Facebook stories file. No file means no stories this week.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// story rows. The sync must not go ahead in that case.
fn load_facebook_stories(args: &SyncArgs) -> anyhow::Result<Vec<FacebookStory>> {
    let raw = match &args.fb_stories {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to read Facebook stories {}: {e}", path.display())
        })?,
        None => String::new(),
    };
    parse_facebook_stories(&raw)
        .map_err(|e| anyhow::anyhow!("aborting sync: Facebook stories data is invalid: {e}"))
}

/// Builds the sync payload from the current report and sends it.
///
/// With `--dry-run` the payload is printed and written to an in-memory
/// ledger instead, so the resulting sheet rows can be inspected.
///
/// # Errors
///
/// Returns an error if the report cannot be built, the Facebook stories data
/// is malformed, the script URL is missing, or the push fails.
pub(crate) async fn run_sync(
    config: &AppConfig,
    input: &ReportInput,
    args: &SyncArgs,
) -> anyhow::Result<()> {
    let facebook_stories = load_facebook_stories(args)?;
    let session = build_session(config, input)?;
    let report = session.report();

    let label = args
        .week_label
        .clone()
        .unwrap_or_else(|| week_label(report.period.start, report.period.end));
    let date_range = args
        .date_range
        .clone()
        .unwrap_or_else(|| report.period.to_string());
    let followers = FollowerCounts {
        instagram: args.ig_followers.clone(),
        facebook: args.fb_followers.clone(),
    };

    let payload = build_sync_payload(
        report,
        report.facebook_overlay.as_ref(),
        facebook_stories,
        followers,
        &label,
        &date_range,
    );

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        let mut ledger = MemoryLedger::new();
        let outcome = write_sync(&mut ledger, &payload);
        println!();
        print!("{}", ledger.render());
        for (section, status) in &outcome.sections {
            let line = match status {
                SectionStatus::Written { rows } => format!("{rows} rows"),
                SectionStatus::Skipped => "skipped (empty)".to_string(),
                SectionStatus::Failed(e) => format!("failed: {e}"),
            };
            println!("{section}: {line}");
        }
        println!("dry-run: nothing was sent");
        return Ok(());
    }

    let url = config.require_script_url()?;
    let client = ScriptClient::new(url, config.sync_timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build ledger client: {e}"))?
        .with_retry(config.sync_max_retries, config.sync_retry_backoff_ms);

    let response = client.push(&payload).await?;
    println!(
        "synced {label}: {} ({})",
        response.status,
        if response.message.is_empty() {
            "no message"
        } else {
            response.message.as_str()
        }
    );
    Ok(())
}
