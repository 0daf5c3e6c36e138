//! The detailed run: homepage markers, bundle wiring, API smoke test.

use std::io::Write;

use anyhow::{Context, Result};

use super::{FailureStyle, ProbeContext, StepPrinter};
use crate::analysis::{classify_api_wiring, evaluate_markers, page_title, preview, ApiWiring};
use crate::analysis::{parse_transactions, Transaction};
use crate::config::{API_TRANSACTIONS_PATH, DETAILED_BANNER_WIDTH, HTML_PREVIEW_CHARS};
use crate::fetch::{extract_bundle_path, fetch_bundle, fetch_page};
use crate::report::{Line, Marker, StepReport};

const BANNER: &str = "DETAILED DEBUGGING: HalalGuard Application";
const CLOSING: &str = "DEBUGGING COMPLETE";

const WITH_TRACE: FailureStyle = FailureStyle {
    prefix: "FAILED",
    with_trace: true,
};
const NO_TRACE: FailureStyle = FailureStyle {
    prefix: "FAILED",
    with_trace: false,
};

pub(super) async fn run<W: Write>(ctx: &ProbeContext, out: &mut W) -> Result<Vec<StepReport>> {
    let mut printer = StepPrinter::start(out, BANNER, DETAILED_BANNER_WIDTH)?;

    let mut step = StepReport::new("TEST 1: Fetching Homepage HTML");
    let outcome = homepage(ctx, &mut step).await;
    printer.finish_step(step, outcome, WITH_TRACE)?;

    let mut step = StepReport::new("TEST 2: Checking Main JavaScript Bundle");
    let outcome = bundle(ctx, &mut step).await;
    printer.finish_step(step, outcome, NO_TRACE)?;

    let mut step = StepReport::new("TEST 3: Testing API Endpoint");
    let outcome = api(ctx, &mut step).await;
    printer.finish_step(step, outcome, NO_TRACE)?;

    printer.close(CLOSING)
}

/// Fetches the homepage and runs the configured marker checks against it.
pub(crate) async fn homepage(ctx: &ProbeContext, step: &mut StepReport) -> Result<()> {
    let page = fetch_page(&ctx.client, &ctx.config.origin, "/").await?;

    step.pass(format!("Status Code: {}", page.status));
    step.pass(format!(
        "Content-Type: {}",
        page.content_type.as_deref().unwrap_or("None")
    ));
    step.pass(format!("Content-Length: {} bytes", page.byte_len()));
    if let Some(title) = page_title(&page.body) {
        step.pass(format!("Page title: {title}"));
    }
    step.blank();

    step.plain("Checking critical elements:");
    for outcome in evaluate_markers(&page.body, &ctx.config.homepage_checks) {
        let marker = if outcome.passed() {
            Marker::Pass
        } else {
            Marker::Fail
        };
        step.push(Line::new(marker, outcome.describe()).indented(3));
    }
    step.blank();

    let rule = "-".repeat(DETAILED_BANNER_WIDTH);
    step.plain(format!("First {HTML_PREVIEW_CHARS} characters of HTML:"));
    step.plain(rule.clone());
    step.plain(preview(&page.body, HTML_PREVIEW_CHARS));
    step.plain(rule);
    Ok(())
}

/// Re-discovers the bundle from a fresh homepage and checks which API it targets.
///
/// Does not use `locate_bundle`: the path line must be printed before the
/// bundle fetch, so it survives a failed fetch.
pub(crate) async fn bundle(ctx: &ProbeContext, step: &mut StepReport) -> Result<()> {
    let origin = &ctx.config.origin;
    let homepage = fetch_page(&ctx.client, origin, "/").await?;

    let Some(path) = extract_bundle_path(&homepage.body) else {
        step.fail("No JS bundle path found in HTML");
        return Ok(());
    };
    step.plain(format!("Found JS bundle: {path}"));

    let bundle = fetch_bundle(&ctx.client, origin, path)
        .await
        .with_context(|| format!("fetching {path}"))?;
    step.pass(format!(
        "JS bundle loaded successfully ({} bytes)",
        bundle.page.byte_len()
    ));

    match classify_api_wiring(
        &bundle.page.body,
        &ctx.config.production_api_marker,
        &ctx.config.localhost_api_marker,
    ) {
        ApiWiring::Production => step.pass("Production API URL found in bundle"),
        ApiWiring::Localhost => step.fail("WARNING: localhost API URL found in bundle!"),
        ApiWiring::Unknown => step.warn("No API URL pattern found in bundle"),
    }
    Ok(())
}

/// Queries the transactions API and reports the first record.
pub(crate) async fn api(ctx: &ProbeContext, step: &mut StepReport) -> Result<()> {
    let page = fetch_page(&ctx.client, &ctx.config.origin, API_TRANSACTIONS_PATH).await?;
    let records = parse_transactions(&page.body)?;

    step.pass(format!("API Status: {}", page.status));
    step.pass(format!("Transactions found: {}", records.len()));
    if let Some(first) = records.first() {
        let tx = Transaction::from_record(first)?;
        step.pass(format!("First transaction ID: {}", tx.id_text()?));
        step.pass(format!(
            "Has analysis: {}",
            if tx.has_analysis() { "Yes" } else { "No" }
        ));
    }
    Ok(())
}
