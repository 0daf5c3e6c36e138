//! The display run: investigates why transactions may not show up in the UI.

use std::io::Write;

use anyhow::Result;

use super::{FailureStyle, ProbeContext, StepPrinter};
use crate::analysis::{inspect_bundle, parse_transactions, Transaction};
use crate::config::{API_TRANSACTIONS_PATH, DISPLAY_BANNER_WIDTH, ROOT_DIV_MARKER};
use crate::fetch::{extract_bundle_path, fetch_page, locate_bundle, BundleLookup};
use crate::report::StepReport;

const BANNER: &str = "INVESTIGATING DATA DISPLAY ISSUE";
const CLOSING: &str = "INVESTIGATION COMPLETE";

pub(super) async fn run<W: Write>(ctx: &ProbeContext, out: &mut W) -> Result<Vec<StepReport>> {
    let mut printer = StepPrinter::start(out, BANNER, DISPLAY_BANNER_WIDTH)?;

    let mut step = StepReport::new("STEP 1: Checking API Data");
    let outcome = api_data(ctx, &mut step).await;
    printer.finish_step(step, outcome, failure("Failed to fetch API data"))?;

    let mut step = StepReport::new("STEP 2: Checking Frontend HTML");
    let outcome = frontend_html(ctx, &mut step).await;
    printer.finish_step(step, outcome, failure("Failed to fetch HTML"))?;

    let mut step = StepReport::new("STEP 3: Checking JS Bundle for API Configuration");
    let outcome = bundle_config(ctx, &mut step).await;
    printer.finish_step(step, outcome, failure("Failed to check JS bundle"))?;

    let mut step = StepReport::new("STEP 4: Diagnosis & Recommendations");
    diagnosis(ctx, &mut step);
    printer.finish_step(step, Ok(()), failure("Failed to print diagnosis"))?;

    printer.close(CLOSING)
}

fn failure(prefix: &'static str) -> FailureStyle {
    FailureStyle {
        prefix,
        with_trace: false,
    }
}

/// Prints the transaction count and the first record in full.
pub(crate) async fn api_data(ctx: &ProbeContext, step: &mut StepReport) -> Result<()> {
    let page = fetch_page(&ctx.client, &ctx.config.origin, API_TRANSACTIONS_PATH).await?;
    let records = parse_transactions(&page.body)?;
    step.pass(format!("API has {} transactions", records.len()));

    let Some(first) = records.first() else {
        return Ok(());
    };
    let tx = Transaction::from_record(first)?;

    step.blank();
    step.plain("First transaction:");
    step.plain(format!("  ID: {}", tx.id_text()?));
    step.plain(format!("  Description: {}", tx.description_text()?));
    step.plain(format!("  Amount: {}", tx.amount_text()?));
    step.plain(format!(
        "  Has analysis: {}",
        if tx.has_analysis() { "Yes" } else { "No" }
    ));
    if let Some(analysis) = tx.analysis_details() {
        step.plain(format!("  Status: {}", analysis.status_text()));
        step.plain(format!("  Violation: {}", analysis.violation_text()));
    }
    Ok(())
}

/// Checks that the homepage references a bundle and has its root container.
pub(crate) async fn frontend_html(ctx: &ProbeContext, step: &mut StepReport) -> Result<()> {
    let page = fetch_page(&ctx.client, &ctx.config.origin, "/").await?;

    match extract_bundle_path(&page.body) {
        Some(path) => step.pass(format!("JS bundle: {path}")),
        None => step.fail("No JS bundle found in HTML"),
    }

    if page.body.contains(ROOT_DIV_MARKER) {
        step.pass("Root div found");
    } else {
        step.fail("Root div not found");
    }
    Ok(())
}

/// Checks the bundle's API configuration and data loading code.
pub(crate) async fn bundle_config(ctx: &ProbeContext, step: &mut StepReport) -> Result<()> {
    let bundle = match locate_bundle(&ctx.client, &ctx.config.origin).await? {
        BundleLookup::Found(bundle) => bundle,
        BundleLookup::NotFound => {
            step.fail("No JS bundle found in HTML");
            return Ok(());
        }
    };

    let findings = inspect_bundle(
        &bundle.page.body,
        &ctx.config.production_api_marker,
        &ctx.config.localhost_api_marker,
    );

    if findings.production_refs > 0 {
        step.pass("Production API URL found in bundle");
        step.plain(format!(
            "   Found {} references to API URL",
            findings.production_refs
        ));
    } else {
        step.fail("Production API URL NOT found in bundle");
    }

    if findings.localhost_ref {
        step.warn("WARNING: localhost API URL found in bundle!");
    } else {
        step.pass("No localhost references (good)");
    }

    if findings.transaction_code {
        step.pass("Transaction fetching code found");
    } else {
        step.warn("Transaction fetching code might be missing");
    }

    if findings.use_effect {
        step.pass("useEffect found (for loading data on mount)");
    } else {
        step.warn("useEffect not found");
    }
    Ok(())
}

/// Static troubleshooting advice. Not derived from the checks above.
pub(crate) fn diagnosis(ctx: &ProbeContext, step: &mut StepReport) {
    let advice = format!(
        "
Based on the tests above, here are possible issues:

1. If API has data but frontend doesn't show it:
   - Check browser console for errors
   - Verify that useEffect is running on component mount
   - Check if isLoading state is stuck on true

2. If API URL is wrong in bundle:
   - Need to rebuild frontend with correct .env.production
   - Run: cd frontend && npm run build

3. If no errors but data still not showing:
   - Check if the view is set to 'dashboard' or 'analysis'
   - Verify that data state is being updated correctly
   - Check if there's a conditional rendering issue

Next steps:
1. Open browser console at {origin}
2. Check for any JavaScript errors
3. Check Network tab for API calls to {API_TRANSACTIONS_PATH}
4. Verify that the response contains data",
        origin = ctx.config.origin
    );
    for line in advice.lines() {
        step.plain(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::report::Marker;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use url::Url;

    fn context_for(server: &Server) -> ProbeContext {
        let config = Config {
            origin: Url::parse(&server.url("/").to_string()).unwrap(),
            timeout_seconds: 5,
            ..Default::default()
        };
        ProbeContext::new(reqwest::Client::new(), config)
    }

    fn serve(server: &Server, path: &'static str, body: &'static str) {
        server.expect(
            Expectation::matching(request::method_path("GET", path))
                .times(..)
                .respond_with(status_code(200).body(body)),
        );
    }

    #[tokio::test]
    async fn test_api_data_first_transaction_details() {
        let server = Server::run();
        serve(
            &server,
            "/api/transactions",
            r#"[{"id":"t1","description":"Bunga pinjaman","amount":2500000,"analysis":{"status":"NON_COMPLIANT","violationType":"RIBA"}},{"id":"t2"}]"#,
        );
        let ctx = context_for(&server);

        let mut step = StepReport::new("STEP 1");
        api_data(&ctx, &mut step).await.unwrap();
        assert!(step.has_line(Marker::Pass, "API has 2 transactions"));
        assert!(step.has_line(Marker::Plain, "  ID: t1"));
        assert!(step.has_line(Marker::Plain, "  Description: Bunga pinjaman"));
        assert!(step.has_line(Marker::Plain, "  Amount: Rp 2,500,000"));
        assert!(step.has_line(Marker::Plain, "  Has analysis: Yes"));
        assert!(step.has_line(Marker::Plain, "  Status: NON_COMPLIANT"));
        assert!(step.has_line(Marker::Plain, "  Violation: RIBA"));
    }

    #[tokio::test]
    async fn test_api_data_missing_description_fails_after_id() {
        let server = Server::run();
        serve(&server, "/api/transactions", r#"[{"id":"t1","amount":10}]"#);
        let ctx = context_for(&server);

        let mut step = StepReport::new("STEP 1");
        let err = api_data(&ctx, &mut step).await.unwrap_err();
        assert!(err.to_string().contains("description"));
        assert!(step.has_line(Marker::Plain, "  ID: t1"));
        assert!(!step.has_line(Marker::Plain, "Amount"));
    }

    #[tokio::test]
    async fn test_frontend_html_missing_bundle_and_root() {
        let server = Server::run();
        serve(&server, "/", "<html><body><div id=\"app\"></div></body></html>");
        let ctx = context_for(&server);

        let mut step = StepReport::new("STEP 2");
        frontend_html(&ctx, &mut step).await.unwrap();
        assert!(step.has_line(Marker::Fail, "No JS bundle found in HTML"));
        assert!(step.has_line(Marker::Fail, "Root div not found"));
    }

    #[tokio::test]
    async fn test_frontend_html_complete() {
        let server = Server::run();
        serve(
            &server,
            "/",
            r#"<div id="root"></div><script type="module" src="/assets/index-9f8e.js"></script>"#,
        );
        let ctx = context_for(&server);

        let mut step = StepReport::new("STEP 2");
        frontend_html(&ctx, &mut step).await.unwrap();
        assert!(step.has_line(Marker::Pass, "JS bundle: /assets/index-9f8e.js"));
        assert!(step.has_line(Marker::Pass, "Root div found"));
    }

    #[tokio::test]
    async fn test_bundle_config_counts_references() {
        let server = Server::run();
        serve(&server, "/", r#"<script src="/assets/index-1.js"></script>"#);
        serve(
            &server,
            "/assets/index-1.js",
            "a='halal-guard.centonk.my.id/api';b='halal-guard.centonk.my.id/api';c='halal-guard.centonk.my.id/api';function getAllTransactions(){};useEffect()",
        );
        let ctx = context_for(&server);

        let mut step = StepReport::new("STEP 3");
        bundle_config(&ctx, &mut step).await.unwrap();
        assert!(step.has_line(Marker::Pass, "Production API URL found in bundle"));
        assert!(step.has_line(Marker::Plain, "Found 3 references to API URL"));
        assert!(step.has_line(Marker::Pass, "No localhost references (good)"));
        assert!(step.has_line(Marker::Pass, "Transaction fetching code found"));
        assert!(step.has_line(Marker::Pass, "useEffect found"));
    }

    #[tokio::test]
    async fn test_bundle_config_localhost_build() {
        let server = Server::run();
        serve(&server, "/", r#"<script src="/assets/index-1.js"></script>"#);
        serve(&server, "/assets/index-1.js", "fetch('http://localhost:8087/api/x')");
        let ctx = context_for(&server);

        let mut step = StepReport::new("STEP 3");
        bundle_config(&ctx, &mut step).await.unwrap();
        assert!(step.has_line(Marker::Fail, "Production API URL NOT found in bundle"));
        assert!(step.has_line(Marker::Warn, "localhost API URL found in bundle"));
        assert!(step.has_line(Marker::Warn, "Transaction fetching code might be missing"));
        assert!(step.has_line(Marker::Warn, "useEffect not found"));
    }

    #[tokio::test]
    async fn test_bundle_config_without_bundle() {
        let server = Server::run();
        serve(&server, "/", "<html></html>");
        let ctx = context_for(&server);

        let mut step = StepReport::new("STEP 3");
        bundle_config(&ctx, &mut step).await.unwrap();
        assert_eq!(step.lines.len(), 1);
        assert!(step.has_line(Marker::Fail, "No JS bundle found in HTML"));
    }

    #[test]
    fn test_diagnosis_is_static_and_uses_origin() {
        let ctx = ProbeContext::new(reqwest::Client::new(), Config::default());
        let mut step = StepReport::new("STEP 4");
        diagnosis(&ctx, &mut step);
        assert!(step.has_line(
            Marker::Plain,
            "1. Open browser console at https://halal-guard.centonk.my.id/"
        ));
        assert!(step.has_line(Marker::Plain, "Run: cd frontend && npm run build"));
        assert_eq!(step.count(Marker::Fail), 0);
        assert_eq!(step.count(Marker::Pass), 0);
    }
}
