use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use colored::*;

use infoguard_common::scan::ScanRequest;
use infoguard_common::success;
use infoguard_core::ScanService;

use crate::terminal::{print, spinner};

pub async fn file(path: &Path, service: &ScanService) -> anyhow::Result<()> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    let display_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("path does not name a file")?;

    check(ScanRequest::File { content, display_name }, service).await
}

pub async fn url(url: String, service: &ScanService) -> anyhow::Result<()> {
    check(ScanRequest::Url(url), service).await
}

async fn check(request: ScanRequest, service: &ScanService) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let kind = request.kind();

    let submission = {
        let _spinner = spinner::start(&format!("Submitting {kind} to InfoGuard..."));
        service.submit(request).await?
    };
    print::submission(&submission);

    let report = {
        let _spinner = spinner::start("Waiting for the scan report...");
        service.report(&submission).await?
    };

    let elapsed: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
    success!("Report received for {}", submission.handle);

    print::report_summary(&report);
    print::fat_separator();
    print::centerln(&format!("Check complete in {elapsed}"));
    print::report_json(&report)
}
