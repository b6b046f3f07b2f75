use infoguard_common::scan::{ScanHandle, ScanKind, Submission};
use infoguard_core::ScanService;

use crate::terminal::{print, spinner};

pub async fn report(resource: String, kind: ScanKind, service: &ScanService) -> anyhow::Result<()> {
    let submission = Submission { handle: ScanHandle::from(resource), kind };
    print::submission(&submission);

    let report = {
        let _spinner = spinner::start("Fetching the scan report...");
        service.report(&submission).await?
    };

    print::report_summary(&report);
    print::fat_separator();
    print::report_json(&report)
}
