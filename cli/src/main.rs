mod commands;
mod terminal;
mod web;

use std::sync::Arc;

use anyhow::Context;

use commands::{CommandLine, Commands, report, serve, submit};
use infoguard_common::config::Config;
use infoguard_common::scan::ScanKind;
use infoguard_core::{ScanClient, ScanService};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();
    print::banner();

    let mut cfg = Config::from_env().context("failed to load configuration")?;
    commands.apply_to(&mut cfg);

    let client = ScanClient::from_config(&cfg);
    let service = ScanService::new(Arc::new(client), cfg.report_policy);

    match commands.command {
        Commands::Serve { bind } => {
            print::header("starting web frontend");
            serve::serve(bind, service, &cfg.upload_dir).await
        }
        Commands::File { path } => {
            print::header("file scan");
            submit::file(&path, &service).await
        }
        Commands::Url { url } => {
            print::header("url scan");
            submit::url(url, &service).await
        }
        Commands::Report { resource, url } => {
            print::header("scan report");
            let kind = if url { ScanKind::Url } else { ScanKind::File };
            report::report(resource, kind, &service).await
        }
    }
}
