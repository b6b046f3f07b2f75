pub mod report;
pub mod serve;
pub mod submit;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use infoguard_common::config::Config;

#[derive(Parser)]
#[command(name = "infoguard")]
#[command(about = "Check files and URLs against the InfoGuard scanning service.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory where uploads are stored before submission
    #[arg(long, global = true)]
    pub upload_dir: Option<PathBuf>,

    /// Number of report requests before giving up
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web frontend
    #[command(alias = "s")]
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },
    /// Submit a local file and print its report
    #[command(alias = "f")]
    File { path: PathBuf },
    /// Submit a URL and print its report
    #[command(alias = "u")]
    Url { url: String },
    /// Fetch the report of a previously submitted resource
    #[command(alias = "r")]
    Report {
        resource: String,
        /// The resource came from a URL submission
        #[arg(long)]
        url: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Applies command line overrides on top of the environment configuration.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(dir) = &self.upload_dir {
            cfg.upload_dir = dir.clone();
        }
        if let Some(attempts) = self.attempts {
            cfg.report_policy.attempts = attempts;
        }
    }
}
