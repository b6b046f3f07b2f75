use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use infoguard_core::{ScanService, UploadStore};

use crate::mprint;
use crate::terminal::print;
use crate::web::{self, AppState};

pub async fn serve(bind: SocketAddr, service: ScanService, upload_dir: &std::path::Path) -> anyhow::Result<()> {
    let uploads = UploadStore::open(upload_dir)
        .await
        .with_context(|| format!("cannot create upload directory {}", upload_dir.display()))?;

    print::aligned_line("Listening", format!("http://{bind}"));
    print::aligned_line("Uploads", uploads.root().display());
    print::aligned_line("Attempts", service.policy().attempts);
    mprint!();

    let state = Arc::new(AppState { service, uploads });
    web::serve(bind, state).await
}
