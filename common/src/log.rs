//! Logging targets and macros understood by the CLI formatter.

/// Target used for messages reporting a completed step.
pub const SUCCESS_TARGET: &str = "infoguard::success";

/// Target used for raw terminal output that bypasses level symbols.
pub const PRINT_TARGET: &str = "infoguard::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}
