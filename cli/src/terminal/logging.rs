use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use infoguard_common::log::{PRINT_TARGET, SUCCESS_TARGET};

use crate::terminal::spinner::SpinnerWriter;

const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(InfoguardFormatter)
        .with_writer(|| SpinnerWriter)
        .init();
}

pub struct InfoguardFormatter;

impl<S, N> FormatEvent<S, N> for InfoguardFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() != PRINT_TARGET {
            let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
                if meta.target() == SUCCESS_TARGET {
                    ("[+]", |s| s.green().bold())
                } else {
                    match *meta.level() {
                        Level::TRACE => ("[ ]", |s| s.dimmed()),
                        Level::DEBUG => ("[?]", |s| s.blue()),
                        Level::INFO => ("[*]", |s| s.cyan().bold()),
                        Level::WARN => ("[!]", |s| s.yellow().bold()),
                        Level::ERROR => ("[-]", |s| s.red().bold()),
                    }
                };

            write!(writer, "{} ", color_func(symbol.into()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
