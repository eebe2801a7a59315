//! Tracing setup shared by MCP servers
//!
//! stdout belongs to the protocol, so every log line goes to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber for an MCP server
///
/// - writes to stderr without ANSI colors
/// - honours `RUST_LOG`, adding `<crate_name>=info` as a baseline directive
/// - `LOG_FORMAT=json` switches to structured JSON lines
///
/// Call once, first thing in `main`.
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(default_directive(crate_name).parse()?);
    let registry = tracing_subscriber::registry().with(filter);

    if json_requested(std::env::var("LOG_FORMAT").ok().as_deref()) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

fn default_directive(crate_name: &str) -> String {
    format!("{}=info", crate_name.replace('-', "_"))
}

fn json_requested(log_format: Option<&str>) -> bool {
    log_format
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
