//! Command-line interface for the workflow catalog.

pub mod commands;
pub mod context;
pub mod display;
pub mod output;
pub mod types;

pub use context::{AppContext, GlobalOptions};
pub use types::{Cli, Commands};

/// Print a terminal error and exit non-zero.
///
/// In JSON mode the error goes to stdout as `{"error": ..., "causes": [...]}`
/// so scripted callers always get a parseable document.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    tracing::debug!(error = ?err, "Command failed");
    if json_mode {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": causes,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
        );
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }
    std::process::exit(1)
}
