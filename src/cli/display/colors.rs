//! Level and tier color mapping for CLI output.
//!
//! `console` disables styling when stdout is not a terminal or `NO_COLOR` is set.

use console::{style, StyledObject};

use crate::domain::models::{AutomationCategory, GEM_TIER};

/// Colored automation level.
///
/// HITL = yellow, Triggered = cyan, Background = green.
pub fn colorize_level(level: AutomationCategory) -> StyledObject<&'static str> {
    let text = level.as_str();
    match level {
        AutomationCategory::Hitl => style(text).yellow(),
        AutomationCategory::Triggered => style(text).cyan(),
        AutomationCategory::Background => style(text).green(),
    }
}

/// GEM = magenta bold, other premium tiers = blue, Standard = dim.
pub fn colorize_tier(tier: &str) -> StyledObject<&str> {
    match tier {
        GEM_TIER => style(tier).magenta().bold(),
        "Standard" => style(tier).dim(),
        _ => style(tier).blue(),
    }
}

/// Field label for detail views.
pub fn label(key: &str) -> String {
    style(format!("{key}:")).dim().to_string()
}
