//! Human-readable rendering helpers.

pub mod colors;
pub mod detail;
pub mod table;

pub use colors::{colorize_level, colorize_tier, label};
pub use detail::DetailView;
pub use table::{list_table, render_list};
