pub mod export;
pub mod formatter;

pub use export::{report_to_json, write_report};
pub use formatter::{
    format_ranking, format_summaries, format_table, format_tsv, should_use_colors, CellDisplay,
};
