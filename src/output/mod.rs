pub mod formatter;

pub use formatter::{
    format_delta, format_inactivity, format_initial_score, format_quality_report,
    format_recalc_table, format_temperature, format_tsv, should_use_colors,
};
