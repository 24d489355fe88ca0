pub mod formatter;

pub use formatter::{
    format_recommendation, format_share, format_supplier_detail, format_supplier_table, format_tsv,
    should_use_colors,
};
