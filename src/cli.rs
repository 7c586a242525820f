//! CLI domain: parse, route, output, and presentation only.
//! Domain work lives in `reconcile` and `branch`.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{BrstatusCli, CommonArgs, CompareCli};
pub use presentation::{
    format_compare_json, format_compare_report, format_compare_text, MISSING_FROM_DB_HEADER,
    MISSING_FROM_DIRECTORY_HEADER,
};
pub use route::{logging_config, RunContext};
