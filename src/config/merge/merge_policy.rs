//! Merge rules: defaults, override order, conflict handling.

use crate::branch::dates::DEFAULT_DATE_FORMAT;
use crate::branch::tracker::DEFAULT_TRACKER_URL;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones key by key: defaults, then the
/// global or explicit file, then the environment.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("brstatus.max_width", 45)?
        .set_default("brstatus.date_format", DEFAULT_DATE_FORMAT)?
        .set_default("brstatus.tracker_url", DEFAULT_TRACKER_URL)?
        .set_default("brstatus.timeout_secs", 30)?
        .set_default("compare.show_file_name", true)
}
