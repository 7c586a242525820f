//! Environment source: MOODLE_TOOLS__<SECTION>__<KEY>, e.g. MOODLE_TOOLS__BRSTATUS__MAX_WIDTH=60

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "MOODLE_TOOLS";
pub const ENV_SEPARATOR: &str = "__";

/// Add the environment as the highest-priority source.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .list_separator(",")
            .with_list_parse_key("brstatus.columns")
            .try_parsing(true),
    )
}
