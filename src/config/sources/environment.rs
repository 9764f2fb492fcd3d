//! Environment source: LAUNCHPLAN__SECTION__KEY, e.g. LAUNCHPLAN__SCHEDULE__WINDOW_HOURS=12

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("LAUNCHPLAN")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
