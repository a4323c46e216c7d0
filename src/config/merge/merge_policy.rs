//! Merge rules: defaults, override order, conflict handling.
//!
//! Sources are layered in this order, later ones winning key by key:
//! defaults, global config file (or an explicit `--config` file), then
//! `GROUPIE_*` environment variables. CLI flags are applied by the caller
//! after loading.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("storage.lock", true)?
        .set_default("display.color", true)?
        .set_default("display.show_hidden", false)
}
