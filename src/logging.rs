// Logger setup for the sketch window. Modules only use the `log` macros;
// this file decides what reaches stderr.

use std::sync::Once;

use env_logger::{Builder, WriteStyle};

/// Our own crate at info, dependencies (minifb, png) only when they warn.
pub const DEFAULT_FILTER: &str = "warn,laser_sketch=info";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `--log` value, `env_logger` syntax ("laser_sketch::trace=debug").
    pub filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: None, write_style: WriteStyle::Auto }
    }
}

/// `--log` beats `RUST_LOG`, which beats [`DEFAULT_FILTER`].
fn resolve_filter(flag: Option<String>, env: Option<String>) -> String {
    flag.or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

static INIT: Once = Once::new();

/// Install the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.filter, std::env::var("RUST_LOG").ok());
        Builder::new()
            .parse_filters(&filter)
            .format_timestamp_millis()
            .format_target(false)
            .write_style(config.write_style)
            .init();
        log::debug!("log filter: {filter}");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_environment() {
        let f = resolve_filter(Some("laser_sketch=debug".into()), Some("trace".into()));
        assert_eq!(f, "laser_sketch=debug");
        assert_eq!(resolve_filter(None, Some("trace".into())), "trace");
    }

    #[test]
    fn blank_or_missing_filter_uses_default() {
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(Some("  ".into()), None), DEFAULT_FILTER);
    }
}
