use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "quest_engine=debug,wgpu_core=warn"). When unset, `RUST_LOG` is consulted
/// before falling back to [`DEFAULT_FILTER`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Info for our crates; the GPU stack is noisy below warn.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized (filter: {filter})");
    });
}

/// First non-blank of `explicit` and `from_env`, else [`DEFAULT_FILTER`].
fn resolve_filter(explicit: Option<String>, from_env: Option<String>) -> String {
    let non_blank = |f: &String| !f.trim().is_empty();
    explicit
        .filter(non_blank)
        .or_else(|| from_env.filter(non_blank))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let f = resolve_filter(Some("debug".into()), Some("warn".into()));
        assert_eq!(f, "debug");
    }

    #[test]
    fn env_filter_used_when_no_explicit() {
        assert_eq!(resolve_filter(None, Some("warn".into())), "warn");
    }

    #[test]
    fn blank_falls_back_to_default() {
        assert_eq!(resolve_filter(None, Some("  ".into())), DEFAULT_FILTER);
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
    }

    #[test]
    fn blank_explicit_filter_defers_to_env() {
        assert_eq!(resolve_filter(Some("".into()), Some("warn".into())), "warn");
        assert_eq!(resolve_filter(Some(" ".into()), None), DEFAULT_FILTER);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("trace".into()),
            ..LoggingConfig::default()
        });
    }
}
