use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info";

/// Installs the stderr subscriber, filtered by `RUST_LOG` when it is set.
pub(crate) fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// Filter for the given directives; absent, blank or malformed ones fall back to `info`.
fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn bare_level_directive_is_honoured() {
        assert_eq!(filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn crate_directive_is_honoured() {
        assert_eq!(
            filter(Some("vision_curse_world=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn missing_directives_default_to_info() {
        assert_eq!(filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
