//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `level` is the default filter directive; `RUST_LOG` overrides it when set.
/// `json` switches from human-readable lines to one JSON object per event.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_with("debug", true);
        init_with("not a [valid directive", false);
        crate::init();
    }
}
