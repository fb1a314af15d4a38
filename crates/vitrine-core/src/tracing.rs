use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured stdout tracing. Call once at service startup.
///
/// `json = true` selects newline-delimited JSON (production); otherwise the
/// human-readable compact format. The filter comes from `RUST_LOG`.
///
/// Safe to call multiple times — subsequent calls are silently ignored.
pub fn init_tracing(json: bool) {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if json {
        let _ = registry.with(fmt::layer().json()).try_init();
    } else {
        let _ = registry.with(fmt::layer().compact()).try_init();
    }
}
