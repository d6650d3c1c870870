//! Optional tracing bootstrap for consumers that want breadcrumbs.
//!
//! Nothing in the scanner, parser, or resolver requires a subscriber to be
//! installed — `tracing` calls are no-ops without one. This helper exists for
//! test harnesses and embedding applications that want `RUST_LOG`-controlled
//! output without duplicating the same `tracing_subscriber::fmt()` dance in
//! every crate.

#[cfg(feature = "logging-init")]
pub fn init_from_env(default_filter: &str) {
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
