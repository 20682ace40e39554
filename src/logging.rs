use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Installs the global `fmt` subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_level`, which applies to this crate only.
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        let filter = match format!("checkout_wizard={default_level}").parse() {
            Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
            Err(_) => EnvFilter::from_default_env(),
        };

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
