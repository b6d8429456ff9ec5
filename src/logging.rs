//! Console logging.
//!
//! Configure via the RUST_LOG environment variable, e.g.
//! `RUST_LOG=notepad_core=debug`. Without it the level comes from `-v` flags.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    // A second init (tests, embedding) is harmless.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
