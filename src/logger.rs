use std::io;

use tracing::Level;
use tracing_subscriber::{filter::Targets, fmt::writer::BoxMakeWriter, prelude::*, Registry};

// Library and binary share this crate name
const LIB_TARGET: &str = "mlq_sim";

/// `-v` repetitions win over the configured level.
pub fn level_for(verbose: u8, configured: &str) -> Level {
    match verbose {
        0 => configured.parse().unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn install(level: Level) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(BoxMakeWriter::new(io::stderr))
        .with_target(false)
        .with_filter(Targets::new().with_target(LIB_TARGET, level));

    Registry::default().with(fmt_layer).init();
}
