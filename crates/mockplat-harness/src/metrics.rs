//! Structured metric events.
//!
//! Kept to plain `tracing` events; a subscriber in the binary decides where
//! they go.

pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::span!(tracing::Level::TRACE, "mockplat", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, %v, "metric");
    }
}
