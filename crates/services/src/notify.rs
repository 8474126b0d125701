/// Fire-and-forget sink for transient user feedback.
///
/// Implementations must absorb their own failures: a broken sink may drop a
/// message but must never affect navigation correctness, which is why the
/// trait is infallible.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Discards every message. Useful as a default and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}

/// Emits messages as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "academy::notify", "{message}");
    }
}
