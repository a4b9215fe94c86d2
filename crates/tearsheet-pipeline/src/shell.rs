//! Events the import raises toward its hosting surface.

/// Lifecycle signals for whatever UI wraps an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// The import surface should be shown (`true`) or dismissed (`false`).
    ReportVisibility(bool),
}

/// Sink for [`ShellEvent`]s.
pub trait ShellNotifier {
    fn notify(&self, event: ShellEvent);
}

/// Discards every event.
pub struct NullNotifier;

impl ShellNotifier for NullNotifier {
    fn notify(&self, _event: ShellEvent) {}
}
