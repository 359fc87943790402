//! Reply surface of the surrounding chat system.

/// Where resolver output goes.
///
/// The five resolver entry points are side-effecting: they never return
/// report text, they push it through this sink. Every invocation produces
/// exactly one user-visible `say` with the final report or error text, and
/// every failure additionally goes verbatim to `monitoring_say`.
pub trait OutputSink: Send + Sync {
    /// Reply to the requesting user.
    fn say(&self, message: &str);

    /// Post to the monitoring/diagnostic channel.
    fn monitoring_say(&self, message: &str);

    /// Attach a larger payload as a named file snippet.
    fn snippet(&self, intro: &str, filename: &str, payload: &str);
}
