//! Store state markers and write policies.

/// What the order list is currently showing.
///
/// `Loading → Ready | LoadFailed`. Per-operation failures are reported as a
/// transient notice next to `Ready` and never move the list to `LoadFailed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Initial fetch in progress
    #[default]
    Loading,
    /// Orders loaded and shown
    Ready,
    /// Initial fetch failed; no orders are shown
    LoadFailed(String),
}

/// When a local change is applied relative to the remote write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Apply locally first; a remote failure does not roll back.
    Optimistic,
    /// Apply locally only after the remote write succeeded.
    Pessimistic,
}

/// Write policy per mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePolicies {
    /// Field updates (default: optimistic)
    pub update: WritePolicy,
    /// Deletes (default: pessimistic)
    pub delete: WritePolicy,
}

impl Default for WritePolicies {
    fn default() -> Self {
        Self {
            update: WritePolicy::Optimistic,
            delete: WritePolicy::Pessimistic,
        }
    }
}
