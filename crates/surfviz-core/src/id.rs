use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a registered equation.
///
/// Two registrations of the same formula get different ids; the id, not the
/// formula, decides whether a cached mesh is still current. Ids only come
/// from the process counter and cannot be built from a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EquationId(u64);

impl EquationId {
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for EquationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EquationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
