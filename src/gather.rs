//! Best-effort results for the data-gathering phase.

/// A value produced by a gathering step, plus whatever went wrong on the way.
///
/// Gathering steps never fail outright: a broken git query, an unreadable
/// file, or a missing directory degrades to an empty or default value and a
/// diagnostic. The update aggregates the diagnostics and logs them once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gathered<T> {
    /// The (possibly partial or default) result.
    pub value: T,
    /// Human-readable warnings collected while producing `value`.
    pub diagnostics: Vec<String>,
}

impl<T> Gathered<T> {
    /// A result with no diagnostics.
    pub fn ok(value: T) -> Self {
        Self { value, diagnostics: Vec::new() }
    }

    /// A fallback result carrying one diagnostic.
    pub fn degraded(value: T, diagnostic: impl Into<String>) -> Self {
        Self { value, diagnostics: vec![diagnostic.into()] }
    }

    /// Adds a diagnostic.
    pub fn warn(&mut self, diagnostic: impl Into<String>) {
        self.diagnostics.push(diagnostic.into());
    }

    /// Moves the diagnostics into `sink` and returns the value.
    pub fn drain_into(self, sink: &mut Vec<String>) -> T {
        sink.extend(self.diagnostics);
        self.value
    }

    /// Returns `true` if nothing went wrong.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
