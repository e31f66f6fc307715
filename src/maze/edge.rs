use super::cell::CellId;

/// Candidate wall between two adjacent cells, weighted once at build time.
/// The pair is unordered; immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: CellId,
    pub b: CellId,
    pub weight: u8,
}

impl Edge {
    pub(crate) fn new(a: CellId, b: CellId, weight: u8) -> Self {
        Edge { a, b, weight }
    }

    /// The endpoint that is not `id`. Callers must pass one of the two
    /// endpoints.
    pub fn other(&self, id: CellId) -> CellId {
        if self.a == id { self.b } else { self.a }
    }
}
