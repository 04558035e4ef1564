//! Unique identifier generation
//!
//! Entities that need a default name (copied nodes and styles, unnamed
//! subgraphs) draw one from an [`IdGenerator`].

use std::sync::atomic::{AtomicUsize, Ordering};

/// Produces `<stub>_0`, `<stub>_1`, ... without ever repeating a value
///
/// The counter is atomic so generators can live in a `static`.
#[derive(Debug)]
pub struct IdGenerator {
    stub: &'static str,
    next: AtomicUsize,
}

impl IdGenerator {
    /// Create a generator for the given prefix
    pub const fn new(stub: &'static str) -> Self {
        Self {
            stub,
            next: AtomicUsize::new(0),
        }
    }

    /// The prefix every identifier starts with
    pub fn stub(&self) -> &'static str {
        self.stub
    }

    /// Return the next identifier in the sequence
    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}", self.stub, n)
    }
}

impl Iterator for &IdGenerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_id())
    }
}

pub(crate) static NODE_IDS: IdGenerator = IdGenerator::new("node");
pub(crate) static CLASS_IDS: IdGenerator = IdGenerator::new("class");
pub(crate) static LINK_IDS: IdGenerator = IdGenerator::new("link");
pub(crate) static SUBGRAPH_IDS: IdGenerator = IdGenerator::new("subgraph");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequence_starts_at_zero() {
        let ids = IdGenerator::new("n");
        assert_eq!(ids.next_id(), "n_0");
        assert_eq!(ids.next_id(), "n_1");
        assert_eq!(ids.stub(), "n");
    }

    #[test]
    fn test_ids_are_pairwise_distinct() {
        let ids = IdGenerator::new("state");
        let seen: HashSet<String> = (&ids).take(500).collect();
        assert_eq!(seen.len(), 500);
    }

    #[test]
    fn test_instances_have_independent_sequences() {
        let a = IdGenerator::new("a");
        let b = IdGenerator::new("a");
        assert_eq!(a.next_id(), b.next_id());
    }
}
