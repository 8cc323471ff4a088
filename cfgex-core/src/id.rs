//! Identifier generation for pattern nodes
//!
//! Identifiers only matter for round-trip identity and error reporting; they
//! never influence compiled output.

use uuid::Uuid;

/// Source of identifiers for nodes that lack one
pub trait IdGenerator {
    /// Produce the next identifier
    fn next_id(&mut self) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Random UUID v4 identifiers (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... identifiers
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Create a generator whose identifiers start with `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        SequentialIds::new("pattern")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("node");
        assert_eq!(ids.next_id(), "node-1");
        assert_eq!(ids.next_id(), "node-2");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut ids = UuidIds;
        let first = ids.next_id();
        let second = ids.next_id();
        assert_eq!(first.len(), 36);
        assert_ne!(first, second);
    }

    #[test]
    fn test_closure_generator() {
        let mut count = 0;
        let mut ids = || {
            count += 1;
            format!("c{}", count)
        };
        assert_eq!(IdGenerator::next_id(&mut ids), "c1");
        assert_eq!(IdGenerator::next_id(&mut ids), "c2");
    }
}
