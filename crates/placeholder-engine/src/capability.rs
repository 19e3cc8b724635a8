//! What an expansion can answer.

use bitflags::bitflags;

bitflags! {
    /// Capability set declared by an expansion. Dispatch checks membership
    /// before invoking the matching entry point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Answers `%identifier_parameters%` for one optional subject.
        const STANDARD = 1 << 0;

        /// Answers `%rel_identifier_parameters%` for a pair of subjects.
        const RELATIONAL = 1 << 1;

        /// Wants to hear when a subject leaves.
        const CLEANABLE = 1 << 2;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_only() {
        let caps = Capabilities::default();
        assert!(caps.contains(Capabilities::STANDARD));
        assert!(!caps.intersects(Capabilities::RELATIONAL | Capabilities::CLEANABLE));
    }

    #[test]
    fn union_keeps_both() {
        let caps = Capabilities::STANDARD | Capabilities::RELATIONAL;
        assert!(caps.contains(Capabilities::RELATIONAL));
        assert!(!caps.contains(Capabilities::CLEANABLE));
    }
}
