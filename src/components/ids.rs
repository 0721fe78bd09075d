//! Per-family identifier allocation.
//!
//! circuitikz refuses two nodes with the same name, so every multi-terminal
//! symbol gets a numbered anchor (`Q1`, `opamp2`, ...). Each family keeps its
//! own counter; numbers are never handed out twice while a document lives.

use std::collections::HashSet;

use log::debug;

/// A group of kinds sharing one counter and one anchor prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// BJTs, MOSFETs and IGBTs
    TransistorLike,
    /// 3/5-terminal, fully differential and transconductance amplifiers
    OpAmp,
    Transformer,
    Buffer,
    /// Generic and signal-chain blocks
    Block,
    Mixer,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::TransistorLike,
        Family::OpAmp,
        Family::Transformer,
        Family::Buffer,
        Family::Block,
        Family::Mixer,
    ];

    /// Prefix of the anchor name in emitted code.
    pub fn anchor_prefix(self) -> &'static str {
        match self {
            Family::TransistorLike => "Q",
            Family::OpAmp => "opamp",
            Family::Transformer => "T",
            Family::Buffer => "buffer",
            Family::Block => "block",
            Family::Mixer => "mixer",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Monotonic counters, one per [`Family`], each starting at 1.
///
/// Every identifier handed out or claimed is remembered, so a number is
/// never issued twice even when saved files carry their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierAllocator {
    counters: [u32; 6],
    taken: HashSet<(Family, u32)>,
}

impl IdentifierAllocator {
    pub fn new() -> Self {
        Self {
            counters: [1; 6],
            taken: HashSet::new(),
        }
    }

    /// Return the current value for `family` and advance it.
    ///
    /// Once the counter is exhausted the lowest free identifier is used.
    pub fn next(&mut self, family: Family) -> u32 {
        let slot = family.index();
        let current = self.counters[slot];
        let id = if self.is_taken(family, current) {
            self.lowest_free(family)
        } else {
            current
        };
        self.counters[slot] = current.saturating_add(1);
        self.taken.insert((family, id));
        debug!("allocated {}{}", family.anchor_prefix(), id);
        id
    }

    /// The value the next call to [`next`](Self::next) would return,
    /// unless the family's counter is exhausted.
    pub fn peek(&self, family: Family) -> u32 {
        self.counters[family.index()]
    }

    /// Whether `id` has already been issued or claimed in `family`.
    pub fn is_taken(&self, family: Family, id: u32) -> bool {
        self.taken.contains(&(family, id))
    }

    /// Record an identifier restored from a saved file so it is never
    /// handed out again. Returns `false`, leaving the allocator untouched,
    /// for 0 and for identifiers already in use.
    pub fn claim(&mut self, family: Family, id: u32) -> bool {
        if id == 0 || !self.taken.insert((family, id)) {
            return false;
        }
        let counter = &mut self.counters[family.index()];
        *counter = (*counter).max(id.saturating_add(1));
        true
    }

    /// Put every counter back to 1 and forget all issued identifiers.
    pub fn reset_all(&mut self) {
        debug!("identifier counters reset");
        self.counters = [1; 6];
        self.taken.clear();
    }

    fn lowest_free(&self, family: Family) -> u32 {
        (1..=u32::MAX)
            .find(|&id| !self.is_taken(family, id))
            .unwrap_or(u32::MAX)
    }
}

impl Default for IdentifierAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_one_and_increase() {
        let mut ids = IdentifierAllocator::new();
        let got: Vec<u32> = (0..4).map(|_| ids.next(Family::TransistorLike)).collect();
        assert_eq!(got, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_families_are_independent() {
        let mut ids = IdentifierAllocator::new();
        ids.next(Family::TransistorLike);
        ids.next(Family::TransistorLike);
        assert_eq!(ids.next(Family::OpAmp), 1);
        assert_eq!(ids.peek(Family::TransistorLike), 3);
        assert_eq!(ids.peek(Family::Mixer), 1);
    }

    #[test]
    fn test_reset_all() {
        let mut ids = IdentifierAllocator::new();
        for family in Family::ALL {
            ids.next(family);
            ids.next(family);
        }
        ids.reset_all();
        for family in Family::ALL {
            assert_eq!(ids.next(family), 1);
        }
    }

    #[test]
    fn test_claim_only_moves_forward() {
        let mut ids = IdentifierAllocator::new();
        assert!(ids.claim(Family::Block, 4));
        assert_eq!(ids.peek(Family::Block), 5);
        assert!(ids.claim(Family::Block, 2));
        assert_eq!(ids.next(Family::Block), 5);
    }

    #[test]
    fn test_claim_rejects_zero_and_duplicates() {
        let mut ids = IdentifierAllocator::new();
        assert_eq!(ids.next(Family::TransistorLike), 1);
        assert!(!ids.claim(Family::TransistorLike, 1));
        assert!(!ids.claim(Family::TransistorLike, 0));
        assert!(ids.claim(Family::TransistorLike, 3));
        assert!(!ids.claim(Family::TransistorLike, 3));
        // other families keep their own numbers
        assert!(ids.claim(Family::OpAmp, 1));
        assert_eq!(ids.next(Family::TransistorLike), 4);
    }

    #[test]
    fn test_exhausted_counter_falls_back_to_free_ids() {
        let mut ids = IdentifierAllocator::new();
        ids.next(Family::Mixer);
        assert!(ids.claim(Family::Mixer, u32::MAX));
        assert_eq!(ids.peek(Family::Mixer), u32::MAX);

        assert_eq!(ids.next(Family::Mixer), 2);
        assert_eq!(ids.next(Family::Mixer), 3);
        assert!(ids.is_taken(Family::Mixer, u32::MAX));
    }

    #[test]
    fn test_reset_forgets_claims() {
        let mut ids = IdentifierAllocator::new();
        assert!(ids.claim(Family::Buffer, 2));
        ids.reset_all();
        assert!(!ids.is_taken(Family::Buffer, 2));
        assert!(ids.claim(Family::Buffer, 2));
    }
}
