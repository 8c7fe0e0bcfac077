use bitvec::prelude::*;
use std::fmt;

/// Set of candidates not yet placed in the sequence
///
/// Candidates are identified by their input index and always iterate in
/// ascending input order, which is the order ties are broken in.
#[derive(Clone, Debug)]
pub struct CandidatePool {
    placed: BitVec,
}

impl CandidatePool {
    /// Create a pool holding candidates `0..len`
    pub fn new(len: usize) -> Self {
        Self {
            placed: bitvec![0; len],
        }
    }

    /// Remove a candidate from the pool
    ///
    /// Returns false if it was already taken or is out of range.
    pub fn take(&mut self, index: usize) -> bool {
        if self.contains(index) {
            self.placed.set(index, true);
            true
        } else {
            false
        }
    }

    /// Test candidate membership
    pub fn contains(&self, index: usize) -> bool {
        self.placed.get(index).as_deref() == Some(&false)
    }

    /// Test if every candidate has been taken
    pub fn is_empty(&self) -> bool {
        self.placed.all()
    }

    /// Number of remaining candidates
    pub fn remaining(&self) -> usize {
        self.placed.count_zeros()
    }

    /// Remaining candidates in input order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.placed.iter_zeros()
    }
}

impl fmt::Display for CandidatePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CandidatePool({} remaining: {:?})",
            self.remaining(),
            self.iter().collect::<Vec<_>>()
        )
    }
}
