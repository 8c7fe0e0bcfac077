/// Pairwise palette distance matrix
pub mod distances;
/// Grid positions and neighbor lookup
pub mod grid;
/// Remaining-candidate tracking during sequencing
pub mod pool;
/// Start selection and greedy neighbor-aware ordering
pub mod sequencer;
