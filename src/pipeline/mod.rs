/// Batch extraction, sequencing and the `reorder_by_color` entry point
pub mod orchestrator;
