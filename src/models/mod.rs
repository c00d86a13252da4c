// ============ Model implementations ============

pub(crate) mod bert;

// Public checkpoint selector (for builder entry points)
pub use bert::BertCheckpoint;
