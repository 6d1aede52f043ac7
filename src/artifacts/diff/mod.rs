//! Positional comparison of two snapshots
//!
//! Like the merge engine, the comparison is position-indexed: line `n` of one
//! snapshot is only ever compared with line `n` of the other.

pub mod comparison;
