//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for call targets in return positions (usually <4 per function).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
