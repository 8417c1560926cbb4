//! Filesystem layer: input traversal and graded output placement.

mod error;
pub mod place;
pub mod walk;

pub use error::StoreError;
pub use place::{OutputTree, Placement};
pub use walk::source_files;
