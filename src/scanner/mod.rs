pub mod exclusion;
pub mod walker;

pub use exclusion::ExclusionSet;
pub use walker::{ChildEntry, DirectoryWalker, TraversalNode, Walk};
