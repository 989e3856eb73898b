//! braid — persistent rope core.
//!
//! A rope is a balanced multiway tree storing an ordered sequence. Nodes are
//! immutable and reference-counted, so any number of snapshots may share the
//! same subtrees; the mutation layer that builds trees allocates replacement
//! nodes along the affected spine instead of touching shared storage. This
//! crate is the read side of that arrangement: multi-level position paths,
//! reusable position handles, root-to-leaf resolution, and ordered
//! iteration.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`path`] | [`Path`]: multi-level position coordinates |
//! | [`node`] | [`Node`]: immutable inner/leaf tree nodes |
//! | [`index`] | [`RopeIndex`]: path plus cached-leaf position handles |
//! | [`rope`] | [`Rope`]: snapshots, positioned lookup, path stepping |
//! | [`iter`] | [`RopeIter`]: bidirectional cursor and `Iterator` impl |
//! | [`print`] | debug rendering of tree structure |

pub mod index;
pub mod iter;
pub mod node;
pub mod path;
pub mod print;
pub mod rope;

pub use index::{PositionError, RopeIndex};
pub use iter::RopeIter;
pub use node::{InnerNode, LeafNode, Node, MAX_CHILDREN, MIN_CHILDREN};
pub use path::Path;
pub use rope::Rope;

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
