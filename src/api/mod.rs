//! Purpose: Define the stable public Rust API boundary for rejig.
//! Exports: Value taxonomy, load/dump operations, node inspection, and
//! the standalone cycle/radix utilities.
//! Role: Public, additive-only surface; internal module layout stays free
//! to move underneath it.
//! Invariants: This module is the only public path callers should use.

pub use crate::core::cycle::{Cycle, MAX_ITEMS};
pub use crate::core::dump::{dump, dump_json, DumpOptions};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::inspect::{detail, DEFAULT_INDENT};
pub use crate::core::load::load;
pub use crate::core::node::Node;
pub use crate::core::radix::{convert_base, MAX_RADIX};
pub use crate::core::value::{Exposed, Kind, Scalar, Value};
