// Core modules implementing the value taxonomy, both mapping
// directions, and the standalone utility collaborators.
pub mod cycle;
pub mod dump;
pub mod error;
pub mod inspect;
pub mod load;
pub mod node;
pub mod radix;
pub mod value;
