pub mod dom;
pub mod memory;

pub use dom::{DomAccess, DomError};
pub use memory::{ElementSpec, InMemoryDom, NodeId};
