//! Graph containers.
//!
//! `DirectedGraph` is the engine every algorithm in this crate runs on.
//! `UndirectedGraph` is a plain container, and `AnyGraph` holds whichever
//! kind a caller has loaded so direction-only operations can be refused.

mod any;
mod directed;
mod edge;
mod error;
mod undirected;

pub use any::{AnyGraph, GraphKind, OwnedEdge};
pub use directed::DirectedGraph;
pub use edge::{Direction, Edge, EdgeIter, EdgeView, Weight, DEFAULT_WEIGHT};
pub use error::{GraphError, GraphResult};
pub use undirected::UndirectedGraph;
