//! Diagram builders and encoders
//!
//! `flowchart` holds the graph model and its Mermaid encoder. `state` adapts
//! state-machine descriptions onto that model.

pub mod flowchart;
pub mod state;

pub use flowchart::*;
pub use state::*;
