//! State-machine adapter
//!
//! Turns a statechart-style description into a styled flowchart. Each state
//! becomes a node, each `on` transition an edge, and a [`StyleTable`] maps
//! state types and tags to classes and shapes.
//!
//! ```rust
//! use flowsmith::plugins::state::{render_machine, StateMachine, StyleTable};
//!
//! let machine = StateMachine::from_json(
//!     r#"{"id": "door", "states": {"open": {"on": {"CLOSE": "closed"}}, "closed": {}}}"#,
//! )
//! .unwrap();
//! let text = render_machine(&machine, &StyleTable::default()).unwrap();
//! assert!(text.starts_with("---\ntitle: door\n---\nflowchart TB\n"));
//! assert!(text.contains("open[open] --> closed[closed]"));
//! ```

mod adapter;
mod machine;
mod table;

pub use adapter::{build_chart, render_machine, state_node_id, title_block, StateMachineRenderer};
pub use machine::{DanglingTarget, StateMachine, StateNode, Tags, Transition};
pub use table::{StyleRule, StyleTable};
