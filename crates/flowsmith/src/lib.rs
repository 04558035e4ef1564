//! Flowsmith - Build Mermaid flowcharts from Rust
//!
//! A library for assembling flowchart graphs (nodes, edges, classes, subgraphs,
//! init directives) and encoding them as Mermaid flowchart text. A state-machine
//! adapter turns statechart-style JSON into a styled flowchart.
//!
//! # Quick Start
//!
//! ```rust
//! use flowsmith::render_state_machine;
//!
//! let json = r#"{"id": "door", "states": {"open": {"on": {"CLOSE": "closed"}}, "closed": {}}}"#;
//! let text = render_state_machine(json, None).unwrap();
//! assert!(text.contains("open[open] --> closed[closed]"));
//! ```
//!
//! # Building graphs directly
//!
//! ```rust
//! use flowsmith::prelude::*;
//!
//! let chart = FlowChart::new();
//! chart.direction(Direction::LeftRight).connect("Home", "About", 0);
//!
//! assert_eq!(chart.node_count(), 2);
//! assert_eq!(chart.render(), "flowchart LR\nhome[Home] --> about[About]");
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ArrowStyle, Curve, DiagramError, Direction, FlowchartOption, LineStyle, Renderer, Result,
        Shape,
    };
    pub use crate::plugins::flowchart::{
        ClassStyle, Directive, Edge, FlowChart, FlowchartRenderer, LinkStyle, Node,
    };
    pub use crate::plugins::state::{
        StateMachine, StateMachineRenderer, StateNode, StyleRule, StyleTable, Transition,
    };
}

/// Render state-machine JSON to Mermaid flowchart text
///
/// `styles` is an optional style-table JSON document; the built-in table is
/// used when it is `None`.
///
/// # Example
/// ```rust
/// use flowsmith::render_state_machine;
///
/// let styles = r##"{"busy": {"style": {"fill": "#ff0"}, "shape": "hexagon"}}"##;
/// let json = r#"{"id": "job", "states": {"run": {"tags": "busy"}}}"#;
/// let text = render_state_machine(json, Some(styles)).unwrap();
/// assert!(text.contains("run{{run}}"));
/// assert!(text.contains("class run busy"));
/// ```
pub fn render_state_machine(machine: &str, styles: Option<&str>) -> Result<String> {
    use crate::plugins::state::{render_machine, StateMachine, StyleTable};

    let machine = StateMachine::from_json(machine)?;
    let table = match styles {
        Some(json) => StyleTable::from_json(json)?,
        None => StyleTable::default(),
    };
    render_machine(&machine, &table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_state_machine_default_table() {
        let json = r#"{"id": "job", "states": {"done": {"type": "final"}}}"#;
        let text = render_state_machine(json, None).unwrap();
        assert!(text.contains("done(((done)))"));
        assert!(text.contains("class done final"));
    }

    #[test]
    fn test_render_state_machine_bad_machine() {
        let err = render_state_machine("not json", None).unwrap_err();
        assert!(matches!(err, DiagramError::Json { .. }));
    }

    #[test]
    fn test_render_state_machine_bad_styles() {
        let json = r#"{"id": "job"}"#;
        assert!(render_state_machine(json, Some("[1, 2]")).is_err());
    }

    #[test]
    fn test_custom_table_replaces_default() {
        let json = r#"{"id": "job", "states": {"done": {"type": "final"}}}"#;
        let text = render_state_machine(json, Some("{}")).unwrap();
        assert!(text.contains("done[done]"));
        assert!(!text.contains("classDef"));
    }
}
