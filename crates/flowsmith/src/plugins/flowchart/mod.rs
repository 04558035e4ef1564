//! Flowchart graph model and Mermaid encoder
//!
//! Build [`Node`]s, [`Edge`]s, [`ClassStyle`]s and [`Directive`]s, attach them
//! to a [`FlowChart`], then call [`FlowChart::render`].
//!
//! ```rust
//! use flowsmith::core::{ArrowStyle, Shape};
//! use flowsmith::plugins::flowchart::{ClassStyle, Edge, FlowChart, Node};
//!
//! let start = Node::labeled("A", "Start");
//! let end = Node::labeled("B", "End");
//! end.set_shape(Shape::Round);
//!
//! let edge = Edge::new(&start, &end);
//! edge.to(&end, true, ArrowStyle::Default).set_label(Some("go"));
//!
//! let done = ClassStyle::new("done");
//! done.fill("#9f9");
//! end.set_class(&done);
//!
//! let chart = FlowChart::new();
//! chart.add_connection([&edge]).add_class([&done]);
//!
//! assert_eq!(
//!     chart.render(),
//!     "flowchart TB\nA[Start] -->|go| B(End)\nclassDef done fill:#9f9\nclass B done"
//! );
//! ```

mod chart;
mod directive;
mod edge;
mod node;
mod renderer;
mod style;

pub use chart::{FlowChart, IntoNode};
pub use directive::Directive;
pub use edge::{Edge, Endpoint};
pub use node::Node;
pub use renderer::FlowchartRenderer;
pub use style::{ClassStyle, LinkStyle, StyleProperties, StyleProperty};
