//! Core renderer trait for diagram output
//!
//! A renderer turns an in-memory model into text for a downstream consumer.

use super::error::Result;

/// Core trait for renderers
///
/// # Example
/// ```
/// use flowsmith::core::Renderer;
/// use flowsmith::plugins::flowchart::{FlowChart, FlowchartRenderer};
///
/// let chart = FlowChart::new();
/// let text = FlowchartRenderer::new().render(&chart).unwrap();
/// assert_eq!(text, "flowchart TB");
/// ```
pub trait Renderer<D> {
    /// The output type of this renderer
    type Output;

    /// Render the model into the output format
    fn render(&self, diagram: &D) -> Result<Self::Output>;

    /// Name of this renderer
    fn name(&self) -> &'static str;

    /// Output format produced
    fn format(&self) -> &'static str;
}
