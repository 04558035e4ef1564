//! Mermaid flowchart encoder
//!
//! Output order: init directives, `flowchart <dir>`, edges, bare nodes,
//! subgraph blocks, `classDef default`, one `classDef` + `class` pair per
//! class, `linkStyle default`, then indexed `linkStyle` lines.

use scopeguard::guard;
use tracing::{debug, span, trace, Level};

use crate::core::{Renderer, Result};

use super::chart::{ChartData, FlowChart};
use super::edge::Edge;
use super::node::Node;

const INDENT: &str = "    ";

/// Renders a [`FlowChart`] to Mermaid flowchart text
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowchartRenderer;

impl FlowchartRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer<FlowChart> for FlowchartRenderer {
    type Output = String;

    fn render(&self, diagram: &FlowChart) -> Result<String> {
        Ok(render_chart(diagram))
    }

    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn format(&self) -> &'static str {
        "mermaid-flowchart"
    }
}

pub(super) fn render_chart(chart: &FlowChart) -> String {
    let data = chart.data();
    let render_span = span!(
        Level::DEBUG,
        "render_flowchart",
        nodes = data.nodes.len(),
        edges = data.edges.len(),
        subgraphs = data.subgraphs.len()
    );
    let _enter = render_span.enter();

    let mut lines: Vec<String> = data.directives.iter().map(|d| d.render()).collect();
    lines.push(format!("flowchart {}", data.direction));

    {
        // Emitted flags are per pass; clear them even if a render panics.
        let _reset = guard(&*data, reset_emitted);
        emit_body(&data, "", &mut lines);
    }

    if let Some(class) = &data.default_class {
        lines.push(class.render_as("default"));
    }

    for class in &data.classes {
        lines.push(class.render());
        let members: Vec<&str> = data
            .nodes
            .iter()
            .filter(|n| n.has_class(class))
            .map(Node::id)
            .collect();
        if members.is_empty() {
            trace!(class = class.name(), "Class has no members, skipping assignment");
        } else {
            lines.push(format!("class {} {}", members.join(","), class.name()));
        }
    }

    if let Some(link) = &data.default_link {
        lines.push(link.render("default"));
    }

    let mut links = Vec::new();
    collect_links(&data, &mut links);
    for (index, edge) in links.iter().enumerate() {
        if let Some(style) = edge.link_style() {
            lines.push(style.render(&index.to_string()));
        }
    }

    debug!(line_count = lines.len(), "Flowchart rendered");
    lines.join("\n")
}

/// Edges, not-yet-emitted nodes, then nested subgraphs
fn emit_body(data: &ChartData, edge_indent: &str, lines: &mut Vec<String>) {
    for edge in &data.edges {
        lines.push(format!("{}{}", edge_indent, edge.render()));
    }
    for node in data.nodes.iter().filter(|n| !n.is_emitted()) {
        lines.push(node.render());
    }
    for subgraph in &data.subgraphs {
        render_subgraph(subgraph, lines);
    }
}

fn render_subgraph(chart: &FlowChart, lines: &mut Vec<String>) {
    let data = chart.data();
    trace!(name = %data.name, "Rendering subgraph");

    lines.push(format!("subgraph {}", data.name));
    {
        let _reset = guard(&*data, reset_emitted);
        emit_body(&data, INDENT, lines);
    }
    lines.push("end".to_string());

    if let Some(style) = &data.style {
        let declarations = style.declarations();
        if !declarations.is_empty() {
            lines.push(format!("style {} {}", data.name, declarations));
        }
    }
}

/// Clear member nodes and every edge endpoint, including endpoints an edge
/// was re-pointed at after it joined the chart
fn reset_emitted(data: &ChartData) {
    data.nodes.iter().for_each(Node::reset);
    data.edges
        .iter()
        .flat_map(Edge::nodes)
        .for_each(|node| node.reset());
}

/// Edges in the order the renderer numbers them for `linkStyle`
fn collect_links(data: &ChartData, out: &mut Vec<Edge>) {
    out.extend(data.edges.iter().cloned());
    for subgraph in &data.subgraphs {
        collect_links(&subgraph.data(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArrowStyle, Direction, LineStyle, Shape};
    use crate::plugins::flowchart::{ClassStyle, Directive, LinkStyle};

    #[test]
    fn test_empty_chart() {
        assert_eq!(FlowChart::new().render(), "flowchart TB");
    }

    #[test]
    fn test_renderer_trait() {
        let renderer = FlowchartRenderer::new();
        assert_eq!(renderer.name(), "mermaid");
        assert_eq!(renderer.format(), "mermaid-flowchart");
        let chart = FlowChart::new();
        chart.direction(Direction::LeftRight);
        assert_eq!(renderer.render(&chart).unwrap(), "flowchart LR");
    }

    #[test]
    fn test_isolated_nodes_follow_edges() {
        let chart = FlowChart::new();
        let a = Node::labeled("a", "A");
        let b = Node::labeled("b", "B");
        let lone = Node::labeled("lone", "Alone");
        lone.set_shape(Shape::Circle);
        chart.add_node([&lone]).add_connection([&Edge::new(&a, &b)]);
        assert_eq!(chart.render(), "flowchart TB\na[A] --- b[B]\nlone((Alone))");
    }

    #[test]
    fn test_directive_comes_first() {
        let directive = Directive::new();
        directive.set_theme(Some("forest"));
        let chart = FlowChart::new();
        chart.add_directive([&directive]).connect("A", "B", 0);
        let text = chart.render();
        assert!(text.starts_with("%%{init: {\"theme\":\"forest\"}}%%\nflowchart TB\n"));
    }

    #[test]
    fn test_class_lines() {
        let hot = ClassStyle::new("hot");
        hot.fill("#f00");
        let unused = ClassStyle::new("unused");
        unused.stroke("#000");

        let a = Node::labeled("a", "A");
        let b = Node::labeled("b", "B");
        a.set_class(&hot);
        b.set_class(&hot);

        let chart = FlowChart::new();
        chart
            .add_node([&a, &b])
            .add_class([&hot, &unused])
            .default_class(&ClassStyle::new("d"));
        chart.default_class(None);

        let text = chart.render();
        assert_eq!(
            text,
            "flowchart TB\na[A]\nb[B]\nclassDef hot fill:#f00\nclass a,b hot\nclassDef unused stroke:#000"
        );
    }

    #[test]
    fn test_defaults_are_declared() {
        let base = ClassStyle::new("ignored-name");
        base.color("#eee");
        let mut link = LinkStyle::new("white");
        link.stroke("#fff");

        let chart = FlowChart::new();
        chart.default_class(&base).default_link(&link).connect("a", "b", 0);
        let text = chart.render();
        assert!(text.ends_with("classDef default color:#eee\nlinkStyle default stroke:#fff"));
    }

    #[test]
    fn test_subgraph_block() {
        let outer = Node::labeled("out", "Outside");
        let x = Node::labeled("x", "X");
        let y = Node::labeled("y", "Y");

        let frame = ClassStyle::new("frame");
        frame.fill("#eee").stroke_dash("3 3");

        let sub = FlowChart::new();
        sub.named("cluster").set_style(&frame);
        let xy = Edge::new(&x, &y);
        xy.to(&y, true, ArrowStyle::Default);
        sub.add_connection([&xy]);

        let chart = FlowChart::new();
        chart.add_node([&outer]).add_subgraph([&sub]);

        assert_eq!(
            chart.render(),
            "flowchart TB\n\
             out[Outside]\n\
             x[X]\n\
             y[Y]\n\
             subgraph cluster\n    x --> y\nend\n\
             style cluster fill:#eee,stroke-dasharray:3 3"
        );
    }

    #[test]
    fn test_subgraph_declares_its_own_nodes() {
        let x = Node::labeled("x", "X");
        let y = Node::labeled("y", "Y");
        let sub = FlowChart::new();
        sub.named("inner").add_connection([&Edge::new(&x, &y)]);

        let chart = FlowChart::new();
        chart.add_subgraph([&sub]);
        // The pulled-in nodes are declared at the top before the block
        assert_eq!(
            chart.render(),
            "flowchart TB\nx[X]\ny[Y]\nsubgraph inner\n    x --- y\nend"
        );
        assert_eq!(
            sub.render(),
            "flowchart TB\nx[X] --- y[Y]"
        );
    }

    #[test]
    fn test_link_style_indices_cover_subgraphs() {
        let mut red = LinkStyle::new("red");
        red.stroke("#f00");
        let mut blue = LinkStyle::new("blue");
        blue.stroke("#00f");

        let a = Node::new("a");
        let b = Node::new("b");
        let c = Node::new("c");

        let top_plain = Edge::new(&a, &b);
        let top_red = Edge::new(&b, &c);
        top_red.set_link_style(&red);
        let inner_blue = Edge::new(&c, &a);
        inner_blue.set_link_style(&blue);

        let sub = FlowChart::new();
        sub.named("s").add_connection([&inner_blue]);
        let chart = FlowChart::new();
        chart.add_connection([&top_plain, &top_red]).add_subgraph([&sub]);

        let text = chart.render();
        assert!(text.contains("linkStyle 1 stroke:#f00"));
        assert!(text.contains("linkStyle 2 stroke:#00f"));
        assert!(!text.contains("linkStyle 0"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let chart = FlowChart::new();
        let a = Node::labeled("a", "A");
        a.set_shape(Shape::Stadium);
        let sub = FlowChart::new();
        sub.named("group").connect(&a, "B", 0);
        chart.connect(&a, "C", 2).add_subgraph([&sub]);
        let edge = Edge::new(&a, &Node::labeled("d", "D"));
        edge.set_line(LineStyle::Dotted);
        chart.add_connection([&edge]);

        let first = chart.render();
        let second = chart.render();
        assert_eq!(first, second);
        assert!(chart.nodes().iter().all(|n| !n.is_emitted()));
    }
}
