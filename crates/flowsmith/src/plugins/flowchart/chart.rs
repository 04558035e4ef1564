//! The flowchart graph: ordered nodes, edges, styles, directives and nested
//! subgraphs
//!
//! Entities are held by shared handle. Membership is by identity, so adding
//! the same handle twice is a no-op, and insertion order is render order.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::core::ids::{NODE_IDS, SUBGRAPH_IDS};
use crate::core::{slugify, ArrowStyle, Direction};

use super::directive::Directive;
use super::edge::Edge;
use super::node::Node;
use super::renderer;
use super::style::{ClassStyle, LinkStyle};

#[derive(Debug)]
pub(super) struct ChartData {
    pub(super) name: String,
    pub(super) direction: Direction,
    pub(super) nodes: Vec<Node>,
    pub(super) edges: Vec<Edge>,
    pub(super) classes: Vec<ClassStyle>,
    pub(super) directives: Vec<Directive>,
    pub(super) subgraphs: Vec<FlowChart>,
    pub(super) default_class: Option<ClassStyle>,
    pub(super) default_link: Option<LinkStyle>,
    /// Container style, used when this chart is embedded as a subgraph
    pub(super) style: Option<ClassStyle>,
}

/// Something `connect` can turn into a node of a chart
pub trait IntoNode {
    fn into_node(self, chart: &FlowChart) -> Node;
}

impl IntoNode for Node {
    fn into_node(self, _chart: &FlowChart) -> Node {
        self
    }
}

impl IntoNode for &Node {
    fn into_node(self, _chart: &FlowChart) -> Node {
        self.clone()
    }
}

/// Free text becomes a node whose id is the slug of the text. A node already
/// in the chart with that id is reused. Text with no word characters gets a
/// generated id.
impl IntoNode for &str {
    fn into_node(self, chart: &FlowChart) -> Node {
        let id = slugify(self);
        if id.is_empty() {
            trace!(text = self, "Text has no slug, generating node id");
            return Node::labeled(NODE_IDS.next_id(), self);
        }
        chart
            .find_node(&id)
            .unwrap_or_else(|| Node::labeled(id, self))
    }
}

impl IntoNode for String {
    fn into_node(self, chart: &FlowChart) -> Node {
        self.as_str().into_node(chart)
    }
}

/// A flowchart, or a subgraph region when nested inside another chart
///
/// `FlowChart` is a shared handle: `clone()` aliases the same chart. Use
/// [`FlowChart::from_chart`] for an independent chart that shares entities.
#[derive(Debug, Clone)]
pub struct FlowChart(Rc<RefCell<ChartData>>);

impl Default for FlowChart {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowChart {
    /// Empty top-to-bottom chart with a generated name
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(ChartData {
            name: SUBGRAPH_IDS.next_id(),
            direction: Direction::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            classes: Vec::new(),
            directives: Vec::new(),
            subgraphs: Vec::new(),
            default_class: None,
            default_link: None,
            style: None,
        })))
    }

    /// New chart with its own collections holding the same entity handles
    pub fn from_chart(source: &FlowChart) -> Self {
        let src = source.data();
        Self(Rc::new(RefCell::new(ChartData {
            name: src.name.clone(),
            direction: src.direction,
            nodes: src.nodes.clone(),
            edges: src.edges.clone(),
            classes: src.classes.clone(),
            directives: src.directives.clone(),
            subgraphs: src.subgraphs.clone(),
            default_class: src.default_class.clone(),
            default_link: src.default_link.clone(),
            style: src.style.clone(),
        })))
    }

    pub(super) fn data(&self) -> Ref<'_, ChartData> {
        self.0.borrow()
    }

    /// Register node classes; each is declared when the chart renders
    pub fn add_class<'a, I>(&self, classes: I) -> &Self
    where
        I: IntoIterator<Item = &'a ClassStyle>,
    {
        let mut data = self.0.borrow_mut();
        for class in classes {
            if data.classes.iter().any(|c| c.ptr_eq(class)) {
                continue;
            }
            trace!(class = class.name(), "Adding class to chart");
            data.classes.push(class.clone());
        }
        self
    }

    /// Add nodes that are not already present
    pub fn add_node<'a, I>(&self, nodes: I) -> &Self
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut data = self.0.borrow_mut();
        for node in nodes {
            push_node(&mut data.nodes, node);
        }
        debug!(node_count = data.nodes.len(), "Nodes added");
        self
    }

    /// Add edges, pulling in any endpoint node not yet in the chart
    pub fn add_connection<'a, I>(&self, edges: I) -> &Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut data = self.0.borrow_mut();
        for edge in edges {
            if data.edges.iter().any(|e| e.ptr_eq(edge)) {
                continue;
            }
            for node in edge.nodes() {
                push_node(&mut data.nodes, &node);
            }
            trace!(edge_index = data.edges.len(), "Adding edge to chart");
            data.edges.push(edge.clone());
        }
        debug!(edge_count = data.edges.len(), "Edges added");
        self
    }

    pub fn add_directive<'a, I>(&self, directives: I) -> &Self
    where
        I: IntoIterator<Item = &'a Directive>,
    {
        let mut data = self.0.borrow_mut();
        for directive in directives {
            if !data.directives.iter().any(|d| d.ptr_eq(directive)) {
                data.directives.push(directive.clone());
            }
        }
        self
    }

    /// Nest charts as subgraphs
    ///
    /// The subgraph's nodes and classes are also added to this chart so the
    /// class assignments are declared at the top level. A chart cannot be
    /// nested in itself.
    pub fn add_subgraph<'a, I>(&self, subgraphs: I) -> &Self
    where
        I: IntoIterator<Item = &'a FlowChart>,
    {
        for subgraph in subgraphs {
            if subgraph.ptr_eq(self) {
                warn!(name = %self.name(), "Refusing to nest a chart inside itself");
                continue;
            }
            let (nodes, classes) = {
                let sub = subgraph.data();
                (sub.nodes.clone(), sub.classes.clone())
            };

            let mut data = self.0.borrow_mut();
            if data.subgraphs.iter().any(|s| s.ptr_eq(subgraph)) {
                continue;
            }
            for node in &nodes {
                push_node(&mut data.nodes, node);
            }
            for class in classes {
                if !data.classes.iter().any(|c| c.ptr_eq(&class)) {
                    data.classes.push(class);
                }
            }
            trace!(subgraph = %subgraph.name(), "Adding subgraph to chart");
            data.subgraphs.push(subgraph.clone());
        }
        self
    }

    /// Connect two nodes with an arrow pointing at `b`
    ///
    /// Strings become nodes labeled with the text and identified by its slug.
    ///
    /// ```
    /// use flowsmith::plugins::flowchart::FlowChart;
    ///
    /// let chart = FlowChart::new();
    /// chart.connect("Home", "About Us", 0);
    /// assert_eq!(chart.render(), "flowchart TB\nhome[Home] --> about-us[About Us]");
    /// ```
    pub fn connect(&self, a: impl IntoNode, b: impl IntoNode, depth: u32) -> &Self {
        let from = a.into_node(self);
        self.add_node([&from]);
        let to = b.into_node(self);
        let edge = Edge::new(&from, &to);
        edge.to(&to, true, ArrowStyle::Default).set_depth(depth);
        self.add_connection([&edge])
    }

    /// Style applied by the renderer to every node without a class
    pub fn default_class<'a>(&self, class: impl Into<Option<&'a ClassStyle>>) -> &Self {
        self.0.borrow_mut().default_class = class.into().cloned();
        self
    }

    /// Style applied by the renderer to every edge without a link style
    pub fn default_link<'a>(&self, link: impl Into<Option<&'a LinkStyle>>) -> &Self {
        self.0.borrow_mut().default_link = link.into().cloned();
        self
    }

    pub fn direction(&self, direction: Direction) -> &Self {
        self.0.borrow_mut().direction = direction;
        self
    }

    pub fn get_direction(&self) -> Direction {
        self.data().direction
    }

    /// Identifier used when this chart is rendered as a subgraph
    pub fn named(&self, name: impl Into<String>) -> &Self {
        self.0.borrow_mut().name = name.into();
        self
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    /// Container style, rendered as `style <name> ...` after the subgraph
    pub fn set_style<'a>(&self, style: impl Into<Option<&'a ClassStyle>>) -> &Self {
        self.0.borrow_mut().style = style.into().cloned();
        self
    }

    pub fn style(&self) -> Option<ClassStyle> {
        self.data().style.clone()
    }

    /// First node with the given id
    pub fn find_node(&self, id: &str) -> Option<Node> {
        self.data().nodes.iter().find(|n| n.id() == id).cloned()
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.data().nodes.clone()
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.data().edges.clone()
    }

    pub fn classes(&self) -> Vec<ClassStyle> {
        self.data().classes.clone()
    }

    pub fn directives(&self) -> Vec<Directive> {
        self.data().directives.clone()
    }

    pub fn subgraphs(&self) -> Vec<FlowChart> {
        self.data().subgraphs.clone()
    }

    pub fn node_count(&self) -> usize {
        self.data().nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.data().edges.len()
    }

    /// Encode as Mermaid flowchart text
    pub fn render(&self) -> String {
        renderer::render_chart(self)
    }

    pub fn ptr_eq(&self, other: &FlowChart) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<&FlowChart> for FlowChart {
    fn from(source: &FlowChart) -> Self {
        FlowChart::from_chart(source)
    }
}

fn push_node(nodes: &mut Vec<Node>, node: &Node) {
    if !nodes.iter().any(|n| n.ptr_eq(node)) {
        trace!(node_id = node.id(), "Adding node to chart");
        nodes.push(node.clone());
    }
}
