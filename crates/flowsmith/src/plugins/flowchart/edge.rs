//! Flowchart edges (connections)

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::{quote_label, ArrowStyle, Depth, LineStyle, Result};

use super::node::Node;
use super::style::LinkStyle;

/// One end of an edge
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub node: Node,
    /// Whether an arrowhead is drawn at this end
    pub arrow: bool,
    pub style: ArrowStyle,
}

impl Endpoint {
    pub fn new(node: &Node, arrow: bool, style: ArrowStyle) -> Self {
        Self {
            node: node.clone(),
            arrow,
            style,
        }
    }

    fn plain(node: &Node) -> Self {
        Self::new(node, false, ArrowStyle::Default)
    }
}

#[derive(Debug)]
struct EdgeData {
    from: RefCell<Endpoint>,
    to: RefCell<Endpoint>,
    depth: Cell<u32>,
    line: Cell<LineStyle>,
    label: RefCell<Option<String>>,
    link_style: RefCell<Option<LinkStyle>>,
}

/// A link between two nodes
///
/// Shared handle like [`Node`]; identity decides membership in a chart.
#[derive(Debug, Clone)]
pub struct Edge(Rc<EdgeData>);

impl Edge {
    /// Plain line between two nodes: no arrowheads, depth 0
    pub fn new(from: &Node, to: &Node) -> Self {
        Self(Rc::new(EdgeData {
            from: RefCell::new(Endpoint::plain(from)),
            to: RefCell::new(Endpoint::plain(to)),
            depth: Cell::new(0),
            line: Cell::new(LineStyle::Default),
            label: RefCell::new(None),
            link_style: RefCell::new(None),
        }))
    }

    /// Plain line with a depth taken from untyped numeric input
    ///
    /// Fails unless `depth` is a non-negative whole number.
    pub fn with_depth(from: &Node, to: &Node, depth: f64) -> Result<Self> {
        let depth = Depth::try_from(depth)?;
        let edge = Self::new(from, to);
        edge.set_depth(depth.get());
        Ok(edge)
    }

    /// Reattach the `from` end
    pub fn from(&self, node: &Node, arrow: bool, style: ArrowStyle) -> &Self {
        *self.0.from.borrow_mut() = Endpoint::new(node, arrow, style);
        self
    }

    /// Reattach the `to` end
    pub fn to(&self, node: &Node, arrow: bool, style: ArrowStyle) -> &Self {
        *self.0.to.borrow_mut() = Endpoint::new(node, arrow, style);
        self
    }

    pub fn from_endpoint(&self) -> Endpoint {
        self.0.from.borrow().clone()
    }

    pub fn to_endpoint(&self) -> Endpoint {
        self.0.to.borrow().clone()
    }

    /// Both endpoint nodes, `from` first
    pub fn nodes(&self) -> [Node; 2] {
        [
            self.0.from.borrow().node.clone(),
            self.0.to.borrow().node.clone(),
        ]
    }

    pub fn depth(&self) -> u32 {
        self.0.depth.get()
    }

    pub fn set_depth(&self, depth: u32) -> &Self {
        self.0.depth.set(depth);
        self
    }

    pub fn line(&self) -> LineStyle {
        self.0.line.get()
    }

    pub fn set_line(&self, line: LineStyle) -> &Self {
        self.0.line.set(line);
        self
    }

    pub fn label(&self) -> Option<String> {
        self.0.label.borrow().clone()
    }

    pub fn set_label<S: Into<String>>(&self, label: Option<S>) -> &Self {
        *self.0.label.borrow_mut() = label.map(Into::into);
        self
    }

    pub fn link_style(&self) -> Option<LinkStyle> {
        self.0.link_style.borrow().clone()
    }

    /// Store a copy of `style`; later changes to the caller's value do not
    /// reach the edge
    pub fn set_link_style<'a>(&self, style: impl Into<Option<&'a LinkStyle>>) -> &Self {
        *self.0.link_style.borrow_mut() = style.into().cloned();
        self
    }

    /// Number of body glyphs between the arrowheads
    pub fn line_length(&self) -> usize {
        let has_arrow = self.0.from.borrow().arrow || self.0.to.borrow().arrow;
        let mut length = 3 + self.depth() as usize - usize::from(has_arrow);
        if self.line() == LineStyle::Dotted && length % 2 == 0 {
            length += 1;
        }
        length
    }

    /// Line body plus arrowheads, e.g. `-->`, `<-.->`, `o==x`
    pub fn connector(&self) -> String {
        let from = self.0.from.borrow();
        let to = self.0.to.borrow();
        let line = self.line();

        let mut out = String::new();
        if from.arrow {
            out.push(from.style.glyph(true));
        }
        out.extend((0..self.line_length()).map(|i| line.glyph(i)));
        if to.arrow {
            out.push(to.style.glyph(false));
        }
        out
    }

    /// Render as one Mermaid edge statement
    ///
    /// Marks both endpoint nodes as emitted.
    pub fn render(&self) -> String {
        let [from_node, to_node] = self.nodes();
        let left_arrow = self.0.from.borrow().arrow;

        let mut out = from_node.render();
        if !left_arrow {
            out.push(' ');
        }
        out.push_str(&self.connector());
        match self.label() {
            Some(label) => {
                out.push('|');
                out.push_str(&quote_label(&label));
                out.push_str("| ");
            }
            None => out.push(' '),
        }
        out.push_str(&to_node.render());
        out
    }

    pub fn ptr_eq(&self, other: &Edge) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
