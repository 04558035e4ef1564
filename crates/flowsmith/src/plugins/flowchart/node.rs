//! Flowchart nodes

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::ids::NODE_IDS;
use crate::core::{quote_label, Result, Shape};

use super::style::ClassStyle;

#[derive(Debug)]
struct NodeData {
    id: String,
    text: RefCell<String>,
    shape: Cell<Option<Shape>>,
    class: RefCell<Option<ClassStyle>>,
    /// Set once the node's shape has been written in the current render pass.
    /// Render-scoped only: the renderer clears it when the pass ends.
    emitted: Cell<bool>,
}

/// A graph vertex
///
/// `Node` is a shared handle. Adding the same handle to several edges or
/// subgraphs refers to one vertex, and setters are visible through every
/// clone.
#[derive(Debug, Clone)]
pub struct Node(Rc<NodeData>);

impl Node {
    /// Node with the given id and empty text
    pub fn new(id: impl Into<String>) -> Self {
        Self(Rc::new(NodeData {
            id: id.into(),
            text: RefCell::new(String::new()),
            shape: Cell::new(None),
            class: RefCell::new(None),
            emitted: Cell::new(false),
        }))
    }

    /// Node with id and display text
    pub fn labeled(id: impl Into<String>, text: impl Into<String>) -> Self {
        let node = Self::new(id);
        node.set_text(text);
        node
    }

    /// New node carrying this one's text, class and shape
    ///
    /// Without an id a fresh one is generated.
    pub fn copy(&self, id: Option<&str>) -> Self {
        let id = id.map_or_else(|| NODE_IDS.next_id(), str::to_string);
        let node = Self::labeled(id, self.text());
        node.0.shape.set(self.shape());
        *node.0.class.borrow_mut() = self.class();
        node
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) -> &Self {
        *self.0.text.borrow_mut() = text.into();
        self
    }

    pub fn shape(&self) -> Option<Shape> {
        self.0.shape.get()
    }

    /// Set the shape; `None` restores the default rectangle
    pub fn set_shape(&self, shape: impl Into<Option<Shape>>) -> &Self {
        self.0.shape.set(shape.into());
        self
    }

    /// Set the shape by its Mermaid name, e.g. `"rhombus"`
    pub fn set_shape_named(&self, name: &str) -> Result<&Self> {
        let shape: Shape = name.parse()?;
        Ok(self.set_shape(shape))
    }

    pub fn class(&self) -> Option<ClassStyle> {
        self.0.class.borrow().clone()
    }

    /// Attach a class; `None` detaches it
    pub fn set_class<'a>(&self, class: impl Into<Option<&'a ClassStyle>>) -> &Self {
        *self.0.class.borrow_mut() = class.into().cloned();
        self
    }

    /// True if this node currently carries exactly this class definition
    pub fn has_class(&self, class: &ClassStyle) -> bool {
        self.0
            .class
            .borrow()
            .as_ref()
            .is_some_and(|own| own.ptr_eq(class))
    }

    /// Render for the current pass
    ///
    /// The first call writes `id` plus the shape-wrapped text; later calls in
    /// the same pass write only the id.
    pub fn render(&self) -> String {
        if self.0.emitted.replace(true) {
            return self.0.id.clone();
        }
        let text = self.0.text.borrow();
        if text.is_empty() {
            self.0.id.clone()
        } else {
            let shape = self.shape().unwrap_or_default();
            format!("{}{}", self.0.id, shape.wrap(&quote_label(&text)))
        }
    }

    pub fn is_emitted(&self) -> bool {
        self.0.emitted.get()
    }

    /// Clear the emitted flag so the next pass declares the node again
    pub fn reset(&self) {
        self.0.emitted.set(false);
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
