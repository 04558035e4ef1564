//! Style definitions for nodes (`classDef`) and edges (`linkStyle`)

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::core::ids::{CLASS_IDS, LINK_IDS};

/// One of the five visual properties a style can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    /// Text color
    Color,
    Fill,
    /// Stroke color
    Stroke,
    StrokeWidth,
    StrokeDash,
}

impl StyleProperty {
    /// Output order of declarations
    pub const ALL: [StyleProperty; 5] = [
        StyleProperty::Color,
        StyleProperty::Fill,
        StyleProperty::Stroke,
        StyleProperty::StrokeWidth,
        StyleProperty::StrokeDash,
    ];

    /// Key used in the output format
    pub fn key(&self) -> &'static str {
        match self {
            StyleProperty::Color => "color",
            StyleProperty::Fill => "fill",
            StyleProperty::Stroke => "stroke",
            StyleProperty::StrokeWidth => "stroke-width",
            StyleProperty::StrokeDash => "stroke-dasharray",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// The five optional properties shared by both style kinds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProperties {
    values: [Option<String>; 5],
}

impl StyleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key:value` declarations separated by commas
    ///
    /// Unknown keys and malformed declarations are skipped.
    ///
    /// ```
    /// use flowsmith::plugins::flowchart::{StyleProperties, StyleProperty};
    ///
    /// let props = StyleProperties::parse("fill:#f9f, stroke-width:2px, opacity:0.5");
    /// assert_eq!(props.get(StyleProperty::Fill), Some("#f9f"));
    /// assert_eq!(props.get(StyleProperty::StrokeWidth), Some("2px"));
    /// assert_eq!(props.declarations(), "fill:#f9f,stroke-width:2px");
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut props = Self::default();
        for decl in input.split(',') {
            let Some((key, value)) = decl.split_once(':') else {
                continue;
            };
            match StyleProperty::from_key(key.trim()) {
                Some(property) => props.set(property, Some(value.trim())),
                None => trace!(key = key.trim(), "Skipping unknown style key"),
            }
        }
        props
    }

    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.values[property.index()].as_deref()
    }

    /// Set a property; `None` clears it
    pub fn set(&mut self, property: StyleProperty, value: Option<&str>) {
        self.values[property.index()] = value.map(str::to_string);
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Comma-separated `key:value` list of the properties that are set
    pub fn declarations(&self) -> String {
        StyleProperty::ALL
            .iter()
            .filter_map(|p| self.get(*p).map(|v| format!("{}:{}", p.key(), v)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for StyleProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declarations())
    }
}

#[derive(Debug)]
struct ClassData {
    name: String,
    properties: RefCell<StyleProperties>,
}

/// A named node style, rendered as `classDef <name> ...`
///
/// This is a shared handle: clones refer to the same definition, and nodes
/// holding it see later property changes.
#[derive(Debug, Clone)]
pub struct ClassStyle(Rc<ClassData>);

impl ClassStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_properties(name, StyleProperties::default())
    }

    pub fn with_properties(name: impl Into<String>, properties: StyleProperties) -> Self {
        Self(Rc::new(ClassData {
            name: name.into(),
            properties: RefCell::new(properties),
        }))
    }

    /// New definition with the same properties under `name`, or a generated one
    pub fn copy_from(source: &ClassStyle, name: Option<&str>) -> Self {
        let name = name.map_or_else(|| CLASS_IDS.next_id(), str::to_string);
        Self::with_properties(name, source.properties())
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Snapshot of the current properties
    pub fn properties(&self) -> StyleProperties {
        self.0.properties.borrow().clone()
    }

    pub fn get(&self, property: StyleProperty) -> Option<String> {
        self.0.properties.borrow().get(property).map(str::to_string)
    }

    /// Set or clear one property
    pub fn set(&self, property: StyleProperty, value: Option<&str>) -> &Self {
        self.0.properties.borrow_mut().set(property, value);
        self
    }

    pub fn color(&self, value: &str) -> &Self {
        self.set(StyleProperty::Color, Some(value))
    }

    pub fn fill(&self, value: &str) -> &Self {
        self.set(StyleProperty::Fill, Some(value))
    }

    pub fn stroke(&self, value: &str) -> &Self {
        self.set(StyleProperty::Stroke, Some(value))
    }

    pub fn stroke_width(&self, value: &str) -> &Self {
        self.set(StyleProperty::StrokeWidth, Some(value))
    }

    pub fn stroke_dash(&self, value: &str) -> &Self {
        self.set(StyleProperty::StrokeDash, Some(value))
    }

    pub fn declarations(&self) -> String {
        self.0.properties.borrow().declarations()
    }

    /// `classDef <name> <decls>`
    pub fn render(&self) -> String {
        self.render_as(self.name())
    }

    /// Declaration line under another name, used for `classDef default`
    pub(crate) fn render_as(&self, name: &str) -> String {
        format!("classDef {} {}", name, self.declarations())
    }

    /// Identity comparison; two handles are the same style only if they share
    /// the definition
    pub fn ptr_eq(&self, other: &ClassStyle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A named edge style, rendered as `linkStyle <index> ...`
///
/// Unlike [`ClassStyle`] this is a plain value: edges store their own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStyle {
    name: String,
    properties: StyleProperties,
}

impl LinkStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: StyleProperties::default(),
        }
    }

    pub fn with_properties(name: impl Into<String>, properties: StyleProperties) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Same properties under `name`, or a generated one
    pub fn copy_from(source: &LinkStyle, name: Option<&str>) -> Self {
        let name = name.map_or_else(|| LINK_IDS.next_id(), str::to_string);
        Self::with_properties(name, source.properties.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &StyleProperties {
        &self.properties
    }

    pub fn set(&mut self, property: StyleProperty, value: Option<&str>) -> &mut Self {
        self.properties.set(property, value);
        self
    }

    pub fn color(&mut self, value: &str) -> &mut Self {
        self.set(StyleProperty::Color, Some(value))
    }

    pub fn fill(&mut self, value: &str) -> &mut Self {
        self.set(StyleProperty::Fill, Some(value))
    }

    pub fn stroke(&mut self, value: &str) -> &mut Self {
        self.set(StyleProperty::Stroke, Some(value))
    }

    pub fn stroke_width(&mut self, value: &str) -> &mut Self {
        self.set(StyleProperty::StrokeWidth, Some(value))
    }

    pub fn stroke_dash(&mut self, value: &str) -> &mut Self {
        self.set(StyleProperty::StrokeDash, Some(value))
    }

    /// `linkStyle <target> <decls>` where target is an index or `default`
    pub fn render(&self, target: &str) -> String {
        format!("linkStyle {} {}", target, self.properties.declarations())
    }
}
