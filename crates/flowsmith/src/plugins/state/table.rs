//! Tag to class-and-shape lookup used when styling states

use indexmap::IndexMap;
use serde::Deserialize;

use crate::core::{Result, Shape};
use crate::plugins::flowchart::{ClassStyle, StyleProperties, StyleProperty};

use super::machine::StateNode;

/// Class and optional shape applied to states carrying a tag
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub style: ClassStyle,
    pub shape: Option<Shape>,
}

impl StyleRule {
    pub fn new(style: ClassStyle, shape: impl Into<Option<Shape>>) -> Self {
        Self {
            style,
            shape: shape.into(),
        }
    }
}

/// Ordered map from tag to [`StyleRule`]
///
/// JSON form:
///
/// ```json
/// { "error": { "style": { "fill": "#f00", "strokeWidth": "2px" }, "shape": "hexagon" } }
/// ```
///
/// A missing `name` makes the class name equal to the tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "IndexMap<String, RuleRepr>")]
pub struct StyleTable {
    rules: IndexMap<String, StyleRule>,
}

#[derive(Deserialize)]
struct RuleRepr {
    #[serde(default)]
    style: StyleRepr,
    #[serde(default)]
    shape: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StyleRepr {
    name: Option<String>,
    color: Option<String>,
    fill: Option<String>,
    stroke: Option<String>,
    stroke_width: Option<String>,
    stroke_dash: Option<String>,
}

impl StyleRepr {
    fn into_class(self, tag: &str) -> ClassStyle {
        let mut properties = StyleProperties::new();
        properties.set(StyleProperty::Color, self.color.as_deref());
        properties.set(StyleProperty::Fill, self.fill.as_deref());
        properties.set(StyleProperty::Stroke, self.stroke.as_deref());
        properties.set(StyleProperty::StrokeWidth, self.stroke_width.as_deref());
        properties.set(StyleProperty::StrokeDash, self.stroke_dash.as_deref());
        ClassStyle::with_properties(self.name.unwrap_or_else(|| tag.to_string()), properties)
    }
}

impl TryFrom<IndexMap<String, RuleRepr>> for StyleTable {
    type Error = crate::core::DiagramError;

    fn try_from(raw: IndexMap<String, RuleRepr>) -> Result<Self> {
        let mut table = StyleTable::empty();
        for (tag, rule) in raw {
            let shape = rule.shape.map(Shape::try_from).transpose()?;
            let style = rule.style.into_class(&tag);
            table.insert(tag, StyleRule { style, shape });
        }
        Ok(table)
    }
}

impl Default for StyleTable {
    /// Rules for `final`, `history` and `parallel` states
    fn default() -> Self {
        let terminal = ClassStyle::new("final");
        terminal
            .fill("#1f2937")
            .stroke("#fff")
            .stroke_width("3px");
        let history = ClassStyle::new("history");
        history.stroke_dash("4 2");
        let parallel = ClassStyle::new("parallel");
        parallel.stroke_width("2px");

        let mut table = StyleTable::empty();
        table
            .insert("final", StyleRule::new(terminal, Shape::DoubleCircle))
            .insert("history", StyleRule::new(history, Shape::Circle))
            .insert("parallel", StyleRule::new(parallel, Shape::Subroutine));
        table
    }
}

impl StyleTable {
    /// Table with no rules; use [`StyleTable::default`] for the built-in set
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Add or replace the rule for `tag`
    pub fn insert(&mut self, tag: impl Into<String>, rule: StyleRule) -> &mut Self {
        self.rules.insert(tag.into(), rule);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&StyleRule> {
        self.rules.get(tag)
    }

    /// Rule for a state: its `type` first, then its tags in order
    pub fn lookup(&self, state: &StateNode) -> Option<&StyleRule> {
        state
            .kind
            .as_deref()
            .and_then(|kind| self.get(kind))
            .or_else(|| state.tags.iter().find_map(|tag| self.get(tag)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleRule)> {
        self.rules.iter().map(|(tag, rule)| (tag.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
