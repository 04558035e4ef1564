//! Core type definitions for flowchart encoding
//!
//! Closed sets of Mermaid keywords (direction, node shapes, arrowheads, line
//! styles, curves, flowchart options) and the edge depth newtype. Every set
//! parses from its Mermaid spelling and rejects anything else with the list of
//! accepted names.

use std::fmt;
use std::str::FromStr;

use super::error::{DiagramError, Result};

/// Declares a closed keyword set with `ALL`, `as_str`, `names`, `FromStr`
/// and `Display`
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The Mermaid spelling of this member
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// The Mermaid spellings of every member
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl FromStr for $name {
            type Err = DiagramError;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| DiagramError::invalid_value($kind, s, &Self::names()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Arrowhead drawn at one end of an edge
    ArrowStyle, "arrow style" {
        /// `<` or `>` depending on the end
        Default => "default",
        /// `o`
        Round => "round",
        /// `x`
        Cross => "cross",
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        ArrowStyle::Default
    }
}

impl ArrowStyle {
    /// Glyph for this arrowhead; `pointing_left` is true on the `from` end
    pub fn glyph(&self, pointing_left: bool) -> char {
        match self {
            ArrowStyle::Default if pointing_left => '<',
            ArrowStyle::Default => '>',
            ArrowStyle::Round => 'o',
            ArrowStyle::Cross => 'x',
        }
    }
}

keyword_enum! {
    /// Stroke used for the body of an edge
    LineStyle, "line style" {
        /// `---`
        Default => "default",
        /// `-.-`
        Dotted => "dotted",
        /// `===`
        Thick => "thick",
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::Default
    }
}

impl LineStyle {
    /// Body glyph at position `index` along the line
    pub fn glyph(&self, index: usize) -> char {
        match self {
            LineStyle::Default => '-',
            LineStyle::Dotted if index % 2 == 0 => '-',
            LineStyle::Dotted => '.',
            LineStyle::Thick => '=',
        }
    }
}

keyword_enum! {
    /// Edge interpolation curves understood by the renderer
    Curve, "curve" {
        Basis => "basis",
        BumpX => "bumpX",
        BumpY => "bumpY",
        Cardinal => "cardinal",
        CatmullRom => "catmullRom",
        Linear => "linear",
        MonotoneX => "monotoneX",
        MonotoneY => "monotoneY",
        Natural => "natural",
        Step => "step",
        StepAfter => "stepAfter",
        StepBefore => "stepBefore",
    }
}

keyword_enum! {
    /// Recognized keys of the `flowchart` block in an init directive
    FlowchartOption, "flowchart option" {
        ArrowMarkerAbsolute => "arrowMarkerAbsolute",
        Curve => "curve",
        DefaultRenderer => "defaultRenderer",
        DiagramPadding => "diagramPadding",
        HtmlLabels => "htmlLabels",
        NodeSpacing => "nodeSpacing",
        Padding => "padding",
        RankSpacing => "rankSpacing",
        SubGraphTitleMargin => "subGraphTitleMargin",
        TitleTopMargin => "titleTopMargin",
        UseMaxWidth => "useMaxWidth",
        WrappingWidth => "wrappingWidth",
    }
}

/// Flow direction for the diagram layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Top to bottom (TB, also accepts TD)
    #[default]
    TopBottom,
    /// Bottom to top (BT)
    BottomTop,
    /// Left to right (LR)
    LeftRight,
    /// Right to left (RL)
    RightLeft,
}

impl Direction {
    pub const ALL: &'static [Direction] = &[
        Direction::TopBottom,
        Direction::BottomTop,
        Direction::LeftRight,
        Direction::RightLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Direction::TopBottom),
            "BT" => Ok(Direction::BottomTop),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            _ => Err(DiagramError::invalid_value(
                "direction",
                s,
                &["TB", "TD", "BT", "LR", "RL"],
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node shapes and the bracket pair that produces each one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Shape {
    /// `id[text]`
    #[default]
    Rect,
    /// `id(text)`
    Round,
    /// `id([text])`
    Stadium,
    /// `id[[text]]`
    Subroutine,
    /// `id[(text)]`
    Cylinder,
    /// `id((text))`
    Circle,
    /// `id(((text)))`
    DoubleCircle,
    /// `id>text]`
    Asymmetric,
    /// `id{text}`
    Rhombus,
    /// `id{{text}}`
    Hexagon,
    /// `id[/text/]`
    Parallelogram,
    /// `id[\text\]`
    ParallelogramAlt,
    /// `id[/text\]`
    Trapezoid,
    /// `id[\text/]`
    TrapezoidAlt,
}

impl Shape {
    pub const ALL: &'static [Shape] = &[
        Shape::Rect,
        Shape::Round,
        Shape::Stadium,
        Shape::Subroutine,
        Shape::Cylinder,
        Shape::Circle,
        Shape::DoubleCircle,
        Shape::Asymmetric,
        Shape::Rhombus,
        Shape::Hexagon,
        Shape::Parallelogram,
        Shape::ParallelogramAlt,
        Shape::Trapezoid,
        Shape::TrapezoidAlt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Rect => "rect",
            Shape::Round => "round",
            Shape::Stadium => "stadium",
            Shape::Subroutine => "subroutine",
            Shape::Cylinder => "cylinder",
            Shape::Circle => "circle",
            Shape::DoubleCircle => "double-circle",
            Shape::Asymmetric => "asymmetric",
            Shape::Rhombus => "rhombus",
            Shape::Hexagon => "hexagon",
            Shape::Parallelogram => "parallelogram",
            Shape::ParallelogramAlt => "parallelogram-alt",
            Shape::Trapezoid => "trapezoid",
            Shape::TrapezoidAlt => "trapezoid-alt",
        }
    }

    /// Opening and closing brackets around the node text
    pub fn brackets(&self) -> (&'static str, &'static str) {
        match self {
            Shape::Rect => ("[", "]"),
            Shape::Round => ("(", ")"),
            Shape::Stadium => ("([", "])"),
            Shape::Subroutine => ("[[", "]]"),
            Shape::Cylinder => ("[(", ")]"),
            Shape::Circle => ("((", "))"),
            Shape::DoubleCircle => ("(((", ")))"),
            Shape::Asymmetric => (">", "]"),
            Shape::Rhombus => ("{", "}"),
            Shape::Hexagon => ("{{", "}}"),
            Shape::Parallelogram => ("[/", "/]"),
            Shape::ParallelogramAlt => ("[\\", "\\]"),
            Shape::Trapezoid => ("[/", "\\]"),
            Shape::TrapezoidAlt => ("[\\", "/]"),
        }
    }

    /// Wrap already-quoted text in this shape's brackets
    pub fn wrap(&self, text: &str) -> String {
        let (open, close) = self.brackets();
        format!("{open}{text}{close}")
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl FromStr for Shape {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| DiagramError::invalid_value("shape", s, &Self::names()))
    }
}

impl TryFrom<String> for Shape {
    type Error = DiagramError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra rank distance between the two ends of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Depth(pub u32);

impl Depth {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Depth {
    fn from(value: u32) -> Self {
        Depth(value)
    }
}

impl TryFrom<f64> for Depth {
    type Error = DiagramError;

    /// Accepts only finite, non-negative, whole numbers that fit in `u32`
    fn try_from(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
            Ok(Depth(value as u32))
        } else {
            Err(DiagramError::invalid_depth(value))
        }
    }
}

impl TryFrom<i64> for Depth {
    type Error = DiagramError;

    fn try_from(value: i64) -> Result<Self> {
        u32::try_from(value)
            .map(Depth)
            .map_err(|_| DiagramError::invalid_depth(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("TB".parse::<Direction>().unwrap(), Direction::TopBottom);
        assert_eq!("td".parse::<Direction>().unwrap(), Direction::TopBottom);
        assert_eq!("LR".parse::<Direction>().unwrap(), Direction::LeftRight);
        assert_eq!("rl".parse::<Direction>().unwrap(), Direction::RightLeft);
        assert_eq!("BT".parse::<Direction>().unwrap(), Direction::BottomTop);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::default().to_string(), "TB");
        assert_eq!(Direction::LeftRight.to_string(), "LR");
    }

    #[test]
    fn test_shape_brackets() {
        assert_eq!(Shape::Rect.wrap("A"), "[A]");
        assert_eq!(Shape::Stadium.wrap("A"), "([A])");
        assert_eq!(Shape::DoubleCircle.wrap("A"), "(((A)))");
        assert_eq!(Shape::Trapezoid.wrap("A"), "[/A\\]");
        assert_eq!(Shape::Asymmetric.wrap("A"), ">A]");
    }

    #[test]
    fn test_shape_names_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(shape.as_str().parse::<Shape>().unwrap(), *shape);
        }
    }

    #[test]
    fn test_unknown_shape_lists_allowed() {
        let err = "blob".parse::<Shape>().unwrap_err().to_string();
        assert!(err.contains("blob"));
        assert!(err.contains("rhombus"));
        assert!(err.contains("double-circle"));
    }

    #[test]
    fn test_arrow_glyphs() {
        assert_eq!(ArrowStyle::Default.glyph(true), '<');
        assert_eq!(ArrowStyle::Default.glyph(false), '>');
        assert_eq!(ArrowStyle::Round.glyph(true), 'o');
        assert_eq!(ArrowStyle::Cross.glyph(false), 'x');
        assert!("bent".parse::<ArrowStyle>().is_err());
    }

    #[test]
    fn test_line_glyphs() {
        let dotted: String = (0..5).map(|i| LineStyle::Dotted.glyph(i)).collect();
        assert_eq!(dotted, "-.-.-");
        assert_eq!(LineStyle::Thick.glyph(3), '=');
        assert_eq!("dotted".parse::<LineStyle>().unwrap(), LineStyle::Dotted);
    }

    #[test]
    fn test_curve_and_option_names_are_case_sensitive() {
        assert_eq!("catmullRom".parse::<Curve>().unwrap(), Curve::CatmullRom);
        assert!("catmullrom".parse::<Curve>().is_err());
        assert_eq!(
            "nodeSpacing".parse::<FlowchartOption>().unwrap(),
            FlowchartOption::NodeSpacing
        );
        assert!("spacing".parse::<FlowchartOption>().is_err());
    }

    #[test]
    fn test_depth_validation() {
        assert_eq!(Depth::try_from(2.0).unwrap(), Depth(2));
        assert!(Depth::try_from(1.5).is_err());
        assert!(Depth::try_from(-1.0).is_err());
        assert!(Depth::try_from(f64::NAN).is_err());
        assert!(Depth::try_from(-3i64).is_err());
        assert_eq!(Depth::try_from(4i64).unwrap().get(), 4);
    }
}
