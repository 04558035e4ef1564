//! Tests for core error types

use flowsmith::core::{DiagramError, Shape};
use flowsmith::plugins::flowchart::{Directive, Edge, Node};
use flowsmith::plugins::state::{StateMachine, StyleTable};
use flowsmith::{Curve, Depth, Direction, LineStyle};

#[test]
fn test_invalid_value_lists_allowed_names() {
    let error = "blob".parse::<Shape>().unwrap_err();
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Invalid shape"));
    assert!(error_msg.contains("'blob'"));
    assert!(error_msg.contains("double-circle"));
}

#[test]
fn test_invalid_depth() {
    let a = Node::new("a");
    let b = Node::new("b");
    for bad in [-1.0, 1.5, f64::NAN, f64::INFINITY] {
        let error = Edge::with_depth(&a, &b, bad).unwrap_err();
        assert!(matches!(error, DiagramError::InvalidDepth { .. }));
        assert!(error.to_string().contains("Invalid depth"));
    }
    assert_eq!(Edge::with_depth(&a, &b, 2.0).unwrap().depth(), 2);
    assert_eq!(Depth::try_from(3.0).unwrap().get(), 3);
}

#[test]
fn test_invalid_tag() {
    let error = DiagramError::invalid_tag("var:x", "'x' is not key=value");
    assert_eq!(error.to_string(), "Invalid tag 'var:x': 'x' is not key=value");
}

#[test]
fn test_json_errors_convert() {
    let error = StateMachine::from_json("{").unwrap_err();
    assert!(matches!(error, DiagramError::Json { .. }));
    assert!(error.to_string().contains("JSON error"));

    let error = StyleTable::from_json("[]").unwrap_err();
    assert!(matches!(error, DiagramError::Json { .. }));
}

#[test]
fn test_failed_calls_leave_state_untouched() {
    let node = Node::labeled("n", "N");
    assert!(node.set_shape_named("blob").is_err());
    assert_eq!(node.shape(), None);

    let directive = Directive::new();
    directive.set_curve(Curve::Natural);
    assert!(directive.set_curve_named("zigzag").is_err());
    assert_eq!(directive.curve(), Some(Curve::Natural));
}

#[test]
fn test_keyword_parsing_errors() {
    assert!("sideways".parse::<Direction>().is_err());
    assert_eq!("td".parse::<Direction>().unwrap(), Direction::TopBottom);
    let error = "wavy".parse::<LineStyle>().unwrap_err();
    assert!(error.to_string().contains("dotted"));
}
