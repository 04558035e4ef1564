//! End-to-end tests for the state-machine adapter

use flowsmith::plugins::state::{
    build_chart, render_machine, title_block, StateMachine, StateMachineRenderer, StateNode,
    StyleTable, Transition,
};
use flowsmith::prelude::Renderer;
use flowsmith::DiagramError;

const CHECKOUT: &str = r##"{
    "id": "checkout",
    "tags": ["curve:stepAfter", "var:lineColor=#888", "transition-link:dotted", "team:payments"],
    "states": {
        "cart": {
            "description": "Cart",
            "on": {
                "PAY": { "target": "paying", "description": "pay now" },
                "CANCEL": "cancelled"
            }
        },
        "paying": {
            "tags": ["parallel"],
            "on": { "OK": "done", "FAIL": "cart" }
        },
        "done": { "type": "final", "description": "Paid" },
        "cancelled": { "type": "final" }
    }
}"##;

#[test]
fn test_single_state_machine() {
    let machine = StateMachine::from_json(r#"{"id": "solo", "states": {"S1": {}}}"#).unwrap();
    let chart = build_chart(&machine, &StyleTable::default()).unwrap();
    assert_eq!(chart.node_count(), 1);
    assert_eq!(chart.edge_count(), 0);

    let text = render_machine(&machine, &StyleTable::default()).unwrap();
    assert!(text.starts_with(&title_block("solo")));
    assert!(text.contains("title: solo"));
}

#[test]
fn test_checkout_flow() {
    let machine = StateMachine::from_json(CHECKOUT).unwrap();
    let text = render_machine(&machine, &StyleTable::default()).unwrap();

    assert_eq!(
        text,
        "---\n\
         title: checkout\n\
         ---\n\
         %%{init: {\"themeVariables\":{\"lineColor\":\"#888\"},\"flowchart\":{\"curve\":\"stepAfter\"}}}%%\n\
         flowchart TB\n\
         cart[Cart] -.->|pay now| paying[[paying]]\n\
         cart -.-> cancelled(((cancelled)))\n\
         paying -.-> done(((Paid)))\n\
         paying -.-> cart\n\
         classDef parallel stroke-width:2px\n\
         class paying parallel\n\
         classDef final fill:#1f2937,stroke:#fff,stroke-width:3px\n\
         class done,cancelled final\n\
         linkStyle default stroke:#fff"
    );
}

#[test]
fn test_rendering_twice_is_stable() {
    let machine = StateMachine::from_json(CHECKOUT).unwrap();
    let table = StyleTable::default();
    let chart = build_chart(&machine, &table).unwrap();
    assert_eq!(chart.render(), chart.render());
    assert_eq!(
        render_machine(&machine, &table).unwrap(),
        render_machine(&machine, &table).unwrap()
    );
}

#[test]
fn test_custom_style_table() {
    let styles = r##"{
        "final": { "style": { "name": "finished", "fill": "#0f0" }, "shape": "stadium" }
    }"##;
    let table = StyleTable::from_json(styles).unwrap();
    let machine = StateMachine::from_json(CHECKOUT).unwrap();
    let text = render_machine(&machine, &table).unwrap();

    assert!(text.contains("done([Paid])"));
    assert!(text.contains("classDef finished fill:#0f0\nclass done,cancelled finished"));
    assert!(!text.contains("classDef parallel"));
}

#[test]
fn test_dangling_target_is_rendered() {
    let machine = StateMachine::new("lost")
        .state("start", StateNode::new().on("GO", Transition::to("Missing State")));
    assert_eq!(machine.dangling_targets().len(), 1);

    let text = render_machine(&machine, &StyleTable::default()).unwrap();
    assert!(text.contains("start[start] --> Missing_State"));
}

#[test]
fn test_bad_tag_builds_nothing() {
    let machine = StateMachine::new("broken")
        .tags(["curve:basis", "var:novalue"])
        .state("a", StateNode::new());
    let err = build_chart(&machine, &StyleTable::default()).unwrap_err();
    match err {
        DiagramError::InvalidTag { tag, .. } => assert_eq!(tag, "var:novalue"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_renderer_with_table() {
    let renderer = StateMachineRenderer::with_table(StyleTable::empty());
    let machine = StateMachine::new("m").state("end", StateNode::new().kind("final"));
    let text = renderer.render(&machine).unwrap();
    assert_eq!(text, "---\ntitle: m\n---\nflowchart TB\nend[end]\nlinkStyle default stroke:#fff");
}
