//! State machine to flowchart conversion

use indexmap::IndexMap;
use tracing::{debug, span, trace, warn, Level};

use crate::core::{ArrowStyle, Curve, DiagramError, Direction, LineStyle, Renderer, Result};
use crate::plugins::flowchart::{Directive, Edge, FlowChart, LinkStyle, Node};

use super::machine::StateMachine;
use super::table::StyleTable;

/// Settings read from the machine-level tags
#[derive(Debug, Default)]
struct MachineSettings {
    curve: Option<Curve>,
    variables: Vec<(String, String)>,
    theme: Option<String>,
    direction: Option<Direction>,
    line: LineStyle,
}

impl MachineSettings {
    fn parse<'a>(tags: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut settings = Self::default();
        for tag in tags {
            if let Some(name) = tag.strip_prefix("curve:") {
                settings.curve = Some(name.trim().parse()?);
            } else if let Some(rest) = tag.strip_prefix("var:") {
                for segment in rest.split(':').map(str::trim).filter(|s| !s.is_empty()) {
                    let (key, value) = segment
                        .split_once('=')
                        .filter(|(key, _)| !key.trim().is_empty())
                        .ok_or_else(|| {
                            DiagramError::invalid_tag(tag, format!("'{segment}' is not key=value"))
                        })?;
                    settings
                        .variables
                        .push((key.trim().to_string(), value.trim().to_string()));
                }
            } else if let Some(name) = tag.strip_prefix("theme:") {
                settings.theme = Some(name.trim().to_string());
            } else if let Some(name) = tag.strip_prefix("direction:") {
                settings.direction = Some(name.trim().parse()?);
            } else if tag.contains("link") {
                match tag.split(':').nth(1) {
                    Some(name) => settings.line = name.trim().parse()?,
                    None => debug!(tag, "Link tag without a style, keeping default line"),
                }
            } else {
                debug!(tag, "Ignoring unrecognized machine tag");
            }
        }
        Ok(settings)
    }

    fn directive(&self) -> Option<Directive> {
        if self.curve.is_none() && self.variables.is_empty() && self.theme.is_none() {
            return None;
        }
        let directive = Directive::new();
        directive
            .set_curve(self.curve)
            .set_theme(self.theme.as_deref())
            .merge_variables(self.variables.iter().cloned());
        Some(directive)
    }
}

/// Node id for a state key: trimmed, whitespace runs become `_`
pub fn state_node_id(key: &str) -> String {
    key.split_whitespace().collect::<Vec<_>>().join("_")
}

/// YAML front matter carrying the machine id
pub fn title_block(id: &str) -> String {
    format!("---\ntitle: {id}\n---")
}

/// Build the flowchart for a machine
///
/// Tags are validated before anything is built. A transition to an
/// undeclared state gets an implicit node with no text.
pub fn build_chart(machine: &StateMachine, table: &StyleTable) -> Result<FlowChart> {
    let settings = MachineSettings::parse(machine.tags.iter())?;

    let chart = FlowChart::new();
    if let Some(direction) = settings.direction {
        chart.direction(direction);
    }
    if let Some(directive) = settings.directive() {
        chart.add_directive([&directive]);
    }
    let mut transition_link = LinkStyle::new("transition");
    transition_link.stroke("#fff");
    chart.default_link(&transition_link);

    let mut nodes: IndexMap<&str, Node> = IndexMap::with_capacity(machine.states.len());
    for (key, state) in &machine.states {
        let id = state_node_id(key);
        if let Some(existing) = chart.find_node(&id) {
            warn!(
                state = %key,
                id = %id,
                "State id collides with an earlier state, reusing its node"
            );
            nodes.insert(key.as_str(), existing);
            continue;
        }
        let label = state.description.as_deref().unwrap_or(key);
        let node = Node::labeled(id, label);
        if let Some(rule) = table.lookup(state) {
            trace!(state = %key, class = rule.style.name(), "Styling state");
            node.set_class(&rule.style).set_shape(rule.shape);
            chart.add_class([&rule.style]);
        }
        chart.add_node([&node]);
        nodes.insert(key.as_str(), node);
    }

    for (key, state) in &machine.states {
        let from = nodes[key.as_str()].clone();
        for (event, transition) in &state.on {
            let to = nodes
                .entry(transition.target.as_str())
                .or_insert_with(|| {
                    warn!(
                        state = %key,
                        event = %event,
                        target = %transition.target,
                        "Transition targets an undeclared state"
                    );
                    Node::new(state_node_id(&transition.target))
                })
                .clone();

            let edge = Edge::new(&from, &to);
            edge.to(&to, true, ArrowStyle::Default)
                .set_line(settings.line)
                .set_label(transition.description.as_deref());
            chart.add_connection([&edge]);
        }
    }

    debug!(
        machine = %machine.id,
        nodes = chart.node_count(),
        edges = chart.edge_count(),
        "State machine converted"
    );
    Ok(chart)
}

/// Title block followed by the rendered flowchart
pub fn render_machine(machine: &StateMachine, table: &StyleTable) -> Result<String> {
    let render_span = span!(Level::DEBUG, "render_machine", id = %machine.id);
    let _enter = render_span.enter();

    let chart = build_chart(machine, table)?;
    Ok(format!("{}\n{}", title_block(&machine.id), chart.render()))
}

/// [`Renderer`] over [`StateMachine`] using a fixed style table
#[derive(Debug, Clone, Default)]
pub struct StateMachineRenderer {
    table: StyleTable,
}

impl StateMachineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: StyleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &StyleTable {
        &self.table
    }
}

impl Renderer<StateMachine> for StateMachineRenderer {
    type Output = String;

    fn render(&self, diagram: &StateMachine) -> Result<String> {
        render_machine(diagram, &self.table)
    }

    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn format(&self) -> &'static str {
        "mermaid-state-machine"
    }
}
