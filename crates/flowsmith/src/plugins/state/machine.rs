//! State-machine description consumed by the adapter
//!
//! The JSON form follows the common statechart configuration layout:
//!
//! ```json
//! {
//!   "id": "light",
//!   "tags": ["curve:basis", "link:thick"],
//!   "states": {
//!     "green":  { "on": { "TIMER": "yellow" } },
//!     "yellow": { "on": { "TIMER": { "target": "red", "description": "slow down" } } },
//!     "red":    { "type": "final", "description": "Stop" }
//!   }
//! }
//! ```
//!
//! Nested child `states` are not flattened; unknown fields are ignored.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::core::Result;

/// Tag list that also accepts a single string in the input
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct Tags(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Tags {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(tag) => Tags(vec![tag]),
            OneOrMany::Many(tags) => Tags(tags),
        }
    }
}

impl Tags {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Tags(iter.into_iter().map(Into::into).collect())
    }
}

/// Where an event leads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "TransitionRepr")]
pub struct Transition {
    pub target: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TransitionRepr {
    Target(String),
    Detailed {
        target: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<TransitionRepr> for Transition {
    fn from(value: TransitionRepr) -> Self {
        match value {
            TransitionRepr::Target(target) => Transition::to(target),
            TransitionRepr::Detailed {
                target,
                description,
            } => Transition {
                target,
                description,
            },
        }
    }
}

impl Transition {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            description: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One state of the machine
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StateNode {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub description: Option<String>,
    /// Event name to transition, in declaration order
    #[serde(default)]
    pub on: IndexMap<String, Transition>,
}

impl StateNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn on(mut self, event: impl Into<String>, transition: Transition) -> Self {
        self.on.insert(event.into(), transition);
        self
    }
}

/// A whole machine: title, configuration tags and states in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StateMachine {
    pub id: String,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub states: IndexMap<String, StateNode>,
}

/// A transition whose target is not a declared state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingTarget {
    pub state: String,
    pub event: String,
    pub target: String,
}

impl StateMachine {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn state(mut self, name: impl Into<String>, state: StateNode) -> Self {
        self.states.insert(name.into(), state);
        self
    }

    /// Transitions pointing at states that are not declared
    pub fn dangling_targets(&self) -> Vec<DanglingTarget> {
        self.states
            .iter()
            .flat_map(|(name, state)| {
                state
                    .on
                    .iter()
                    .filter(|(_, t)| !self.states.contains_key(&t.target))
                    .map(move |(event, t)| DanglingTarget {
                        state: name.clone(),
                        event: event.clone(),
                        target: t.target.clone(),
                    })
            })
            .collect()
    }
}
