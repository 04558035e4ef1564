//! Diagram-level configuration emitted as an `init` directive

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::core::{Curve, DiagramError, FlowchartOption, Result};

#[derive(Debug, Default)]
struct DirectiveData {
    theme: Option<String>,
    font_family: Option<String>,
    variables: Map<String, Value>,
    flowchart: Map<String, Value>,
}

/// Theme, font, theme variables and flowchart layout options
///
/// Renders as a single `%%{init: {...}}%%` line. Shared handle, so a
/// directive can be attached to several charts.
#[derive(Debug, Clone, Default)]
pub struct Directive(Rc<RefCell<DirectiveData>>);

impl Directive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any theme name is accepted; `None` clears it
    pub fn set_theme(&self, theme: Option<&str>) -> &Self {
        self.0.borrow_mut().theme = theme.map(str::to_string);
        self
    }

    pub fn theme(&self) -> Option<String> {
        self.0.borrow().theme.clone()
    }

    pub fn set_font_family(&self, family: Option<&str>) -> &Self {
        self.0.borrow_mut().font_family = family.map(str::to_string);
        self
    }

    pub fn font_family(&self) -> Option<String> {
        self.0.borrow().font_family.clone()
    }

    /// Set the edge curve; `None` removes it from the flowchart options
    pub fn set_curve(&self, curve: impl Into<Option<Curve>>) -> &Self {
        let key = FlowchartOption::Curve.as_str();
        let mut data = self.0.borrow_mut();
        match curve.into() {
            Some(curve) => {
                data.flowchart
                    .insert(key.to_string(), Value::from(curve.as_str()));
            }
            None => {
                data.flowchart.shift_remove(key);
            }
        }
        self
    }

    /// Set the curve by name, rejecting names outside the curve set
    pub fn set_curve_named(&self, name: &str) -> Result<&Self> {
        let curve: Curve = name.parse()?;
        Ok(self.set_curve(curve))
    }

    pub fn curve(&self) -> Option<Curve> {
        self.0
            .borrow()
            .flowchart
            .get(FlowchartOption::Curve.as_str())
            .and_then(Value::as_str)
            .and_then(|name| name.parse().ok())
    }

    /// Set one typed flowchart option, with the same checks as
    /// [`Directive::set_flowchart_options`]
    pub fn set_flowchart_option(
        &self,
        option: FlowchartOption,
        value: impl Into<Value>,
    ) -> Result<&Self> {
        self.set_flowchart_options([(option.as_str(), value)])
    }

    /// Set several flowchart options by name
    ///
    /// Every key is validated before anything is stored; one unknown key
    /// leaves the directive untouched. A `curve` value must name a known
    /// curve.
    pub fn set_flowchart_options<I, K, V>(&self, options: I) -> Result<&Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut validated = Vec::new();
        for (key, value) in options {
            let option: FlowchartOption = key.as_ref().parse()?;
            let value = value.into();
            if option == FlowchartOption::Curve {
                let name = value.as_str().unwrap_or_default();
                name.parse::<Curve>()
                    .map_err(|_| DiagramError::invalid_value("curve", value.to_string(), &Curve::names()))?;
            }
            validated.push((option, value));
        }

        let mut data = self.0.borrow_mut();
        for (option, value) in validated {
            trace!(option = option.as_str(), %value, "Setting flowchart option");
            data.flowchart.insert(option.as_str().to_string(), value);
        }
        drop(data);
        Ok(self)
    }

    pub fn flowchart_option(&self, option: FlowchartOption) -> Option<Value> {
        self.0.borrow().flowchart.get(option.as_str()).cloned()
    }

    /// Add or overwrite theme variables
    pub fn merge_variables<I, K, V>(&self, variables: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = self.0.borrow_mut();
        for (key, value) in variables {
            data.variables.insert(key.into(), Value::String(value.into()));
        }
        drop(data);
        self
    }

    pub fn variable(&self, key: &str) -> Option<String> {
        self.0
            .borrow()
            .variables
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// The JSON object embedded in the init line; unset fields are left out
    pub fn to_json(&self) -> Value {
        let data = self.0.borrow();
        let mut init = Map::new();
        if let Some(theme) = &data.theme {
            init.insert("theme".into(), Value::from(theme.as_str()));
        }
        if let Some(family) = &data.font_family {
            init.insert("fontFamily".into(), Value::from(family.as_str()));
        }
        if !data.variables.is_empty() {
            init.insert("themeVariables".into(), Value::Object(data.variables.clone()));
        }
        if !data.flowchart.is_empty() {
            init.insert("flowchart".into(), Value::Object(data.flowchart.clone()));
        }
        Value::Object(init)
    }

    /// `%%{init: {...}}%%`
    pub fn render(&self) -> String {
        format!("%%{{init: {}}}%%", self.to_json())
    }

    pub fn ptr_eq(&self, other: &Directive) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_directive() {
        assert_eq!(Directive::new().render(), "%%{init: {}}%%");
    }

    #[test]
    fn test_field_order() {
        let directive = Directive::new();
        directive
            .set_curve(Curve::Basis)
            .merge_variables([("primaryColor", "#fff")])
            .set_font_family(Some("Fira Sans"))
            .set_theme(Some("dark"));
        assert_eq!(
            directive.render(),
            r##"%%{init: {"theme":"dark","fontFamily":"Fira Sans","themeVariables":{"primaryColor":"#fff"},"flowchart":{"curve":"basis"}}}%%"##
        );
    }

    #[test]
    fn test_typed_option_checks_curve() {
        let directive = Directive::new();
        assert!(directive
            .set_flowchart_option(FlowchartOption::Curve, "wiggly")
            .is_err());
        assert_eq!(directive.flowchart_option(FlowchartOption::Curve), None);

        directive
            .set_flowchart_option(FlowchartOption::Curve, "linear")
            .unwrap();
        assert_eq!(directive.curve(), Some(Curve::Linear));
    }

    #[test]
    fn test_clearing_curve_drops_block() {
        let directive = Directive::new();
        directive.set_curve(Curve::Step);
        assert_eq!(directive.curve(), Some(Curve::Step));
        directive.set_curve(None);
        assert_eq!(directive.curve(), None);
        assert_eq!(directive.render(), "%%{init: {}}%%");
    }

    #[test]
    fn test_curve_by_name() {
        let directive = Directive::new();
        directive.set_curve_named("monotoneX").unwrap();
        assert_eq!(directive.curve(), Some(Curve::MonotoneX));
        assert!(directive.set_curve_named("wiggly").is_err());
        assert_eq!(directive.curve(), Some(Curve::MonotoneX));
    }

    #[test]
    fn test_bulk_options() {
        let directive = Directive::new();
        directive
            .set_flowchart_options([
                ("nodeSpacing", json!(40)),
                ("htmlLabels", json!(false)),
                ("curve", json!("linear")),
            ])
            .unwrap();
        assert_eq!(
            directive.to_json(),
            json!({"flowchart": {"nodeSpacing": 40, "htmlLabels": false, "curve": "linear"}})
        );
    }

    #[test]
    fn test_unknown_option_rejects_whole_batch() {
        let directive = Directive::new();
        let err = directive
            .set_flowchart_options([("rankSpacing", json!(10)), ("zoom", json!(2))])
            .unwrap_err();
        assert!(err.to_string().contains("zoom"));
        assert!(directive.flowchart_option(FlowchartOption::RankSpacing).is_none());
    }

    #[test]
    fn test_bad_curve_in_options() {
        let directive = Directive::new();
        assert!(directive
            .set_flowchart_options([("curve", json!("wiggly"))])
            .is_err());
    }

    #[test]
    fn test_theme_and_font_clear() {
        let directive = Directive::new();
        directive.set_theme(Some("anything-goes")).set_font_family(Some("serif"));
        assert_eq!(directive.theme().as_deref(), Some("anything-goes"));
        directive.set_theme(None).set_font_family(None);
        assert_eq!(directive.render(), "%%{init: {}}%%");
    }

    #[test]
    fn test_merge_overwrites() {
        let directive = Directive::new();
        directive.merge_variables([("lineColor", "#000"), ("textColor", "#111")]);
        directive.merge_variables([("lineColor", "#fff")]);
        assert_eq!(directive.variable("lineColor").as_deref(), Some("#fff"));
        assert_eq!(directive.variable("textColor").as_deref(), Some("#111"));
    }
}
