//! Projection traits shared by stored variables and environment variables

use serde_json::Value;

use super::entity::DraftVariable;
use super::scope::VariableType;
use super::segment::SegmentType;
use super::summary::DraftVariableSummary;

/// Fields every variable listing exposes, whatever the backing source
pub trait VariableView {
    fn view_id(&self) -> &str;
    fn view_type(&self) -> VariableType;
    fn view_name(&self) -> &str;
    fn view_description(&self) -> &str;
    fn view_selector(&self) -> Vec<String>;
    fn view_value_type(&self) -> SegmentType;
    fn view_edited(&self) -> bool;
    fn view_visible(&self) -> bool;

    /// Only reported by sources that override it
    fn view_editable(&self) -> Option<bool> {
        None
    }
}

/// A view that can also materialize the value
pub trait ValueView: VariableView {
    fn view_value(&self) -> &Value;
}

impl VariableView for DraftVariable {
    fn view_id(&self) -> &str {
        self.id().as_str()
    }

    fn view_type(&self) -> VariableType {
        self.variable_type()
    }

    fn view_name(&self) -> &str {
        self.name()
    }

    fn view_description(&self) -> &str {
        self.description().unwrap_or_default()
    }

    fn view_selector(&self) -> Vec<String> {
        self.selector()
    }

    fn view_value_type(&self) -> SegmentType {
        self.value_type()
    }

    fn view_edited(&self) -> bool {
        self.is_edited()
    }

    fn view_visible(&self) -> bool {
        self.is_visible()
    }
}

impl ValueView for DraftVariable {
    fn view_value(&self) -> &Value {
        self.value().value()
    }
}

impl VariableView for DraftVariableSummary {
    fn view_id(&self) -> &str {
        self.id.as_str()
    }

    fn view_type(&self) -> VariableType {
        self.scope.variable_type()
    }

    fn view_name(&self) -> &str {
        &self.name
    }

    fn view_description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    fn view_selector(&self) -> Vec<String> {
        vec![self.scope.node_id().to_string(), self.name.clone()]
    }

    fn view_value_type(&self) -> SegmentType {
        self.value_type
    }

    fn view_edited(&self) -> bool {
        self.edited
    }

    fn view_visible(&self) -> bool {
        self.visible
    }
}
