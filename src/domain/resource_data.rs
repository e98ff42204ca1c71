use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl AttrValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::String(_) => "string",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(v) => write!(f, "{v}"),
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

/// Named attribute values.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Attribute bag exchanged with a lifecycle operation.
///
/// Holds the identity, the current attributes, and the attributes as they
/// were before the operation's inputs were applied, which backs
/// [`ResourceData::has_change`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<ResourceId>,
    #[serde(default)]
    attributes: Attributes,
    #[serde(skip)]
    prior: Attributes,
}

impl ResourceData {
    /// Bag for a Create: nothing was there before.
    pub fn new(attributes: Attributes) -> Self {
        Self { id: None, attributes, prior: Attributes::new() }
    }

    /// Bag for an Update: `prior` is the stored state, `planned` the new values.
    pub fn planned(id: Option<ResourceId>, prior: Attributes, planned: Attributes) -> Self {
        Self { id, attributes: planned, prior }
    }

    pub fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: ResourceId) {
        self.id = Some(id);
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// String attribute, or `""` when absent or not a string.
    pub fn get_str(&self, name: &str) -> &str {
        match self.attributes.get(name) {
            Some(AttrValue::String(v)) => v,
            _ => "",
        }
    }

    /// Bool attribute, or `false` when absent or not a bool.
    pub fn get_bool(&self, name: &str) -> bool {
        matches!(self.attributes.get(name), Some(AttrValue::Bool(true)))
    }

    /// Int attribute, or `0` when absent or not an int.
    pub fn get_int(&self, name: &str) -> i64 {
        match self.attributes.get(name) {
            Some(AttrValue::Int(v)) => *v,
            _ => 0,
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn has_change(&self, name: &str) -> bool {
        self.attributes.get(name) != self.prior.get(name)
    }

    /// Accept the current attributes as the new baseline.
    pub fn commit(&mut self) {
        self.prior = self.attributes.clone();
    }
}
