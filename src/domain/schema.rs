//! Declared attributes of the file resources.

use super::{AppError, AttrValue, Attributes};

/// Value kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    Int,
}

impl FieldKind {
    fn accepts(self, value: &AttrValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::String, AttrValue::String(_))
                | (FieldKind::Bool, AttrValue::Bool(_))
                | (FieldKind::Int, AttrValue::Int(_))
        )
    }

    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
        }
    }

    /// Value an absent attribute reads as.
    pub fn zero(self) -> AttrValue {
        match self {
            FieldKind::String => AttrValue::String(String::new()),
            FieldKind::Bool => AttrValue::Bool(false),
            FieldKind::Int => AttrValue::Int(0),
        }
    }
}

/// Where an attribute's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Derived from disk; never accepted as input.
    Computed,
}

/// Compile-time default of an optional attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Bool(bool),
}

impl DefaultValue {
    fn to_value(self) -> AttrValue {
        match self {
            DefaultValue::Str(v) => AttrValue::String(v.to_string()),
            DefaultValue::Bool(v) => AttrValue::Bool(v),
        }
    }
}

/// How a planned value is compared with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Exact,
    /// Equal when the new path resolves to the stored identity.
    Path,
    /// Equal when both parse to the same permission bits.
    Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
    pub default: Option<DefaultValue>,
    /// Redacted when displayed.
    pub sensitive: bool,
    /// Changing the value replaces the resource.
    pub force_new: bool,
    pub compare: Comparison,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            default: None,
            sensitive: false,
            force_new: false,
            compare: Comparison::Exact,
        }
    }

    const fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    const fn compared_by(mut self, compare: Comparison) -> Self {
        self.compare = compare;
        self
    }

    pub fn is_input(&self) -> bool {
        self.presence != Presence::Computed
    }
}

/// Attribute declarations of one resource kind.
#[derive(Debug)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const PATH: &str = "path";
pub const ROOT: &str = "root";
pub const CONTENTS: &str = "contents";
pub const NAME: &str = "name";
pub const SIZE: &str = "size";
pub const MODE: &str = "mode";
pub const CREATE_PARENT_DIRS: &str = "create_parent_dirs";
pub const DELETE_ON_DESTROY: &str = "delete_on_destroy";

/// Textual default for the writer's `mode`.
pub const DEFAULT_MODE: &str = "0644";

pub static FILE_READER: ResourceSchema = ResourceSchema {
    type_name: "file_reader",
    fields: &[
        FieldSpec::new(PATH, FieldKind::String, Presence::Required)
            .force_new()
            .compared_by(Comparison::Path),
        FieldSpec::new(ROOT, FieldKind::String, Presence::Optional)
            .force_new(),
        FieldSpec::new(CONTENTS, FieldKind::String, Presence::Computed)
            .sensitive(),
        FieldSpec::new(NAME, FieldKind::String, Presence::Computed),
        FieldSpec::new(SIZE, FieldKind::Int, Presence::Computed),
        FieldSpec::new(MODE, FieldKind::String, Presence::Computed),
    ],
};

pub static FILE_WRITER: ResourceSchema = ResourceSchema {
    type_name: "file_writer",
    fields: &[
        FieldSpec::new(PATH, FieldKind::String, Presence::Required)
            .force_new()
            .compared_by(Comparison::Path),
        FieldSpec::new(ROOT, FieldKind::String, Presence::Optional)
            .force_new(),
        FieldSpec::new(CONTENTS, FieldKind::String, Presence::Optional)
            .sensitive(),
        FieldSpec::new(MODE, FieldKind::String, Presence::Optional)
            .default_value(DefaultValue::Str(DEFAULT_MODE))
            .compared_by(Comparison::Mode),
        FieldSpec::new(CREATE_PARENT_DIRS, FieldKind::Bool, Presence::Optional)
            .default_value(DefaultValue::Bool(true)),
        FieldSpec::new(DELETE_ON_DESTROY, FieldKind::Bool, Presence::Optional)
            .default_value(DefaultValue::Bool(true)),
        FieldSpec::new(NAME, FieldKind::String, Presence::Computed),
        FieldSpec::new(SIZE, FieldKind::Int, Presence::Computed),
    ],
};

/// Placeholder shown instead of sensitive values.
pub const REDACTED: &str = "(sensitive value)";

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.is_input())
    }

    /// Fill in declared defaults for absent optional inputs.
    pub fn apply_defaults(&self, attributes: &mut Attributes) {
        for field in self.inputs() {
            if let Some(default) = field.default {
                attributes.entry(field.name.to_string()).or_insert_with(|| default.to_value());
            }
        }
    }

    /// Check an input bag against the declarations.
    pub fn validate(&self, attributes: &Attributes) -> Result<(), AppError> {
        for (name, value) in attributes {
            let field = self.field(name).ok_or_else(|| {
                AppError::invalid_attribute(
                    name.as_str(),
                    format!("not an attribute of {}", self.type_name),
                )
            })?;
            if !field.is_input() {
                return Err(AppError::invalid_attribute(name.as_str(), "computed attribute"));
            }
            if !field.kind.accepts(value) {
                return Err(AppError::invalid_attribute(
                    name.as_str(),
                    format!("expected {}, got {}", field.kind.name(), value.kind_name()),
                ));
            }
        }

        for field in self.inputs().filter(|f| f.presence == Presence::Required) {
            match attributes.get(field.name) {
                Some(AttrValue::String(v)) if v.is_empty() => {
                    return Err(AppError::MissingAttribute(field.name.to_string()));
                }
                Some(_) => {}
                None => return Err(AppError::MissingAttribute(field.name.to_string())),
            }
        }

        Ok(())
    }

    /// Copy of `attributes` with sensitive values masked.
    pub fn redacted(&self, attributes: &Attributes) -> Attributes {
        attributes
            .iter()
            .map(|(name, value)| {
                let sensitive = self.field(name).is_some_and(|f| f.sensitive);
                let value = if sensitive { AttrValue::from(REDACTED) } else { value.clone() };
                (name.clone(), value)
            })
            .collect()
    }
}
