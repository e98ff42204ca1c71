//! Diffing desired attributes against tracked state.

use crate::domain::schema::ROOT;
use crate::domain::{
    AttrValue, Attributes, Comparison, FieldSpec, FileMode, PathContext, ResourceData,
    ResourceSchema,
};
use crate::services::PathResolver;

/// What applying a configuration to tracked state will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Nothing tracked yet.
    Create,
    NoOp,
    /// In-place change of the listed inputs.
    Update { changed: Vec<&'static str> },
    /// Destroy and recreate; the listed inputs cannot change in place.
    Replace { forced_by: Vec<&'static str> },
}

/// Compare `config` (defaults applied) with the `prior` tracked state.
pub fn plan(
    schema: &ResourceSchema,
    paths: &PathContext,
    prior: Option<&ResourceData>,
    config: &Attributes,
) -> Plan {
    let Some(prior) = prior.filter(|p| p.id().is_some()) else {
        return Plan::Create;
    };

    let resolver = PathResolver::new(paths);
    let root = prior.get_str(ROOT);
    let mut changed = Vec::new();
    let mut forced_by = Vec::new();

    for field in schema.inputs() {
        let (new, old) = values(field, prior, config);
        if !same(&resolver, root, field, &new, &old) {
            changed.push(field.name);
            if field.force_new {
                forced_by.push(field.name);
            }
        }
    }

    if !forced_by.is_empty() {
        Plan::Replace { forced_by }
    } else if changed.is_empty() {
        Plan::NoOp
    } else {
        Plan::Update { changed }
    }
}

/// Attribute bag for an in-place update of `prior` towards `config`.
///
/// Inputs equal to the tracked value under their comparison rule keep the
/// tracked form, so an equivalent path spelled differently is not a change.
pub fn planned_data(
    schema: &ResourceSchema,
    paths: &PathContext,
    prior: &ResourceData,
    config: &Attributes,
) -> ResourceData {
    let resolver = PathResolver::new(paths);
    let root = prior.get_str(ROOT);
    let mut planned = prior.attributes().clone();

    for field in schema.inputs() {
        let (new, old) = values(field, prior, config);
        if !same(&resolver, root, field, &new, &old) {
            planned.insert(field.name.to_string(), new);
        }
    }

    ResourceData::planned(prior.id().cloned(), prior.attributes().clone(), planned)
}

fn values(field: &FieldSpec, prior: &ResourceData, config: &Attributes) -> (AttrValue, AttrValue) {
    let new = config.get(field.name).cloned().unwrap_or_else(|| field.kind.zero());
    let old = prior.get(field.name).cloned().unwrap_or_else(|| field.kind.zero());
    (new, old)
}

fn same(
    resolver: &PathResolver<'_>,
    root: &str,
    field: &FieldSpec,
    new: &AttrValue,
    old: &AttrValue,
) -> bool {
    if new == old {
        return true;
    }
    match (field.compare, new, old) {
        (Comparison::Path, AttrValue::String(new), AttrValue::String(old)) => {
            resolver.equivalent(new, old, root)
        }
        (Comparison::Mode, AttrValue::String(new), AttrValue::String(old)) => {
            match (FileMode::parse(new), FileMode::parse(old)) {
                // An unset mode keeps whatever is on disk.
                (Ok(new), Ok(old)) => new.is_unset() || new == old,
                _ => false,
            }
        }
        _ => false,
    }
}
