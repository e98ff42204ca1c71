use tracing::{debug, info};

use crate::app::AppContext;
use crate::app::resources::{Plan, Resource, for_kind, plan, planned_data};
use crate::domain::{AppError, Attributes, ResourceData, ResourceKind};
use crate::ports::{FileStore, StateRecord, StateStore};

/// Result of converging a resource onto its configuration.
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub kind: ResourceKind,
    pub plan: Plan,
    pub data: ResourceData,
}

/// Converge the tracked resource onto `config` and persist the new state.
pub fn execute<F: FileStore, S: StateStore>(
    ctx: &AppContext<F>,
    state: &S,
    kind: ResourceKind,
    mut config: Attributes,
) -> Result<ApplyOutcome, AppError> {
    let schema = kind.schema();
    schema.apply_defaults(&mut config);
    schema.validate(&config)?;

    let prior = tracked(ctx, state, kind)?;
    let plan = plan(schema, ctx.paths(), prior.as_ref(), &config);
    debug!(%kind, ?plan, "planned");

    let resource = for_kind(ctx, kind);
    let mut data = match &plan {
        Plan::Create => create(resource.as_ref(), state, config)?,
        Plan::NoOp => prior.ok_or(AppError::MissingIdentity)?,
        Plan::Update { .. } => {
            let prior = prior.ok_or(AppError::MissingIdentity)?;
            let mut data = planned_data(schema, ctx.paths(), &prior, &config);
            resource.update(&mut data)?;
            data
        }
        Plan::Replace { forced_by } => {
            let mut prior = prior.ok_or(AppError::MissingIdentity)?;
            info!(%kind, ?forced_by, "replacing resource");
            resource.delete(&mut prior)?;
            state.clear()?;
            create(resource.as_ref(), state, config)?
        }
    };

    data.commit();
    state.save(&StateRecord { kind, data: data.clone() })?;
    Ok(ApplyOutcome { kind, plan, data })
}

/// Load and refresh the tracked record.
///
/// A record of another kind is destroyed first; a record whose file is gone
/// is forgotten. Both leave nothing tracked.
fn tracked<F: FileStore, S: StateStore>(
    ctx: &AppContext<F>,
    state: &S,
    kind: ResourceKind,
) -> Result<Option<ResourceData>, AppError> {
    let Some(StateRecord { kind: stored, mut data }) = state.load()? else {
        return Ok(None);
    };
    let resource = for_kind(ctx, stored);

    if stored != kind {
        info!(from = %stored, to = %kind, "resource kind changed; destroying tracked resource");
        resource.delete(&mut data)?;
        state.clear()?;
        return Ok(None);
    }

    match resource.read(&mut data) {
        Ok(()) => {
            data.commit();
            Ok(Some(data))
        }
        Err(err) if err.is_not_found() => {
            info!(%kind, "tracked file is gone; recreating");
            state.clear()?;
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn create<S: StateStore>(
    resource: &dyn Resource,
    state: &S,
    config: Attributes,
) -> Result<ResourceData, AppError> {
    let mut data = ResourceData::new(config);
    if let Err(err) = resource.create(&mut data) {
        // Keep tracking a file that was written before the failure.
        if data.id().is_some() {
            data.commit();
            state.save(&StateRecord { kind: resource.kind(), data })?;
        }
        return Err(err);
    }
    Ok(data)
}
