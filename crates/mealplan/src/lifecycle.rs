use std::sync::Arc;

use mealplanner_shared::{
    Error, Result, Session, bail,
    mealplan::{PlanDocument, PlanParameters},
};
use strum::{AsRefStr, Display};

use crate::{PlanStore, recompute, service::fetch_owned};

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Editing,
    Saving,
    Removed,
}

/// Moves a controller into a pending phase and puts it back on drop unless
/// the operation commits, so an abandoned future never leaves it stuck.
struct PhaseGuard<'a> {
    phase: &'a mut Phase,
    restore: Phase,
    committed: bool,
}

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a mut Phase, pending: Phase) -> Self {
        let restore = *phase;
        *phase = pending;

        Self {
            phase,
            restore,
            committed: false,
        }
    }

    fn commit(mut self, next: Phase) {
        *self.phase = next;
        self.committed = true;
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            *self.phase = self.restore;
        }
    }
}

/// Drives one plan through load, edit, save and delete for one session.
///
/// Every store call borrows the controller mutably, so a controller never
/// has two requests in flight. Controllers for different plans share only
/// the store.
pub struct PlanController<S: PlanStore> {
    store: Arc<S>,
    session: Session,
    phase: Phase,
    /// Plan as loaded; every save rescales from it, never from `current`.
    base: Option<PlanDocument>,
    current: Option<PlanDocument>,
    draft: Option<PlanParameters>,
    last_error: Option<String>,
}

impl<S: PlanStore> PlanController<S> {
    pub fn new(store: Arc<S>, session: Session) -> Self {
        Self {
            store,
            session,
            phase: Phase::Idle,
            base: None,
            current: None,
            draft: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current(&self) -> Option<&PlanDocument> {
        self.current.as_ref()
    }

    /// Parameters being edited, kept across a failed save.
    pub fn draft(&self) -> Option<&PlanParameters> {
        self.draft.as_ref()
    }

    /// Message of the last failed operation, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn load(&mut self, id: &str) -> Result<&PlanDocument> {
        self.ensure(&[Phase::Idle, Phase::Loaded], "load")?;

        let Self {
            store,
            session,
            phase,
            base,
            current,
            draft,
            last_error,
        } = self;

        let guard = PhaseGuard::enter(phase, Phase::Loading);

        match fetch_owned(store.as_ref(), session, id).await {
            Ok(plan) => {
                tracing::info!(
                    plan_id = id,
                    from = %guard.restore,
                    to = %Phase::Loaded,
                    "plan loaded"
                );
                guard.commit(Phase::Loaded);
                *draft = None;
                *last_error = None;
                *base = Some(plan.to_owned());

                Ok(current.insert(plan))
            }
            Err(err) => {
                tracing::warn!(plan_id = id, error = %err, "failed to load plan");
                *last_error = Some(err.to_string());

                Err(err)
            }
        }
    }

    pub fn begin_edit(&mut self) -> Result<&PlanParameters> {
        self.ensure(&[Phase::Loaded], "edit")?;

        let Some(plan) = self.current.as_ref() else {
            bail!("loaded controller has no plan");
        };

        tracing::debug!(plan_id = %plan.id, from = %self.phase, to = %Phase::Editing, "editing plan");

        self.phase = Phase::Editing;
        self.last_error = None;

        Ok(self.draft.insert(plan.parameters.to_owned()))
    }

    pub fn update_draft(&mut self, params: PlanParameters) -> Result<()> {
        self.ensure(&[Phase::Editing], "update the draft")?;
        self.draft = Some(params);

        Ok(())
    }

    pub fn cancel_edit(&mut self) -> Result<()> {
        self.ensure(&[Phase::Editing], "cancel editing")?;

        tracing::debug!(from = %self.phase, to = %Phase::Loaded, "edit cancelled");

        self.phase = Phase::Loaded;
        self.draft = None;
        self.last_error = None;

        Ok(())
    }

    /// Recomputes the plan for `params`, persists the parameters and makes
    /// the result current.
    ///
    /// On failure the controller returns to editing with `params` kept as
    /// the draft and the loaded plan untouched.
    pub async fn save(&mut self, params: PlanParameters) -> Result<&PlanDocument> {
        self.ensure(&[Phase::Editing], "save")?;

        let Self {
            store,
            phase,
            base,
            current,
            draft,
            last_error,
            ..
        } = self;

        *draft = Some(params.to_owned());

        let Some(source) = base.as_ref() else {
            bail!("editing controller has no plan");
        };

        let plan_id = source.id.to_owned();
        let guard = PhaseGuard::enter(phase, Phase::Saving);

        let outcome = match recompute(source, &params) {
            Ok(next) => match store.persist_parameters(&plan_id, &params).await {
                Ok(()) => Ok(next),
                Err(err) => Err(err),
            },
            Err(err) => Err(err),
        };

        match outcome {
            Ok(next) => {
                tracing::info!(
                    plan_id = %next.id,
                    from = %Phase::Saving,
                    to = %Phase::Loaded,
                    "plan saved"
                );
                guard.commit(Phase::Loaded);
                *draft = None;
                *last_error = None;

                Ok(current.insert(next))
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save plan");
                *last_error = Some(err.to_string());

                Err(err)
            }
        }
    }

    /// Deletes the loaded plan; the controller is unusable afterwards.
    pub async fn delete(&mut self) -> Result<()> {
        if self.phase == Phase::Removed {
            return Err(self.invalid("delete"));
        }

        let Some(id) = self.current.as_ref().map(|plan| plan.id.to_owned()) else {
            return Err(self.invalid("delete"));
        };

        if let Err(err) = self.store.delete_plan(&id).await {
            tracing::warn!(plan_id = %id, error = %err, "failed to delete plan");
            self.last_error = Some(err.to_string());

            return Err(err);
        }

        tracing::info!(plan_id = %id, from = %self.phase, to = %Phase::Removed, "plan removed");

        self.phase = Phase::Removed;
        self.base = None;
        self.current = None;
        self.draft = None;
        self.last_error = None;

        Ok(())
    }

    fn ensure(&self, allowed: &[Phase], action: &'static str) -> Result<()> {
        if allowed.contains(&self.phase) {
            return Ok(());
        }

        Err(self.invalid(action))
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            from: self.phase.as_ref().to_owned(),
            action,
        }
    }
}
