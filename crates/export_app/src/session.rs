use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use export_core::{update, AppState, AppViewModel, Msg, Notification};
use export_engine::{DirectoryFileSaver, EngineError, EngineHandle};
use export_logging::export_info;

use crate::{EffectRunner, HostConfig};

#[derive(Default)]
struct SharedState {
    state: AppState,
}

/// The interaction controller for one user session.
///
/// Owns the only copy of the controller state. The presentation layer reads
/// snapshots through [`Session::view`] and feeds user intents through
/// [`Session::dispatch`]; workflow completions come back through
/// [`Session::pump`] or [`Session::wait_for_event`]. All transitions are
/// serialized through one lock, so two threads submitting at the same time
/// still start at most one workflow.
pub struct Session {
    shared: Mutex<SharedState>,
    runner: EffectRunner,
}

impl Session {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            shared: Mutex::new(SharedState::default()),
            runner,
        }
    }

    pub fn from_config(config: &HostConfig) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(config.engine_settings())?;
        let saver = DirectoryFileSaver::new(config.output_dir.clone());
        export_info!(
            "Session using service {} and output dir {:?}",
            config.service_url,
            config.output_dir
        );
        Ok(Self::new(EffectRunner::new(engine, Box::new(saver))))
    }

    /// Applies one message. Returns the new view when anything changed.
    pub fn dispatch(&self, msg: Msg) -> Option<AppViewModel> {
        let mut guard = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        let state = std::mem::take(&mut guard.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        guard.state = state;
        // Effects leave while the lock is held so they reach the engine in
        // the same order as the transitions that produced them.
        self.runner.run(effects);
        view
    }

    pub fn view(&self) -> AppViewModel {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .view()
    }

    /// Applies every engine event that is already waiting. Returns the latest
    /// view if any of them changed state.
    pub fn pump(&self) -> Option<AppViewModel> {
        let mut latest = None;
        while let Some(msg) = self.runner.try_next_msg() {
            if let Some(view) = self.dispatch(msg) {
                latest = Some(view);
            }
        }
        latest
    }

    /// Waits up to `timeout` for one engine event and applies it.
    pub fn wait_for_event(&self, timeout: Duration) -> Option<AppViewModel> {
        let msg = self.runner.next_msg(timeout)?;
        self.dispatch(msg)
    }

    /// Drains the transient notifications raised since the last call.
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.runner.take_notifications()
    }
}
