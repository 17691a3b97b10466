//! Model loading seam
//!
//! Loading is asynchronous from the compositor's point of view: it calls
//! [`ModelLoader::begin`] once, then polls once per tick until a terminal
//! event arrives. Parsing model formats is the loader's business.

use std::collections::VecDeque;
use crate::error::Result;
use crate::overlay_bail;
use crate::scene::ModelNode;

/// Something that happened to an in-flight load.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// Bytes received so far; `total` when the size is known
    Progress { loaded: u64, total: Option<u64> },
    /// The model is ready
    Loaded(ModelNode),
    /// The load failed; the message is shown to the user
    Failed(String),
}

impl LoadEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoadEvent::Progress { .. })
    }
}

/// Asynchronous model source polled cooperatively.
pub trait ModelLoader {
    /// Start loading `uri`. An `Err` here counts as a failed load.
    fn begin(&mut self, uri: &str) -> Result<()>;

    /// Next event, if any is ready. Called once per tick while loading.
    fn poll(&mut self) -> Option<LoadEvent>;
}

#[derive(Debug, Clone)]
enum Outcome {
    Succeed(ModelNode),
    Fail(String),
    Never,
}

/// Loader yielding a prebuilt model (or failure) after optional progress
/// ticks. Useful for hosts that build models in code, and for tests.
#[derive(Debug, Clone)]
pub struct StaticModelLoader {
    outcome: Outcome,
    progress_ticks: u32,
    pending: VecDeque<LoadEvent>,
    started: bool,
}

impl StaticModelLoader {
    fn with_outcome(outcome: Outcome) -> Self {
        Self { outcome, progress_ticks: 0, pending: VecDeque::new(), started: false }
    }

    /// Deliver `model` on the first poll after the progress ticks.
    pub fn succeeding(model: ModelNode) -> Self {
        Self::with_outcome(Outcome::Succeed(model))
    }

    /// Report `reason` as a load failure.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail(reason.into()))
    }

    /// Never finish (only progress events, if any).
    pub fn never() -> Self {
        Self::with_outcome(Outcome::Never)
    }

    /// Emit `ticks` progress events before the outcome.
    pub fn with_progress_ticks(mut self, ticks: u32) -> Self {
        self.progress_ticks = ticks;
        self
    }
}

impl ModelLoader for StaticModelLoader {
    fn begin(&mut self, uri: &str) -> Result<()> {
        if self.started {
            overlay_bail!("folio3d::Loader", InvalidState, "load of '{}' already started", uri);
        }
        self.started = true;

        let total = u64::from(self.progress_ticks);
        self.pending.extend((1..=total).map(|loaded| LoadEvent::Progress { loaded, total: Some(total) }));
        match &self.outcome {
            Outcome::Succeed(model) => self.pending.push_back(LoadEvent::Loaded(model.clone())),
            Outcome::Fail(reason) => self.pending.push_back(LoadEvent::Failed(reason.clone())),
            Outcome::Never => {}
        }
        Ok(())
    }

    fn poll(&mut self) -> Option<LoadEvent> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
