pub mod ad;
pub mod driver;
pub mod image;

pub use ad::{AdAction, AdEffect, AdStudio};
pub use driver::Driver;
pub use image::{ImageAction, ImageEffect, ImageStudio};

use crate::error::StudioError;
use crate::gateway::Backend;
use crate::state::RequestTicket;
use async_trait::async_trait;

/// Result of feeding one action to a studio.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, E> {
    pub state: S,
    pub effects: Vec<E>,
}

impl<S, E> Transition<S, E> {
    pub fn idle(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(state: S, effect: E) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// A screen-level state machine. `reduce` is pure; all I/O is described by
/// the returned effects and carried out by [`Driver`] through `perform`.
#[async_trait]
pub trait StudioModel: Default + Send + Sized + 'static {
    type Action: Send + 'static;
    type Effect: Clone + Send + 'static;

    fn reduce(self, action: Self::Action) -> Transition<Self, Self::Effect>;

    fn ticket(effect: &Self::Effect) -> RequestTicket;

    /// Completion action reporting that `effect` ended with `error` without
    /// `perform` returning, e.g. because the task panicked.
    fn failed(effect: Self::Effect, error: StudioError) -> Self::Action;

    /// Runs one effect against the backend and turns the outcome into the
    /// completion action for `reduce`.
    async fn perform(backend: &dyn Backend, effect: Self::Effect) -> Self::Action;
}
