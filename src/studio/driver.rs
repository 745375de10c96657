use super::StudioModel;
use crate::error::StudioError;
use crate::gateway::Backend;
use crate::state::RequestTicket;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

type Completion<S> = (RequestTicket, <S as StudioModel>::Action);

/// Sends the completion of one request. If dropped before [`Report::done`],
/// e.g. because `perform` panicked, it reports the effect as failed instead,
/// so the request still settles.
struct Report<E, A> {
    ticket: RequestTicket,
    effect: Option<E>,
    fail: fn(E, StudioError) -> A,
    sender: mpsc::UnboundedSender<(RequestTicket, A)>,
}

impl<E, A> Report<E, A> {
    fn done(mut self, action: A) {
        self.effect = None;
        // The driver may have been dropped; nothing left to update then.
        let _ = self.sender.send((self.ticket, action));
    }
}

impl<E, A> Drop for Report<E, A> {
    fn drop(&mut self) {
        if let Some(effect) = self.effect.take() {
            let error = StudioError::Internal(format!(
                "{:?} request ended without a response",
                self.ticket.resource
            ));
            let _ = self.sender.send((self.ticket, (self.fail)(effect, error)));
        }
    }
}

/// Owns a studio state and runs its effects on the tokio runtime.
///
/// Every effect is spawned as its own task and reports back through a
/// channel. Issuing a request for an exclusive resource aborts the task of
/// the request it supersedes, so a superseded response is never applied.
pub struct Driver<S: StudioModel> {
    state: S,
    backend: Arc<dyn Backend>,
    tasks: HashMap<RequestTicket, JoinHandle<()>>,
    sender: mpsc::UnboundedSender<Completion<S>>,
    receiver: mpsc::UnboundedReceiver<Completion<S>>,
}

impl<S: StudioModel> Driver<S> {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_state(backend, S::default())
    }

    pub fn with_state(backend: Arc<dyn Backend>, state: S) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state,
            backend,
            tasks: HashMap::new(),
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn into_state(mut self) -> S {
        std::mem::take(&mut self.state)
    }

    /// Number of requests still running.
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }

    /// Applies `action` and spawns the effects it produces. Must be called
    /// from within a tokio runtime. Returns how many requests were started.
    pub fn dispatch(&mut self, action: S::Action) -> usize {
        let transition = std::mem::take(&mut self.state).reduce(action);
        self.state = transition.state;

        let started = transition.effects.len();
        for effect in transition.effects {
            self.spawn(effect);
        }
        started
    }

    fn spawn(&mut self, effect: S::Effect) {
        let ticket = S::ticket(&effect);

        if ticket.resource.is_exclusive() {
            let superseded: Vec<RequestTicket> = self
                .tasks
                .keys()
                .filter(|t| t.resource == ticket.resource)
                .copied()
                .collect();
            for old in superseded {
                if let Some(handle) = self.tasks.remove(&old) {
                    log::debug!("aborting superseded {:?} request", old.resource);
                    handle.abort();
                }
            }
        }

        let backend = Arc::clone(&self.backend);
        let report = Report {
            ticket,
            effect: Some(effect.clone()),
            fail: S::failed,
            sender: self.sender.clone(),
        };
        let handle = tokio::spawn(async move {
            let action = S::perform(backend.as_ref(), effect).await;
            report.done(action);
        });
        self.tasks.insert(ticket, handle);
    }

    /// Waits for the next completion and applies it. Returns false when
    /// nothing is outstanding.
    pub async fn step(&mut self) -> bool {
        while !self.tasks.is_empty() {
            let Some((ticket, action)) = self.receiver.recv().await else {
                return false;
            };
            if self.tasks.remove(&ticket).is_none() {
                // Aborted task reporting on its way out.
                continue;
            }
            self.dispatch(action);
            return true;
        }
        false
    }

    /// Applies completions until no request is outstanding, including
    /// requests started by those completions.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    /// `dispatch` followed by `settle`.
    pub async fn run(&mut self, action: S::Action) -> &S {
        self.dispatch(action);
        self.settle().await;
        &self.state
    }
}

impl<S: StudioModel> Drop for Driver<S> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
