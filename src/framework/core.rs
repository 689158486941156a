//! # Core Actor Framework
//!
//! This module defines the generic building blocks of the single-writer actor.
//!
//! ## Key Types
//!
//! - [`ActorState`]: The trait a state value implements to be owned by an actor.
//! - [`StateActor`]: The generic actor that owns the state and applies actions one at a time.
//! - [`StateClient`]: The generic client for sending requests and subscribing to commits.
//! - [`FrameworkError`]: Channel-level failures (actor closed, response dropped).

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Trait with Hooks and Actions)
// =============================================================================

/// Trait that a state value must implement to be owned by a [`StateActor`].
///
/// # Architecture Note
/// The actor owns exactly one value of `Self`. Every mutation arrives as an
/// [`ActorState::Action`] and is applied to a *working copy*. The copy only
/// replaces the live state once both [`ActorState::handle_action`] and
/// [`ActorState::on_commit`] succeed, so a failed action never leaves a
/// half-applied state behind.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await I/O (remote lookups, storage
/// writes). The `Context` type carries those dependencies and is injected in
/// [`StateActor::run`] rather than at construction ("late binding").
#[async_trait]
pub trait ActorState: Clone + Send + Sync + 'static {
    /// Enum representing the mutations this state accepts.
    type Action: Send + Sync + Debug;

    /// The result type returned by a successful action.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this state.
    ///
    /// Channel failures surface through the same type, hence the
    /// `From<FrameworkError>` bound.
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Apply an action to the working copy.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Called with the working copy after a successful action, before it is
    /// swapped in and published. Returning an error discards the working copy.
    async fn on_commit(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// Internal message type sent to the actor.
///
/// - **Get**: read the committed state.
/// - **Action**: apply a mutation; the reply carries the action's result or
///   the state's own error type.
#[derive(Debug)]
pub enum StateRequest<T: ActorState> {
    Get {
        respond_to: oneshot::Sender<T>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns a single state value.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state and the
/// receiver end of the channel, and processes requests *sequentially*. An action
/// that awaits remote lookups holds the mailbox until it finishes, so two
/// overlapping mutations can never read the same stale state.
///
/// Every commit bumps a monotonic `version` and is published on a
/// [`watch`] channel; subscribers always see the latest committed value.
pub struct StateActor<T: ActorState> {
    receiver: mpsc::Receiver<StateRequest<T>>,
    state: T,
    publisher: watch::Sender<T>,
    version: u64,
}

impl<T: ActorState> StateActor<T> {
    /// Creates a new `StateActor` holding `initial` and its associated `StateClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when full, client calls wait.
    pub fn new(buffer_size: usize, initial: T) -> (Self, StateClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, subscriber) = watch::channel(initial.clone());
        let actor = Self {
            receiver,
            state: initial,
            publisher,
            version: 0,
        };
        let client = StateClient::new(sender, subscriber);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Cart" instead of "rocketshoes::model::cart::Cart")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Get { respond_to } => {
                    debug!(entity_type, version = self.version, "Get");
                    let _ = respond_to.send(self.state.clone());
                }
                StateRequest::Action { action, respond_to } => {
                    debug!(entity_type, ?action, "Action");
                    let mut working = self.state.clone();

                    let result = match working.handle_action(action, &context).await {
                        Ok(outcome) => working.on_commit(&context).await.map(|()| outcome),
                        Err(e) => Err(e),
                    };

                    match result {
                        Ok(outcome) => {
                            self.state = working;
                            self.version += 1;
                            self.publisher.send_replace(self.state.clone());
                            info!(entity_type, version = self.version, "Committed");
                            let _ = respond_to.send(Ok(outcome));
                        }
                        Err(e) => {
                            warn!(entity_type, version = self.version, error = %e, "Action failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
            }
        }

        info!(entity_type, version = self.version, "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `StateActor`.
///
/// Cheap to clone: it holds only the mailbox sender and a watch receiver.
#[derive(Clone)]
pub struct StateClient<T: ActorState> {
    sender: mpsc::Sender<StateRequest<T>>,
    subscriber: watch::Receiver<T>,
}

impl<T: ActorState> StateClient<T> {
    pub fn new(sender: mpsc::Sender<StateRequest<T>>, subscriber: watch::Receiver<T>) -> Self {
        Self { sender, subscriber }
    }

    pub async fn get(&self) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Get { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns a receiver that resolves `changed()` on the next commit.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        let mut receiver = self.subscriber.clone();
        receiver.mark_unchanged();
        receiver
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
