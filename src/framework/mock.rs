//! # Mock Framework
//!
//! Utilities for testing code that talks to a [`StateClient`] without running the
//! real actor.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | Scripted replies | Real state transitions |
//! | **Error Injection** | Easy (`return_err`) | Requires a failing dependency |
//!
//! Two styles are available:
//!
//! - The fluent [`MockClient`]: queue `expect_get` / `expect_action` replies,
//!   push new states to subscribers with [`MockClient::publish`], and call
//!   [`MockClient::verify`] at the end.
//! - The low-level [`create_mock_client`] + [`expect_action`] helpers, which hand
//!   you the raw request so you can assert on the action that was sent.

use crate::framework::{ActorState, StateClient, StateRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: ActorState> {
    Get { response: T },
    Action { response: Result<T::ActionResult, T::Error> },
}

type ExpectationQueue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorState>(queue: &ExpectationQueue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::new(Cart::default());
/// mock.expect_action().return_ok(LineChange { product_id: ProductId(1), amount: 1 });
///
/// let client = CartClient::new(mock.client());
/// client.add_product(ProductId(1)).await?;
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorState> {
    client: StateClient<T>,
    publisher: watch::Sender<T>,
    expectations: ExpectationQueue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorState> MockClient<T> {
    /// Creates a new mock client whose subscribers start at `initial`.
    pub fn new(initial: T) -> Self {
        let (sender, mut receiver) = mpsc::channel::<StateRequest<T>>(100);
        let (publisher, subscriber) = watch::channel(initial);
        let expectations: ExpectationQueue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&expectations_clone).pop_front();

                match (request, expectation) {
                    (StateRequest::Get { respond_to }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StateRequest::Action {
                            action: _,
                            respond_to,
                        },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StateClient::new(sender, subscriber),
            publisher,
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StateClient<T> {
        self.client.clone()
    }

    /// Pushes a new state to every subscriber, as a real commit would.
    pub fn publish(&self, state: T) {
        self.publisher.send_replace(state);
    }

    /// Expects a `get` request.
    pub fn expect_get(&mut self) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorState> {
    expectations: ExpectationQueue<T>,
}

impl<T: ActorState> GetExpectationBuilder<T> {
    /// Sets the state returned by the next `get`.
    pub fn return_state(self, state: T) {
        lock(&self.expectations).push_back(Expectation::Get { response: state });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorState> {
    expectations: ExpectationQueue<T>,
}

impl<T: ActorState> ActionExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: T::ActionResult) {
        lock(&self.expectations).push_back(Expectation::Action {
            response: Ok(result),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: T::Error) {
        lock(&self.expectations).push_back(Expectation::Action {
            response: Err(error),
        });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client wired to a receiver the test controls.
///
/// The test pulls requests off `receiver` (see [`expect_action`]), asserts on them,
/// and answers through the enclosed responder. Subscribers start at `initial`.
pub fn create_mock_client<T: ActorState>(
    buffer_size: usize,
    initial: T,
) -> (StateClient<T>, mpsc::Receiver<StateRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_publisher, subscriber) = watch::channel(initial);
    (StateClient::new(sender, subscriber), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<T>>,
) -> Option<oneshot::Sender<T>> {
    match receiver.recv().await {
        Some(StateRequest::Get { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<T>>,
) -> Option<(
    T::Action,
    oneshot::Sender<Result<T::ActionResult, T::Error>>,
)> {
    match receiver.recv().await {
        Some(StateRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::FrameworkError;
    use async_trait::async_trait;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Tally {
        hits: u32,
    }

    #[derive(Debug)]
    enum TallyAction {
        Hit,
    }

    #[derive(Debug, thiserror::Error)]
    enum TallyError {
        #[error("tally full")]
        Full,
        #[error(transparent)]
        Framework(#[from] FrameworkError),
    }

    #[async_trait]
    impl ActorState for Tally {
        type Action = TallyAction;
        type ActionResult = u32;
        type Context = ();
        type Error = TallyError;

        async fn handle_action(&mut self, _action: TallyAction, _ctx: &()) -> Result<u32, TallyError> {
            self.hits += 1;
            Ok(self.hits)
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10, Tally::default());

        let task = tokio::spawn(async move { client.perform_action(TallyAction::Hit).await });

        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, TallyAction::Hit));
        responder.send(Ok(3)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::new(Tally::default());
        mock.expect_action().return_ok(1);
        mock.expect_action().return_err(TallyError::Full);
        mock.expect_get().return_state(Tally { hits: 1 });

        let client = mock.client();
        assert_eq!(client.perform_action(TallyAction::Hit).await.unwrap(), 1);
        assert!(matches!(
            client.perform_action(TallyAction::Hit).await,
            Err(TallyError::Full)
        ));
        assert_eq!(client.get().await.unwrap(), Tally { hits: 1 });

        mock.verify();
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let mock = MockClient::new(Tally::default());
        let mut updates = mock.client().subscribe();

        mock.publish(Tally { hits: 4 });
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow().hits, 4);
    }
}
