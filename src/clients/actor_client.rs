use crate::framework::{ActorState, FrameworkError, StateClient};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for state-specific clients to inherit the standard read operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// reading the committed state and subscribing to commits.
#[async_trait]
pub trait ActorClient<T: ActorState>: Send + Sync {
    /// The state-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StateClient.
    fn inner(&self) -> &StateClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch the latest committed state.
    #[tracing::instrument(skip(self))]
    async fn get(&self) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get().await.map_err(Self::map_error)
    }

    /// Observe every future commit.
    fn subscribe(&self) -> watch::Receiver<T> {
        self.inner().subscribe()
    }
}
