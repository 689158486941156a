//! Generic single-writer actor framework.
//!
//! This module provides the building blocks for owning one mutable state value
//! inside a Tokio task and mutating it only through typed actions.
//!
//! # Main Components
//!
//! - [`ActorState`] - Trait a state type implements to be owned by an actor
//! - [`StateActor`] - Generic actor that applies actions and publishes commits
//! - [`StateClient`] - Typed handle for sending requests and subscribing
//! - [`FrameworkError`] - Channel-level errors
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
