//! Dataflow primitives for the portfolio frontend
//!
//! Views never mutate state directly. They emit events through
//! [`Relay`]s and render from the signals of an [`Actor`], which processes
//! those events one at a time.
//!
//! # Conventions
//!
//! 1. **Event-Source Naming** - Relays follow `{source}_{event}_relay`
//! 2. **No Direct Access** - Actor state is read through signals only

pub mod actor;
pub mod relay;

pub use actor::Actor;
pub use relay::{Relay, RelayError, relay};
