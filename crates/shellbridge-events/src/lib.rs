//! Event notifier for the shellbridge authentication bridge.
//!
//! Decouples components that detect something happened (a mobile login
//! finished, an API call failed) from the UI components that react to it.
//!
//! # Components
//!
//! - [`names`] - the closed set of event names
//! - [`event`] - typed event payloads
//! - [`notifier`] - publish/subscribe registry

pub mod error;
pub mod event;
pub mod names;
pub mod notifier;

pub use error::{EventError, Result};
pub use event::{DomainEvent, ErrorInfo};
pub use names::EventName;
pub use notifier::{EventHandler, EventNotifier, SharedEventNotifier, SubscriptionId};
