//! Roll events and the observers that receive them.
//!
//! The roller never depends on concrete observers: it builds [`RollEvent`]s and
//! hands them to an [`EventDispatcher`], which fans them out to whatever
//! handlers were registered for that [`RollEventKind`].
mod dispatcher;
mod types;

pub use dispatcher::{DispatchError, EventDispatcher, HandlerError, HandlerId, RollEventHandler};
pub use types::{EventMetadata, MetadataValue, RollEvent, RollEventKind, keys};
