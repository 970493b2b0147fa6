//! Handler registry for roll events.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{trace, warn};

use super::types::{RollEvent, RollEventKind};
use crate::error::{ChanceError, ErrorSeverity};

/// Error type returned by handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Observer for roll events.
///
/// Closures `Fn(&RollEvent) -> Result<(), HandlerError>` implement this trait
/// directly; implement it on a type when the handler needs a name for logs.
pub trait RollEventHandler: Send + Sync {
    /// Handles one event. Returning an error stops delivery to later handlers.
    fn handle(&self, event: &RollEvent) -> Result<(), HandlerError>;

    /// Human-readable handler name used in diagnostics.
    fn name(&self) -> &'static str {
        "anonymous"
    }
}

impl<F> RollEventHandler for F
where
    F: Fn(&RollEvent) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, event: &RollEvent) -> Result<(), HandlerError> {
        self(event)
    }
}

/// Token identifying one registration, used to unregister it later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

/// A handler rejected an event; remaining handlers were not invoked.
#[derive(Debug, thiserror::Error)]
#[error("handler `{handler}` failed on {kind} event: {source}")]
pub struct DispatchError {
    pub kind: RollEventKind,
    pub handler: &'static str,
    #[source]
    pub source: HandlerError,
}

impl ChanceError for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Observer
    }

    fn error_code(&self) -> &'static str {
        "DISPATCH_HANDLER_FAILED"
    }
}

#[derive(Clone)]
struct Registration {
    id: HandlerId,
    handler: Arc<dyn RollEventHandler>,
}

/// Registry mapping each [`RollEventKind`] to an ordered list of handlers.
///
/// Handlers run synchronously in registration order. Dispatch works on a
/// snapshot of the list, so a handler may register or unregister handlers
/// without deadlocking; such changes apply from the next dispatch on.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<HashMap<RollEventKind, Vec<Registration>>>,
    next_id: AtomicU64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` to the list for `kind`.
    pub fn register<H>(&self, kind: RollEventKind, handler: H) -> HandlerId
    where
        H: RollEventHandler + 'static,
    {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let registration = Registration {
            id,
            handler: Arc::new(handler),
        };

        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push(registration);

        trace!(%kind, ?id, "registered roll event handler");
        id
    }

    /// Registers a closure. Equivalent to [`register`](Self::register) but lets
    /// the compiler infer the closure's argument and return types.
    pub fn register_fn<F>(&self, kind: RollEventKind, handler: F) -> HandlerId
    where
        F: Fn(&RollEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.register(kind, handler)
    }

    /// Removes the registration `id` from `kind`. Returns false if it was not registered there.
    pub fn unregister(&self, kind: RollEventKind, id: HandlerId) -> bool {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(list) = handlers.get_mut(&kind) else {
            return false;
        };
        match list.iter().position(|registration| registration.id == id) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Clears handlers for one kind, or for every kind when `kind` is `None`.
    pub fn clear(&self, kind: Option<RollEventKind>) {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match kind {
            Some(kind) => {
                handlers.remove(&kind);
            }
            None => handlers.clear(),
        }
    }

    /// Number of handlers currently registered for `kind`.
    pub fn handler_count(&self, kind: RollEventKind) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Invokes every handler registered for `event.kind`, in order.
    ///
    /// The first failing handler aborts delivery and its error is returned.
    pub fn dispatch(&self, event: &RollEvent) -> Result<(), DispatchError> {
        let snapshot: Vec<Registration> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event.kind)
            .cloned()
            .unwrap_or_default();

        trace!(kind = %event.kind, handlers = snapshot.len(), "dispatching roll event");

        for registration in &snapshot {
            let handler = registration.handler.as_ref();
            if let Err(source) = handler.handle(event) {
                warn!(
                    kind = %event.kind,
                    handler = handler.name(),
                    error = %source,
                    "roll event handler failed; skipping remaining handlers"
                );
                return Err(DispatchError {
                    kind: event.kind,
                    handler: handler.name(),
                    source,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let mut map = f.debug_map();
        for (kind, list) in handlers.iter() {
            map.entry(kind, &list.len());
        }
        map.finish()
    }
}
