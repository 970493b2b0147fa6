//! Event handlers installed by the CLI.

use chance_core::{EventDispatcher, HandlerError, RollEvent, RollEventHandler, RollEventKind};
use strum::IntoEnumIterator;
use tracing::{info, warn};

/// Logs every roll event through `tracing`.
struct EventLogger;

impl RollEventHandler for EventLogger {
    fn handle(&self, event: &RollEvent) -> Result<(), HandlerError> {
        let dice = event.outcome.as_ref().map(|outcome| outcome.dice().to_vec());
        let difficulty = event.difficulty.map(|difficulty| difficulty.to_string());
        let haste = event.haste.map(|haste| haste.to_string());
        match event.kind {
            RollEventKind::DangerousHaste | RollEventKind::DestructiveHaste => warn!(
                kind = %event.kind,
                difficulty = difficulty.as_deref().unwrap_or("-"),
                haste = haste.as_deref().unwrap_or("-"),
                ?dice,
                "hasty task side effect"
            ),
            RollEventKind::CriticalSuccess | RollEventKind::CriticalFailure => {
                info!(kind = %event.kind, ?dice, "critical roll")
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "event_logger"
    }
}

/// Registers the logger for every event kind.
pub fn install(dispatcher: &EventDispatcher) {
    for kind in RollEventKind::iter() {
        dispatcher.register(kind, EventLogger);
    }
}
