//! Roll event payloads.

use crate::dice::{Difficulty, Haste, HasteSideEffect, Outcome};

/// Kinds of roll events observers can subscribe to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RollEventKind {
    /// The task was performed with dangerous haste and may injure the user.
    DangerousHaste,
    /// The task was performed with destructive haste and may damage equipment.
    DestructiveHaste,
    /// Two or more dice, all showing 1.
    CriticalSuccess,
    /// Two or more dice, all showing 6.
    CriticalFailure,
}

/// Well-known metadata keys attached by the roller.
pub mod keys {
    pub const DICE_COUNT: &str = "dice_count";
    pub const SIDE_EFFECT: &str = "side_effect";
    pub const ALL_ONES: &str = "all_ones";
    pub const ALL_SIXES: &str = "all_sixes";
}

/// A single metadata value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetadataValue {
    Count(usize),
    Flag(bool),
    SideEffect(HasteSideEffect),
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        Self::Count(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<HasteSideEffect> for MetadataValue {
    fn from(value: HasteSideEffect) -> Self {
        Self::SideEffect(value)
    }
}

/// Insertion-ordered key/value context carried by a [`RollEvent`].
///
/// Built once per event with [`with`](Self::with); there is no mutable access
/// afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EventMetadata {
    entries: Vec<(&'static str, MetadataValue)>,
}

impl EventMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry (builder pattern). A repeated key shadows the earlier entry.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<MetadataValue>) -> Self {
        self.entries.push((key, value.into()));
        self
    }

    /// Looks up the most recent value for `key`.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    pub fn count(&self, key: &str) -> Option<usize> {
        match self.get(key) {
            Some(MetadataValue::Count(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(MetadataValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn side_effect(&self, key: &str) -> Option<HasteSideEffect> {
        match self.get(key) {
            Some(MetadataValue::SideEffect(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MetadataValue)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Notification emitted after a roll when one of the trigger conditions holds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RollEvent {
    pub kind: RollEventKind,
    pub outcome: Option<Outcome>,
    pub haste: Option<Haste>,
    pub difficulty: Option<Difficulty>,
    pub metadata: EventMetadata,
}

impl RollEvent {
    pub fn new(kind: RollEventKind) -> Self {
        Self {
            kind,
            outcome: None,
            haste: None,
            difficulty: None,
            metadata: EventMetadata::new(),
        }
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_task(mut self, difficulty: Option<Difficulty>, haste: Option<Haste>) -> Self {
        self.difficulty = difficulty;
        self.haste = haste;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: EventMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_keeps_insertion_order_and_typed_access() {
        let metadata = EventMetadata::new()
            .with(keys::DICE_COUNT, 4usize)
            .with(keys::SIDE_EFFECT, HasteSideEffect::Dangerous);

        let order: Vec<&str> = metadata.iter().map(|(key, _)| key).collect();
        assert_eq!(order, [keys::DICE_COUNT, keys::SIDE_EFFECT]);
        assert_eq!(metadata.count(keys::DICE_COUNT), Some(4));
        assert_eq!(
            metadata.side_effect(keys::SIDE_EFFECT),
            Some(HasteSideEffect::Dangerous)
        );
        assert_eq!(metadata.flag(keys::DICE_COUNT), None);
        assert_eq!(metadata.get(keys::ALL_ONES), None);
    }

    #[test]
    fn repeated_key_shadows_earlier_value() {
        let metadata = EventMetadata::new()
            .with(keys::ALL_ONES, false)
            .with(keys::ALL_ONES, true);
        assert_eq!(metadata.flag(keys::ALL_ONES), Some(true));
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn events_do_not_share_metadata() {
        let first = RollEvent::new(RollEventKind::CriticalSuccess)
            .with_metadata(EventMetadata::new().with(keys::ALL_ONES, true));
        let second = RollEvent::new(RollEventKind::CriticalSuccess);

        assert!(second.metadata.is_empty());
        assert_eq!(first.metadata.len(), 1);
    }
}
