//! Seeded integer stream with position tracking.
//!
//! A [`DeterministicStream`] is a MINSTD generator (Park–Miller, multiplier
//! 48271, modulus 2³¹−1) that counts how many values it has produced. The
//! `(seed, position)` pair, exposed as [`StreamState`], fully determines every
//! future value, so a session is persisted by storing that pair and replaying.
//!
//! # Determinism
//!
//! Range mapping uses integer arithmetic only. Given the same state the stream
//! yields the same values on every platform and build profile.
//!
//! # Cost model
//!
//! [`DeterministicStream::set_position`] replays from the seed and is O(p).
//! Sessions are short, so no closed-form jump is provided.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ChanceError, ErrorSeverity};

/// Initial seed value identifying a stream's origin.
pub type Seed = u64;

/// Number of values already drawn from a stream.
pub type Position = u64;

/// A stream shared between rollers of one engine.
pub type SharedStream = Arc<Mutex<DeterministicStream>>;

/// Errors raised when rebuilding a stream from external input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("stream position cannot be negative (got {0})")]
    NegativePosition(i64),

    #[error("malformed stream state `{0}`, expected `<seed>:<position>`")]
    Malformed(String),
}

impl ChanceError for StreamError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativePosition(_) => "STREAM_NEGATIVE_POSITION",
            Self::Malformed(_) => "STREAM_MALFORMED_STATE",
        }
    }
}

/// The `(seed, position)` pair that fully determines a stream's future output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamState {
    pub seed: Seed,
    pub position: Position,
}

impl StreamState {
    pub const fn new(seed: Seed, position: Position) -> Self {
        Self { seed, position }
    }

    /// Builds a state from a signed position, rejecting negative values.
    pub fn try_from_signed(seed: Seed, position: i64) -> Result<Self, StreamError> {
        let position =
            u64::try_from(position).map_err(|_| StreamError::NegativePosition(position))?;
        Ok(Self::new(seed, position))
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.seed, self.position)
    }
}

impl FromStr for StreamState {
    type Err = StreamError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || StreamError::Malformed(text.to_string());

        let (seed, position) = text.trim().split_once(':').ok_or_else(malformed)?;
        let seed = seed.trim().parse::<Seed>().map_err(|_| malformed())?;
        let position = position.trim().parse::<i64>().map_err(|_| malformed())?;

        Self::try_from_signed(seed, position)
    }
}

/// Seeded MINSTD generator with counter tracking.
///
/// Cloning a stream (or calling [`fork`](Self::fork)) yields an independent
/// stream at the same state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterministicStream {
    seed: Seed,
    state: u64,
    position: Position,
}

impl DeterministicStream {
    /// MINSTD multiplier.
    pub const MULTIPLIER: u64 = 48_271;

    /// MINSTD modulus (2³¹−1, a Mersenne prime).
    pub const MODULUS: u64 = 2_147_483_647;

    /// Internal state used when a seed reduces to zero.
    ///
    /// A multiplicative generator started at zero would emit zero forever.
    pub const RESERVED_SEED: u64 = 1;

    /// Creates a stream at position 0.
    ///
    /// The seed is kept as given for [`state`](Self::state); the internal
    /// generator state is `seed mod MODULUS`, with zero coerced to
    /// [`RESERVED_SEED`](Self::RESERVED_SEED).
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            state: Self::initial_state(seed),
            position: 0,
        }
    }

    /// Rebuilds the stream described by `state` by replaying from its seed.
    pub fn from_state(state: StreamState) -> Self {
        let mut stream = Self::new(state.seed);
        stream.advance(state.position);
        stream
    }

    /// Wraps the stream for sharing between rollers.
    pub fn into_shared(self) -> SharedStream {
        Arc::new(Mutex::new(self))
    }

    #[inline]
    const fn initial_state(seed: Seed) -> u64 {
        match seed % Self::MODULUS {
            0 => Self::RESERVED_SEED,
            reduced => reduced,
        }
    }

    /// The seed this stream was created with.
    pub const fn seed(&self) -> Seed {
        self.seed
    }

    /// The number of values consumed so far.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// The current `(seed, position)` pair.
    pub const fn state(&self) -> StreamState {
        StreamState::new(self.seed, self.position)
    }

    /// Advances the generator one step and returns the raw value in `[1, MODULUS)`.
    #[inline]
    fn step(&mut self) -> u64 {
        // state < 2^31 and MULTIPLIER < 2^16, so the product fits in u64.
        self.state = (self.state * Self::MULTIPLIER) % Self::MODULUS;
        self.position += 1;
        self.state
    }

    fn advance(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Returns an integer in `[min(low, high), max(low, high)]` inclusive.
    ///
    /// Swapped bounds are normalized. Every call advances the position by one.
    pub fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        let (min, max) = if low > high { (high, low) } else { (low, high) };
        let span = i128::from(max) - i128::from(min) + 1;
        let raw = i128::from(self.step());

        // raw < MODULUS, so the offset is always < span.
        let offset = raw * span / i128::from(Self::MODULUS);
        (i128::from(min) + offset) as i64
    }

    /// Returns the stream to position 0 using the original seed.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(self.seed);
        self.position = 0;
    }

    /// Moves to `position` by resetting and replaying `position` steps.
    ///
    /// Cost is proportional to `position`, whichever direction the move goes.
    pub fn set_position(&mut self, position: Position) {
        tracing::trace!(seed = self.seed, from = self.position, to = position, "stream seek");
        self.reset();
        self.advance(position);
    }

    /// Returns an independent stream at the same state.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// Returns the value `offset` draws ahead without consuming anything.
    pub fn peek_in_range(&self, low: i64, high: i64, offset: u64) -> i64 {
        let mut probe = self.fork();
        probe.advance(offset);
        probe.next_in_range(low, high)
    }

    /// Returns `count` values starting `offset` draws ahead without consuming anything.
    pub fn peek_sequence(&self, low: i64, high: i64, count: usize, offset: u64) -> Vec<i64> {
        let mut probe = self.fork();
        probe.advance(offset);
        probe.draws(low, high).take(count).collect()
    }

    /// Reads `count` values at `position` of the stream seeded with `seed`.
    ///
    /// Uses an ephemeral stream; no shared state is touched.
    pub fn peek_at(seed: Seed, position: Position, low: i64, high: i64, count: usize) -> Vec<i64> {
        Self::from_state(StreamState::new(seed, position))
            .draws(low, high)
            .take(count)
            .collect()
    }

    /// Reproduces the values drawn at positions `start..end` (end exclusive).
    pub fn reproduce_sequence(
        seed: Seed,
        start: Position,
        end: Position,
        low: i64,
        high: i64,
    ) -> Vec<i64> {
        if end <= start {
            return Vec::new();
        }
        let count = usize::try_from(end - start).unwrap_or(usize::MAX);
        Self::peek_at(seed, start, low, high, count)
    }

    /// Endless iterator of range draws; each item consumes one position.
    pub fn draws(&mut self, low: i64, high: i64) -> Draws<'_> {
        Draws {
            stream: self,
            low,
            high,
        }
    }
}

impl fmt::Display for DeterministicStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DeterministicStream(seed={}, position={})",
            self.seed, self.position
        )
    }
}

/// Iterator returned by [`DeterministicStream::draws`].
#[derive(Debug)]
pub struct Draws<'a> {
    stream: &'a mut DeterministicStream,
    low: i64,
    high: i64,
}

impl Iterator for Draws<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.stream.next_in_range(self.low, self.high))
    }
}

/// Locks a shared stream.
///
/// A panic while holding the lock cannot leave the stream half-updated (a
/// step is a single assignment pair), so a poisoned lock is recovered.
pub(crate) fn lock(stream: &SharedStream) -> MutexGuard<'_, DeterministicStream> {
    stream.lock().unwrap_or_else(PoisonError::into_inner)
}
