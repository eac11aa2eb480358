use std::fmt;

/// One of the two combatants in a match.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActorId {
    Red,
    Blue,
}

impl ActorId {
    /// Both actors in slot order.
    pub const ALL: [ActorId; 2] = [ActorId::Red, ActorId::Blue];

    /// Returns the other combatant.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            ActorId::Red => ActorId::Blue,
            ActorId::Blue => ActorId::Red,
        }
    }

    /// Slot index used for fixed-size per-actor storage.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ActorId::Red => 0,
            ActorId::Blue => 1,
        }
    }
}

/// Monotonic clock reading in milliseconds.
///
/// Also used for spans (travel delays, lock durations) so that the whole
/// engine stays in integer time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000))
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Whole seconds, rounded up. Matches how a countdown label reads.
    pub const fn as_secs_ceil(self) -> u64 {
        self.0.div_ceil(1_000)
    }

    pub const fn saturating_sub(self, rhs: Tick) -> Tick {
        Tick(self.0.saturating_sub(rhs.0))
    }

    pub const fn saturating_add(self, rhs: Tick) -> Tick {
        Tick(self.0.saturating_add(rhs.0))
    }

    pub const fn checked_add(self, rhs: Tick) -> Option<Tick> {
        match self.0.checked_add(rhs.0) {
            Some(millis) => Some(Tick(millis)),
            None => None,
        }
    }
}

// Arithmetic saturates: a deadline past the end of time pins at `u64::MAX`.

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl std::ops::Add<Tick> for Tick {
    type Output = Tick;
    fn add(self, rhs: Tick) -> Tick {
        self.saturating_add(rhs)
    }
}

impl std::ops::Sub<u64> for Tick {
    type Output = Tick;
    fn sub(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_sub(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Ratio expressed in thousandths of a maximum (`Permille(100)` is 10%).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Permille(pub u32);

impl Permille {
    pub const FULL: Self = Self(1_000);

    /// Applies this ratio to `maximum`, rounding to the nearest integer.
    pub const fn of(self, maximum: u32) -> u32 {
        let scaled = maximum as u64 * self.0 as u64;
        ((scaled + 500) / 1_000) as u32
    }
}

impl fmt::Display for Permille {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
    }
}

/// Integer resource meter (health, energy) clamped to `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// A meter filled to its maximum.
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Removes up to `amount`, returning how much was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    /// Adds up to the missing amount, returning how much was actually added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let missing = self.maximum - self.current;
        let actual = amount.min(missing);
        self.current += actual;
        actual
    }

    /// Restores `ratio` of the maximum, returning how much was actually added.
    pub fn apply_permille(&mut self, ratio: Permille) -> u32 {
        self.restore(ratio.of(self.maximum))
    }

    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.maximum);
    }

    pub fn fill(&mut self) {
        self.current = self.maximum;
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    /// Fill level in thousandths, for progress bars.
    pub fn permille(&self) -> Permille {
        if self.maximum == 0 {
            return Permille(0);
        }
        Permille((self.current as u64 * 1_000 / self.maximum as u64) as u32)
    }
}
