//! Shared primitives: identifiers, vitals and countdown timers.

use core::fmt;

/// Unique identifier for any entity placed in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player always owns id 0.
    pub const PLAYER: EntityId = EntityId(0);

    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Number of simulated frames since the session started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const fn next(self) -> Self {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer hit points, clamped to `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Subtracts `amount` and returns how much was actually lost.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current - amount.max(0)).max(0);
        before - self.current
    }

    /// Adds `amount` up to max and returns how much was actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current + amount.max(0)).min(self.max);
        self.current - before
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Continuous stamina pool, clamped to `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
}

impl Stamina {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    pub fn spend(&mut self, cost: f32) {
        self.current = (self.current - cost).max(0.0);
    }

    pub fn restore(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }
}

/// Seconds remaining until something becomes available again.
///
/// A countdown is "ready" once it has reached zero; it never goes negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown(f32);

impl Countdown {
    pub const READY: Countdown = Countdown(0.0);

    pub fn start(&mut self, seconds: f32) {
        self.0 = seconds.max(0.0);
    }

    /// Advances by `dt`, returning true when this call brought it to zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.0 <= 0.0 {
            return false;
        }
        self.0 = (self.0 - dt).max(0.0);
        self.0 <= 0.0
    }

    pub fn is_ready(&self) -> bool {
        self.0 <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_clamps_both_ways() {
        let mut health = Health::full(100);
        assert_eq!(health.damage(130), 100);
        assert!(health.is_depleted());
        assert_eq!(health.heal(25), 25);
        assert_eq!(health.heal(500), 75);
        assert_eq!(health.current, 100);
    }

    #[test]
    fn countdown_reports_expiry_once() {
        let mut timer = Countdown::READY;
        timer.start(0.3);
        assert!(!timer.tick(0.2));
        assert!(timer.tick(0.2));
        assert!(timer.is_ready());
        // Already expired; further ticks are silent.
        assert!(!timer.tick(0.2));
    }

    #[test]
    fn stamina_spend_and_restore_clamp() {
        let mut stamina = Stamina::full(100.0);
        stamina.spend(120.0);
        assert_eq!(stamina.current, 0.0);
        stamina.restore(150.0);
        assert!(stamina.is_full());
    }
}
