//! Player actor: vitals, action timers and the roll/attack state machine data.

use bitflags::bitflags;
use glam::Vec3;

use crate::config::{AttackConfig, GameConfig};
use crate::env::WeaponStats;

use super::common::{Countdown, Health, Stamina};

/// Independent countdowns that gate the player's actions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTimers {
    pub attack_cooldown: Countdown,
    /// Remaining time of the active swing.
    pub attack_swing: Countdown,
    /// Remaining time of the active roll.
    pub roll: Countdown,
    pub roll_cooldown: Countdown,
    pub stamina_regen_delay: Countdown,
}

/// An in-progress roll. The direction is captured when the roll starts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roll {
    pub direction: Vec3,
}

/// Effective attack numbers, unarmed or with the equipped weapon applied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub damage: i32,
    pub range: f32,
    pub cooldown: f32,
}

impl WeaponProfile {
    pub fn unarmed(attack: &AttackConfig) -> Self {
        Self {
            damage: attack.damage,
            range: attack.range,
            cooldown: attack.cooldown,
        }
    }

    /// Weapon damage replaces the base; range replaces it when set; cooldown
    /// is divided by the weapon's attack speed when that is set.
    pub fn armed(attack: &AttackConfig, weapon: WeaponStats) -> Self {
        let range = if weapon.range > 0.0 {
            weapon.range
        } else {
            attack.range
        };
        let cooldown = if weapon.speed > 0.0 {
            attack.cooldown / weapon.speed
        } else {
            attack.cooldown
        };
        Self {
            damage: weapon.damage,
            range,
            cooldown,
        }
    }
}

bitflags! {
    /// Presentation state mirrored to the animator and HUD.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PlayerFlags: u8 {
        const MOVING = 1 << 0;
        const ATTACKING = 1 << 1;
        const ROLLING = 1 << 2;
        const DEAD = 1 << 3;
    }
}

/// Result of incoming damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead.
    Ignored,
    /// Target was invulnerable (rolling).
    Evaded,
    Damaged { dealt: i32 },
    Killed { dealt: i32 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Vec3,
    /// Unit vector on the ground plane.
    pub facing: Vec3,
    /// Movement intent resolved this tick (zero when idle).
    pub move_intent: Vec3,
    pub health: Health,
    pub stamina: Stamina,
    pub timers: ActionTimers,
    pub attacking: bool,
    pub roll: Option<Roll>,
    pub weapon: WeaponProfile,
    pub dead: bool,
}

impl PlayerState {
    pub fn new(config: &GameConfig, position: Vec3) -> Self {
        Self {
            position,
            facing: Vec3::Z,
            move_intent: Vec3::ZERO,
            health: Health::full(config.vitals.max_health),
            stamina: Stamina::full(config.vitals.max_stamina),
            timers: ActionTimers::default(),
            attacking: false,
            roll: None,
            weapon: WeaponProfile::unarmed(&config.attack),
            dead: false,
        }
    }

    pub fn is_rolling(&self) -> bool {
        self.roll.is_some()
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_moving(&self) -> bool {
        self.move_intent != Vec3::ZERO
    }

    pub fn flags(&self) -> PlayerFlags {
        let mut flags = PlayerFlags::empty();
        flags.set(PlayerFlags::MOVING, self.is_moving());
        flags.set(PlayerFlags::ATTACKING, self.attacking);
        flags.set(PlayerFlags::ROLLING, self.is_rolling());
        flags.set(PlayerFlags::DEAD, self.dead);
        flags
    }

    /// Applies incoming damage; rolling grants full invulnerability.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        if self.is_rolling() {
            return DamageOutcome::Evaded;
        }

        let dealt = self.health.damage(amount);
        if self.health.is_depleted() {
            self.dead = true;
            self.attacking = false;
            self.move_intent = Vec3::ZERO;
            DamageOutcome::Killed { dealt }
        } else {
            DamageOutcome::Damaged { dealt }
        }
    }

    /// Restores health up to max and returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.dead {
            return 0;
        }
        self.health.heal(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(&GameConfig::default(), Vec3::ZERO)
    }

    #[test]
    fn rolling_player_evades_damage() {
        let mut player = player();
        player.roll = Some(Roll { direction: Vec3::X });
        assert_eq!(player.take_damage(40), DamageOutcome::Evaded);
        assert_eq!(player.health.current, 100);
    }

    #[test]
    fn lethal_damage_marks_dead_and_blocks_healing() {
        let mut player = player();
        assert_eq!(player.take_damage(30), DamageOutcome::Damaged { dealt: 30 });
        assert_eq!(player.take_damage(90), DamageOutcome::Killed { dealt: 70 });
        assert!(player.flags().contains(PlayerFlags::DEAD));
        assert_eq!(player.heal(25), 0);
        assert_eq!(player.take_damage(5), DamageOutcome::Ignored);
    }

    #[test]
    fn weapon_profile_scales_cooldown_by_speed() {
        let attack = AttackConfig::default();
        let stick = WeaponStats {
            damage: 15,
            range: 2.0,
            speed: 1.2,
        };
        let armed = WeaponProfile::armed(&attack, stick);
        assert_eq!(armed.damage, 15);
        assert_eq!(armed.range, 2.0);
        // 0.3 / 1.2
        assert!((armed.cooldown - 0.25).abs() < 1e-6);

        let no_range = WeaponStats {
            damage: 12,
            range: 0.0,
            speed: 0.0,
        };
        let armed = WeaponProfile::armed(&attack, no_range);
        assert_eq!(armed.range, attack.range);
        assert_eq!(armed.cooldown, attack.cooldown);
    }
}
