//! Game configuration constants and tunable parameters.
//!
//! Every tunable value of the simulation lives here. Defaults reproduce the
//! hand-tuned values of the shipped game; content files may override any
//! subset of them because each section deserializes with `serde(default)`.

use crate::error::{ErrorSeverity, GameError};

/// Root configuration, grouped by subsystem.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    pub movement: MovementConfig,
    pub roll: RollConfig,
    pub attack: AttackConfig,
    pub vitals: VitalsConfig,
    pub inventory: InventoryConfig,
    pub interaction: InteractionConfig,
    pub arena: ArenaConfig,
    pub enemy: EnemyConfig,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Upper bound for the configurable inventory size.
    pub const MAX_INVENTORY_SLOTS: usize = 32;
    /// Number of quick-use bindings (Q and E).
    pub const HOTKEY_COUNT: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Checks every section for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("movement.move_speed", self.movement.move_speed)?;
        positive("movement.rotation_speed", self.movement.rotation_speed)?;
        non_negative("movement.input_deadzone", self.movement.input_deadzone)?;
        non_negative(
            "movement.attack_move_multiplier",
            self.movement.attack_move_multiplier,
        )?;

        positive("roll.speed", self.roll.speed)?;
        positive("roll.duration", self.roll.duration)?;
        non_negative("roll.cooldown", self.roll.cooldown)?;
        non_negative("roll.stamina_cost", self.roll.stamina_cost)?;

        positive("attack.range", self.attack.range)?;
        positive("attack.duration", self.attack.duration)?;
        non_negative("attack.cooldown", self.attack.cooldown)?;
        non_negative("attack.stamina_cost", self.attack.stamina_cost)?;
        non_negative("attack.reach_factor", self.attack.reach_factor)?;
        non_negative("attack.knockback", self.attack.knockback)?;
        if self.attack.damage < 0 {
            return Err(ConfigError::Negative {
                field: "attack.damage",
            });
        }

        if self.vitals.max_health <= 0 {
            return Err(ConfigError::NotPositive {
                field: "vitals.max_health",
            });
        }
        positive("vitals.max_stamina", self.vitals.max_stamina)?;
        non_negative("vitals.stamina_regen_rate", self.vitals.stamina_regen_rate)?;
        non_negative("vitals.stamina_regen_delay", self.vitals.stamina_regen_delay)?;

        let slots = self.inventory.slots;
        if slots == 0 || slots > Self::MAX_INVENTORY_SLOTS {
            return Err(ConfigError::InventorySlots {
                requested: slots,
                max: Self::MAX_INVENTORY_SLOTS,
            });
        }

        positive("interaction.radius", self.interaction.radius)?;
        positive("arena.half_extent", self.arena.half_extent)?;
        non_negative("enemy.chase_range", self.enemy.chase_range)?;
        non_negative("enemy.corpse_linger", self.enemy.corpse_linger)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field })
    }
}

/// Ground movement and facing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MovementConfig {
    pub move_speed: f32,
    pub rotation_speed: f32,
    /// Stick magnitude below which movement input is ignored.
    pub input_deadzone: f32,
    /// Speed multiplier applied while an attack swing is active.
    pub attack_move_multiplier: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 10.0,
            input_deadzone: 0.1,
            attack_move_multiplier: 0.3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RollConfig {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
    pub stamina_cost: f32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            speed: 12.0,
            duration: 0.4,
            cooldown: 0.3,
            stamina_cost: 15.0,
        }
    }
}

/// Unarmed attack profile. Equipped weapons override damage, range and
/// cooldown while they are wielded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AttackConfig {
    pub range: f32,
    pub damage: i32,
    pub cooldown: f32,
    pub duration: f32,
    pub stamina_cost: f32,
    /// Offset of the hit sphere along the facing, as a fraction of range.
    pub reach_factor: f32,
    pub knockback: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            range: 1.5,
            damage: 10,
            cooldown: 0.3,
            duration: 0.3,
            stamina_cost: 8.0,
            reach_factor: 0.5,
            knockback: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct VitalsConfig {
    pub max_health: i32,
    pub max_stamina: f32,
    /// Stamina regained per second once regeneration resumes.
    pub stamina_regen_rate: f32,
    /// Seconds after a stamina-consuming action before regeneration resumes.
    pub stamina_regen_delay: f32,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_stamina: 100.0,
            stamina_regen_rate: 15.0,
            stamina_regen_delay: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct InventoryConfig {
    pub slots: usize,
    pub add_policy: AddPolicy,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            slots: 9,
            add_policy: AddPolicy::Spill,
        }
    }
}

/// How `add_item` handles quantity the first accepting slot cannot hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AddPolicy {
    /// Keep scanning to the right; anything still unplaced is handed back.
    #[default]
    Spill,
    /// Stop at the first accepting slot and discard the excess.
    FirstSlot,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct InteractionConfig {
    pub radius: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { radius: 2.0 }
    }
}

/// Square play area centred on the origin.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ArenaConfig {
    pub half_extent: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { half_extent: 9.5 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EnemyConfig {
    /// Fallback detection range for templates that do not set one.
    pub chase_range: f32,
    /// Seconds a defeated enemy stays in the world before removal.
    pub corpse_linger: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            chase_range: 8.0,
            corpse_linger: 2.0,
        }
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("inventory.slots must be within 1..={max} (got {requested})")]
    InventorySlots { requested: usize, max: usize },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPositive { .. } => "CONFIG_NOT_POSITIVE",
            Self::Negative { .. } => "CONFIG_NEGATIVE",
            Self::InventorySlots { .. } => "CONFIG_INVENTORY_SLOTS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.movement.move_speed, 5.0);
        assert_eq!(config.roll.stamina_cost, 15.0);
        assert_eq!(config.attack.damage, 10);
        assert_eq!(config.vitals.max_health, 100);
        assert_eq!(config.inventory.slots, 9);
        assert_eq!(config.inventory.add_policy, AddPolicy::Spill);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_slots() {
        let mut config = GameConfig::default();
        config.inventory.slots = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InventorySlots {
                requested: 0,
                max: GameConfig::MAX_INVENTORY_SLOTS
            })
        );
    }

    #[test]
    fn rejects_non_positive_roll_duration() {
        let mut config = GameConfig::default();
        config.roll.duration = 0.0;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotPositive {
                field: "roll.duration"
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn rejects_negative_cost() {
        let mut config = GameConfig::default();
        config.attack.stamina_cost = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "attack.stamina_cost"
            })
        ));
    }
}
