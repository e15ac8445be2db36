//! Non-player entities: enemies, ground items and interactive props.

use glam::Vec3;

use crate::dialogue::DialogueId;
use crate::env::EnemyTemplate;
use crate::inventory::ItemStack;

use super::common::{Countdown, EntityId, Health};
use super::player::DamageOutcome;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub id: EntityId,
    pub template: EnemyTemplate,
    pub position: Vec3,
    pub facing: Vec3,
    pub health: Health,
    pub attack_timer: Countdown,
    /// Set once the enemy dies; it is removed when this expires.
    pub despawn: Option<Countdown>,
}

impl EnemyState {
    pub fn new(id: EntityId, template: EnemyTemplate, position: Vec3) -> Self {
        let health = Health::full(template.max_health);
        Self {
            id,
            template,
            position,
            facing: Vec3::NEG_Z,
            health,
            attack_timer: Countdown::READY,
            despawn: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.despawn.is_none()
    }

    /// Applies damage; lethal damage starts the despawn countdown.
    pub fn take_damage(&mut self, amount: i32, corpse_linger: f32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        let dealt = self.health.damage(amount);
        if self.health.is_depleted() {
            let mut despawn = Countdown::READY;
            despawn.start(corpse_linger);
            self.despawn = Some(despawn);
            DamageOutcome::Killed { dealt }
        } else {
            DamageOutcome::Damaged { dealt }
        }
    }
}

/// Item stack lying on the ground, waiting to be picked up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldItem {
    pub id: EntityId,
    pub position: Vec3,
    pub stack: ItemStack,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropState {
    pub id: EntityId,
    pub position: Vec3,
    pub kind: PropKind,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropKind {
    /// Lighting a save-point lantern requests a save.
    Lantern {
        lantern_id: u32,
        lit: bool,
        save_point: bool,
    },
    /// Starts a dialogue when interacted with.
    Speaker { name: String, dialogue: DialogueId },
}

/// Square play area centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arena {
    pub half_extent: f32,
}

impl Arena {
    /// Clamps X and Z into the arena; Y is left untouched.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        let h = self.half_extent;
        Vec3::new(position.x.clamp(-h, h), position.y, position.z.clamp(-h, h))
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.x.abs() <= self.half_extent && position.z.abs() <= self.half_extent
    }
}
