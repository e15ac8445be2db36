//! Fire-and-forget requests for presentation layers.
//!
//! The core never plays sounds, drives animators or spawns particles. It
//! records what should happen as [`Cue`] values and hands them back from each
//! engine call; whoever renders the game decides what to do with them.

use glam::Vec3;

use crate::dialogue::DialogueId;
use crate::env::ItemKindId;
use crate::inventory::EquipmentSlot;
use crate::state::{EntityId, PlayerFlags};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Sound {
    #[strum(serialize = "Attack Swing")]
    AttackSwing,
    #[strum(serialize = "Attack Hit")]
    AttackHit,
    #[strum(serialize = "Attack Whiff")]
    AttackWhiff,
    #[strum(serialize = "Player Hit")]
    PlayerHit,
    #[strum(serialize = "Player Roll")]
    PlayerRoll,
    #[strum(serialize = "LanternLight")]
    LanternLight,
    #[strum(serialize = "Pickup")]
    Pickup,
    #[strum(serialize = "Equip")]
    Equip,
    #[strum(serialize = "Consume")]
    Consume,
}

impl Sound {
    /// Playback volume in `0.0..=1.0`.
    pub fn volume(self) -> f32 {
        match self {
            Self::AttackSwing => 0.3,
            Self::AttackHit => 0.5,
            Self::AttackWhiff => 0.2,
            Self::PlayerHit => 0.6,
            Self::PlayerRoll | Self::Pickup => 0.4,
            Self::LanternLight | Self::Equip | Self::Consume => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum AnimTrigger {
    Attack,
    Roll,
    Hit,
    Die,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Effect {
    AttackArc,
    HitSpark,
    DamageFlash,
    Pickup,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cue {
    Sound { sound: Sound, volume: f32 },
    /// Animator bools and locomotion speed, sent when any flag changes.
    Animation { flags: PlayerFlags, speed: f32 },
    AnimTrigger { entity: EntityId, trigger: AnimTrigger },
    Effect { effect: Effect, position: Vec3 },
    Knockback { target: EntityId, impulse: Vec3 },
    DamageNumber { target: EntityId, amount: i32, position: Vec3 },
    Healed { amount: i32 },
    ActionRejected { action: &'static str, code: &'static str },
    InventoryChanged,
    EquipmentChanged { slot: EquipmentSlot, item: Option<ItemKindId> },
    HotkeysChanged,
    ItemPickedUp { kind: ItemKindId, quantity: u16 },
    ItemDropped { entity: EntityId, kind: ItemKindId, quantity: u16 },
    LanternLit { lantern_id: u32 },
    /// Opaque save signal; the runtime decides how to persist.
    SaveRequested { lantern_id: u32 },
    DialogueLine {
        dialogue: DialogueId,
        speaker: String,
        text: String,
        choices: Vec<String>,
    },
    DialogueEnded,
    EnemyDied { id: EntityId },
    EnemyDespawned { id: EntityId },
    PlayerDied,
}

impl Cue {
    /// A sound at its usual volume.
    pub fn sound(sound: Sound) -> Self {
        Self::Sound {
            sound,
            volume: sound.volume(),
        }
    }
}

/// Ordered collection of cues produced during one engine call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CueBuffer {
    cues: Vec<Cue>,
}

impl CueBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub fn append(&mut self, other: &mut CueBuffer) {
        self.cues.append(&mut other.cues);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cue> {
        self.cues.iter()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn contains(&self, cue: &Cue) -> bool {
        self.cues.contains(cue)
    }

    pub fn into_vec(self) -> Vec<Cue> {
        self.cues
    }
}

impl IntoIterator for CueBuffer {
    type Item = Cue;
    type IntoIter = std::vec::IntoIter<Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.into_iter()
    }
}
