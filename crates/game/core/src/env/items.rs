use std::collections::BTreeMap;
use std::fmt;

use crate::inventory::EquipmentSlot;

/// Identifies an item kind in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ItemKindId(pub u32);

impl fmt::Display for ItemKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

pub trait ItemOracle: Send + Sync {
    fn definition(&self, kind: ItemKindId) -> Option<&ItemDefinition>;
}

/// Broad item classification, used as a fallback when equipping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    Weapon,
    Tool,
    Consumable,
    KeyItem,
    Material,
    Equipment,
}

/// Declared equipment slot of an item kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlotHint {
    #[default]
    None,
    MainHand,
    OffHand,
    Armor,
    Accessory,
}

/// Stacking rule. A non-stackable kind behaves as a max stack of one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackRule {
    pub stackable: bool,
    pub max_stack: u16,
}

impl StackRule {
    pub const SINGLE: StackRule = StackRule {
        stackable: false,
        max_stack: 1,
    };

    pub const fn stackable(max_stack: u16) -> Self {
        Self {
            stackable: true,
            max_stack,
        }
    }

    pub fn effective_max(&self) -> u16 {
        if self.stackable {
            self.max_stack.max(1)
        } else {
            1
        }
    }
}

impl Default for StackRule {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Passive stat bonuses carried by an item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ItemStats {
    pub damage: i32,
    pub defense: i32,
    pub attack_speed: f32,
    pub move_speed_bonus: f32,
    pub health_bonus: i32,
    pub stamina_bonus: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponStats {
    pub damage: i32,
    pub range: f32,
    /// Attack-speed multiplier; the swing cooldown is divided by it.
    pub speed: f32,
}

/// Behavior tags. An item may carry several.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemBehavior {
    Consumable { heal: i32 },
    Weapon(WeaponStats),
}

/// Static description of an item kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemKindId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equip_slot: EquipSlotHint,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stack: StackRule,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: ItemStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behaviors: Vec<ItemBehavior>,
}

impl ItemDefinition {
    pub fn new(id: ItemKindId, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category,
            equip_slot: EquipSlotHint::None,
            stack: StackRule::SINGLE,
            value: 0,
            stats: ItemStats::default(),
            behaviors: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stack(mut self, stack: StackRule) -> Self {
        self.stack = stack;
        self
    }

    pub fn with_equip_slot(mut self, slot: EquipSlotHint) -> Self {
        self.equip_slot = slot;
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn with_behavior(mut self, behavior: ItemBehavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    pub fn max_stack(&self) -> u16 {
        self.stack.effective_max()
    }

    pub fn is_stackable(&self) -> bool {
        self.stack.stackable
    }

    /// Heal amount when this item is a consumable.
    pub fn consumable_heal(&self) -> Option<i32> {
        self.behaviors.iter().find_map(|behavior| match behavior {
            ItemBehavior::Consumable { heal } => Some(*heal),
            _ => None,
        })
    }

    pub fn weapon_stats(&self) -> Option<WeaponStats> {
        self.behaviors.iter().find_map(|behavior| match behavior {
            ItemBehavior::Weapon(stats) => Some(*stats),
            _ => None,
        })
    }

    /// Equipment slot this item goes into. The declared slot wins; otherwise
    /// weapons go to the weapon slot and generic equipment to armor.
    pub fn equipment_slot(&self) -> Option<EquipmentSlot> {
        match self.equip_slot {
            EquipSlotHint::MainHand => Some(EquipmentSlot::Weapon),
            EquipSlotHint::Armor => Some(EquipmentSlot::Armor),
            EquipSlotHint::Accessory => Some(EquipmentSlot::Accessory),
            EquipSlotHint::None | EquipSlotHint::OffHand => match self.category {
                ItemCategory::Weapon => Some(EquipmentSlot::Weapon),
                ItemCategory::Equipment => Some(EquipmentSlot::Armor),
                _ => None,
            },
        }
    }
}

/// In-memory item oracle keyed by kind id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemCatalog {
    definitions: BTreeMap<ItemKindId, ItemDefinition>,
}

impl ItemCatalog {
    pub const HEALING_BERRY: ItemKindId = ItemKindId(1);
    pub const WOODEN_STICK: ItemKindId = ItemKindId(2);

    pub fn new() -> Self {
        Self::default()
    }

    /// The two items every world starts with: the healing berry and the stick.
    pub fn starter() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            ItemDefinition::new(
                Self::HEALING_BERRY,
                "Healing Berry",
                ItemCategory::Consumable,
            )
            .with_description("A sweet berry that restores health.")
            .with_stack(StackRule::stackable(10))
            .with_value(5)
            .with_behavior(ItemBehavior::Consumable { heal: 25 }),
        );
        catalog.insert(
            ItemDefinition::new(Self::WOODEN_STICK, "Wooden Stick", ItemCategory::Weapon)
                .with_description("A sturdy stick. Better than nothing.")
                .with_equip_slot(EquipSlotHint::MainHand)
                .with_value(1)
                .with_behavior(ItemBehavior::Weapon(WeaponStats {
                    damage: 15,
                    range: 2.0,
                    speed: 1.2,
                })),
        );
        catalog
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog
    }

    /// Inserts a definition, returning the one it replaced.
    pub fn insert(&mut self, definition: ItemDefinition) -> Option<ItemDefinition> {
        self.definitions.insert(definition.id, definition)
    }

    pub fn get(&self, kind: ItemKindId) -> Option<&ItemDefinition> {
        self.definitions.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, kind: ItemKindId) -> Option<&ItemDefinition> {
        self.get(kind)
    }
}
