use std::collections::BTreeMap;

/// Stat block shared by every enemy spawned from it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    pub max_health: i32,
    pub damage: i32,
    pub move_speed: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Distance at which the enemy starts chasing. `None` uses the config default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub detection_range: Option<f32>,
}

impl EnemyTemplate {
    /// The forest critter that populates the test scene.
    pub fn critter() -> Self {
        Self {
            name: "Critter".to_string(),
            max_health: 30,
            damage: 5,
            move_speed: 2.0,
            attack_range: 1.2,
            attack_cooldown: 1.5,
            detection_range: None,
        }
    }
}

/// Enemy templates keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyRoster {
    templates: BTreeMap<String, EnemyTemplate>,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_templates(templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        let mut roster = Self::new();
        for template in templates {
            roster.insert(template);
        }
        roster
    }

    pub fn insert(&mut self, template: EnemyTemplate) -> Option<EnemyTemplate> {
        self.templates.insert(template.name.clone(), template)
    }

    pub fn get(&self, name: &str) -> Option<&EnemyTemplate> {
        self.templates.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
