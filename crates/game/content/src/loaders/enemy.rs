//! Enemy template loader.

use std::path::Path;

use folktale_core::{EnemyRoster, EnemyTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnemyRosterRon {
    enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates keyed by name.
    pub fn load(path: &Path) -> LoadResult<EnemyRoster> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load enemies {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<EnemyRoster> {
        let data: EnemyRosterRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy RON: {}", e))?;

        let mut roster = EnemyRoster::new();
        for template in data.enemies {
            if template.max_health <= 0 {
                anyhow::bail!("Enemy {} must have positive max_health", template.name);
            }
            if !(template.attack_range > 0.0 && template.move_speed >= 0.0) {
                anyhow::bail!("Enemy {} has invalid movement or reach", template.name);
            }
            let name = template.name.clone();
            if roster.insert(template).is_some() {
                anyhow::bail!("Duplicate enemy template {}", name);
            }
        }

        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::shipped_data_dir;

    #[test]
    fn shipped_roster_has_the_critter() {
        let roster = EnemyLoader::load(&shipped_data_dir().join("enemies.ron")).unwrap();
        assert_eq!(roster.get("Critter"), Some(&EnemyTemplate::critter()));
    }

    #[test]
    fn zero_health_template_is_rejected() {
        let err = EnemyLoader::parse(
            r#"(enemies: [(
                name: "Ghost",
                max_health: 0,
                damage: 1,
                move_speed: 1.0,
                attack_range: 1.0,
                attack_cooldown: 1.0,
            )])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Ghost"));
    }
}
