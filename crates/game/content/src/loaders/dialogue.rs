//! Dialogue script loader.

use std::path::Path;

use folktale_core::{DialogueLibrary, DialogueScript};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DialogueFileRon {
    scripts: Vec<DialogueScript>,
}

/// Loader for dialogue scripts from RON files.
pub struct DialogueLoader;

impl DialogueLoader {
    /// Load every script in the file into a library.
    ///
    /// Scripts without lines, duplicate ids and choices jumping to unknown
    /// scripts are rejected.
    pub fn load(path: &Path) -> LoadResult<DialogueLibrary> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load dialogue {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<DialogueLibrary> {
        let data: DialogueFileRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dialogue RON: {}", e))?;

        let mut library = DialogueLibrary::new();
        for script in data.scripts {
            if script.lines.is_empty() {
                anyhow::bail!("Dialogue {} has no lines", script.id);
            }
            let id = script.id.clone();
            if library.insert(script).is_some() {
                anyhow::bail!("Duplicate dialogue id {}", id);
            }
        }

        for script in library.iter() {
            let targets = script
                .lines
                .iter()
                .flat_map(|line| &line.choices)
                .filter_map(|choice| choice.next.as_ref());
            for target in targets {
                if library.get(target).is_none() {
                    anyhow::bail!("Dialogue {} jumps to unknown script {}", script.id, target);
                }
            }
        }

        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use folktale_core::{DialogueCondition, DialogueId};

    use super::*;
    use crate::loaders::shipped_data_dir;

    #[test]
    fn shipped_scripts_resolve() {
        let library = DialogueLoader::load(&shipped_data_dir().join("dialogue.ron")).unwrap();
        let greeting = library.get(&DialogueId::from("elder_greeting")).unwrap();
        assert_eq!(greeting.lines[0].speaker, "Elder");
        assert!(greeting.lines.iter().any(|line| !line.choices.is_empty()));

        let blessing = library.get(&DialogueId::from("elder_blessing")).unwrap();
        assert_eq!(blessing.conditions, vec![DialogueCondition::LanternLit(1)]);
    }

    #[test]
    fn dangling_choice_is_rejected() {
        let err = DialogueLoader::parse(
            r#"(scripts: [(
                id: "a",
                lines: [(speaker: "X", text: "Hi", choices: [(text: "Go", next: Some("missing"))])],
            )])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn empty_script_is_rejected() {
        let err = DialogueLoader::parse(r#"(scripts: [(id: "a", lines: [])])"#).unwrap_err();
        assert!(err.to_string().contains("no lines"));
    }
}
