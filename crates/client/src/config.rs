//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for one headless session.
#[derive(Clone, Debug, PartialEq)]
pub struct CliConfig {
    pub content_dir: PathBuf,
    pub scene: String,
    pub save_dir: PathBuf,
    pub save_slot: String,
    pub restore: bool,
    pub input_script: Option<PathBuf>,
    /// Frames per simulated second.
    pub tick_rate: u32,
    /// Pace frames on a wall-clock interval instead of running flat out.
    pub realtime: bool,
    pub session_id: Option<String>,
}

impl CliConfig {
    pub const DEFAULT_SCENE: &'static str = "test";
    pub const DEFAULT_SLOT: &'static str = "autosave";
    pub const DEFAULT_TICK_RATE: u32 = 60;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DATA_DIR` - Content directory (default: `crates/game/content/data`)
    /// - `SCENE` - Scene file name under `scenes/` (default: `test`)
    /// - `SAVE_DATA_DIR` - Save directory (default: platform data dir)
    /// - `SAVE_SLOT` - Slot written by save-point lanterns (default: `autosave`)
    /// - `RESTORE` - Resume from the save slot on start (default: false)
    /// - `INPUT_SCRIPT` - RON input script to replay (default: idle frames)
    /// - `TICK_RATE` - Frames per second (default: 60)
    /// - `REALTIME` - Pace frames in wall-clock time (default: false)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: timestamp)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            content_dir: lookup("CONTENT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_content_dir),
            scene: lookup("SCENE").unwrap_or_else(|| Self::DEFAULT_SCENE.to_string()),
            save_dir: lookup("SAVE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_save_dir),
            save_slot: lookup("SAVE_SLOT").unwrap_or_else(|| Self::DEFAULT_SLOT.to_string()),
            restore: false,
            input_script: lookup("INPUT_SCRIPT").map(PathBuf::from),
            tick_rate: Self::DEFAULT_TICK_RATE,
            realtime: false,
            session_id: lookup("GAME_SESSION_ID"),
        };

        if let Some(rate) = read_env::<u32>(&lookup, "TICK_RATE") {
            config.tick_rate = rate.max(1);
        }
        if let Some(restore) = read_env::<bool>(&lookup, "RESTORE") {
            config.restore = restore;
        }
        if let Some(realtime) = read_env::<bool>(&lookup, "REALTIME") {
            config.realtime = realtime;
        }

        config
    }

    /// Seconds advanced by one frame.
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}

/// Relative to the executable when installed, else the workspace layout.
fn default_content_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| {
            exe.parent()
                .and_then(|p| p.parent())
                .and_then(|p| p.parent())
                .map(|root| root.join("crates/game/content/data"))
        })
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("crates/game/content/data"))
}

fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "folktale")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.scene, "test");
        assert_eq!(config.save_slot, "autosave");
        assert_eq!(config.tick_rate, 60);
        assert!(!config.realtime);
        assert!(!config.restore);
        assert!(config.input_script.is_none());
    }

    #[test]
    fn environment_overrides() {
        let config = config_from(&[
            ("CONTENT_DATA_DIR", "/srv/content"),
            ("SCENE", "glade"),
            ("SAVE_DATA_DIR", "/tmp/saves"),
            ("INPUT_SCRIPT", "demos/walk.ron"),
            ("TICK_RATE", "30"),
            ("REALTIME", "true"),
            ("RESTORE", "true"),
        ]);
        assert_eq!(config.content_dir, PathBuf::from("/srv/content"));
        assert_eq!(config.scene, "glade");
        assert_eq!(config.save_dir, PathBuf::from("/tmp/saves"));
        assert_eq!(config.input_script, Some(PathBuf::from("demos/walk.ron")));
        assert_eq!(config.tick_rate, 30);
        assert!(config.realtime);
        assert!(config.restore);
        assert!((config.frame_dt() - 1.0 / 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config_from(&[("TICK_RATE", "fast"), ("REALTIME", "yes")]);
        assert_eq!(config.tick_rate, 60);
        assert!(!config.realtime);

        let config = config_from(&[("TICK_RATE", "0")]);
        assert_eq!(config.tick_rate, 1);
    }
}
