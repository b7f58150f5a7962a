//! Client configuration.
//!
//! Read once at startup from `$MINNOW_CONFIG` or
//! `~/.config/minnow/config.toml`. Missing or malformed files fall back to
//! defaults; configuration problems never stop the client from starting.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_NICK: &str = "guest";

#[derive(Debug, Clone)]
pub struct Config {
    pub nick: String,
    /// Channels joined automatically at startup.
    pub autojoin: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    nick: Option<String>,
    #[serde(alias = "channels")]
    autojoin: Option<Vec<String>>,
}

fn read_toml(path: &Path) -> Option<RawConfig> {
    let contents = fs::read_to_string(path).ok()?;
    if contents.trim().is_empty() {
        return None;
    }
    toml::from_str::<RawConfig>(&contents).ok()
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("MINNOW_CONFIG") {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("minnow").join("config.toml"))
}

fn default_nick() -> String {
    env::var("USER")
        .ok()
        .filter(|nick| !nick.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NICK.to_string())
}

fn from_raw(raw: Option<RawConfig>) -> Config {
    let raw = raw.unwrap_or_default();
    Config {
        nick: raw.nick.unwrap_or_else(default_nick),
        autojoin: raw.autojoin.unwrap_or_default(),
    }
}

pub fn load_config() -> Config {
    let raw = config_path().and_then(|path| read_toml(&path));
    from_raw(raw)
}

#[cfg(test)]
mod tests {
    use super::{from_raw, read_toml};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn full_config_is_parsed() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "nick = \"oona\"\nautojoin = [\"#rust\", \"#minnow\"]\n")
            .expect("write config");

        let config = from_raw(read_toml(&path));
        assert_eq!(config.nick, "oona");
        assert_eq!(config.autojoin, vec!["#rust", "#minnow"]);
    }

    #[test]
    fn channels_is_an_alias_for_autojoin() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "channels = [\"#rust\"]\n").expect("write config");

        let config = from_raw(read_toml(&path));
        assert_eq!(config.autojoin, vec!["#rust"]);
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "").expect("write config");

        assert!(read_toml(&path).is_none());
        let config = from_raw(None);
        assert!(!config.nick.is_empty());
        assert!(config.autojoin.is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nope.toml");
        assert!(read_toml(&path).is_none());
    }
}
