use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::settings::{SettingsStore, SHELL_CONFIG};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub untitled_prefix: String,
    pub default_dir: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            untitled_prefix: "new".to_string(),
            default_dir: PathBuf::from("."),
        }
    }
}

impl ShellConfig {
    pub fn from_settings(settings: &dyn SettingsStore) -> Self {
        settings
            .get_typed::<ShellConfig>(SHELL_CONFIG)
            .unwrap_or_default()
    }

    pub fn untitled_title(&self, number: u64) -> String {
        format!("{} {}", self.untitled_prefix, number)
    }
}
