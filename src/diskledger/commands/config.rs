use crate::commands::{CmdMessage, CmdResult};
use crate::config::AppConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads and writes `config.json` only. Environment overrides are not shown
/// here, so `config` always reports what is saved on disk.
pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = AppConfig::load(config_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = AppConfig::load(config_dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = AppConfig::load(config_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(config_dir)?;
            tracing::info!(key = %key, "config updated");

            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::Backend;
    use tempfile::TempDir;

    #[test]
    fn show_all_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(AppConfig::default()));
    }

    #[test]
    fn set_persists() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("backend".into(), "memory".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(AppConfig::load(dir.path()).unwrap().backend, Backend::Memory);

        let shown = run(dir.path(), ConfigAction::ShowKey("backend".into())).unwrap();
        assert_eq!(shown.messages[0].content, "memory");
    }

    #[test]
    fn set_key_message_is_masked() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("remote-key".into(), "super-secret-9876".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "remote-key set to ****9876");
    }

    #[test]
    fn bad_key_or_value_is_reported_and_not_saved() {
        let dir = TempDir::new().unwrap();
        let unknown = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(unknown.messages[0].level, MessageLevel::Error);

        let bad = run(
            dir.path(),
            ConfigAction::Set("timeout-secs".into(), "later".into()),
        )
        .unwrap();
        assert_eq!(bad.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }
}
