use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::CoreError;
use crate::utils::paths;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_TIMEZONE: Tz = chrono_tz::Australia::Sydney;

/// Deployment-wide settings: the organization's timezone drives every
/// "today" computation, so it lives here rather than per-caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub timezone: String,
    pub locale: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active_tab: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: DEFAULT_TIMEZONE.name().to_string(),
            locale: "en-AU".into(),
            currency: "AUD".into(),
            last_active_tab: None,
        }
    }
}

impl Config {
    /// The configured IANA zone, falling back to the default on an
    /// unrecognized id rather than failing a whole dashboard load.
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!(
                    timezone = %self.timezone,
                    "unrecognized timezone id, falling back to {}",
                    DEFAULT_TIMEZONE.name()
                );
                DEFAULT_TIMEZONE
            }
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<ConfigManager, CoreError> {
        ConfigManager::from_base(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<ConfigManager, CoreError> {
        ConfigManager::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<ConfigManager, CoreError> {
        paths::ensure_dir(&base)?;
        let config_root = paths::config_dir_in(&base);
        paths::ensure_dir(&config_root)?;
        let backups_dir = paths::config_backups_dir_in(&base);
        paths::ensure_dir(&backups_dir)?;
        Ok(ConfigManager {
            path: paths::config_file_in(&base),
            backups_dir,
        })
    }

    pub fn load(&self) -> Result<Config, CoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String, CoreError> {
        paths::ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut name = format!("config_{timestamp}");
        if let Some(label) = sanitize_note(note) {
            name.push('_');
            name.push_str(&label);
        }
        name.push_str(&format!(".{BACKUP_EXTENSION}"));
        let json = serde_json::to_string_pretty(config)?;
        write_file(&self.backups_dir.join(&name), &json)?;
        Ok(name)
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config, CoreError> {
        let path = self.backups_dir.join(backup_name);
        if !path.exists() {
            return Err(CoreError::Storage(format!(
                "configuration backup `{backup_name}` not found"
            )));
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn list_backups(&self) -> Result<Vec<String>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_timestamp(b).cmp(&parse_timestamp(a)));
        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = sanitized.trim_matches('-');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{BACKUP_EXTENSION}"))?;
    let rest = stem.strip_prefix("config_")?;
    let raw: String = rest
        .split('_')
        .take(2)
        .collect::<Vec<_>>()
        .join("");
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        paths::ensure_dir(parent)?;
    }
    fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_sydney() {
        let config = Config::default();
        assert_eq!(config.tz(), chrono_tz::Australia::Sydney);
        assert_eq!(config.currency, "AUD");
    }

    #[test]
    fn bad_timezone_falls_back_to_default() {
        let config = Config {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Config::default()
        };
        assert_eq!(config.tz(), chrono_tz::Australia::Sydney);
    }

    #[test]
    fn explicit_timezone_is_honored() {
        let config = Config {
            timezone: "Europe/London".to_string(),
            ..Config::default()
        };
        assert_eq!(config.tz(), chrono_tz::Europe::London);
    }
}
