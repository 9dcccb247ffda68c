use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::CoreError;
use crate::utils::paths;

use super::{DocumentId, Result, StorageBackend};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// JSON-file document store under a base directory, with per-document
/// backup folders and retention pruning.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl DocumentStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<DocumentStore> {
        let base = root.unwrap_or_else(paths::app_data_dir);
        paths::ensure_dir(&base)?;
        let documents_dir = paths::documents_dir_in(&base);
        let backups_dir = paths::backups_dir_in(&base);
        paths::ensure_dir(&documents_dir)?;
        paths::ensure_dir(&backups_dir)?;
        Ok(DocumentStore {
            documents_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<DocumentStore> {
        DocumentStore::new(None, None)
    }

    pub fn document_path(&self, id: DocumentId) -> PathBuf {
        self.documents_dir
            .join(format!("{}.{}", id.file_stem(), BACKUP_EXTENSION))
    }

    fn backup_dir(&self, id: DocumentId) -> PathBuf {
        self.backups_dir.join(id.file_stem())
    }

    fn backup_path(&self, id: DocumentId, backup_name: &str) -> PathBuf {
        self.backup_dir(id).join(backup_name)
    }

    fn write_backup(&self, id: DocumentId, json: &str, note: Option<&str>) -> Result<String> {
        let dir = self.backup_dir(id);
        paths::ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", id.file_stem(), timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        // Saves within the same second must not overwrite each other.
        let mut name = format!("{stem}.{BACKUP_EXTENSION}");
        let mut counter = 1;
        while dir.join(&name).exists() {
            counter += 1;
            name = format!("{stem}_{counter}.{BACKUP_EXTENSION}");
        }
        write_atomic(&dir.join(&name), json)?;
        self.prune_backups(id)?;
        Ok(name)
    }

    fn prune_backups(&self, id: DocumentId) -> Result<()> {
        let backups = self.list_backups(id)?;
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(id, entry));
        }
        Ok(())
    }
}

impl StorageBackend for DocumentStore {
    fn load_raw(&self, id: DocumentId) -> Result<Option<String>> {
        let path = self.document_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn save_raw(&self, id: DocumentId, json: &str) -> Result<()> {
        let path = self.document_path(id);
        if let Some(existing) = self.load_raw(id)? {
            self.write_backup(id, &existing, None)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(document = id.file_stem(), "document saved");
        Ok(())
    }

    fn backup(&self, id: DocumentId, note: Option<&str>) -> Result<String> {
        let json = self.load_raw(id)?.ok_or_else(|| {
            CoreError::Storage(format!("document `{}` has never been saved", id.file_stem()))
        })?;
        self.write_backup(id, &json, note)
    }

    fn list_backups(&self, id: DocumentId) -> Result<Vec<String>> {
        let dir = self.backup_dir(id);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    fn restore(&self, id: DocumentId, backup_name: &str) -> Result<()> {
        let backup_path = self.backup_path(id, backup_name);
        if !backup_path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{backup_name}` not found"
            )));
        }
        fs::copy(&backup_path, self.document_path(id))?;
        Ok(())
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || matches!(ch, '-' | '.') {
            if !sanitized.is_empty() && !last_dash {
                sanitized.push('-');
                last_dash = true;
            }
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{BACKUP_EXTENSION}"))?;
    let mut segments = stem.split('_');
    // stem layout: <doc>_<YYYYMMDD>_<HHMMSS>[_<note>]
    let mut date_part = None;
    let mut time_part = None;
    for segment in segments.by_ref() {
        if is_digits(segment, 8) {
            date_part = Some(segment);
            break;
        }
    }
    if let Some(segment) = segments.next() {
        if is_digits(segment, 6) {
            time_part = Some(segment);
        }
    }
    let raw = format!("{}{}", date_part?, time_part?);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        paths::ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
