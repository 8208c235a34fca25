use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::data::{Gallery, MediaRef, ProjectRecord};
use crate::error::{FolioError, Result};

/// Key holding the whole project records document
pub const PROJECTS_KEY: &str = "projects";

/// Key holding the theme preference ("light" or "dark")
pub const THEME_KEY: &str = "theme";

/// Form input for a new project, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    /// Comma-separated tag list as typed by the user
    pub tags: String,
}

impl ProjectDraft {
    /// Split the comma-separated tags, trimming and dropping empties
    pub fn parse_tags(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The ProjectStore is a flat key-value store on SQLite.
///
/// Every value is a whole JSON document: no partial updates, no schema
/// migrations. It persists the project records and the theme preference.
pub struct ProjectStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl ProjectStore {
    /// Open (or create) the store at `db_path`
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        tracing::info!("📁 Store opened at: {}", db_path.display());

        let store = ProjectStore {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Store that lives only for this session
    pub fn open_in_memory() -> Result<Self> {
        let store = ProjectStore {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Path to the database file, `None` for the in-memory store
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Current project records snapshot
    ///
    /// A missing slot or a document that doesn't parse is an empty list.
    pub fn load_projects(&self) -> Result<Vec<ProjectRecord>> {
        let Some(json) = self.get_item(PROJECTS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Option<Vec<ProjectRecord>>>(&json) {
            Ok(records) => Ok(records.unwrap_or_default()),
            Err(e) => {
                tracing::warn!("⚠️  Ignoring malformed project records: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub fn save_projects(&self, records: &[ProjectRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.set_item(PROJECTS_KEY, &json)
    }

    /// Append a project built from `draft` and persist the whole list
    pub fn add_project(&self, draft: &ProjectDraft) -> Result<ProjectRecord> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(FolioError::InvalidProject("a title is required".to_string()));
        }

        let record = ProjectRecord {
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            image: draft.image.trim().to_string(),
            tags: draft.parse_tags(),
            id: Utc::now().timestamp_millis(),
        };

        let mut records = self.load_projects()?;
        records.push(record.clone());
        self.save_projects(&records)?;

        tracing::info!("➕ Added project '{}' ({} total)", record.title, records.len());
        Ok(record)
    }

    /// First-run seeding: store the records derived from a projects media folder
    ///
    /// Only runs while the projects slot has never been written, so records
    /// the user added (or deleted down to an empty list) are never replaced.
    pub fn seed_projects(&self, gallery: &Gallery) -> Result<bool> {
        if gallery.is_empty() || self.get_item(PROJECTS_KEY)?.is_some() {
            return Ok(false);
        }

        let base_id = Utc::now().timestamp_millis();
        let records: Vec<ProjectRecord> = gallery
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| ProjectRecord {
                title: item.caption.title.clone(),
                description: item.caption.description.clone(),
                image: match &item.media {
                    MediaRef::Path(path) => path.to_string_lossy().to_string(),
                    MediaRef::Url(raw) | MediaRef::Embedded(raw) => raw.clone(),
                },
                tags: Vec::new(),
                id: base_id + position as i64,
            })
            .collect();

        self.save_projects(&records)?;
        tracing::info!("🌱 Seeded {} projects from the media folder", records.len());
        Ok(true)
    }

    /// Stored theme preference, `None` if never set
    pub fn load_dark_mode(&self) -> Result<Option<bool>> {
        Ok(self.get_item(THEME_KEY)?.map(|theme| theme != "light"))
    }

    pub fn save_dark_mode(&self, dark: bool) -> Result<()> {
        self.set_item(THEME_KEY, if dark { "dark" } else { "light" })
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
