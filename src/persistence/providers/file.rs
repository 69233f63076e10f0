//! JSON file provider.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::Note;
use crate::persistence::{NoteStore, StoreError};

/// Stores the collection as a pretty-printed JSON array in one file.
///
/// Saves go to a `.tmp` sibling first and are renamed over the target, so
/// readers never observe a half-written collection.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the notes file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl NoteStore for FileStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Notes file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(notes).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(Self::write_error(parent))?;
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)
            .await
            .map_err(Self::write_error(&tmp_path))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(Self::write_error(&self.path))?;

        debug!(
            name: "store.saved",
            path = %self.path.display(),
            notes = notes.len(),
            "Note collection saved"
        );
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewNote;
    use tempfile::TempDir;

    fn note(title: &str) -> Note {
        Note::new(NewNote {
            title: Some(title.into()),
            text: Some(format!("{title} body").into()),
        })
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("notes.json"));

        let notes = store.load().await.unwrap();
        assert!(notes.is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("notes.json"));
        let notes = vec![note("one"), note("two")];

        store.save(&notes).await.unwrap();
        assert_eq!(store.load().await.unwrap(), notes);
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_save_of_load_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let original = r#"[
  {
    "id": "a",
    "title": "first",
    "text": "hello",
    "createdAt": "2024-05-01T12:00:00Z",
    "pinned": true
  },
  {
    "title": "no id",
    "createdAt": "2024-05-02T08:30:00.123Z"
  }
]"#;
        std::fs::write(&path, original).unwrap();
        let store = FileStore::new(&path);

        let loaded = store.load().await.unwrap();
        store.save(&loaded).await.unwrap();

        let parse = |raw: &str| serde_json::from_str::<serde_json::Value>(raw).unwrap();
        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse(&rewritten), parse(original));
        assert_eq!(store.load().await.unwrap(), loaded);
    }

    #[tokio::test]
    async fn test_loosely_typed_records_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(
            &path,
            r#"[
  {"id": "a", "title": 7, "text": true, "createdAt": "last tuesday"},
  {"id": "b", "title": null},
  {"title": "no id, no timestamp"}
]"#,
        )
        .unwrap();
        let store = FileStore::new(&path);

        let notes = store.load().await.unwrap();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].title, Some(serde_json::json!(7)));
        assert_eq!(notes[0].created_at, Some(serde_json::json!("last tuesday")));
        assert!(notes[1].created_at.is_none());
        assert!(notes[2].id.is_none());

        store.save(&notes).await.unwrap();
        assert_eq!(store.load().await.unwrap(), notes);
    }

    #[tokio::test]
    async fn test_output_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("notes.json"));
        store.save(&[note("pretty")]).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\""));
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested/deeper/notes.json"));

        store.save(&[note("nested")]).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_object_instead_of_array_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, r#"{"title": "lonely"}"#).unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_directory_path_is_read_error() {
        let dir = TempDir::new().unwrap();

        let err = FileStore::new(dir.path()).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
