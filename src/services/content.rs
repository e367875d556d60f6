use std::sync::{Arc, Mutex};

use crate::errors::AppError;
use crate::models::{ContentPatch, SiteContent};
use crate::store::ContentStore;

pub struct ContentRepository {
    store: Arc<dyn ContentStore>,
    write_lock: Mutex<()>,
}

impl ContentRepository {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    // Current site content. Never fails: a missing or unreadable document
    // yields the built-in default.
    pub fn read(&self) -> SiteContent {
        match self.store.load() {
            Ok(Some(content)) => content,
            Ok(None) => SiteContent::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load site content, serving defaults");
                SiteContent::default()
            }
        }
    }

    // Each present section replaces the stored one wholesale.
    pub fn write(&self, patch: ContentPatch) -> Result<SiteContent, AppError> {
        patch.validate()?;
        if patch.is_empty() {
            return Ok(self.read());
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("content lock poisoned"))?;

        let mut content = self.read();
        content.apply(patch);
        self.store.save(&content)?;

        tracing::info!(services = content.services.len(), "site content updated");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use std::sync::Mutex;

    use super::*;
    use crate::db;
    use crate::models::{GeneralContent, HomeContent, Service};
    use crate::store::json::{JsonContentStore, CONTENT_FILE};
    use crate::store::sqlite::SqliteStore;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("nailsure-content-{}", uuid::Uuid::new_v4()))
    }

    fn repo(dir: &Path) -> ContentRepository {
        ContentRepository::new(Arc::new(JsonContentStore::new(dir.join(CONTENT_FILE))))
    }

    fn general() -> GeneralContent {
        GeneralContent {
            business_name: "Nailsure Beverly Hills".to_string(),
            phone: "310-555-0199".to_string(),
            email: "studio@nailsure.com".to_string(),
            address: "9500 Wilshire Blvd".to_string(),
            instagram: None,
            facebook: Some("https://facebook.com/nailsure".to_string()),
        }
    }

    #[test]
    fn test_read_missing_returns_default() {
        let dir = temp_dir();
        assert_eq!(repo(&dir).read(), SiteContent::default());
    }

    #[test]
    fn test_read_malformed_returns_default() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONTENT_FILE), "[1, 2").unwrap();
        assert_eq!(repo(&dir).read(), SiteContent::default());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_write_then_read_replaces_only_present_keys() {
        let dir = temp_dir();
        let repo = repo(&dir);
        let before = repo.read();

        let merged = repo
            .write(ContentPatch {
                general: Some(general()),
                ..Default::default()
            })
            .unwrap();

        let after = repo.read();
        assert_eq!(merged, after);
        assert_eq!(after.general, general());
        assert_eq!(after.home, before.home);
        assert_eq!(after.services, before.services);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_successive_writes_accumulate_sections() {
        let dir = temp_dir();
        let repo = repo(&dir);

        repo.write(ContentPatch {
            general: Some(general()),
            ..Default::default()
        })
        .unwrap();

        let home = HomeContent {
            hero_title: "Nails, elevated".to_string(),
            hero_subtitle: "Studio and mobile".to_string(),
            about_teaser_title: "Our story".to_string(),
            about_teaser_text: "Family run since 2014".to_string(),
        };
        let services = vec![Service {
            id: "pedicure".to_string(),
            name: "Pedicure".to_string(),
            price: 55.0,
            duration: 50,
            description: String::new(),
        }];
        repo.write(ContentPatch {
            home: Some(home.clone()),
            services: Some(services.clone()),
            ..Default::default()
        })
        .unwrap();

        let after = repo.read();
        assert_eq!(after.general, general());
        assert_eq!(after.home, home);
        assert_eq!(after.services, services);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_invalid_patch_is_not_persisted() {
        let dir = temp_dir();
        let repo = repo(&dir);
        let mut bad = general();
        bad.email = "studio-at-nailsure".to_string();

        let err = repo
            .write(ContentPatch {
                general: Some(bad),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!dir.join(CONTENT_FILE).exists());
    }

    #[test]
    fn test_write_failure_surfaces_storage_error() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        // A directory where the file should be makes the rename fail.
        fs::create_dir_all(dir.join(CONTENT_FILE)).unwrap();
        let repo = repo(&dir);

        let err = repo
            .write(ContentPatch {
                general: Some(general()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_empty_patch_writes_nothing() {
        let dir = temp_dir();
        let repo = repo(&dir);

        let content = repo.write(ContentPatch::default()).unwrap();
        assert_eq!(content, SiteContent::default());
        assert!(!dir.join(CONTENT_FILE).exists());
    }

    #[test]
    fn test_write_then_read_with_sqlite_store() {
        let conn = db::init_db(":memory:").unwrap();
        let repo = ContentRepository::new(Arc::new(SqliteStore::new(Arc::new(Mutex::new(conn)))));
        assert_eq!(repo.read(), SiteContent::default());

        let merged = repo
            .write(ContentPatch {
                general: Some(general()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(merged.general, general());
        assert_eq!(repo.read(), merged);

        let services = vec![Service {
            id: "pedicure".to_string(),
            name: "Pedicure".to_string(),
            price: 55.0,
            duration: 50,
            description: String::new(),
        }];
        repo.write(ContentPatch {
            services: Some(services.clone()),
            ..Default::default()
        })
        .unwrap();

        let after = repo.read();
        assert_eq!(after.general, general());
        assert_eq!(after.services, services);
    }
}
