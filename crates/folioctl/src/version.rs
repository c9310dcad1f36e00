use crate::git::{GitError, Repo};
use derive_more::Display;
use fs_err as fs;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Site version derived from history length: every commit bumps the patch,
/// every 10 the minor, every 100 the major (starting at v1.0.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[display("v{major}.{minor}.{patch}")]
pub struct SiteVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SiteVersion {
    pub fn from_commit_count(count: u64) -> Self {
        Self {
            major: count / 100 + 1,
            minor: (count % 100) / 10,
            patch: count % 10,
        }
    }

    pub fn from_repo(repo: &Repo) -> Result<Self, VersionError> {
        Ok(Self::from_commit_count(repo.commit_count()?))
    }
}

#[derive(Error, Debug)]
pub enum VersionError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed site config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Site config {0} is not a JSON object")]
    NotAnObject(PathBuf),
    #[error(transparent)]
    Git(#[from] GitError),
}

/// Rewrites the `version` key of the site config, leaving every other key
/// and their order untouched.
pub fn stamp(site_config: &Path, version: SiteVersion) -> Result<(), VersionError> {
    let mut doc: Value = serde_json::from_str(&fs::read_to_string(site_config)?)?;
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| VersionError::NotAnObject(site_config.to_path_buf()))?;
    obj.insert("version".to_string(), Value::String(version.to_string()));
    fs::write(site_config, serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_commit_count() {
        let cases = vec![
            (0, "v1.0.0"),
            (1, "v1.0.1"),
            (10, "v1.1.0"),
            (99, "v1.9.9"),
            (100, "v2.0.0"),
            (257, "v3.5.7"),
        ];

        for (count, expected) in cases {
            assert_eq!(SiteVersion::from_commit_count(count).to_string(), expected);
        }
    }

    #[test]
    fn test_stamp_preserves_other_keys() {
        let dir = std::env::temp_dir().join(format!("folioctl-version-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(
            &path,
            r#"{"title": "PORTFOLIO", "version": "v0.0.0", "socials": [{"icon": "gh", "link": "x"}]}"#,
        )
        .unwrap();

        stamp(&path, SiteVersion::from_commit_count(123)).unwrap();
        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(doc["version"], "v2.2.3");
        assert_eq!(doc["title"], "PORTFOLIO");
        assert_eq!(doc["socials"][0]["icon"], "gh");
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["title", "version", "socials"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stamp_rejects_non_object() {
        let dir =
            std::env::temp_dir().join(format!("folioctl-version-arr-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(
            stamp(&path, SiteVersion::from_commit_count(1)),
            Err(VersionError::NotAnObject(_))
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
