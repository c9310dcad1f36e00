use derive_more::{AsRef, Deref, Display, From, Into};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct FolderName(String);

impl FolderName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Human-readable form, underscores read as spaces.
    pub fn title(&self) -> String {
        self.0.replace('_', " ")
    }
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct FileName(String);

impl FileName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn extension(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, ext)| ext)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, StrumDisplay,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Other,
}

impl FileKind {
    pub fn classify(name: &FileName) -> Self {
        let ext = name.extension().unwrap_or_default().to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => Self::Image,
            "mp4" | "webm" | "ogg" => Self::Video,
            "mp3" | "wav" | "mpeg" => Self::Audio,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: FileName,
    pub kind: FileKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub name: FolderName,
    #[serde(default)]
    pub files: Vec<FileName>,
}

impl FolderRecord {
    pub fn resolve(&self, url_prefix: &str) -> Vec<FileEntry> {
        let prefix = url_prefix.trim_end_matches('/');
        self.files
            .iter()
            .map(|file| FileEntry {
                name: file.clone(),
                kind: FileKind::classify(file),
                url: format!("{}/{}/{}", prefix, self.name, file),
            })
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered folder listing, serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Deref, From, Into)]
#[serde(transparent)]
pub struct Manifest(Vec<FolderRecord>);

impl Manifest {
    pub fn new(folders: Vec<FolderRecord>) -> Self {
        Self(folders)
    }

    pub fn from_json(s: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        // Readers watching `path` only ever see a complete file.
        let staging = staging_path(path);
        fs::write(&staging, self.to_json()?)?;
        fs::rename(&staging, path)?;
        Ok(())
    }

    /// Builds a manifest from `content_dir`: every subdirectory is a folder,
    /// every visible regular entry inside it a file. Names come back sorted.
    pub fn scan(content_dir: &Path) -> Result<Self, ManifestError> {
        if !content_dir.exists() {
            fs::create_dir_all(content_dir)?;
            log::info!("Created content directory {}", content_dir.display());
        }

        let folders = list_names(content_dir, true)?
            .into_iter()
            .map(|name| {
                let files = list_names(&content_dir.join(&name), false)?
                    .into_iter()
                    .map(FileName::new)
                    .collect();
                Ok(FolderRecord {
                    name: FolderName::new(name),
                    files,
                })
            })
            .collect::<Result<Vec<_>, ManifestError>>()?;

        Ok(Self(folders))
    }

    pub fn file_count(&self) -> usize {
        self.0.iter().map(|f| f.files.len()).sum()
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn list_names(dir: &Path, dirs: bool) -> Result<Vec<String>, ManifestError> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir() == dirs))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !is_hidden(name))
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("folioctl-manifest-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_kind_classification() {
        let cases = vec![
            ("cover.JPG", FileKind::Image),
            ("shot.webp", FileKind::Image),
            ("reel.mp4", FileKind::Video),
            ("clip.ogg", FileKind::Video),
            ("theme.mp3", FileKind::Audio),
            ("take.WAV", FileKind::Audio),
            ("resume.pdf", FileKind::Other),
            ("README", FileKind::Other),
        ];

        for (name, expected) in cases {
            assert_eq!(FileKind::classify(&FileName::new(name)), expected, "{}", name);
        }
    }

    #[test]
    fn test_file_kind_parses_case_insensitively() {
        assert_eq!("IMAGE".parse::<FileKind>().unwrap(), FileKind::Image);
        assert_eq!(FileKind::Audio.to_string(), "audio");
    }

    #[test]
    fn test_legacy_manifest_shape() {
        let json = r#"[
            {"name": "Sound_Design", "files": ["a.mp3", "b.png"]},
            {"name": "Empty"}
        ]"#;
        let manifest = Manifest::from_json(json).unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest[0].name.title(), "Sound Design");
        assert!(manifest[1].files.is_empty());
        assert_eq!(manifest.file_count(), 2);
    }

    #[test]
    fn test_malformed_manifest_is_an_error() {
        assert!(matches!(
            Manifest::from_json("{\"folders\": 3}"),
            Err(ManifestError::Json(_))
        ));
    }

    #[test]
    fn test_resolve_builds_urls_and_kinds() {
        let folder = FolderRecord {
            name: FolderName::new("Photos"),
            files: vec![FileName::new("one.png"), FileName::new("notes.txt")],
        };
        let entries = folder.resolve("/content/");

        assert_eq!(entries[0].url, "/content/Photos/one.png");
        assert_eq!(entries[0].kind, FileKind::Image);
        assert_eq!(entries[1].kind, FileKind::Other);
    }

    #[test]
    fn test_scan_lists_sorted_visible_entries() {
        let root = scratch_dir("scan");
        fs::create_dir_all(root.join("b_folder")).unwrap();
        fs::create_dir_all(root.join("a_folder/nested")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("a_folder/z.png"), b"").unwrap();
        fs::write(root.join("a_folder/m.mp4"), b"").unwrap();
        fs::write(root.join("a_folder/.DS_Store"), b"").unwrap();
        fs::write(root.join("stray.txt"), b"").unwrap();

        let manifest = Manifest::scan(&root).unwrap();
        let names: Vec<_> = manifest.iter().map(|f| f.name.to_string()).collect();

        assert_eq!(names, vec!["a_folder", "b_folder"]);
        assert_eq!(
            manifest[0].files,
            vec![FileName::new("m.mp4"), FileName::new("z.png")]
        );
        assert!(manifest[1].files.is_empty());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_scan_creates_missing_directory() {
        let root = scratch_dir("missing");
        let manifest = Manifest::scan(&root).unwrap();

        assert!(manifest.is_empty());
        assert!(root.is_dir());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_write_is_pretty_printed() {
        let root = scratch_dir("write");
        let out = root.join("public/content.json");
        let manifest = Manifest::new(vec![FolderRecord {
            name: FolderName::new("Art"),
            files: vec![FileName::new("x.gif")],
        }]);

        manifest.write(&out).unwrap();
        let written = fs::read_to_string(&out).unwrap();

        assert!(written.starts_with("[\n  {\n    \"name\": \"Art\""));
        assert_eq!(Manifest::load(&out).unwrap(), manifest);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_write_replaces_existing_file_whole() {
        let root = scratch_dir("replace");
        let out = root.join("content.json");
        fs::create_dir_all(&root).unwrap();
        fs::write(&out, "[{\"name\": \"Old\", \"files\": []}]").unwrap();

        let manifest = Manifest::new(vec![FolderRecord {
            name: FolderName::new("New"),
            files: vec![FileName::new("clip.webm")],
        }]);
        manifest.write(&out).unwrap();

        assert_eq!(Manifest::load(&out).unwrap(), manifest);
        let leftovers: Vec<_> = fs::read_dir(&root)
            .unwrap()
            .flatten()
            .map(|e| e.file_name())
            .filter(|n| n != "content.json")
            .collect();
        assert!(leftovers.is_empty(), "staging file left behind: {:?}", leftovers);

        let _ = fs::remove_dir_all(&root);
    }
}
