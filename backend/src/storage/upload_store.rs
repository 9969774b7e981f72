use std::fs;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// URL prefix the upload directory is mounted under.
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads";

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("No file selected")]
    EmptyFilename,
    #[error("File type not allowed")]
    DisallowedType,
    #[error("File too large")]
    FileTooLarge,
    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub url: String,
}

#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(dir: PathBuf, max_bytes: usize) -> Self {
        Self { dir, max_bytes }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The static file service resolves its directory when mounted, so this
    /// must run before the routes are configured.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn allowed_file(filename: &str) -> bool {
        filename.rsplit_once('.').is_some_and(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
    }

    /// Reduces a client supplied filename to something safe to join onto the
    /// upload directory: accents are decomposed so their base letters
    /// survive, path separators and whitespace runs become `_`, anything
    /// outside `[A-Za-z0-9_.-]` is dropped, and leading or trailing dots and
    /// underscores are trimmed.
    pub fn secure_filename(filename: &str) -> String {
        let spaced: String = filename
            .nfkd()
            .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
            .collect();
        let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
        let kept: String = joined
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
            .collect();
        let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

        if trimmed.is_empty() {
            "upload".to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn unique_name(filename: &str) -> String {
        format!("{}_{}", Uuid::new_v4().simple(), Self::secure_filename(filename))
    }

    pub fn validate_size(&self, len: usize) -> Result<(), UploadError> {
        if len > self.max_bytes {
            return Err(UploadError::FileTooLarge);
        }
        Ok(())
    }

    /// Writes the upload under a fresh unique name, creating the directory
    /// on first use.
    pub fn save(&self, filename: &str, data: &[u8]) -> Result<StoredUpload, UploadError> {
        self.validate_size(data.len())?;
        fs::create_dir_all(&self.dir)?;

        let name = Self::unique_name(filename);
        let path = self.dir.join(&name);
        fs::write(&path, data)?;

        Ok(StoredUpload {
            path,
            url: format!("{}/{}", UPLOAD_URL_PREFIX, name),
        })
    }
}
