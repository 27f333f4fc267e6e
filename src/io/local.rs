use super::Source;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Local file source reading entry content from the filesystem
pub struct LocalFileSource {
    path: PathBuf,
    name: String,
    modified: Option<OffsetDateTime>,
}

impl LocalFileSource {
    /// Create a source for `path`, stored in the archive as `name`.
    ///
    /// The file's modification time is captured here so the archive entry
    /// carries it even if the file changes between now and `fetch`.
    pub fn new(path: &Path, name: String) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            bail!("{} is not a regular file", path.display());
        }
        let modified = metadata.modified().ok().map(OffsetDateTime::from);
        Ok(Self {
            path: path.to_path_buf(),
            name,
            modified,
        })
    }
}

#[async_trait]
impl Source for LocalFileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn entry_name(&self) -> &str {
        &self.name
    }

    fn modified(&self) -> Option<OffsetDateTime> {
        self.modified
    }
}
