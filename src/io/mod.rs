mod http;
mod local;

pub use http::HttpSource;
pub use local::LocalFileSource;

use anyhow::Result;
use async_trait::async_trait;
use time::OffsetDateTime;

/// Trait for acquiring the content of one archive entry
#[async_trait]
pub trait Source: Send + Sync {
    /// Read the entire content in one scoped acquisition.
    ///
    /// The returned buffer is fully materialized; the archive writer never
    /// sees a partial or streaming read.
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Name the entry is stored under in the archive
    fn entry_name(&self) -> &str;

    /// Modification timestamp, if the source carries one
    fn modified(&self) -> Option<OffsetDateTime>;
}
