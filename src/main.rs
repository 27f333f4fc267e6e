//! Main entry point for the rzip CLI application.
//!
//! This binary provides a command-line interface for assembling store-only
//! ZIP archives from local files and remote HTTP URLs.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use rzip::cli::is_http_url;
use rzip::{Cli, DosDateTime, HttpSource, LocalFileSource, Source, ZipWriter};

/// Application entry point.
///
/// Collects the content of every input source (local path or HTTP URL),
/// feeds it through the archive writer in input order, and writes the
/// finished archive to the output path or stdout.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut writer = ZipWriter::new();
    let mut transferred = 0u64;

    for input in &cli.inputs {
        // Acquire the full content before the entry is encoded; the writer
        // only ever sees materialized bytes.
        let (content, name, modified) = if is_http_url(input) {
            let source = HttpSource::new(input.clone(), entry_name_for_url(input))?;
            let content = source
                .fetch()
                .await
                .with_context(|| format!("cannot fetch {input}"))?;
            transferred += source.transferred_bytes();
            (content, source.entry_name().to_string(), source.modified())
        } else {
            let path = Path::new(input);
            let source = LocalFileSource::new(path, entry_name_for_path(path, cli.junk_paths))?;
            let content = source
                .fetch()
                .await
                .with_context(|| format!("cannot read {input}"))?;
            (content, source.entry_name().to_string(), source.modified())
        };

        if !cli.is_quiet() {
            println!("  adding: {} ({} bytes)", name, content.len());
        }

        writer
            .add_entry(&name, &content, modified)
            .with_context(|| format!("cannot store {input}"))?;
    }

    if cli.verbose && !cli.pipe {
        list_entries(&writer);
    }

    let entry_count = writer.entry_count();
    let archive = writer.finish().context("cannot finalize archive")?;

    if cli.pipe {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&archive).await?;
    } else {
        tokio::fs::write(&cli.archive, &archive)
            .await
            .with_context(|| format!("cannot write {}", cli.archive))?;

        if !cli.is_very_quiet() {
            println!(
                "{}: {} entries, {}",
                cli.archive,
                entry_count,
                format_size(archive.len() as u64)
            );
        }
    }

    // Display network transfer statistics for HTTP sources
    if transferred > 0 && !cli.is_quiet() {
        eprintln!("\nTotal bytes transferred: {}", format_size(transferred));
    }

    Ok(())
}

/// Print a verbose table of the entries recorded so far.
///
/// Mirrors the long listing of common zip tools: length, DOS date and
/// time, and the stored name.
fn list_entries(writer: &ZipWriter) {
    println!("{:>10}  {:>10}  {:>5}  Name", "Length", "Date", "Time");
    println!("{}", "-".repeat(50));

    let mut total = 0u64;
    for entry in writer.entries() {
        let dos = DosDateTime {
            time: entry.last_mod_time,
            date: entry.last_mod_date,
        };
        let (year, month, day) = dos.ymd();
        let (hour, minute, _second) = dos.hms();

        println!(
            "{:>10}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
            entry.uncompressed_size,
            year,
            month,
            day,
            hour,
            minute,
            String::from_utf8_lossy(&entry.name)
        );
        total += entry.uncompressed_size as u64;
    }

    println!("{}", "-".repeat(50));
    println!("{:>10}  {:>20}  {} files", total, "", writer.entry_count());
}

/// Derive the stored entry name from a local path.
///
/// With `junk_paths` only the base name is kept; otherwise the path is
/// stored as given, minus any leading `./`.
fn entry_name_for_path(path: &Path, junk_paths: bool) -> String {
    if junk_paths {
        if let Some(base) = path.file_name() {
            return base.to_string_lossy().to_string();
        }
    }
    let name = path.to_string_lossy();
    name.strip_prefix("./").unwrap_or(&name).to_string()
}

/// Derive the stored entry name from a URL: the last path segment with any
/// query or fragment stripped, falling back to the host.
fn entry_name_for_url(url: &str) -> String {
    let without_scheme = url.split("://").nth(1).unwrap_or(url);
    let without_query = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);
    let segment = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("");

    if segment.is_empty() {
        "index".to_string()
    } else {
        segment.to_string()
    }
}

/// Format a byte size into a human-readable string.
///
/// Automatically selects the appropriate unit (bytes, KB, MB, GB)
/// based on the size magnitude.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_names_keep_or_junk_directories() {
        let path = Path::new("docs/guide/intro.md");
        assert_eq!(entry_name_for_path(path, false), "docs/guide/intro.md");
        assert_eq!(entry_name_for_path(path, true), "intro.md");
        assert_eq!(entry_name_for_path(Path::new("./a.txt"), false), "a.txt");
    }

    #[test]
    fn url_names_use_the_last_segment() {
        assert_eq!(
            entry_name_for_url("https://example.com/assets/logo.png"),
            "logo.png"
        );
        assert_eq!(
            entry_name_for_url("https://example.com/file.txt?v=2#top"),
            "file.txt"
        );
        assert_eq!(entry_name_for_url("https://example.com/"), "example.com");
    }

    #[test]
    fn sizes_format_with_scaled_units() {
        assert_eq!(format_size(500), "500 bytes");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
    }
}
