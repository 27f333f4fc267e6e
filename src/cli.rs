use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rzip")]
#[command(version)]
#[command(about = "A Rust zip utility with HTTP source support", long_about = None)]
#[command(after_help = "Examples:\n  \
  rzip backup.zip notes.txt todo.txt       store two local files\n  \
  rzip -j dist.zip target/release/app      store only the base name\n  \
  rzip site.zip https://example.com/a.png  fetch and store a remote source\n  \
  rzip -p out.zip a.txt | wc -c            write the archive to stdout")]
pub struct Cli {
    /// Output ZIP archive path
    #[arg(value_name = "ARCHIVE")]
    pub archive: String,

    /// Files or HTTP URLs to store (empty produces an empty archive)
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<String>,

    /// Write the archive to stdout, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// List stored entries verbosely
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Junk paths (store base names only)
    #[arg(short = 'j')]
    pub junk_paths: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.pipe
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }
}

/// Check whether an input names a remote HTTP source.
pub fn is_http_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}
