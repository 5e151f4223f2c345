//! Command-line interface for inspecting GData documents.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::batch::BatchFeed;
use crate::config::WriteOptions;
use crate::error::{GDataError, Result};
use crate::model::{Entry, Feed, XmlElement};
use crate::summary::DocumentSummary;

/// GData Inspect - Parse, normalize and summarize GData Atom documents.
#[derive(Parser)]
#[command(name = "gdata-inspect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a document and write it back out in normalized form.
    Normalize {
        /// XML file to read
        file: PathBuf,

        /// Document kind
        #[arg(short, long, value_enum, default_value_t = Kind::Feed)]
        kind: Kind,

        /// Indent the output and add an XML declaration
        #[arg(short, long)]
        pretty: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a YAML summary of a document.
    Summary {
        /// XML file to read
        file: PathBuf,

        /// Document kind
        #[arg(short, long, value_enum, default_value_t = Kind::Feed)]
        kind: Kind,
    },
}

/// The root type a document is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Entry,
    Feed,
    BatchFeed,
}

/// A parsed document of any supported kind.
enum Document {
    Entry(Entry),
    Feed(Feed),
    BatchFeed(BatchFeed),
}

impl Document {
    fn parse(xml: &str, kind: Kind) -> Result<Self> {
        Ok(match kind {
            Kind::Entry => Self::Entry(Entry::from_xml_str(xml)?),
            Kind::Feed => Self::Feed(Feed::from_xml_str(xml)?),
            Kind::BatchFeed => Self::BatchFeed(BatchFeed::from_xml_str(xml)?),
        })
    }

    fn to_xml_string_with(&self, options: WriteOptions) -> Result<String> {
        match self {
            Self::Entry(entry) => entry.to_xml_string_with(options),
            Self::Feed(feed) => feed.to_xml_string_with(options),
            Self::BatchFeed(feed) => feed.to_xml_string_with(options),
        }
    }

    fn summary(&self) -> DocumentSummary {
        match self {
            Self::Entry(entry) => DocumentSummary::of_entry(entry),
            Self::Feed(feed) => DocumentSummary::of_feed(feed),
            Self::BatchFeed(feed) => DocumentSummary::of_batch_feed(feed),
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            file,
            kind,
            pretty,
            output,
        } => normalize_command(&file, kind, pretty, output.as_deref()),
        Commands::Summary { file, kind } => summary_command(&file, kind),
    }
}

fn load_document(file: &Path, kind: Kind) -> Result<Document> {
    let xml = fs::read_to_string(file)?;
    tracing::debug!(file = %file.display(), ?kind, "parsing document");
    Document::parse(&xml, kind)
}

/// Execute the normalize command.
fn normalize_command(file: &Path, kind: Kind, pretty: bool, output: Option<&Path>) -> Result<()> {
    // Fail before parsing when the destination cannot be written
    if let Some(parent) = output.and_then(Path::parent) {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(GDataError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", parent.display()),
            )));
        }
    }

    let document = load_document(file, kind)?;
    let options = if pretty {
        WriteOptions::pretty()
    } else {
        WriteOptions::compact()
    };
    let mut xml = document.to_xml_string_with(options)?;
    xml.push('\n');

    match output {
        Some(path) => fs::write(path, xml)?,
        None => print!("{xml}"),
    }
    Ok(())
}

/// Execute the summary command.
fn summary_command(file: &Path, kind: Kind) -> Result<()> {
    let document = load_document(file, kind)?;
    print!("{}", document.summary().to_yaml()?);
    Ok(())
}
