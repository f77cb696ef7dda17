//! CLI command definitions

use crate::infrastructure::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snipper")]
#[command(
    about = "Expands snippet directives in AsciiDoc documents with tagged source code",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Directory containing the book's source text
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Git checkout containing the tagged source code
    #[arg(value_name = "CODE_DIR")]
    pub code_dir: PathBuf,

    /// Language used for syntax highlighting (default: swift)
    #[arg(short = 'l', long = "lang", value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Don't actually modify any files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Remove rendered snippets instead of expanding them
    #[arg(long)]
    pub clean: bool,

    /// Tagged lines longer than this are reported (default: 75)
    #[arg(long, value_name = "N")]
    pub length: Option<usize>,

    /// Append this to the file name of written files
    #[arg(long)]
    pub suffix: Option<String>,

    /// Render each snippet to a file in this directory
    #[arg(short = 'x', long = "extract-snippets", value_name = "DIR")]
    pub extract_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Add a title naming the query to each rendered snippet
    #[arg(short = 'q', long)]
    pub show_query: bool,

    /// Start each snippet with `+` so it attaches to a list item
    #[arg(long)]
    pub as_inline_list_items: bool,

    /// Configuration file (default: SOURCE_DIR/snipper.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Override configuration values with the ones given on the command line.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(language) = &self.language {
            config.language = Some(language.clone());
        }
        if let Some(length) = self.length {
            config.max_line_length = length;
        }
        if let Some(suffix) = &self.suffix {
            config.suffix = suffix.clone();
        }
        if self.show_query {
            config.show_query = true;
        }
        if self.as_inline_list_items {
            config.inline_list_items = true;
        }
    }
}
