//! Configuration management

use crate::domain::RenderOptions;
use crate::error::{Result, SnipperError};
use crate::infrastructure::files;
use serde::Deserialize;
use std::path::Path;

/// Name of the optional configuration file in the source directory
pub const CONFIG_FILE_NAME: &str = "snipper.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Language written into `[source,<language>]` lines; empty disables them
    pub language: Option<String>,

    /// Extensions of host documents to expand
    pub source_extensions: Vec<String>,

    /// Extensions of source files scanned for tags
    pub tagged_extensions: Vec<String>,

    /// Longest tagged line before an advisory is reported
    pub max_line_length: usize,

    pub show_query: bool,
    pub inline_list_items: bool,

    /// Appended to a host document's path when writing the rendered file
    pub suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: Some("swift".to_string()),
            source_extensions: vec!["txt".to_string(), "asciidoc".to_string()],
            tagged_extensions: ["swift", "txt", "cs", "py"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_line_length: 75,
            show_query: false,
            inline_list_items: false,
            suffix: String::new(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `snipper.toml` in
    /// `source_dir` is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>, source_dir: &Path) -> Result<Self> {
        let contents = match path {
            Some(path) => files::read_optional(path)?.ok_or_else(|| {
                SnipperError::Config(format!("{} does not exist", path.display()))
            })?,
            None => match files::read_optional(&source_dir.join(CONFIG_FILE_NAME))? {
                Some(contents) => contents,
                None => {
                    tracing::debug!("No {} in {}", CONFIG_FILE_NAME, source_dir.display());
                    return Ok(Config::default());
                }
            },
        };

        let config = Self::parse(&contents)?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;

        if config.source_extensions.is_empty() || config.tagged_extensions.is_empty() {
            return Err(SnipperError::Config(
                "source_extensions and tagged_extensions must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    /// Rendering options derived from this configuration.
    pub fn render_options(&self, clean: bool) -> RenderOptions {
        RenderOptions {
            language: self.language.clone().filter(|lang| !lang.is_empty()),
            show_query: self.show_query,
            inline_list_items: self.inline_list_items,
            clean,
        }
    }
}
