//! Options file loading
//!
//! Reads plugin options from a `.json` or `.toml` file into a [`RawValue`]
//! ready for [`crate::schema::validate`]. Files cannot express functions;
//! function-valued options are only available programmatically.

use log::debug;
use std::path::Path;

use crate::error::HtmlPluginError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::options::{HtmlPluginOptions, RawValue};
use crate::schema;

/// Default options file name
pub const OPTIONS_FILE_NAME: &str = "html-plugin.json";

/// Supported options file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl OptionsFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Handles loading options files
pub struct OptionsLoader;

impl OptionsLoader {
    /// Load raw options from `path`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use html_plugin_options::loader::OptionsLoader;
    /// use std::path::Path;
    ///
    /// let raw = OptionsLoader::load(Path::new("html-plugin.json"))?;
    /// println!("title = {:?}", raw.get("title"));
    /// # Ok::<(), html_plugin_options::error::HtmlPluginError>(())
    /// ```
    pub fn load(path: &Path) -> Result<RawValue, HtmlPluginError> {
        Self::load_with_fs(path, &RealFileSystem)
    }

    /// Load raw options with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        path: &Path,
        fs: &FS,
    ) -> Result<RawValue, HtmlPluginError> {
        let format =
            OptionsFormat::from_path(path).ok_or_else(|| HtmlPluginError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;

        let contents = match fs.read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(HtmlPluginError::ConfigNotFound {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                return Err(HtmlPluginError::Io {
                    context: format!("reading {}", path.display()),
                    source: e,
                });
            }
        };

        let value: serde_json::Value = match format {
            OptionsFormat::Json => {
                serde_json::from_str::<serde_json::Value>(&contents).map_err(|e| e.to_string())
            }
            OptionsFormat::Toml => {
                toml_edit::de::from_str::<serde_json::Value>(&contents).map_err(|e| e.to_string())
            }
        }
        .map_err(|message| HtmlPluginError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;

        debug!("loaded {:?} options from {}", format, path.display());
        Ok(RawValue::from(value))
    }

    /// Load and validate options from `path`
    pub fn load_validated(path: &Path) -> Result<HtmlPluginOptions, HtmlPluginError> {
        Self::load_validated_with_fs(path, &RealFileSystem)
    }

    /// Load and validate options with a custom filesystem implementation
    pub fn load_validated_with_fs<FS: FileSystem>(
        path: &Path,
        fs: &FS,
    ) -> Result<HtmlPluginOptions, HtmlPluginError> {
        let raw = Self::load_with_fs(path, fs)?;
        Ok(schema::validate(&raw)?)
    }
}
