//! Selector options, host defaults and the settings merged from both.

use std::{env, fs, path::Path};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    consts::{
        DEFAULT_FILETYPE_ERROR, DEFAULT_MAX_SIZE_MB, DEFAULT_SUCCESS_MESSAGE, ENV_FILE_SIZE_ERROR,
        ENV_FILE_TYPE_ERROR, ENV_MAX_FILE_SIZE, FILESIZE_ERROR_TEMPLATE,
    },
    error::ConfigError,
};

// Dots, spaces, colons and dashes are dropped from delimited filetype lists
static FILETYPES_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[. :-]+").expect("Failed to compile filetypes regex")
});

/// Allowed file types, either as a list or as one delimited string
/// such as `".png, .jpg"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileTypes {
    List(Vec<String>),
    Delimited(String),
}

impl Default for FileTypes {
    fn default() -> Self {
        FileTypes::List(Vec::new())
    }
}

impl FileTypes {
    /// Returns the normalized extensions: lowercase, without dots or
    /// whitespace, without duplicates, in their original order
    pub fn normalize(&self) -> Vec<String> {
        let raw: Vec<String> = match self {
            FileTypes::Delimited(list) => FILETYPES_NOISE
                .replace_all(list, "")
                .split(',')
                .map(str::to_lowercase)
                .collect(),
            FileTypes::List(list) => list
                .iter()
                .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                .collect(),
        };

        let mut extensions: Vec<String> = Vec::with_capacity(raw.len());
        for ext in raw {
            let ext = ext.trim().to_owned();
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        extensions
    }
}

impl From<&str> for FileTypes {
    fn from(list: &str) -> Self {
        FileTypes::Delimited(list.to_owned())
    }
}

impl From<Vec<&str>> for FileTypes {
    fn from(list: Vec<&str>) -> Self {
        FileTypes::List(list.into_iter().map(str::to_owned).collect())
    }
}

/// Options supplied by the caller when attaching a selector.
/// Every field is optional; missing ones come from [`HostDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorOptions {
    pub filetypes: FileTypes,
    pub max_size: Option<f64>,
    pub error_field: Option<String>,
    pub success_field: Option<String>,
    pub filename_field: Option<String>,
    pub filesize_field: Option<String>,
    pub max_size_field: Option<String>,
    pub filetype_error: Option<String>,
    pub filesize_error: Option<String>,
    pub success_message: Option<String>,
}

impl SelectorOptions {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}

/// Values the host page provides for options the caller leaves out
#[derive(Debug, Clone, PartialEq)]
pub struct HostDefaults {
    pub max_size_mb: f64,
    pub filetype_error: String,
    /// Empty means "use the generated message"
    pub filesize_error: String,
    pub success_message: String,
}

impl Default for HostDefaults {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            filetype_error: DEFAULT_FILETYPE_ERROR.to_owned(),
            filesize_error: String::new(),
            success_message: DEFAULT_SUCCESS_MESSAGE.to_owned(),
        }
    }
}

impl HostDefaults {
    /// Reads the host defaults from the environment.
    /// Call `dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut defaults = Self::default();

        if let Some(value) = lookup(ENV_MAX_FILE_SIZE) {
            defaults.max_size_mb = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_MAX_FILE_SIZE,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_FILE_TYPE_ERROR) {
            defaults.filetype_error = value;
        }
        if let Some(value) = lookup(ENV_FILE_SIZE_ERROR) {
            defaults.filesize_error = value;
        }

        Ok(defaults)
    }
}

/// The effective configuration of one attached selector.
/// Built once by [`Settings::merge`] and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    allowed_extensions: Vec<String>,
    max_size_mb: f64,
    error_field: Option<String>,
    success_field: Option<String>,
    filename_field: Option<String>,
    filesize_field: Option<String>,
    max_size_field: Option<String>,
    filetype_error: String,
    filesize_error: String,
    success_message: String,
}

impl Settings {
    /// Merges `options` over `defaults`
    pub fn merge(options: &SelectorOptions, defaults: &HostDefaults) -> Result<Self, ConfigError> {
        let max_size_mb = options.max_size.unwrap_or(defaults.max_size_mb);
        if !max_size_mb.is_finite() || max_size_mb <= 0.0 {
            return Err(ConfigError::InvalidMaxSize(max_size_mb));
        }

        let filesize_error = options
            .filesize_error
            .clone()
            .unwrap_or_else(|| defaults.filesize_error.clone());
        let filesize_error = if filesize_error.is_empty() {
            FILESIZE_ERROR_TEMPLATE.replace("{}", &max_size_mb.to_string())
        } else {
            filesize_error
        };

        let settings = Self {
            allowed_extensions: options.filetypes.normalize(),
            max_size_mb,
            error_field: options.error_field.clone(),
            success_field: options.success_field.clone(),
            filename_field: options.filename_field.clone(),
            filesize_field: options.filesize_field.clone(),
            max_size_field: options.max_size_field.clone(),
            filetype_error: options
                .filetype_error
                .clone()
                .unwrap_or_else(|| defaults.filetype_error.clone()),
            filesize_error,
            success_message: options
                .success_message
                .clone()
                .unwrap_or_else(|| defaults.success_message.clone()),
        };

        debug!("Merged selector settings: {:?}", settings);
        Ok(settings)
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Whether `extension` passes the allow-list. An empty list allows everything.
    pub fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions.is_empty() || self.allowed_extensions.iter().any(|ext| ext == extension)
    }

    pub fn max_size_mb(&self) -> f64 {
        self.max_size_mb
    }

    pub fn error_field(&self) -> Option<&str> {
        self.error_field.as_deref()
    }

    pub fn success_field(&self) -> Option<&str> {
        self.success_field.as_deref()
    }

    pub fn filename_field(&self) -> Option<&str> {
        self.filename_field.as_deref()
    }

    pub fn filesize_field(&self) -> Option<&str> {
        self.filesize_field.as_deref()
    }

    pub fn max_size_field(&self) -> Option<&str> {
        self.max_size_field.as_deref()
    }

    pub fn filetype_error(&self) -> &str {
        &self.filetype_error
    }

    pub fn filesize_error(&self) -> &str {
        &self.filesize_error
    }

    pub fn success_message(&self) -> &str {
        &self.success_message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod filetypes_tests {
        use super::*;

        #[test]
        fn test_delimited_normalization() {
            let cases = vec![
                (".png, .jpg", vec!["png", "jpg"]),
                ("PNG,JPG", vec!["png", "jpg"]),
                ("png:, -jpg", vec!["png", "jpg"]),
                ("png,,jpg,", vec!["png", "jpg"]),
                ("png, png", vec!["png"]),
                ("", vec![]),
            ];

            for (list, expected) in cases {
                assert_eq!(FileTypes::from(list).normalize(), expected, "Failed for list: {:?}", list);
            }
        }

        #[test]
        fn test_list_normalization() {
            let types = FileTypes::from(vec!["PNG", " .Jpg ", "", "png"]);
            assert_eq!(types.normalize(), vec!["png", "jpg"]);
        }

        #[test]
        fn test_default_is_unrestricted() {
            assert!(FileTypes::default().normalize().is_empty());
        }
    }

    mod options_tests {
        use super::*;

        #[test]
        fn test_yaml_with_list() {
            let options = SelectorOptions::from_yaml_str(
                "filetypes: [png, jpg]\nmax_size: 2\nerror_field: \"#error\"\n",
            )
            .unwrap();

            assert_eq!(options.filetypes, FileTypes::from(vec!["png", "jpg"]));
            assert_eq!(options.max_size, Some(2.0));
            assert_eq!(options.error_field.as_deref(), Some("#error"));
            assert!(options.success_field.is_none());
        }

        #[test]
        fn test_yaml_with_delimited_string() {
            let options = SelectorOptions::from_yaml_str("filetypes: \".png, .jpg\"\n").unwrap();
            assert_eq!(options.filetypes, FileTypes::from(".png, .jpg"));
            assert_eq!(options.filetypes.normalize(), vec!["png", "jpg"]);
        }

        #[test]
        fn test_yaml_rejects_unknown_key() {
            assert!(SelectorOptions::from_yaml_str("max_sise: 2\n").is_err());
        }
    }

    mod host_defaults_tests {
        use super::*;

        #[test]
        fn test_lookup_overrides() {
            let defaults = HostDefaults::from_lookup(|key| match key {
                ENV_MAX_FILE_SIZE => Some("5".to_string()),
                ENV_FILE_TYPE_ERROR => Some("Wrong type".to_string()),
                _ => None,
            })
            .unwrap();

            assert_eq!(defaults.max_size_mb, 5.0);
            assert_eq!(defaults.filetype_error, "Wrong type");
            assert_eq!(defaults.filesize_error, "");
            assert_eq!(defaults.success_message, DEFAULT_SUCCESS_MESSAGE);
        }

        #[test]
        fn test_lookup_rejects_bad_size() {
            let result = HostDefaults::from_lookup(|key| {
                (key == ENV_MAX_FILE_SIZE).then(|| "two".to_string())
            });
            assert!(matches!(result, Err(ConfigError::InvalidEnv { key: ENV_MAX_FILE_SIZE, .. })));
        }
    }

    mod settings_tests {
        use super::*;

        #[test]
        fn test_merge_uses_defaults() {
            let settings = Settings::merge(&SelectorOptions::default(), &HostDefaults::default()).unwrap();

            assert!(settings.allowed_extensions().is_empty());
            assert_eq!(settings.max_size_mb(), DEFAULT_MAX_SIZE_MB);
            assert_eq!(settings.filetype_error(), DEFAULT_FILETYPE_ERROR);
            assert_eq!(settings.filesize_error(), "The file must be 2 megabytes or less.");
            assert_eq!(settings.success_message(), "Thank You!");
            assert!(settings.error_field().is_none());
        }

        #[test]
        fn test_options_override_defaults() {
            let options = SelectorOptions {
                filetypes: FileTypes::from("pdf"),
                max_size: Some(1.5),
                filetype_error: Some("PDF only".to_string()),
                success_message: Some("<i class=\"ok\"></i>".to_string()),
                ..Default::default()
            };
            let settings = Settings::merge(&options, &HostDefaults::default()).unwrap();

            assert_eq!(settings.allowed_extensions(), ["pdf"]);
            assert_eq!(settings.max_size_mb(), 1.5);
            assert_eq!(settings.filetype_error(), "PDF only");
            assert_eq!(settings.filesize_error(), "The file must be 1.5 megabytes or less.");
            assert_eq!(settings.success_message(), "<i class=\"ok\"></i>");
        }

        #[test]
        fn test_host_filesize_error_is_kept() {
            let defaults = HostDefaults {
                filesize_error: "Too large".to_string(),
                ..Default::default()
            };
            let settings = Settings::merge(&SelectorOptions::default(), &defaults).unwrap();
            assert_eq!(settings.filesize_error(), "Too large");
        }

        #[test]
        fn test_empty_option_filesize_error_is_generated() {
            let options = SelectorOptions {
                max_size: Some(3.0),
                filesize_error: Some(String::new()),
                ..Default::default()
            };
            let defaults = HostDefaults {
                filesize_error: "Too large".to_string(),
                ..Default::default()
            };
            let settings = Settings::merge(&options, &defaults).unwrap();
            assert_eq!(settings.filesize_error(), "The file must be 3 megabytes or less.");
        }

        #[test]
        fn test_invalid_max_size() {
            for max_size in vec![0.0, -2.0, f64::NAN, f64::INFINITY] {
                let options = SelectorOptions {
                    max_size: Some(max_size),
                    ..Default::default()
                };
                let result = Settings::merge(&options, &HostDefaults::default());
                assert!(
                    matches!(result, Err(ConfigError::InvalidMaxSize(_))),
                    "Max size {} was accepted", max_size
                );
            }
        }

        #[test]
        fn test_allows() {
            let options = SelectorOptions {
                filetypes: FileTypes::from("png,jpg"),
                ..Default::default()
            };
            let settings = Settings::merge(&options, &HostDefaults::default()).unwrap();

            assert!(settings.allows("png"));
            assert!(settings.allows("jpg"));
            assert!(!settings.allows("pdf"));
            assert!(!settings.allows(""));

            let open = Settings::merge(&SelectorOptions::default(), &HostDefaults::default()).unwrap();
            assert!(open.allows("anything"));
            assert!(open.allows(""));
        }
    }
}
