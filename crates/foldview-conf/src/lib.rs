//! Settings layer for project-tree folding.
//!
//! Settings are layered from TOML sources: a user-level config file (in
//! the platform config directory), then `.foldview.toml` and
//! `foldview.toml` at the project root, later sources winning. Rules are
//! pure configuration; the matching logic lives in `foldview-scope`.

use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Name of the rule created when no configuration is present.
pub const DEFAULT_RULE_NAME: &str = "Root files";

/// Pattern of the rule created when no configuration is present.
pub const DEFAULT_RULE_PATTERN: &str = ".* *.md *.mod *.sum LICENSE*";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration build/deserialize error")]
    Config(#[from] config::ConfigError),
    #[error("failed to write settings file")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize settings")]
    Serialize(#[from] toml::ser::Error),
}

/// Platform directories for user-level configuration.
#[must_use]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com.github", "foldview", "foldview")
}

/// Folding settings for one project session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub folding_enabled: bool,
    pub match_directories: bool,
    pub fold_ignored_files: bool,
    pub hide_empty_groups: bool,
    pub hide_all_groups: bool,
    /// `None` defers to the host filesystem default: case-insensitive on
    /// Windows, sensitive elsewhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    pub limit_to_workspace_modules: bool,
    pub rules: Vec<Rule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folding_enabled: true,
            match_directories: true,
            fold_ignored_files: false,
            hide_empty_groups: false,
            hide_all_groups: false,
            case_sensitive: None,
            limit_to_workspace_modules: true,
            rules: vec![Rule::default()],
        }
    }
}

impl Settings {
    pub fn new(project_root: &Utf8Path) -> Result<Self, ConfigError> {
        let user_config_file = project_dirs().and_then(|dirs| {
            Utf8PathBuf::from_path_buf(dirs.config_dir().join("foldview.toml")).ok()
        });

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    fn load_from_paths(
        project_root: &Utf8Path,
        user_config_path: Option<&Utf8Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(
                File::from(path.as_std_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            File::from(project_root.join(".foldview.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join("foldview.toml").as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder.build()?;
        let settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Write the settings as TOML, the format `new` reads back.
    pub fn save(&self, path: &Utf8Path) -> Result<(), ConfigError> {
        let rendered = toml::to_string_pretty(self)?;
        fs::write(path.as_std_path(), rendered)?;
        Ok(())
    }

    /// The case sensitivity to match with, falling back to the host
    /// filesystem default when the setting is unset.
    #[must_use]
    pub fn effective_case_sensitivity(&self) -> bool {
        self.case_sensitive.unwrap_or(!cfg!(windows))
    }
}

/// A user-declared folding rule: a display name, a glob pattern (multiple
/// space-separated tokens allowed), and optional display colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rule {
    pub name: String,
    pub pattern: String,
    #[serde(with = "color_string", skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(with = "color_string", skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            name: DEFAULT_RULE_NAME.to_string(),
            pattern: DEFAULT_RULE_PATTERN.to_string(),
            foreground: None,
            background: None,
        }
    }
}

/// An RGB color, persisted as the decimal string of its packed value.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Color(u32);

impl Color {
    #[must_use]
    pub fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    /// Parse a persisted color string: decimal, `#RRGGBB`, or `0xRRGGBB`.
    #[must_use]
    pub fn decode(value: &str) -> Option<Self> {
        let value = value.trim();
        let (digits, radix) = if let Some(hex) = value.strip_prefix('#') {
            (hex, 16)
        } else if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
            (hex, 16)
        } else {
            (value, 10)
        };

        let raw = i64::from_str_radix(digits, radix).ok()?;
        u32::try_from(raw & 0x00FF_FFFF).ok().map(Self)
    }

    #[must_use]
    pub fn rgb(self) -> u32 {
        self.0
    }
}

/// Serde adapter matching the original persistence format: colors are
/// stored as strings, and strings that fail to decode read back as no
/// color rather than failing the whole settings load.
mod color_string {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Color;

    pub fn serialize<S>(value: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(color) => serializer.serialize_str(&color.rgb().to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|value| {
            let decoded = Color::decode(value);
            if decoded.is_none() {
                tracing::warn!("ignoring undecodable rule color: {value:?}");
            }
            decoded
        }))
    }
}
