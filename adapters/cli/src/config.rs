use std::{fs, path::Path};

use serde::Deserialize;
use vision_curse_core::tuning;

const DEFAULT_SEED: u64 = 0x7a1e_c0de_5eed_0001;
const DEFAULT_ENEMIES: u32 = 12;
const DEFAULT_TICKS: u64 = 3_600;

/// Errors raised while loading or validating a session configuration.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration at {path}")]
    Unreadable {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The maze needs at least one column and one row.
    #[error("maze dimensions must be positive (received {columns}x{rows})")]
    ZeroDimensions {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// A size setting must be strictly positive.
    #[error("`{setting}` must be positive")]
    NonPositiveSize {
        /// Name of the offending setting.
        setting: &'static str,
    },
}

/// Settings for a headless session, read from TOML.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Maze generation settings.
    pub(crate) level: LevelConfig,
    /// Frame loop and presentation settings.
    pub(crate) session: SessionSettings,
}

/// `[level]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LevelConfig {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) seed: u64,
    pub(crate) enemies: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            columns: tuning::DEFAULT_COLUMNS,
            rows: tuning::DEFAULT_ROWS,
            seed: DEFAULT_SEED,
            enemies: DEFAULT_ENEMIES,
        }
    }
}

/// `[session]` table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionSettings {
    /// Frames simulated before the session gives up.
    pub(crate) ticks: u64,
    /// Print an ASCII frame every N frames; zero disables frame output.
    pub(crate) render_every: u64,
    /// Seed of the shotgun's pellet spread.
    pub(crate) pellet_seed: u64,
    /// Camera viewport width in world units.
    pub(crate) viewport_width: f32,
    /// Camera viewport height in world units.
    pub(crate) viewport_height: f32,
    /// Characters per ASCII frame row.
    pub(crate) ascii_columns: usize,
    /// Rows per ASCII frame.
    pub(crate) ascii_rows: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            render_every: 0,
            pellet_seed: DEFAULT_SEED,
            viewport_width: 960.0,
            viewport_height: 720.0,
            ascii_columns: 80,
            ascii_rows: 30,
        }
    }
}

impl SessionConfig {
    /// Reads and parses the TOML file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses a configuration from TOML text; missing keys take defaults.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Rejects settings the simulation cannot run with.
    pub(crate) fn validate(self) -> Result<Self, ConfigError> {
        let LevelConfig { columns, rows, .. } = self.level;
        if columns == 0 || rows == 0 {
            return Err(ConfigError::ZeroDimensions { columns, rows });
        }

        let session = &self.session;
        let sizes = [
            ("session.viewport_width", session.viewport_width > 0.0),
            ("session.viewport_height", session.viewport_height > 0.0),
            ("session.ascii_columns", session.ascii_columns > 0),
            ("session.ascii_rows", session.ascii_rows > 0),
        ];
        if let Some((setting, _)) = sizes.into_iter().find(|(_, positive)| !positive) {
            return Err(ConfigError::NonPositiveSize { setting });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = SessionConfig::from_toml_str("").expect("empty toml parses");
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.level.columns, 40);
        assert_eq!(config.level.rows, 30);
        assert_eq!(config.level.seed, DEFAULT_SEED);
        assert_eq!(config.level.enemies, 12);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = SessionConfig::from_toml_str(
            r#"
            [level]
            columns = 6
            seed = 9

            [session]
            render_every = 15
            "#,
        )
        .expect("partial toml parses");

        assert_eq!(config.level.columns, 6);
        assert_eq!(config.level.rows, tuning::DEFAULT_ROWS);
        assert_eq!(config.level.seed, 9);
        assert_eq!(config.session.render_every, 15);
        assert_eq!(config.session.ticks, DEFAULT_TICKS);
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let error = SessionConfig::from_toml_str("[level]\nwidth = 3\n")
            .expect_err("unknown key must be rejected");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let mut config = SessionConfig::default();
        config.level.rows = 0;
        let error = config.validate().expect_err("zero rows must be rejected");
        assert!(matches!(
            error,
            ConfigError::ZeroDimensions {
                columns: 40,
                rows: 0
            }
        ));
    }

    #[test]
    fn non_positive_viewport_is_rejected() {
        let mut config = SessionConfig::default();
        config.session.viewport_height = -1.0;
        let error = config.validate().expect_err("negative height must be rejected");
        assert!(matches!(
            error,
            ConfigError::NonPositiveSize {
                setting: "session.viewport_height"
            }
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = SessionConfig::load(Path::new("/nonexistent/vision-curse.toml"))
            .expect_err("missing file must fail");
        assert!(error.to_string().contains("/nonexistent/vision-curse.toml"));
    }
}
