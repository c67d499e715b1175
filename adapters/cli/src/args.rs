use std::path::PathBuf;

use clap::Parser;

use crate::config::SessionConfig;

/// Command-line arguments accepted by the `vision-curse` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vision-curse",
    about = "Runs a headless Vision Curse session driven by the autopilot"
)]
pub(crate) struct CliArgs {
    /// TOML file holding `[level]` and `[session]` settings.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Seed feeding maze generation and enemy placement.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of maze columns.
    #[arg(long)]
    pub(crate) columns: Option<u32>,
    /// Number of maze rows.
    #[arg(long)]
    pub(crate) rows: Option<u32>,
    /// Number of enemies placed in the maze.
    #[arg(long)]
    pub(crate) enemies: Option<u32>,
    /// Frames to simulate before giving up.
    #[arg(long)]
    pub(crate) ticks: Option<u64>,
    /// Print an ASCII frame every N frames; zero disables frame output.
    #[arg(long, value_name = "N")]
    pub(crate) render_every: Option<u64>,
}

impl CliArgs {
    /// Overrides file or default settings with the flags given on the command line.
    pub(crate) fn apply_to(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(seed) = self.seed {
            config.level.seed = seed;
        }
        if let Some(columns) = self.columns {
            config.level.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.level.rows = rows;
        }
        if let Some(enemies) = self.enemies {
            config.level.enemies = enemies;
        }
        if let Some(ticks) = self.ticks {
            config.session.ticks = ticks;
        }
        if let Some(render_every) = self.render_every {
            config.session.render_every = render_every;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configuration() {
        let args = CliArgs::try_parse_from([
            "vision-curse",
            "--seed",
            "42",
            "--columns",
            "8",
            "--render-every",
            "30",
        ])
        .expect("flags parse");

        let config = args.apply_to(SessionConfig::default());
        assert_eq!(config.level.seed, 42);
        assert_eq!(config.level.columns, 8);
        assert_eq!(config.level.rows, SessionConfig::default().level.rows);
        assert_eq!(config.session.render_every, 30);
    }

    #[test]
    fn absent_flags_keep_configuration() {
        let args = CliArgs::try_parse_from(["vision-curse"]).expect("no flags parse");
        assert_eq!(
            args.apply_to(SessionConfig::default()),
            SessionConfig::default()
        );
    }
}
