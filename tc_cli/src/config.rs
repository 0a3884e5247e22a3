use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tc_core::{FrameRate, TimecodeSettings};

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Frame rate: 23.976, 24, 25, 29.97, 30, 50, 59.94, 60 or an exact ratio like 30000/1001
    #[arg(long, global = true)]
    pub fps: Option<FrameRate>,

    /// Read and write SMPTE with drop-frame numbering (29.97 and 59.94 only)
    #[arg(long, global = true)]
    pub drop_frame: bool,

    /// Allow negative values and values past 24 hours
    #[arg(long, global = true)]
    pub no_strict: bool,

    /// Settings file, e.g. {"frame_rate": "29.97", "drop_frame": true}
    #[arg(long, global = true, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub settings: TimecodeSettings,
    pub json: bool,
}

impl Config {
    /// Settings from `--config` (or defaults), with flags applied on top
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let base = match &args.config {
            Some(path) => load_settings(path)?,
            None => TimecodeSettings::default(),
        };
        Ok(Config {
            settings: apply_overrides(base, args),
            json: args.json,
        })
    }
}

/// Read a settings JSON file. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> Result<TimecodeSettings> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: TimecodeSettings = serde_json::from_str(&text)
        .wrap_err_with(|| format!("Invalid settings in {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?settings, "loaded settings");
    Ok(settings)
}

fn apply_overrides(mut settings: TimecodeSettings, args: &GlobalArgs) -> TimecodeSettings {
    if let Some(fps) = args.fps {
        settings.frame_rate = fps;
    }
    if args.drop_frame {
        settings.drop_frame = true;
    }
    if args.no_strict {
        settings.strict_mode = false;
    }
    if settings.drop_frame && !settings.frame_rate.is_drop_frame_eligible() {
        tracing::warn!(
            frame_rate = %settings.frame_rate,
            "drop-frame has no effect at this rate, using non-drop numbering"
        );
    }
    settings
}

/// Log filter for a verbosity count, used when RUST_LOG is unset
pub fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "tc=info,tc_core=warn",
        1 => "tc=debug,tc_core=debug",
        _ => "tc=trace,tc_core=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_without_flags() {
        let config = Config::from_args(&GlobalArgs::default()).unwrap();
        assert_eq!(config.settings, TimecodeSettings::default());
        assert!(!config.json);
    }

    #[test]
    fn flags_override_settings() {
        let args = GlobalArgs {
            fps: Some(FrameRate::Fps29_97),
            drop_frame: true,
            no_strict: true,
            ..GlobalArgs::default()
        };
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.settings.frame_rate, FrameRate::Fps29_97);
        assert!(config.settings.drop_frame);
        assert!(!config.settings.strict_mode);
    }

    #[test]
    fn settings_file_then_flags() {
        let path = std::env::temp_dir().join(format!("tc_cli_settings_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"frame_rate": "59.94", "drop_frame": true}"#).unwrap();

        let args = GlobalArgs {
            config: Some(path.clone()),
            fps: Some(FrameRate::Fps60),
            ..GlobalArgs::default()
        };
        let config = Config::from_args(&args).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.settings.frame_rate, FrameRate::Fps60);
        assert!(config.settings.drop_frame);
        assert!(config.settings.strict_mode);
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let args = GlobalArgs {
            config: Some(PathBuf::from("/nonexistent/tc_settings.json")),
            ..GlobalArgs::default()
        };
        assert!(Config::from_args(&args).is_err());
    }

    #[test]
    fn verbosity_filters() {
        assert_eq!(default_log_filter(0), "tc=info,tc_core=warn");
        assert_eq!(default_log_filter(3), "tc=trace,tc_core=trace");
    }
}
