use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
}

impl From<&LogSettings> for LogConfig {
    fn from(settings: &LogSettings) -> Self {
        Self {
            level: settings.level.clone(),
            directory: settings.directory.as_ref().map(PathBuf::from),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum LogChannel {
    Animation,
    Desync,
    Error,
    Movement,
}

impl LogChannel {
    pub const fn target(self) -> &'static str {
        match self {
            LogChannel::Animation => ANIMATION_TARGET,
            LogChannel::Desync => DESYNC_TARGET,
            LogChannel::Error => ERROR_TARGET,
            LogChannel::Movement => MOVEMENT_TARGET,
        }
    }
}

const ANIMATION_TARGET: &str = "motion::animation";
const DESYNC_TARGET: &str = "motion::desync";
const ERROR_TARGET: &str = "motion::error";
const MOVEMENT_TARGET: &str = "motion::movement";
const LOG_FILE_NAME: &str = "motion.log";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber once. Later calls are no-ops so hosts and
/// tests can both call it freely.
pub fn init(config: &LogConfig) -> Result<(), String> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }
    let level = if config.level.trim().is_empty() {
        "info"
    } else {
        config.level.trim()
    };
    let filter = EnvFilter::try_new(level)
        .map_err(|err| format!("invalid log level '{}': {}", level, err))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.directory.as_ref() {
        Some(directory) => {
            std::fs::create_dir_all(directory)
                .map_err(|err| format!("log directory create failed: {}", err))?;
            let path = directory.join(LOG_FILE_NAME);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|err| format!("open log {} failed: {}", path.display(), err))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|err| format!("log system already initialized: {}", err))?;
    INITIALIZED.get_or_init(|| ());
    Ok(())
}

pub fn log_movement(message: &str) {
    tracing::debug!(target: LogChannel::Movement.target(), "{}", message);
}

pub fn log_desync(message: &str) {
    tracing::warn!(target: LogChannel::Desync.target(), "{}", message);
}

pub fn log_animation(message: &str) {
    tracing::trace!(target: LogChannel::Animation.target(), "{}", message);
}

pub fn log_error(message: &str) {
    tracing::error!(target: LogChannel::Error.target(), "{}", message);
}
