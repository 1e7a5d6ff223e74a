use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid motion config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid motion config value: {0}")]
    Invalid(String),
}

/// Timing constants, bounds and the profile switches the movement and
/// animation code reads. Every field has a default so a profile file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub always_run: bool,
    pub always_run_unless_hidden: bool,
    pub max_step_count: usize,
    pub max_unaccepted_steps: u32,
    pub deny_blocks_walking: bool,
    pub paralysis_blocks_walk: bool,
    pub turn_delay_ms: u64,
    pub step_delay_walk_ms: u64,
    pub step_delay_run_ms: u64,
    pub step_delay_mount_walk_ms: u64,
    pub step_delay_mount_run_ms: u64,
    pub character_animation_delay_ms: u64,
    pub walking_delay_ms: u64,
    pub player_walking_delay_ms: u64,
    pub frame_slack_ms: u64,
    pub fall_feedback_z: i16,
    pub no_rotation_z: i16,
    pub teleport_z_threshold: i16,
    pub idle_base_ms: u64,
    pub idle_jitter_ms: u64,
    pub fast_walk_stack_size: usize,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub directory: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            always_run: false,
            always_run_unless_hidden: false,
            max_step_count: 5,
            max_unaccepted_steps: 8,
            deny_blocks_walking: true,
            paralysis_blocks_walk: true,
            turn_delay_ms: 100,
            step_delay_walk_ms: 400,
            step_delay_run_ms: 200,
            step_delay_mount_walk_ms: 200,
            step_delay_mount_run_ms: 100,
            character_animation_delay_ms: 80,
            walking_delay_ms: 135,
            player_walking_delay_ms: 150,
            frame_slack_ms: 16,
            fall_feedback_z: 22,
            no_rotation_z: 11,
            teleport_z_threshold: 20,
            idle_base_ms: 30_000,
            idle_jitter_ms: 30_000,
            fast_walk_stack_size: 5,
            log: LogSettings::default(),
        }
    }
}

impl MotionConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: MotionConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// Applies `MOTION_ALWAYS_RUN` and `MOTION_LOG_LEVEL` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = env_value("MOTION_ALWAYS_RUN") {
            match parse_bool(&value) {
                Some(parsed) => self.always_run = parsed,
                None => crate::telemetry::logging::log_error(&format!(
                    "invalid MOTION_ALWAYS_RUN '{}', keeping {}",
                    value, self.always_run
                )),
            }
        }
        if let Some(value) = env_value("MOTION_LOG_LEVEL") {
            self.log.level = value;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_step_count == 0 {
            return Err(ConfigError::Invalid("max_step_count must be at least 1".into()));
        }
        if self.character_animation_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "character_animation_delay_ms must be non-zero".into(),
            ));
        }
        if self.fast_walk_stack_size == 0 {
            return Err(ConfigError::Invalid(
                "fast_walk_stack_size must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("step_delay_walk_ms", self.step_delay_walk_ms),
            ("step_delay_run_ms", self.step_delay_run_ms),
            ("step_delay_mount_walk_ms", self.step_delay_mount_walk_ms),
            ("step_delay_mount_run_ms", self.step_delay_mount_run_ms),
        ] {
            if value <= self.frame_slack_ms {
                return Err(ConfigError::Invalid(format!(
                    "{name} ({value}) must exceed frame_slack_ms ({})",
                    self.frame_slack_ms
                )));
            }
        }
        Ok(())
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
