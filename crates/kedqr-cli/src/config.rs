//! CLI configuration, parsed from an optional TOML file + environment variable overrides.
//!
//! Priority: environment variables > config file > defaults.

use anyhow::{Context, Result};
use qrcode::EcLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KedqrConfig {
    /// Expected secret key shape
    #[serde(default)]
    pub key: KeySection,

    /// PIN policy
    #[serde(default)]
    pub pin: PinSection,

    /// QR rendering
    #[serde(default)]
    pub qr: QrSection,

    /// Logging
    #[serde(default)]
    pub log: LogSection,
}

/// Expected secret key shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySection {
    /// Bech32 hrp of the secret key (default: ed25519 extended secret key)
    #[serde(default = "default_key_hrp")]
    pub hrp: String,

    /// Raw key length in bytes
    #[serde(default = "default_key_length")]
    pub length: usize,
}

impl Default for KeySection {
    fn default() -> Self {
        Self {
            hrp: default_key_hrp(),
            length: default_key_length(),
        }
    }
}

/// PIN policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinSection {
    /// Number of digits (Catalyst uses 4)
    #[serde(default = "default_pin_length")]
    pub length: usize,
}

impl Default for PinSection {
    fn default() -> Self {
        Self {
            length: default_pin_length(),
        }
    }
}

/// QR rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrSection {
    /// Error correction level: L, M, Q or H
    #[serde(default = "default_ec_level")]
    pub ec_level: String,
}

impl Default for QrSection {
    fn default() -> Self {
        Self {
            ec_level: default_ec_level(),
        }
    }
}

/// Logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSection {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_key_hrp() -> String {
    "ed25519e_sk".to_string()
}

fn default_key_length() -> usize {
    64
}

fn default_pin_length() -> usize {
    4
}

fn default_ec_level() -> String {
    "M".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ============================================================================
// Loading & environment override
// ============================================================================

impl KedqrConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: KedqrConfig =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise start from defaults, then apply
    /// environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config
            .validate()
            .context("Configuration validation failed")?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `KEDQR_KEY_HRP`
    /// - `KEDQR_KEY_LENGTH`
    /// - `KEDQR_PIN_LENGTH`
    /// - `KEDQR_QR_EC_LEVEL`
    /// - `KEDQR_LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("KEDQR_KEY_HRP") {
            self.key.hrp = v;
        }
        if let Some(v) = var("KEDQR_KEY_LENGTH") {
            if let Ok(length) = v.parse::<usize>() {
                self.key.length = length;
            }
        }
        if let Some(v) = var("KEDQR_PIN_LENGTH") {
            if let Ok(length) = v.parse::<usize>() {
                self.pin.length = length;
            }
        }
        if let Some(v) = var("KEDQR_QR_EC_LEVEL") {
            self.qr.ec_level = v;
        }
        if let Some(v) = var("KEDQR_LOG_LEVEL") {
            self.log.level = v;
        }
    }

    /// QR error correction level
    pub fn ec_level(&self) -> Result<EcLevel> {
        match self.qr.ec_level.to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            other => anyhow::bail!("qr.ec_level must be one of L, M, Q, H (got {:?})", other),
        }
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (1..=83).contains(&self.key.hrp.len()),
            "key.hrp must be 1-83 characters"
        );
        anyhow::ensure!(self.key.length > 0, "key.length must be > 0");
        anyhow::ensure!(
            (1..=64).contains(&self.pin.length),
            "pin.length must be between 1 and 64"
        );
        self.ec_level()?;
        anyhow::ensure!(
            self.log.level.parse::<log::LevelFilter>().is_ok(),
            "log.level must be one of off, error, warn, info, debug, trace"
        );
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
