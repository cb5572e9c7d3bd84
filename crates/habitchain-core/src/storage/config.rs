//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Reward tuning (claim multiplier, completion multiplier range)
//! - The mock wallet handed out on connect
//! - Whether sessions start with demo data
//!
//! Configuration is stored at `~/.config/habitchain/config.toml`.
//! Habit state itself is never written to disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::rewards::{MultiplierRange, DEFAULT_CLAIM_MULTIPLIER};
use crate::store::StoreSettings;
use crate::wallet::MockWalletProfile;

/// Reward tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_claim_multiplier")]
    pub claim_multiplier: f64,
    #[serde(default = "default_multiplier_min")]
    pub multiplier_min: f64,
    #[serde(default = "default_multiplier_max")]
    pub multiplier_max: f64,
}

/// Mock wallet configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default = "default_address")]
    pub mock_address: String,
    #[serde(default = "default_xlpr")]
    pub xlpr_balance: f64,
    #[serde(default = "default_xrp")]
    pub xrp_balance: f64,
    #[serde(default = "default_btc")]
    pub btc_balance: f64,
    #[serde(default = "default_eth")]
    pub eth_balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Load the sample habits when a session starts.
    #[serde(default)]
    pub seed_on_start: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitchain/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

fn default_claim_multiplier() -> f64 {
    DEFAULT_CLAIM_MULTIPLIER
}
fn default_multiplier_min() -> f64 {
    MultiplierRange::default().min()
}
fn default_multiplier_max() -> f64 {
    MultiplierRange::default().max()
}
fn default_address() -> String {
    MockWalletProfile::default().address
}
fn default_xlpr() -> f64 {
    MockWalletProfile::default().xlpr_balance
}
fn default_xrp() -> f64 {
    MockWalletProfile::default().xrp_balance
}
fn default_btc() -> f64 {
    MockWalletProfile::default().btc_balance
}
fn default_eth() -> f64 {
    MockWalletProfile::default().eth_balance
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            claim_multiplier: default_claim_multiplier(),
            multiplier_min: default_multiplier_min(),
            multiplier_max: default_multiplier_max(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        let profile = MockWalletProfile::default();
        Self {
            mock_address: profile.address,
            xlpr_balance: profile.xlpr_balance,
            xrp_balance: profile.xrp_balance,
            btc_balance: profile.btc_balance,
            eth_balance: profile.eth_balance,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<f64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("'{value}' is not a finite number")))?
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without touching disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// into the existing type, or the result fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values the store cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rewards.claim_multiplier.is_finite() || self.rewards.claim_multiplier <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "rewards.claim_multiplier".into(),
                message: "must be a positive number".into(),
            });
        }
        self.multiplier_range()?;
        Ok(())
    }

    /// Range completion multipliers are drawn from.
    pub fn multiplier_range(&self) -> Result<MultiplierRange, ConfigError> {
        MultiplierRange::new(self.rewards.multiplier_min, self.rewards.multiplier_max).map_err(|e| {
            ConfigError::InvalidValue {
                key: "rewards.multiplier_min".into(),
                message: e.to_string(),
            }
        })
    }

    pub fn store_settings(&self) -> Result<StoreSettings, ConfigError> {
        Ok(StoreSettings {
            claim_multiplier: self.rewards.claim_multiplier,
            multiplier_range: self.multiplier_range()?,
            wallet_profile: MockWalletProfile {
                address: self.wallet.mock_address.clone(),
                xlpr_balance: self.wallet.xlpr_balance,
                xrp_balance: self.wallet.xrp_balance,
                btc_balance: self.wallet.btc_balance,
                eth_balance: self.wallet.eth_balance,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.rewards.claim_multiplier, 1.23);
        assert!(!parsed.demo.seed_on_start);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[rewards]\nclaim_multiplier = 2.0\n").unwrap();
        assert_eq!(parsed.rewards.claim_multiplier, 2.0);
        assert_eq!(parsed.rewards.multiplier_max, 1.5);
        assert_eq!(parsed.wallet.xlpr_balance, 127.5);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("rewards.claim_multiplier").as_deref(), Some("1.23"));
        assert_eq!(cfg.get("demo.seed_on_start").as_deref(), Some("false"));
        assert_eq!(
            cfg.get("wallet.mock_address").as_deref(),
            Some("0x742d35Cc4c2B2B5D4Fd2F1E2C02E7B3f8F8F8F8F")
        );
        assert!(cfg.get("wallet.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("demo.seed_on_start", "true").unwrap();
        cfg.set("rewards.claim_multiplier", "1.5").unwrap();
        cfg.set("wallet.mock_address", "0xabc").unwrap();
        assert!(cfg.demo.seed_on_start);
        assert_eq!(cfg.rewards.claim_multiplier, 1.5);
        assert_eq!(cfg.wallet.mock_address, "0xabc");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("wallet.nonexistent", "1").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("demo.seed_on_start", "sometimes").is_err());
        assert!(cfg.set("rewards.claim_multiplier", "lots").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_inverted_multiplier_range() {
        let mut cfg = Config::default();
        assert!(cfg.set("rewards.multiplier_min", "2.0").is_err());
        assert_eq!(cfg.rewards.multiplier_min, 1.0);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("wallet.xlpr_balance", "10").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.wallet.xlpr_balance, 10.0);
        assert_eq!(loaded.store_settings().unwrap().wallet_profile.xlpr_balance, 10.0);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "rewards = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
