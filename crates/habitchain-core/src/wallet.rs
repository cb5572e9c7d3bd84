//! Mock wallet state.
//!
//! The wallet is either fully connected (address plus balances) or fully
//! disconnected (no address, all balances zero). Only the XLPR balance moves
//! after connection; it receives claimed rewards.

use serde::{Deserialize, Serialize};

/// Address and opening balances handed out on connect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockWalletProfile {
    pub address: String,
    pub xlpr_balance: f64,
    pub xrp_balance: f64,
    pub btc_balance: f64,
    pub eth_balance: f64,
}

impl Default for MockWalletProfile {
    fn default() -> Self {
        Self {
            address: "0x742d35Cc4c2B2B5D4Fd2F1E2C02E7B3f8F8F8F8F".into(),
            xlpr_balance: 127.5,
            xrp_balance: 1250.0,
            btc_balance: 0.0234,
            eth_balance: 2.4567,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletState {
    pub connected: bool,
    pub address: Option<String>,
    /// Reward token balance
    pub xlpr_balance: f64,
    pub xrp_balance: f64,
    pub btc_balance: f64,
    pub eth_balance: f64,
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            address: None,
            xlpr_balance: 0.0,
            xrp_balance: 0.0,
            btc_balance: 0.0,
            eth_balance: 0.0,
        }
    }

    pub fn connected(profile: &MockWalletProfile) -> Self {
        Self {
            connected: true,
            address: Some(profile.address.clone()),
            xlpr_balance: profile.xlpr_balance,
            xrp_balance: profile.xrp_balance,
            btc_balance: profile.btc_balance,
            eth_balance: profile.eth_balance,
        }
    }

    /// Credit claimed rewards. Ignored while disconnected.
    pub fn credit_rewards(&mut self, amount: f64) {
        if self.connected {
            self.xlpr_balance += amount;
        }
    }

    /// Shortened address for display, e.g. `0x742d...F8F8`.
    pub fn short_address(&self) -> Option<String> {
        let address = self.address.as_deref()?;
        let chars: Vec<char> = address.chars().collect();
        if chars.len() <= 10 {
            return Some(address.to_string());
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        Some(format!("{head}...{tail}"))
    }
}

impl Default for WalletState {
    fn default() -> Self {
        Self::disconnected()
    }
}
