use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

use crate::domain::{AccountKind, AccountPolicy, Cents, CustomerTier};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Upper bounds for the in-memory registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    pub accounts: usize,
    pub customers: usize,
    pub transactions: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            accounts: 50,
            customers: 100,
            transactions: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsConfig {
    /// Percentage, 3.5 means 3.5%
    pub interest_rate: f64,
    pub minimum_balance_cents: Cents,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            interest_rate: 3.5,
            minimum_balance_cents: 50_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckingConfig {
    pub overdraft_limit_cents: Cents,
    pub monthly_fee_cents: Cents,
}

impl Default for CheckingConfig {
    fn default() -> Self {
        Self {
            overdraft_limit_cents: 100_000,
            monthly_fee_cents: 1_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PremiumConfig {
    pub minimum_opening_deposit_cents: Cents,
}

impl Default for PremiumConfig {
    fn default() -> Self {
        Self {
            minimum_opening_deposit_cents: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    pub capacity: CapacityConfig,
    pub savings: SavingsConfig,
    pub checking: CheckingConfig,
    pub premium: PremiumConfig,
}

impl BankConfig {
    /// Read and validate a JSON config file. Absent keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: BankConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacities = [
            ("capacity.accounts", self.capacity.accounts),
            ("capacity.customers", self.capacity.customers),
            ("capacity.transactions", self.capacity.transactions),
        ];
        if let Some((key, _)) = capacities.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{} must be greater than zero", key)));
        }

        if !self.savings.interest_rate.is_finite() || self.savings.interest_rate < 0.0 {
            return Err(ConfigError::Invalid(
                "savings.interest_rate must be a non-negative number".into(),
            ));
        }

        let amounts = [
            ("savings.minimum_balance_cents", self.savings.minimum_balance_cents),
            ("checking.overdraft_limit_cents", self.checking.overdraft_limit_cents),
            ("checking.monthly_fee_cents", self.checking.monthly_fee_cents),
            (
                "premium.minimum_opening_deposit_cents",
                self.premium.minimum_opening_deposit_cents,
            ),
        ];
        if let Some((key, _)) = amounts.iter().find(|(_, value)| *value < 0) {
            return Err(ConfigError::Invalid(format!("{} cannot be negative", key)));
        }

        Ok(())
    }

    pub fn policy_for(&self, kind: AccountKind) -> AccountPolicy {
        match kind {
            AccountKind::Savings => AccountPolicy::Savings {
                interest_rate: self.savings.interest_rate,
                minimum_balance: self.savings.minimum_balance_cents,
            },
            AccountKind::Checking => AccountPolicy::Checking {
                overdraft_limit: self.checking.overdraft_limit_cents,
                monthly_fee: self.checking.monthly_fee_cents,
            },
        }
    }

    /// Lowest initial deposit accepted for this combination of account and customer.
    pub fn minimum_opening_deposit(&self, kind: AccountKind, tier: CustomerTier) -> Cents {
        let account_minimum = self.policy_for(kind).minimum_opening_deposit();
        match tier {
            CustomerTier::Premium => {
                account_minimum.max(self.premium.minimum_opening_deposit_cents)
            }
            CustomerTier::Regular => account_minimum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_bank_rules() {
        let config = BankConfig::default();
        assert_eq!(config.capacity.accounts, 50);
        assert_eq!(config.capacity.customers, 100);
        assert_eq!(config.capacity.transactions, 200);
        assert_eq!(config.savings.minimum_balance_cents, 50_000);
        assert_eq!(config.checking.overdraft_limit_cents, 100_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            BankConfig::from_json(r#"{ "capacity": { "accounts": 2 }, "checking": { "monthly_fee_cents": 500 } }"#)
                .unwrap();
        assert_eq!(config.capacity.accounts, 2);
        assert_eq!(config.capacity.transactions, 200);
        assert_eq!(config.checking.monthly_fee_cents, 500);
        assert_eq!(config.checking.overdraft_limit_cents, 100_000);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = BankConfig::from_json(r#"{ "capacity": { "transactions": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("capacity.transactions"));
    }

    #[test]
    fn test_rejects_negative_amounts() {
        let err = BankConfig::from_json(r#"{ "checking": { "overdraft_limit_cents": -1 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            BankConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_minimum_opening_deposit() {
        let config = BankConfig::default();
        assert_eq!(
            config.minimum_opening_deposit(AccountKind::Savings, CustomerTier::Regular),
            50_000
        );
        assert_eq!(
            config.minimum_opening_deposit(AccountKind::Checking, CustomerTier::Regular),
            0
        );
        assert_eq!(
            config.minimum_opening_deposit(AccountKind::Checking, CustomerTier::Premium),
            1_000_000
        );
        assert_eq!(
            config.minimum_opening_deposit(AccountKind::Savings, CustomerTier::Premium),
            1_000_000
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, r#"{ "savings": { "interest_rate": 2.0 } }"#).unwrap();

        let config = BankConfig::load(&path).unwrap();
        assert_eq!(config.savings.interest_rate, 2.0);
        assert!(matches!(
            BankConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
