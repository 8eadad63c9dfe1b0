use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;

use super::{format_money, percent_of, AccountNumber, Cents, Customer, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Savings,
    Checking,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Checking => "Checking",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Some(AccountKind::Savings),
            "checking" => Some(AccountKind::Checking),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Active,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
        }
    }
}

/// Which withdrawal boundary a rejected withdrawal ran into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyBreach {
    MinimumBalance {
        balance: Cents,
        requested: Cents,
        minimum_balance: Cents,
    },
    OverdraftLimit {
        balance: Cents,
        requested: Cents,
        overdraft_limit: Cents,
    },
}

impl std::fmt::Display for PolicyBreach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyBreach::MinimumBalance {
                balance,
                requested,
                minimum_balance,
            } => write!(
                f,
                "Minimum balance requirement not met: withdrawing {} from {} would leave less than {}",
                format_money(*requested),
                format_money(*balance),
                format_money(*minimum_balance)
            ),
            PolicyBreach::OverdraftLimit {
                balance,
                requested,
                overdraft_limit,
            } => write!(
                f,
                "Overdraft limit exceeded: withdrawing {} from {} would go past the {} overdraft limit",
                format_money(*requested),
                format_money(*balance),
                format_money(*overdraft_limit)
            ),
        }
    }
}

fn money(cents: &Cents) -> String {
    format_money(*cents)
}

/// Failures of the validate-then-apply transaction pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Invalid amount: {}. Amount must be positive", money(.0))]
    InvalidAmount(Cents),

    #[error("Insufficient funds. {0}")]
    InsufficientFunds(PolicyBreach),

    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),

    #[error("Amount out of range: {} would take the balance past the supported limit", money(.0))]
    AmountOutOfRange(Cents),
}

/// Variant parameters together with the withdrawal rule each variant enforces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AccountPolicy {
    Savings {
        /// Percentage, e.g. 3.5 for 3.5%
        interest_rate: f64,
        minimum_balance: Cents,
    },
    Checking {
        overdraft_limit: Cents,
        monthly_fee: Cents,
    },
}

impl AccountPolicy {
    pub fn kind(&self) -> AccountKind {
        match self {
            AccountPolicy::Savings { .. } => AccountKind::Savings,
            AccountPolicy::Checking { .. } => AccountKind::Checking,
        }
    }

    /// The single authoritative boundary rule per variant. Both boundaries are inclusive.
    ///
    /// A difference too large to represent is always past the boundary.
    pub fn check_withdrawal(&self, balance: Cents, amount: Cents) -> Result<(), PolicyBreach> {
        match *self {
            AccountPolicy::Savings {
                minimum_balance, ..
            } => {
                let remaining = balance.checked_sub(amount);
                if remaining.is_none_or(|left| left < minimum_balance) {
                    return Err(PolicyBreach::MinimumBalance {
                        balance,
                        requested: amount,
                        minimum_balance,
                    });
                }
            }
            AccountPolicy::Checking {
                overdraft_limit, ..
            } => {
                let overdrawn = amount.checked_sub(balance);
                if overdrawn.is_none_or(|over| over > overdraft_limit) {
                    return Err(PolicyBreach::OverdraftLimit {
                        balance,
                        requested: amount,
                        overdraft_limit,
                    });
                }
            }
        }
        Ok(())
    }

    /// Lowest initial deposit the variant itself demands.
    pub fn minimum_opening_deposit(&self) -> Cents {
        match *self {
            AccountPolicy::Savings {
                minimum_balance, ..
            } => minimum_balance,
            AccountPolicy::Checking { .. } => 0,
        }
    }
}

/// Variant-specific fields exposed for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PolicyDetails {
    Savings {
        interest_rate: f64,
        minimum_balance: Cents,
        projected_interest: Cents,
    },
    Checking {
        overdraft_limit: Cents,
        monthly_fee: Cents,
        fee_waived: bool,
    },
}

/// Result of a manual monthly fee run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeOutcome {
    Charged { fee: Cents, balance_after: Cents },
    /// Premium customers do not pay monthly fees
    Waived,
    /// Balance did not exceed the fee
    Skipped,
    /// Savings accounts carry no monthly fee
    NotApplicable,
}

#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    customer: Rc<Customer>,
    balance: Cents,
    status: AccountStatus,
    policy: AccountPolicy,
}

impl Account {
    /// Open an account, crediting the initial deposit without validation.
    pub fn open(
        number: AccountNumber,
        customer: Rc<Customer>,
        policy: AccountPolicy,
        initial_deposit: Cents,
    ) -> Self {
        Self {
            number,
            customer,
            balance: initial_deposit,
            status: AccountStatus::Active,
            policy,
        }
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn policy(&self) -> &AccountPolicy {
        &self.policy
    }

    pub fn kind(&self) -> AccountKind {
        self.policy.kind()
    }

    pub fn account_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Credit without the positivity check, returning the new balance.
    /// Validation belongs to `process_transaction`.
    pub fn deposit(&mut self, amount: Cents) -> Result<Cents, TransactionError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(TransactionError::AmountOutOfRange(amount))?;
        Ok(self.balance)
    }

    /// Debit under the variant's policy, returning the new balance.
    /// A breach leaves the balance untouched.
    pub fn withdraw(&mut self, amount: Cents) -> Result<Cents, TransactionError> {
        self.policy
            .check_withdrawal(self.balance, amount)
            .map_err(TransactionError::InsufficientFunds)?;
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(TransactionError::AmountOutOfRange(amount))?;
        Ok(self.balance)
    }

    pub fn validate_deposit(&self, amount: Cents) -> Result<(), TransactionError> {
        if amount <= 0 {
            return Err(TransactionError::InvalidAmount(amount));
        }
        if self.balance.checked_add(amount).is_none() {
            return Err(TransactionError::AmountOutOfRange(amount));
        }
        Ok(())
    }

    pub fn validate_withdrawal(&self, amount: Cents) -> Result<(), TransactionError> {
        if amount <= 0 {
            return Err(TransactionError::InvalidAmount(amount));
        }
        self.policy
            .check_withdrawal(self.balance, amount)
            .map_err(TransactionError::InsufficientFunds)
    }

    pub fn validate_amount(&self, amount: Cents, kind: TransactionType) -> Result<(), TransactionError> {
        match kind {
            TransactionType::Deposit => self.validate_deposit(amount),
            TransactionType::Withdrawal => self.validate_withdrawal(amount),
        }
    }

    /// Balance the account would hold if `kind` of `amount` were applied now.
    pub fn projected_balance(&self, amount: Cents, kind: TransactionType) -> Result<Cents, TransactionError> {
        kind.sign()
            .checked_mul(amount)
            .and_then(|delta| self.balance.checked_add(delta))
            .ok_or(TransactionError::AmountOutOfRange(amount))
    }

    /// Validate then apply a typed transaction, returning the new balance.
    pub fn apply(&mut self, amount: Cents, kind: TransactionType) -> Result<Cents, TransactionError> {
        self.validate_amount(amount, kind)?;
        match kind {
            TransactionType::Deposit => self.deposit(amount),
            TransactionType::Withdrawal => self.withdraw(amount),
        }
    }

    /// Validate then apply a transaction named by a case-insensitive label.
    pub fn process_transaction(&mut self, amount: Cents, type_label: &str) -> Result<Cents, TransactionError> {
        let kind = TransactionType::from_str(type_label)
            .ok_or_else(|| TransactionError::InvalidTransactionType(type_label.to_string()))?;
        self.apply(amount, kind)
    }

    /// Interest at the savings rate on the current balance. Informational only.
    pub fn calculate_interest(&self) -> Option<Cents> {
        match self.policy {
            AccountPolicy::Savings { interest_rate, .. } => {
                Some(percent_of(self.balance, interest_rate))
            }
            AccountPolicy::Checking { .. } => None,
        }
    }

    pub fn apply_monthly_fee(&mut self) -> FeeOutcome {
        let AccountPolicy::Checking { monthly_fee, .. } = self.policy else {
            return FeeOutcome::NotApplicable;
        };
        if self.customer.tier.waives_monthly_fee() {
            return FeeOutcome::Waived;
        }
        if self.balance <= monthly_fee {
            return FeeOutcome::Skipped;
        }
        self.balance -= monthly_fee;
        FeeOutcome::Charged {
            fee: monthly_fee,
            balance_after: self.balance,
        }
    }

    pub fn details(&self) -> PolicyDetails {
        match self.policy {
            AccountPolicy::Savings {
                interest_rate,
                minimum_balance,
            } => PolicyDetails::Savings {
                interest_rate,
                minimum_balance,
                projected_interest: percent_of(self.balance, interest_rate),
            },
            AccountPolicy::Checking {
                overdraft_limit,
                monthly_fee,
            } => PolicyDetails::Checking {
                overdraft_limit,
                monthly_fee,
                fee_waived: self.customer.tier.waives_monthly_fee(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::{CustomerId, CustomerTier, NewCustomer};

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn customer(tier: CustomerTier) -> Rc<Customer> {
        Rc::new(Customer::new(
            CustomerId::from("CUS001"),
            NewCustomer::new("John Doe", 30, "1234567890", "123 Main St", tier),
            at(),
        ))
    }

    fn savings(initial: Cents) -> Account {
        Account::open(
            AccountNumber::from("ACC001"),
            customer(CustomerTier::Regular),
            AccountPolicy::Savings {
                interest_rate: 3.5,
                minimum_balance: 50000,
            },
            initial,
        )
    }

    fn checking_for(initial: Cents, tier: CustomerTier) -> Account {
        Account::open(
            AccountNumber::from("ACC002"),
            customer(tier),
            AccountPolicy::Checking {
                overdraft_limit: 100000,
                monthly_fee: 1000,
            },
            initial,
        )
    }

    fn checking(initial: Cents) -> Account {
        checking_for(initial, CustomerTier::Regular)
    }

    #[test]
    fn test_open_credits_initial_deposit() {
        let account = savings(100000);
        assert_eq!(account.balance(), 100000);
        assert_eq!(account.status(), AccountStatus::Active);
        assert_eq!(account.account_type(), "Savings");
    }

    #[test]
    fn test_savings_deposit() {
        let mut account = savings(100000);
        account.process_transaction(50000, "Deposit").unwrap();
        assert_eq!(account.balance(), 150000);
    }

    #[test]
    fn test_savings_withdrawal_success() {
        let mut account = savings(100000);
        assert_eq!(account.process_transaction(20000, "Withdrawal"), Ok(80000));
    }

    #[test]
    fn test_savings_rejects_below_minimum() {
        let mut account = savings(100000);
        let err = account.process_transaction(60000, "Withdrawal").unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InsufficientFunds(PolicyBreach::MinimumBalance { .. })
        ));
        assert!(err.to_string().contains("Minimum balance requirement not met"));
        assert_eq!(account.balance(), 100000);
    }

    #[test]
    fn test_savings_allows_exact_minimum() {
        let mut account = savings(100000);
        account.process_transaction(50000, "withdrawal").unwrap();
        assert_eq!(account.balance(), 50000);
    }

    #[test]
    fn test_checking_overdraft_success() {
        let mut account = checking(10000);
        account.process_transaction(50000, "Withdrawal").unwrap();
        assert_eq!(account.balance(), -40000);
    }

    #[test]
    fn test_checking_allows_exact_overdraft_limit() {
        let mut account = checking(10000);
        account.process_transaction(110000, "Withdrawal").unwrap();
        assert_eq!(account.balance(), -100000);

        let err = account.process_transaction(100, "Withdrawal").unwrap_err();
        assert!(err.to_string().contains("Overdraft limit exceeded"));
        assert_eq!(account.balance(), -100000);
    }

    #[test]
    fn test_checking_rejects_past_overdraft_limit() {
        let mut account = checking(10000);
        let err = account.process_transaction(120000, "Withdrawal").unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InsufficientFunds(PolicyBreach::OverdraftLimit { .. })
        ));
        assert_eq!(account.balance(), 10000);
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut account = savings(100000);
        assert_eq!(
            account.process_transaction(-5000, "Deposit"),
            Err(TransactionError::InvalidAmount(-5000))
        );
        assert_eq!(
            account.process_transaction(0, "Withdrawal"),
            Err(TransactionError::InvalidAmount(0))
        );
        assert_eq!(account.balance(), 100000);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut account = checking(10000);
        assert_eq!(
            account.process_transaction(100, "Transfer"),
            Err(TransactionError::InvalidTransactionType("Transfer".into()))
        );
        assert_eq!(account.balance(), 10000);
    }

    #[test]
    fn test_deposit_is_unconstrained() {
        let mut account = checking(0);
        assert_eq!(account.deposit(-500), Ok(-500));
        assert_eq!(account.balance(), -500);
    }

    #[test]
    fn test_withdraw_enforces_policy_directly() {
        let mut account = savings(60000);
        assert!(account.withdraw(20000).is_err());
        assert_eq!(account.withdraw(10000), Ok(50000));
    }

    #[test]
    fn test_huge_withdrawal_from_overdrawn_checking_rejected() {
        let mut account = checking(10000);
        account.process_transaction(110000, "Withdrawal").unwrap();

        let err = account.process_transaction(Cents::MAX, "Withdrawal").unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InsufficientFunds(PolicyBreach::OverdraftLimit { .. })
        ));
        assert_eq!(account.balance(), -100000);
    }

    #[test]
    fn test_huge_withdrawal_from_savings_rejected() {
        let mut account = savings(100000);
        let err = account.process_transaction(Cents::MAX, "Withdrawal").unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InsufficientFunds(PolicyBreach::MinimumBalance { .. })
        ));
        assert_eq!(account.balance(), 100000);
    }

    #[test]
    fn test_deposit_past_range_rejected() {
        let mut account = checking(10000);
        assert_eq!(
            account.process_transaction(Cents::MAX, "Deposit"),
            Err(TransactionError::AmountOutOfRange(Cents::MAX))
        );
        assert_eq!(account.balance(), 10000);
        assert_eq!(
            account.projected_balance(Cents::MAX, TransactionType::Deposit),
            Err(TransactionError::AmountOutOfRange(Cents::MAX))
        );
        assert_eq!(
            account.projected_balance(2500, TransactionType::Withdrawal),
            Ok(7500)
        );
    }

    #[test]
    fn test_calculate_interest() {
        assert_eq!(savings(100000).calculate_interest(), Some(3500));
        assert_eq!(checking(100000).calculate_interest(), None);
    }

    #[test]
    fn test_monthly_fee() {
        let mut account = checking(5000);
        assert_eq!(
            account.apply_monthly_fee(),
            FeeOutcome::Charged {
                fee: 1000,
                balance_after: 4000
            }
        );

        let mut exact = checking(1000);
        assert_eq!(exact.apply_monthly_fee(), FeeOutcome::Skipped);
        assert_eq!(exact.balance(), 1000);

        let mut premium = checking_for(5000, CustomerTier::Premium);
        assert_eq!(premium.apply_monthly_fee(), FeeOutcome::Waived);
        assert_eq!(premium.balance(), 5000);

        assert_eq!(savings(100000).apply_monthly_fee(), FeeOutcome::NotApplicable);
    }

    #[test]
    fn test_details_expose_variant_fields() {
        match savings(100000).details() {
            PolicyDetails::Savings {
                interest_rate,
                minimum_balance,
                projected_interest,
            } => {
                assert_eq!(interest_rate, 3.5);
                assert_eq!(minimum_balance, 50000);
                assert_eq!(projected_interest, 3500);
            }
            other => panic!("unexpected details: {:?}", other),
        }
        assert!(matches!(
            checking(0).details(),
            PolicyDetails::Checking {
                overdraft_limit: 100000,
                fee_waived: false,
                ..
            }
        ));
    }
}
