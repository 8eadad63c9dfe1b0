use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::CustomerId;

pub const MAX_CUSTOMER_AGE: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerTier {
    /// Standard banking services
    Regular,
    /// Enhanced benefits: fees waived, higher minimum opening deposit
    Premium,
}

impl CustomerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Regular => "Regular",
            CustomerTier::Premium => "Premium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Some(CustomerTier::Regular),
            "premium" => Some(CustomerTier::Premium),
            _ => None,
        }
    }

    pub fn waives_monthly_fee(&self) -> bool {
        matches!(self, CustomerTier::Premium)
    }
}

impl std::fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Customer details as supplied by the caller, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub address: String,
    pub tier: CustomerTier,
}

impl NewCustomer {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        contact: impl Into<String>,
        address: impl Into<String>,
        tier: CustomerTier,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            contact: contact.into(),
            address: address.into(),
            tier,
        }
    }

    /// Returns the first problem found with the supplied details, if any.
    pub fn problem(&self) -> Option<String> {
        let blank = [
            ("name", &self.name),
            ("contact", &self.contact),
            ("address", &self.address),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        if let Some((field, _)) = blank {
            return Some(format!("customer {} cannot be empty", field));
        }
        if self.age > MAX_CUSTOMER_AGE {
            return Some(format!(
                "customer age must be between 0 and {}",
                MAX_CUSTOMER_AGE
            ));
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub address: String,
    pub tier: CustomerTier,
    pub registered_at: NaiveDateTime,
}

impl Customer {
    pub fn new(id: CustomerId, details: NewCustomer, registered_at: NaiveDateTime) -> Self {
        Self {
            id,
            name: details.name.trim().to_string(),
            age: details.age,
            contact: details.contact.trim().to_string(),
            address: details.address.trim().to_string(),
            tier: details.tier,
            registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_roundtrip() {
        for tier in [CustomerTier::Regular, CustomerTier::Premium] {
            assert_eq!(CustomerTier::from_str(tier.as_str()), Some(tier));
        }
        assert_eq!(CustomerTier::from_str("PREMIUM"), Some(CustomerTier::Premium));
        assert_eq!(CustomerTier::from_str("gold"), None);
    }

    #[test]
    fn test_only_premium_waives_fees() {
        assert!(CustomerTier::Premium.waives_monthly_fee());
        assert!(!CustomerTier::Regular.waives_monthly_fee());
    }

    #[test]
    fn test_new_customer_problems() {
        let ok = NewCustomer::new("Alice", 28, "1112223333", "789 Oak St", CustomerTier::Regular);
        assert_eq!(ok.problem(), None);

        let blank = NewCustomer::new("  ", 28, "111", "Oak St", CustomerTier::Regular);
        assert_eq!(blank.problem().as_deref(), Some("customer name cannot be empty"));

        let too_old = NewCustomer::new("Bob", 151, "111", "Oak St", CustomerTier::Regular);
        assert!(too_old.problem().is_some());
    }
}
