use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

sequential_id!(
    /// Account number such as `ACC001`.
    AccountNumber
);
sequential_id!(
    /// Customer identifier such as `CUS001`.
    CustomerId
);
sequential_id!(
    /// Transaction identifier such as `TXN001`.
    TransactionId
);

/// Monotonic generator of prefixed, zero-padded identifiers.
///
/// Each registry owns one sequence, so two registries never share counters
/// and tests can start from a known state.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: &'static str,
    width: usize,
    issued: u64,
}

impl IdSequence {
    pub const DEFAULT_WIDTH: usize = 3;

    pub fn new(prefix: &'static str, width: usize) -> Self {
        Self {
            prefix,
            width,
            issued: 0,
        }
    }

    pub fn accounts() -> Self {
        Self::new("ACC", Self::DEFAULT_WIDTH)
    }

    pub fn customers() -> Self {
        Self::new("CUS", Self::DEFAULT_WIDTH)
    }

    pub fn transactions() -> Self {
        Self::new("TXN", Self::DEFAULT_WIDTH)
    }

    /// The identifier the next call to `next_value` will return.
    pub fn peek(&self) -> String {
        self.format(self.issued + 1)
    }

    pub fn next_value(&mut self) -> String {
        self.issued += 1;
        self.format(self.issued)
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    fn format(&self, n: u64) -> String {
        format!("{}{:0width$}", self.prefix, n, width = self.width)
    }
}
