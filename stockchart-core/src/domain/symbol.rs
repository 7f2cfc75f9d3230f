use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::data::DataError;

const MAX_SYMBOL_LEN: usize = 15;

/// Upper-cased ticker symbol as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim, upper-case and validate user input.
    pub fn parse(input: &str) -> Result<Self, DataError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(DataError::InvalidSymbol {
                input: input.to_string(),
                reason: "symbol is empty",
            });
        }
        if normalized.chars().count() > MAX_SYMBOL_LEN {
            return Err(DataError::InvalidSymbol {
                input: input.to_string(),
                reason: "symbol is too long",
            });
        }
        let valid = normalized
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '-');
        if !valid {
            return Err(DataError::InvalidSymbol {
                input: input.to_string(),
                reason: "only letters, digits, '.' and '-' are allowed",
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
