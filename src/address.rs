//! Address input normalization and validation.
//!
//! Pure string handling, no I/O: everything here is exhaustively testable
//! without touching the network.

use crate::error::LookupError;

pub const MIN_ADDRESS_LEN: usize = 3;
pub const MAX_ADDRESS_LEN: usize = 200;

/// A validated, trimmed, upper-cased address string.
///
/// Length (in chars) is always within `[MIN_ADDRESS_LEN, MAX_ADDRESS_LEN]`;
/// the only way to obtain one is [`NormalizedAddress::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAddress(String);

impl NormalizedAddress {
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupError::MissingAddress);
        }

        let len = trimmed.chars().count();
        if len < MIN_ADDRESS_LEN {
            return Err(LookupError::AddressTooShort);
        }
        if len > MAX_ADDRESS_LEN {
            return Err(LookupError::AddressTooLong);
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pick the usable value from a possibly repeated query parameter: the first
/// one that is non-empty after trimming.
pub fn first_address_value<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().find(|v| !v.trim().is_empty())
}
