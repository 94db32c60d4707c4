use std::fmt;
use std::str::FromStr;

/// Number of digits in a valid access code.
pub const CODE_LEN: usize = 8;

/// An access code that passed validation: exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessCode(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{token}' is not a valid {CODE_LEN}-digit number")]
pub struct CodeError {
    pub token: String,
}

impl AccessCode {
    pub fn parse(token: &str) -> Result<Self, CodeError> {
        if token.len() == CODE_LEN && token.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(token.to_string()))
        } else {
            Err(CodeError {
                token: token.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccessCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccessCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits free-form input on commas and any whitespace, dropping empty tokens.
pub fn split_codes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedCode {
    Valid(AccessCode),
    Invalid(String),
}

/// Sorted, de-duplicated tokens in processing order.
///
/// Invalid tokens keep their slot so that separators between blocks line up
/// with the sorted token list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchPlan {
    entries: Vec<PlannedCode>,
}

impl BatchPlan {
    pub fn entries(&self) -> &[PlannedCode] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the processing plan: tokens are trimmed, de-duplicated and sorted
/// ascending, then each is validated.
pub fn plan_batch<S: AsRef<str>>(tokens: &[S]) -> BatchPlan {
    let mut unique: Vec<String> = tokens
        .iter()
        .map(|token| token.as_ref().trim().to_string())
        .collect();
    unique.sort();
    unique.dedup();

    let entries = unique
        .into_iter()
        .map(|token| match AccessCode::parse(&token) {
            Ok(code) => PlannedCode::Valid(code),
            Err(_) => PlannedCode::Invalid(token),
        })
        .collect();

    BatchPlan { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_eight_digits() {
        assert!(AccessCode::parse("12345678").is_ok());
        assert!(AccessCode::parse("1234567").is_err());
        assert!(AccessCode::parse("123456789").is_err());
        assert!(AccessCode::parse("1234567a").is_err());
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Full-width digits are numeric but not ASCII.
        assert!(AccessCode::parse("１２３４５６７８").is_err());
    }
}
