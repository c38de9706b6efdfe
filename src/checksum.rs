//! Registry number check-digit validation
//!
//! A registry number has the shape `NNNNNNNN-NN-C`: two digit groups of one to
//! eight digits and a single check digit. Reading the digits of both groups
//! left to right, the first carries a weight equal to the total digit count
//! and each following digit one less, down to 1. The number is valid when the
//! weighted sum modulo 10 equals the check digit.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static REGISTRY_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,8})-([0-9]{1,8})-([0-9])$").expect("registry number pattern is valid")
});

/// Check whether `candidate` is a well-formed registry number with a correct check digit.
///
/// Anything that does not match the pattern is simply `false`.
pub fn is_valid_registry_number(candidate: &str) -> bool {
    RegistryNumber::parse(candidate).is_some()
}

/// A registry number whose check digit has been verified
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryNumber(String);

impl RegistryNumber {
    /// Parse and verify a candidate, returning `None` when it is malformed or
    /// its check digit does not match
    pub fn parse(candidate: &str) -> Option<Self> {
        let captures = REGISTRY_NUMBER_PATTERN.captures(candidate)?;
        let body = format!("{}{}", &captures[1], &captures[2]);
        let check_digit = captures[3].chars().next()?.to_digit(10)?;

        if weighted_sum(&body) % 10 == check_digit {
            Some(Self(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sum of each digit times its weight, weights running from `len` down to 1
fn weighted_sum(digits: &str) -> u32 {
    let count = digits.len() as u32;
    digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .zip((1..=count).rev())
        .map(|(digit, weight)| digit * weight)
        .sum()
}

impl fmt::Display for RegistryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
