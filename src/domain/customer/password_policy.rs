//! Password complexity policy for customer accounts.
//!
//! A password starts with at least 8 characters drawn from letters, digits
//! and `@$!%*#?&`, and contains at least one of each: lowercase letter,
//! uppercase letter, digit, special character. Anything after the leading
//! run is not restricted, so long passphrases are accepted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Message returned for any policy violation.
pub const PASSWORD_POLICY_MESSAGE: &str =
    "Password must be at least 8 characters and include alphabets, numbers, and a special character.";

pub const MIN_PASSWORD_LEN: usize = 8;

static ALLOWED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@$!%*#?&]{8}").expect("Invalid regex"));
static LOWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]").expect("Invalid regex"));
static UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]").expect("Invalid regex"));
static DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]").expect("Invalid regex"));
static SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[@$!%*#?&]").expect("Invalid regex"));

/// Returns true if `password` satisfies the policy.
pub fn meets_policy(password: &str) -> bool {
    // character classes only count before the first line break
    let first_line = password.split('\n').next().unwrap_or("");

    ALLOWED_PREFIX.is_match(password)
        && LOWER.is_match(first_line)
        && UPPER.is_match(first_line)
        && DIGIT.is_match(first_line)
        && SPECIAL.is_match(first_line)
}
