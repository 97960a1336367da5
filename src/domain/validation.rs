//! Shared field rules for incoming company and job payloads.

use once_cell::sync::Lazy;
use regex::Regex;

pub const HANDLE_MAX_LENGTH: u64 = 25;

/// Company handles are URL path segments: lowercase letters, digits and hyphens.
pub static HANDLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("Invalid handle regex"));

/// Equity is stored as a fraction of the company.
pub const EQUITY_MIN: f64 = 0.0;
pub const EQUITY_MAX: f64 = 1.0;
