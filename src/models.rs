use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Field separator for a run, chosen from the source file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Pipe,
}

impl Delimiter {
    /// `.csv` maps to a comma, `.txt` to a pipe (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim().trim_start_matches('.');
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Comma)
        } else if ext.eq_ignore_ascii_case("txt") {
            Some(Self::Pipe)
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Pipe => '|',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectionReason {
    InvalidAccountNumber,
    InvalidAmount,
    InvalidPhoneNumber,
    EmptyLine,
    Other,
}

impl RejectionReason {
    pub fn key(&self) -> &'static str {
        match self {
            Self::InvalidAccountNumber => "InvalidAccountNumber",
            Self::InvalidAmount => "InvalidAmount",
            Self::InvalidPhoneNumber => "InvalidPhoneNumber",
            Self::EmptyLine => "EmptyLine",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which failure is recorded when a row fails more than one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonPolicy {
    FirstFailureWins,
    LastFailureWins,
}

/// Checks run account number, amount, phone; the last failing one is reported.
pub const DEFAULT_REASON_POLICY: ReasonPolicy = ReasonPolicy::LastFailureWins;

#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedRecord {
    pub row_id: usize,
    pub account_number: String,
    pub name: String,
    pub amount: Decimal,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub row_id: usize,
    pub account_number: String,
    pub name: String,
    pub amount: Decimal,
    pub phone: String,
    pub reason: RejectionReason,
}

/// Both ordered sequences produced by one pass over the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessResult {
    pub accepted: Vec<AcceptedRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl ProcessResult {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}
