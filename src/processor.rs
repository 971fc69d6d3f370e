use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::Result;
use crate::fmt::format_name;
use crate::models::{
    AcceptedRecord, Delimiter, ProcessResult, ReasonPolicy, RejectedRecord, RejectionReason,
    DEFAULT_REASON_POLICY,
};
use crate::validators::{is_valid_account_number, is_valid_amount, is_valid_phone, PhoneRules};

const FIELD_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Line source
// ---------------------------------------------------------------------------

/// Read `file_path` and return every line after the header.
///
/// An empty file (no header at all) yields no lines rather than an error.
/// Bytes that are not valid UTF-8 become U+FFFD so the row still reaches validation.
pub fn read_data_lines(file_path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(file_path)?;
    let content = String::from_utf8_lossy(&bytes);
    let mut lines = content.lines();
    if lines.next().is_none() {
        tracing::warn!(file = %file_path.display(), "source file is empty, nothing to process");
        return Ok(Vec::new());
    }
    Ok(lines.map(str::to_string).collect())
}

// ---------------------------------------------------------------------------
// Row sink
// ---------------------------------------------------------------------------

/// Per-row notification. `line` is the 1-based line number in the source file.
#[derive(Debug)]
pub enum RowEvent<'a> {
    Accepted {
        line: usize,
        record: &'a AcceptedRecord,
    },
    Rejected {
        line: usize,
        record: &'a RejectedRecord,
        detail: Option<&'a str>,
    },
}

pub trait RowSink {
    fn notify(&mut self, event: &RowEvent<'_>);
}

impl<F: FnMut(&RowEvent<'_>)> RowSink for F {
    fn notify(&mut self, event: &RowEvent<'_>) {
        self(event)
    }
}

/// Forwards row events to the tracing subscriber.
pub struct TracingSink;

impl RowSink for TracingSink {
    fn notify(&mut self, event: &RowEvent<'_>) {
        match event {
            RowEvent::Accepted { line, record } => tracing::info!(
                line,
                row_id = record.row_id,
                account = %record.account_number,
                "row accepted"
            ),
            RowEvent::Rejected {
                line,
                record,
                detail: Some(detail),
            } => tracing::warn!(
                line,
                row_id = record.row_id,
                reason = %record.reason,
                "malformed row: {detail}"
            ),
            RowEvent::Rejected { line, record, detail: None } => tracing::info!(
                line,
                row_id = record.row_id,
                account = %record.account_number,
                reason = %record.reason,
                "row rejected"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Reason accumulator
// ---------------------------------------------------------------------------

/// Collects validation failures for one row and keeps the one the policy selects.
#[derive(Debug)]
struct RowVerdict {
    policy: ReasonPolicy,
    reason: Option<RejectionReason>,
}

impl RowVerdict {
    fn new(policy: ReasonPolicy) -> Self {
        Self { policy, reason: None }
    }

    fn fail(&mut self, reason: RejectionReason) {
        match self.policy {
            ReasonPolicy::LastFailureWins => self.reason = Some(reason),
            ReasonPolicy::FirstFailureWins => {
                self.reason.get_or_insert(reason);
            }
        }
    }

    fn reason(&self) -> Option<RejectionReason> {
        self.reason
    }
}

// ---------------------------------------------------------------------------
// Row evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub phone_rules: PhoneRules,
    pub reason_policy: ReasonPolicy,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            phone_rules: PhoneRules::default(),
            reason_policy: DEFAULT_REASON_POLICY,
        }
    }
}

/// Trimmed and normalized fields of one data row.
#[derive(Debug)]
struct RowFields {
    account_number: String,
    name: String,
    amount: Decimal,
    phone: String,
}

enum RowOutcome {
    Valid(RowFields),
    Invalid(RowFields, RejectionReason),
    Malformed(RowFields, String),
}

/// Plain decimal text only: optional sign, digits and one point.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let plain = raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    if !plain {
        return None;
    }
    Decimal::from_str(raw).ok()
}

fn evaluate_row(line: &str, delimiter: Delimiter, options: &ProcessOptions) -> RowOutcome {
    let parts: Vec<&str> = line.split(delimiter.as_char()).map(str::trim).collect();
    let field = |i: usize| parts.get(i).copied().unwrap_or("");

    let mut fields = RowFields {
        account_number: field(0).to_string(),
        name: format_name(field(1)),
        amount: Decimal::ZERO,
        phone: field(3).to_string(),
    };

    if parts.len() != FIELD_COUNT {
        let detail = format!("expected {FIELD_COUNT} fields, found {}", parts.len());
        return RowOutcome::Malformed(fields, detail);
    }
    let Some(amount) = parse_amount(field(2)) else {
        let detail = format!("amount '{}' is not a decimal number", field(2));
        return RowOutcome::Malformed(fields, detail);
    };
    fields.amount = amount;

    let mut verdict = RowVerdict::new(options.reason_policy);
    if !is_valid_account_number(&fields.account_number) {
        verdict.fail(RejectionReason::InvalidAccountNumber);
    }
    if !is_valid_amount(fields.amount) {
        verdict.fail(RejectionReason::InvalidAmount);
    }
    if !fields.phone.is_empty() {
        match is_valid_phone(&fields.phone, &options.phone_rules) {
            Some(normalized) => fields.phone = normalized,
            None => verdict.fail(RejectionReason::InvalidPhoneNumber),
        }
    }

    match verdict.reason() {
        None => RowOutcome::Valid(fields),
        Some(reason) => RowOutcome::Invalid(fields, reason),
    }
}

// ---------------------------------------------------------------------------
// process_lines
// ---------------------------------------------------------------------------

/// Classify each data line (header already removed) into accepted and rejected records.
///
/// Accepted and rejected rows are numbered by two independent counters that
/// both start at 1. Blank lines are rejected as `EmptyLine`; rows with the
/// wrong field count or an unparsable amount are rejected as `Other`.
pub fn process_lines<I, L, S>(
    lines: I,
    delimiter: Delimiter,
    options: &ProcessOptions,
    sink: &mut S,
) -> ProcessResult
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
    S: RowSink + ?Sized,
{
    let mut result = ProcessResult::default();

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_no = idx + 2;
        let line = raw.as_ref();

        if line.trim().is_empty() {
            let record = RejectedRecord {
                row_id: result.rejected.len() + 1,
                account_number: String::new(),
                name: String::new(),
                amount: Decimal::ZERO,
                phone: String::new(),
                reason: RejectionReason::EmptyLine,
            };
            sink.notify(&RowEvent::Rejected { line: line_no, record: &record, detail: None });
            result.rejected.push(record);
            continue;
        }

        let (fields, reason, detail) = match evaluate_row(line, delimiter, options) {
            RowOutcome::Valid(fields) => {
                let record = AcceptedRecord {
                    row_id: result.accepted.len() + 1,
                    account_number: fields.account_number,
                    name: fields.name,
                    amount: fields.amount,
                    phone: fields.phone,
                };
                sink.notify(&RowEvent::Accepted { line: line_no, record: &record });
                result.accepted.push(record);
                continue;
            }
            RowOutcome::Invalid(fields, reason) => (fields, reason, None),
            RowOutcome::Malformed(fields, detail) => (fields, RejectionReason::Other, Some(detail)),
        };

        let record = RejectedRecord {
            row_id: result.rejected.len() + 1,
            account_number: fields.account_number,
            name: fields.name,
            amount: fields.amount,
            phone: fields.phone,
            reason,
        };
        sink.notify(&RowEvent::Rejected {
            line: line_no,
            record: &record,
            detail: detail.as_deref(),
        });
        result.rejected.push(record);
    }

    result
}
