use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::fmt::seconds;
use crate::models::{ProcessResult, RejectionReason};

pub struct ImportSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub total: usize,
    /// Occurrences per reason; reasons that never occurred are absent.
    pub reasons: BTreeMap<RejectionReason, usize>,
    pub elapsed: Duration,
}

pub fn summarize(result: &ProcessResult, elapsed: Duration) -> ImportSummary {
    let mut reasons = BTreeMap::new();
    for record in &result.rejected {
        *reasons.entry(record.reason).or_insert(0usize) += 1;
    }
    ImportSummary {
        accepted: result.accepted.len(),
        rejected: result.rejected.len(),
        total: result.total(),
        reasons,
        elapsed,
    }
}

/// Plain-text report written to disk alongside the cleaned files.
pub fn format_report(summary: &ImportSummary, source: &Path, generated_at: &str) -> String {
    let mut out = String::new();
    out.push_str("Debt File Import Report\n");
    out.push_str("=======================\n");
    out.push_str(&format!("Generated: {generated_at}\n"));
    out.push_str(&format!("Source file: {}\n\n", source.display()));
    out.push_str(&format!("Total records processed: {}\n", summary.total));
    out.push_str(&format!("Valid records: {}\n", summary.accepted));
    out.push_str(&format!("Invalid records: {}\n", summary.rejected));
    out.push_str(&format!("Processing time: {} seconds\n\n", seconds(summary.elapsed)));
    out.push_str("Rejection reasons:\n");
    if summary.reasons.is_empty() {
        out.push_str("  None\n");
    }
    for (reason, count) in &summary.reasons {
        out.push_str(&format!("  {reason}: {count}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AcceptedRecord, RejectedRecord};
    use rust_decimal::Decimal;

    fn accepted(row_id: usize) -> AcceptedRecord {
        AcceptedRecord {
            row_id,
            account_number: format!("A{row_id}"),
            name: "Test".to_string(),
            amount: Decimal::ONE,
            phone: String::new(),
        }
    }

    fn rejected(row_id: usize, reason: RejectionReason) -> RejectedRecord {
        RejectedRecord {
            row_id,
            account_number: String::new(),
            name: String::new(),
            amount: Decimal::ZERO,
            phone: String::new(),
            reason,
        }
    }

    fn sample() -> ProcessResult {
        ProcessResult {
            accepted: vec![accepted(1)],
            rejected: vec![
                rejected(1, RejectionReason::InvalidAmount),
                rejected(2, RejectionReason::EmptyLine),
                rejected(3, RejectionReason::InvalidAmount),
            ],
        }
    }

    #[test]
    fn test_summarize_counts() {
        let summary = summarize(&sample(), Duration::from_millis(20));
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 3);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.reasons.get(&RejectionReason::InvalidAmount), Some(&2));
        assert_eq!(summary.reasons.get(&RejectionReason::EmptyLine), Some(&1));
        assert!(!summary.reasons.contains_key(&RejectionReason::InvalidPhoneNumber));
        assert_eq!(summary.reasons.len(), 2);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&ProcessResult::default(), Duration::ZERO);
        assert_eq!(summary.total, 0);
        assert!(summary.reasons.is_empty());
    }

    #[test]
    fn test_format_report() {
        let summary = summarize(&sample(), Duration::from_millis(250));
        let text = format_report(&summary, Path::new("debts.csv"), "2025-01-15 10:00:00");
        assert!(text.contains("Source file: debts.csv"));
        assert!(text.contains("Total records processed: 4"));
        assert!(text.contains("Valid records: 1"));
        assert!(text.contains("Invalid records: 3"));
        assert!(text.contains("Processing time: 0.2500 seconds"));
        assert!(text.contains("  InvalidAmount: 2\n"));
        assert!(text.contains("  EmptyLine: 1\n"));
        assert!(!text.contains("InvalidPhoneNumber"));
        let amount_pos = text.find("InvalidAmount").unwrap();
        let empty_pos = text.find("EmptyLine").unwrap();
        assert!(amount_pos < empty_pos);
    }

    #[test]
    fn test_format_report_without_rejections() {
        let summary = summarize(&ProcessResult::default(), Duration::ZERO);
        let text = format_report(&summary, Path::new("x.txt"), "now");
        assert!(text.contains("Rejection reasons:\n  None\n"));
    }
}
