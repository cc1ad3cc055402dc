//! Grading outcome types.

use serde::{Deserialize, Serialize};

/// Accumulated grade for one host record.
///
/// The score starts at 100 and only ever decreases; it is deliberately
/// not clamped, so enough findings can push it below zero. Findings are
/// append-only and keep rule evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    /// Numeric score, may be negative
    pub score: i32,
    /// Human-readable findings, insertion order = rule order
    pub findings: Vec<String>,
}

impl GradeResult {
    /// Fresh result with a perfect score and no findings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 100,
            findings: Vec::new(),
        }
    }

    /// Record one fired rule: subtract its penalty and append its finding
    pub fn penalize(&mut self, penalty: i32, finding: String) {
        self.score -= penalty;
        self.findings.push(finding);
    }
}

impl Default for GradeResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-host output record, ready for rendering or serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostReport {
    /// IP address of the graded host
    pub ip: String,
    /// Known hostnames
    pub hostnames: Vec<String>,
    /// Internet Service Provider, when reported
    pub isp: Option<String>,
    /// Subject common name of the leaf certificate
    pub subject_cn: String,
    /// Final score
    pub score: i32,
    /// Ordered findings
    pub findings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_starts_at_100() {
        let result = GradeResult::new();
        assert_eq!(result.score, 100);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn penalties_accumulate_in_order() {
        let mut result = GradeResult::new();
        result.penalize(10, "first".into());
        result.penalize(20, "second".into());
        assert_eq!(result.score, 70);
        assert_eq!(result.findings, vec!["first", "second"]);
    }

    #[test]
    fn score_has_no_floor() {
        let mut result = GradeResult::new();
        for i in 0..12 {
            result.penalize(10, format!("finding {i}"));
        }
        assert_eq!(result.score, -20);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = HostReport {
            ip: "203.0.113.7".into(),
            hostnames: vec!["example.net".into()],
            isp: Some("Example ISP".into()),
            subject_cn: "example.net".into(),
            score: 90,
            findings: vec!["certificate expired".into()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["score"], 90);
        assert_eq!(json["findings"][0], "certificate expired");
    }
}
