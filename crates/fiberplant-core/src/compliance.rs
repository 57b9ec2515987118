//! Splice compliance scoring and batch statistics.
//!
//! Thresholds follow the usual acceptance practice for outside-plant
//! work: fusion joints are held to a tighter curve than mechanical ones.
//! Compliance never blocks a save; it annotates.

use crate::{
    budget::{FUSION_LOSS_MAX_DB, MECHANICAL_LOSS_MAX_DB},
    obs::sink::{MetricsEvent, record},
    round_db,
};
use fiberplant_schema::entity::{Splice, SpliceKind, SpliceStatus};
use serde::Serialize;

const FUSION_GOOD_DB: f64 = 0.10;
const FUSION_ACCEPTABLE_DB: f64 = 0.15;
const MECHANICAL_GOOD_DB: f64 = 0.20;
const MECHANICAL_ACCEPTABLE_DB: f64 = 0.30;

///
/// LossGrade
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LossGrade {
    Good,
    Acceptable,
    /// Above acceptable but still within the splice-type maximum.
    High,
    /// Exceeds the splice-type maximum.
    Failed,
    /// No measurement recorded.
    Missing,
}

/// Grade a measured loss against the per-type thresholds.
#[must_use]
pub fn validate_loss(loss_db: Option<f64>, kind: SpliceKind) -> LossGrade {
    let Some(loss) = loss_db else {
        return LossGrade::Missing;
    };

    let (good, acceptable, max) = match kind {
        SpliceKind::Fusion => (FUSION_GOOD_DB, FUSION_ACCEPTABLE_DB, FUSION_LOSS_MAX_DB),
        SpliceKind::Mechanical => (
            MECHANICAL_GOOD_DB,
            MECHANICAL_ACCEPTABLE_DB,
            MECHANICAL_LOSS_MAX_DB,
        ),
    };

    if loss <= good {
        LossGrade::Good
    } else if loss <= acceptable {
        LossGrade::Acceptable
    } else if loss <= max {
        LossGrade::High
    } else {
        LossGrade::Failed
    }
}

///
/// ComplianceStatus
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Pass,
    Warn,
    Fail,
}

///
/// ComplianceReport
///
/// `issues` lists every triggered condition, not just the ones that
/// decided `status`. A failed splice still reports its missing OTDR
/// trace so the operator fixes both.
///

#[derive(Clone, Debug, Serialize)]
pub struct ComplianceReport {
    pub status: ComplianceStatus,
    pub issues: Vec<String>,
}

/// Score one splice record.
#[must_use]
pub fn compliance_status(splice: &Splice) -> ComplianceReport {
    let mut issues = Vec::new();
    let grade = validate_loss(splice.loss_db, splice.kind);

    match grade {
        LossGrade::Failed => {
            let max = match splice.kind {
                SpliceKind::Fusion => FUSION_LOSS_MAX_DB,
                SpliceKind::Mechanical => MECHANICAL_LOSS_MAX_DB,
            };
            issues.push(format!(
                "measured loss {:.2} dB exceeds the {} maximum of {max:.2} dB",
                splice.loss_db.unwrap_or_default(),
                splice.kind,
            ));
        }
        LossGrade::High => issues.push("measured loss is above the acceptable range".to_string()),
        LossGrade::Missing => issues.push("no loss measurement recorded".to_string()),
        LossGrade::Good | LossGrade::Acceptable => {}
    }

    if splice.otdr.is_none() {
        issues.push("no OTDR trace attached".to_string());
    }
    if splice.technician.as_deref().is_none_or(str::is_empty) {
        issues.push("no technician recorded".to_string());
    }
    if splice.status == SpliceStatus::NeedsReview {
        issues.push("splice is flagged for review".to_string());
    }
    if splice.status == SpliceStatus::Failed {
        issues.push("splice is marked failed".to_string());
    }

    let status = if grade == LossGrade::Failed || splice.status == SpliceStatus::Failed {
        ComplianceStatus::Fail
    } else if issues.is_empty() {
        ComplianceStatus::Pass
    } else {
        ComplianceStatus::Warn
    };

    record(MetricsEvent::ComplianceChecked);
    ComplianceReport { status, issues }
}

///
/// BatchStats
///
/// Loss aggregates cover only splices with a recorded measurement.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub needs_review: usize,
    pub failed: usize,
    pub with_loss: usize,
    pub avg_loss_db: Option<f64>,
    pub max_loss_db: Option<f64>,
    pub min_loss_db: Option<f64>,
    /// Percentage of splices whose compliance status is `pass`.
    pub pass_rate: f64,
}

/// Summarize a set of splices (a tray, an enclosure, a whole project).
#[must_use]
pub fn batch_stats(splices: &[Splice]) -> BatchStats {
    let mut stats = BatchStats {
        total: splices.len(),
        ..BatchStats::default()
    };
    if splices.is_empty() {
        return stats;
    }

    let mut losses = Vec::new();
    let mut pass_count = 0usize;

    for splice in splices {
        match splice.status {
            SpliceStatus::Completed => stats.completed += 1,
            SpliceStatus::Pending => stats.pending += 1,
            SpliceStatus::NeedsReview => stats.needs_review += 1,
            SpliceStatus::Failed => stats.failed += 1,
        }
        if let Some(loss) = splice.loss_db {
            losses.push(loss);
        }
        if compliance_status(splice).status == ComplianceStatus::Pass {
            pass_count += 1;
        }
    }

    stats.with_loss = losses.len();
    if !losses.is_empty() {
        let sum: f64 = losses.iter().sum();
        stats.avg_loss_db = Some(round_db(sum / losses.len() as f64));
        stats.max_loss_db = losses.iter().copied().reduce(f64::max);
        stats.min_loss_db = losses.iter().copied().reduce(f64::min);
    }
    stats.pass_rate = pass_count as f64 / stats.total as f64 * 100.0;

    stats
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use fiberplant_schema::{
        entity::{FiberColors, OtdrEvent, OtdrEventKind, OtdrTrace},
        ids::{SpliceId, TrayId},
        types::Timestamp,
    };

    fn splice(kind: SpliceKind, loss_db: Option<f64>, status: SpliceStatus) -> Splice {
        Splice {
            id: SpliceId::new(1),
            tray: TrayId::new(1),
            fiber_a: 1,
            fiber_b: 1,
            colors_a: FiberColors::new("Blue", "Blue"),
            colors_b: FiberColors::new("Blue", "Blue"),
            kind,
            loss_db,
            technician: Some("j.mak".into()),
            spliced_at: Timestamp::from_unix_secs(0),
            status,
            otdr: Some(OtdrTrace {
                wavelength_nm: 1550,
                events: vec![OtdrEvent {
                    distance_km: 1.2,
                    loss_db: 0.05,
                    kind: OtdrEventKind::Splice,
                }],
            }),
        }
    }

    #[test]
    fn loss_grades_honor_fusion_boundaries() {
        let k = SpliceKind::Fusion;
        assert_eq!(validate_loss(Some(0.10), k), LossGrade::Good);
        assert_eq!(validate_loss(Some(0.15), k), LossGrade::Acceptable);
        assert_eq!(validate_loss(Some(0.30), k), LossGrade::High);
        assert_eq!(validate_loss(Some(0.31), k), LossGrade::Failed);
        assert_eq!(validate_loss(None, k), LossGrade::Missing);
    }

    #[test]
    fn loss_grades_honor_mechanical_boundaries() {
        let k = SpliceKind::Mechanical;
        assert_eq!(validate_loss(Some(0.20), k), LossGrade::Good);
        assert_eq!(validate_loss(Some(0.30), k), LossGrade::Acceptable);
        assert_eq!(validate_loss(Some(0.50), k), LossGrade::High);
        assert_eq!(validate_loss(Some(0.51), k), LossGrade::Failed);
    }

    #[test]
    fn excessive_loss_fails_with_a_maximum_message() {
        let report = compliance_status(&splice(
            SpliceKind::Fusion,
            Some(0.4),
            SpliceStatus::Completed,
        ));
        assert_eq!(report.status, ComplianceStatus::Fail);
        assert!(
            report.issues.iter().any(|i| i.contains("exceeds the fusion maximum")),
            "issues: {:?}",
            report.issues
        );
    }

    #[test]
    fn clean_splice_passes_with_no_issues() {
        let report = compliance_status(&splice(
            SpliceKind::Fusion,
            Some(0.05),
            SpliceStatus::Completed,
        ));
        assert_eq!(report.status, ComplianceStatus::Pass);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn documentation_gaps_warn_and_stack() {
        let mut s = splice(SpliceKind::Fusion, None, SpliceStatus::NeedsReview);
        s.technician = None;
        s.otdr = None;
        let report = compliance_status(&s);
        assert_eq!(report.status, ComplianceStatus::Warn);
        assert_eq!(report.issues.len(), 4);
    }

    #[test]
    fn failed_status_fails_but_still_lists_other_issues() {
        let mut s = splice(SpliceKind::Fusion, Some(0.05), SpliceStatus::Failed);
        s.otdr = None;
        let report = compliance_status(&s);
        assert_eq!(report.status, ComplianceStatus::Fail);
        assert!(report.issues.iter().any(|i| i.contains("OTDR")));
    }

    #[test]
    fn batch_stats_aggregate_only_recorded_losses() {
        let splices = vec![
            splice(SpliceKind::Fusion, Some(0.05), SpliceStatus::Completed),
            splice(SpliceKind::Fusion, Some(0.15), SpliceStatus::Completed),
            splice(SpliceKind::Fusion, None, SpliceStatus::Pending),
            splice(SpliceKind::Fusion, Some(0.40), SpliceStatus::Failed),
        ];
        let stats = batch_stats(&splices);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.with_loss, 3);
        assert_eq!(stats.avg_loss_db, Some(0.20));
        assert_eq!(stats.max_loss_db, Some(0.40));
        assert_eq!(stats.min_loss_db, Some(0.05));
        // First splice passes; the 0.15 acceptable one has technician
        // and OTDR, so it passes too.
        assert!((stats.pass_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_reports_zero_pass_rate() {
        let stats = batch_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.pass_rate, 0.0);
        assert_eq!(stats.avg_loss_db, None);
    }
}
