//! Splice-matrix construction: the full cross product of two cables'
//! fibers against the tray's existing splice records.

use crate::{
    color::{ColorInfo, color_info},
    obs::sink::{MetricsEvent, record},
};
use fiberplant_schema::entity::Splice;
use serde::Serialize;
use std::collections::HashMap;

///
/// MatrixCell
///
/// One fiber pairing. `splice` is set when the tray already documents a
/// joint between exactly these two ordinals.
///

#[derive(Clone, Debug, Serialize)]
pub struct MatrixCell {
    pub fiber_a: u32,
    pub fiber_b: u32,
    pub color_a: ColorInfo,
    pub color_b: ColorInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splice: Option<Splice>,
}

///
/// SpliceMatrix
///
/// Rows ascend by `fiber_a`, cells within a row by `fiber_b`. Ordinals
/// whose color lookup fails are skipped, so a malformed cable count
/// shrinks the grid instead of poisoning it.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct SpliceMatrix {
    pub cable_a_fibers: u32,
    pub cable_b_fibers: u32,
    pub rows: Vec<Vec<MatrixCell>>,
}

impl SpliceMatrix {
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn spliced_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.splice.is_some())
            .count()
    }

    /// Documented fraction of the grid, 0..=1.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        let cells = self.cell_count();
        if cells == 0 {
            return 0.0;
        }
        self.spliced_count() as f64 / cells as f64
    }
}

/// Build the annotated grid. Splice lookup is linear in `existing`; the
/// grid itself is `A × B`. Deterministic: identical inputs produce an
/// identical matrix.
#[must_use]
pub fn build_matrix(cable_a_fibers: u32, cable_b_fibers: u32, existing: &[Splice]) -> SpliceMatrix {
    let mut by_pair: HashMap<(u32, u32), &Splice> = HashMap::with_capacity(existing.len());
    for splice in existing {
        // First record wins on duplicate pairs; conflicting data is
        // reported by `tray_conflicts`, not silently reshuffled here.
        by_pair.entry((splice.fiber_a, splice.fiber_b)).or_insert(splice);
    }

    let mut rows = Vec::new();
    for fiber_a in 1..=cable_a_fibers {
        let Some(color_a) = color_info(fiber_a, cable_a_fibers) else {
            continue;
        };

        let mut row = Vec::new();
        for fiber_b in 1..=cable_b_fibers {
            let Some(color_b) = color_info(fiber_b, cable_b_fibers) else {
                continue;
            };
            row.push(MatrixCell {
                fiber_a,
                fiber_b,
                color_a,
                color_b,
                splice: by_pair.get(&(fiber_a, fiber_b)).map(|s| (*s).clone()),
            });
        }
        rows.push(row);
    }

    let matrix = SpliceMatrix {
        cable_a_fibers,
        cable_b_fibers,
        rows,
    };
    record(MetricsEvent::MatrixBuilt {
        cells: matrix.cell_count() as u64,
    });
    matrix
}

/// Report violations of the one-splice-per-fiber-side rule among a
/// tray's active splices. Advisory: display-only, never blocks.
#[must_use]
pub fn tray_conflicts(splices: &[Splice]) -> Vec<String> {
    let mut issues = Vec::new();
    let active: Vec<&Splice> = splices.iter().filter(|s| s.is_active()).collect();

    for (i, splice) in active.iter().enumerate() {
        for other in &active[i + 1..] {
            if splice.fiber_a == other.fiber_a && splice.fiber_b == other.fiber_b {
                issues.push(format!(
                    "fibers {}-{} are documented twice",
                    splice.fiber_a, splice.fiber_b
                ));
            } else if splice.fiber_a == other.fiber_a {
                issues.push(format!(
                    "fiber {} is spliced twice on the A side",
                    splice.fiber_a
                ));
            } else if splice.fiber_b == other.fiber_b {
                issues.push(format!(
                    "fiber {} is spliced twice on the B side",
                    splice.fiber_b
                ));
            }
        }
    }

    issues
}

///
/// TESTS
///
