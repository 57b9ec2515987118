//! Optical loss budgets and power-budget checks.
//!
//! A formula engine over fixed constant tables; no store access. Every
//! component is rounded to hundredths of a dB before summation so the
//! displayed breakdown always adds up to the displayed total.

use crate::round_db;
use serde::{Deserialize, Serialize};

/// Per-event splice losses, typical and worst-case, in dB.
pub const FUSION_LOSS_TYPICAL_DB: f64 = 0.10;
pub const FUSION_LOSS_MAX_DB: f64 = 0.30;
pub const MECHANICAL_LOSS_TYPICAL_DB: f64 = 0.30;
pub const MECHANICAL_LOSS_MAX_DB: f64 = 0.50;

///
/// FiberType
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
#[serde(rename_all = "kebab-case")]
pub enum FiberType {
    Multimode,
    Singlemode,
}

/// Attenuation in dB/km for a fiber type at a wavelength. The table is
/// zero-filled outside the windows each fiber type is specified for
/// (singlemode 1310/1550 nm, multimode 850/1300 nm): an invalid
/// combination contributes no fiber loss rather than erroring, since
/// the calculator runs live under a form.
#[must_use]
pub const fn attenuation_db_per_km(fiber: FiberType, wavelength_nm: u32) -> f64 {
    match (fiber, wavelength_nm) {
        (FiberType::Singlemode, 1310) => 0.5,
        (FiberType::Singlemode, 1550) => 0.4,
        (FiberType::Multimode, 850) => 3.5,
        (FiberType::Multimode, 1300) => 1.5,
        _ => 0.0,
    }
}

///
/// ConnectorType
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectorType {
    Fc,
    Lc,
    Sc,
    St,
}

impl ConnectorType {
    /// Insertion loss per mated pair, in dB.
    #[must_use]
    pub const fn loss_db(self, use_max_values: bool) -> f64 {
        if use_max_values {
            return 0.75;
        }
        match self {
            Self::Lc => 0.20,
            Self::Sc => 0.25,
            Self::Fc | Self::St => 0.30,
        }
    }
}

///
/// EquipmentClass
///
/// GPON optics classes and the link budget each guarantees.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentClass {
    ClassA,
    ClassB,
    ClassBPlus,
    ClassC,
    ClassCPlus,
}

impl EquipmentClass {
    #[must_use]
    pub const fn budget_db(self) -> f64 {
        match self {
            Self::ClassA => 20.0,
            Self::ClassB => 25.0,
            Self::ClassBPlus => 28.0,
            Self::ClassC => 30.0,
            Self::ClassCPlus => 32.0,
        }
    }
}

///
/// BudgetParams
///

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BudgetParams {
    pub fiber_type: FiberType,
    pub wavelength_nm: u32,
    pub distance_km: f64,
    pub fusion_splices: u32,
    pub mechanical_splices: u32,
    pub connector_pairs: u32,
    pub connector: ConnectorType,
    pub use_max_values: bool,
    pub margin_db: f64,
}

///
/// BudgetBreakdown
///

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BudgetBreakdown {
    pub fiber_loss_db: f64,
    pub fusion_loss_db: f64,
    pub mechanical_loss_db: f64,
    pub connector_loss_db: f64,
    pub margin_db: f64,
    pub total_loss_db: f64,
}

/// Compute the end-to-end loss budget breakdown.
#[must_use]
pub fn calculate_budget(params: &BudgetParams) -> BudgetBreakdown {
    let fiber_loss_db = round_db(
        params.distance_km * attenuation_db_per_km(params.fiber_type, params.wavelength_nm),
    );
    let fusion_loss_db = round_db(
        f64::from(params.fusion_splices)
            * if params.use_max_values {
                FUSION_LOSS_MAX_DB
            } else {
                FUSION_LOSS_TYPICAL_DB
            },
    );
    let mechanical_loss_db = round_db(
        f64::from(params.mechanical_splices)
            * if params.use_max_values {
                MECHANICAL_LOSS_MAX_DB
            } else {
                MECHANICAL_LOSS_TYPICAL_DB
            },
    );
    let connector_loss_db = round_db(
        f64::from(params.connector_pairs) * params.connector.loss_db(params.use_max_values),
    );
    let margin_db = round_db(params.margin_db);

    BudgetBreakdown {
        fiber_loss_db,
        fusion_loss_db,
        mechanical_loss_db,
        connector_loss_db,
        margin_db,
        total_loss_db: round_db(
            fiber_loss_db + fusion_loss_db + mechanical_loss_db + connector_loss_db + margin_db,
        ),
    }
}

///
/// PowerBudgetCheck
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PowerBudgetCheck {
    pub pass: bool,
    pub margin_db: f64,
    pub budget_db: f64,
}

/// Does the computed loss fit the equipment's guaranteed budget?
#[must_use]
pub fn check_power_budget(total_loss_db: f64, class: EquipmentClass) -> PowerBudgetCheck {
    let budget_db = class.budget_db();
    PowerBudgetCheck {
        pass: total_loss_db <= budget_db,
        margin_db: round_db(budget_db - total_loss_db),
        budget_db,
    }
}

///
/// TESTS
///
