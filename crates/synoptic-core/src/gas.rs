//! Medical gas types and their canonical schematic ordering.

use serde::{Deserialize, Serialize};

/// The medical gases a network can carry.
///
/// Variant order is the canonical schematic column order used on synoptic
/// diagrams (oxygen leftmost), which is why the enum derives `Ord`. It is a
/// convention inherited from P&ID drawing practice, not alphabetical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum GasType {
    Oxygen,
    NitrousOxide,
    MedicalAir,
    Vacuum,
    Nitrogen,
    CarbonDioxide,
}

impl GasType {
    /// All gas types in canonical column order.
    pub const ALL: [GasType; 6] = [
        GasType::Oxygen,
        GasType::NitrousOxide,
        GasType::MedicalAir,
        GasType::Vacuum,
        GasType::Nitrogen,
        GasType::CarbonDioxide,
    ];

    /// Position of this gas in the canonical column order.
    ///
    /// Kept as an exhaustive match so adding a gas type forces a decision
    /// about where its column goes.
    pub fn column_priority(self) -> usize {
        match self {
            GasType::Oxygen => 0,
            GasType::NitrousOxide => 1,
            GasType::MedicalAir => 2,
            GasType::Vacuum => 3,
            GasType::Nitrogen => 4,
            GasType::CarbonDioxide => 5,
        }
    }

    /// Short label used on diagrams and in cascade summaries.
    pub fn label(self) -> &'static str {
        match self {
            GasType::Oxygen => "O2",
            GasType::NitrousOxide => "N2O",
            GasType::MedicalAir => "AIR",
            GasType::Vacuum => "VAC",
            GasType::Nitrogen => "N2",
            GasType::CarbonDioxide => "CO2",
        }
    }
}
