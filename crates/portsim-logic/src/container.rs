//! Containers — immutable cargo units.
//!
//! A container has a fixed [`Category`] that decides two things:
//! - its fuel coefficient (fuel per unit of weight per unit of distance)
//! - which capacity buckets it occupies aboard a ship
//!
//! Refrigerated and Liquid containers are heavy for capacity purposes but are
//! always listed under their own category.

use serde::{Deserialize, Serialize};

use crate::ids::ContainerId;

// ============================================================================
// CATEGORIES
// ============================================================================

/// Container category, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    /// Light general cargo.
    Basic = 0,
    /// General cargo above the heavy weight threshold.
    Heavy = 1,
    /// Cooled cargo. Heavy-classified.
    Refrigerated = 2,
    /// Tank cargo. Heavy-classified.
    Liquid = 3,
}

/// Fuel coefficients per category.
mod coefficients {
    pub const BASIC: f64 = 2.5;
    pub const HEAVY: f64 = 3.0;
    pub const REFRIGERATED: f64 = 5.0;
    pub const LIQUID: f64 = 4.0;
}

/// Special-type marker selecting a Liquid container on creation.
pub const LIQUID_MARKER: char = 'L';

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 4] = [
        Category::Basic,
        Category::Heavy,
        Category::Refrigerated,
        Category::Liquid,
    ];

    /// Fuel consumed per unit of weight per unit of distance.
    pub fn fuel_coefficient(self) -> f64 {
        match self {
            Self::Basic => coefficients::BASIC,
            Self::Heavy => coefficients::HEAVY,
            Self::Refrigerated => coefficients::REFRIGERATED,
            Self::Liquid => coefficients::LIQUID,
        }
    }

    /// Whether the container counts toward a ship's heavy limit.
    pub fn is_heavy_classified(self) -> bool {
        !matches!(self, Self::Basic)
    }

    /// Label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "BasicContainer",
            Self::Heavy => "HeavyContainer",
            Self::Refrigerated => "RefrigeratedContainer",
            Self::Liquid => "LiquidContainer",
        }
    }

    /// Pick the category for a newly created container.
    ///
    /// Without a special marker the weight decides: at or below `threshold`
    /// is Basic, above is Heavy. With a marker, `L` is Liquid and anything
    /// else is Refrigerated.
    pub fn classify(weight: f64, special: Option<char>, threshold: f64) -> Self {
        match special {
            Some(LIQUID_MARKER) => Self::Liquid,
            Some(_) => Self::Refrigerated,
            None if weight > threshold => Self::Heavy,
            None => Self::Basic,
        }
    }
}

// ============================================================================
// CONTAINER
// ============================================================================

/// A single cargo unit.
///
/// Equality compares category, id and weight together; two containers with
/// the same id but a different weight are not equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub weight: f64,
    pub category: Category,
}

impl Container {
    pub fn new(id: ContainerId, weight: f64, category: Category) -> Self {
        Self {
            id,
            weight,
            category,
        }
    }

    /// The per-category fuel coefficient.
    pub fn fuel_unit_cost(&self) -> f64 {
        self.category.fuel_coefficient()
    }

    /// Fuel this container adds per unit of distance sailed.
    pub fn fuel_per_distance(&self) -> f64 {
        self.fuel_unit_cost() * self.weight
    }
}
