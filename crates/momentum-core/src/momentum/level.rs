//! Discrete display bands derived from the momentum score.

use serde::{Deserialize, Serialize};

/// Ordered momentum bands, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumLevel {
    Building,
    NeedsWork,
    Moderate,
    Good,
    Excellent,
}

impl MomentumLevel {
    /// Map a score onto its band.
    ///
    /// Bands are closed-open (`[40, 60)` is moderate) except the top band,
    /// which includes 100.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            MomentumLevel::Excellent
        } else if score >= 60.0 {
            MomentumLevel::Good
        } else if score >= 40.0 {
            MomentumLevel::Moderate
        } else if score >= 20.0 {
            MomentumLevel::NeedsWork
        } else {
            MomentumLevel::Building
        }
    }

    /// Lowest score that still belongs to this band.
    pub fn threshold(&self) -> f64 {
        match self {
            MomentumLevel::Building => 0.0,
            MomentumLevel::NeedsWork => 20.0,
            MomentumLevel::Moderate => 40.0,
            MomentumLevel::Good => 60.0,
            MomentumLevel::Excellent => 80.0,
        }
    }

    /// The band above this one, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            MomentumLevel::Building => Some(MomentumLevel::NeedsWork),
            MomentumLevel::NeedsWork => Some(MomentumLevel::Moderate),
            MomentumLevel::Moderate => Some(MomentumLevel::Good),
            MomentumLevel::Good => Some(MomentumLevel::Excellent),
            MomentumLevel::Excellent => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MomentumLevel::Building => "Building",
            MomentumLevel::NeedsWork => "Needs Work",
            MomentumLevel::Moderate => "Moderate",
            MomentumLevel::Good => "Good",
            MomentumLevel::Excellent => "Excellent",
        }
    }

    /// Icon name for the UI layer.
    pub fn icon(&self) -> &'static str {
        match self {
            MomentumLevel::Building => "leaf",
            MomentumLevel::NeedsWork => "arrow.up.circle",
            MomentumLevel::Moderate => "flame",
            MomentumLevel::Good => "flame.fill",
            MomentumLevel::Excellent => "bolt.fill",
        }
    }

    /// Accent color (hex) for the UI layer.
    pub fn color(&self) -> &'static str {
        match self {
            MomentumLevel::Building => "#9ca3af",
            MomentumLevel::NeedsWork => "#3b82f6",
            MomentumLevel::Moderate => "#eab308",
            MomentumLevel::Good => "#f97316",
            MomentumLevel::Excellent => "#ef4444",
        }
    }
}
