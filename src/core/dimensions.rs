use serde::{Deserialize, Serialize};

/// Ordered category lists. Closeness is measured by index distance, so the
/// order of each list is part of the scoring contract.
pub const SLEEP_SCHEDULES: &[&str] = &["early_bird", "normal", "night_owl"];
pub const GUEST_FREQUENCIES: &[&str] = &["rarely", "sometimes", "often"];
pub const STUDY_STYLES: &[&str] = &["solo", "pair", "group"];
pub const CONFLICT_STYLES: &[&str] = &["direct", "calm", "mediated"];
pub const ROUTINE_FLEXIBILITIES: &[&str] = &["strict", "balanced", "flexible"];
pub const SOCIAL_ENERGIES: &[&str] = &["quiet", "balanced", "social"];

/// Largest possible difference on the 0-10 level scales
pub const LEVEL_MAX_DIFF: f64 = 10.0;

/// Midpoint gap (currency units) at which budget proximity reaches zero
pub const BUDGET_MIDPOINT_SCALE: f64 = 3000.0;
pub const BUDGET_OVERLAP_SHARE: f64 = 0.7;
pub const BUDGET_MIDPOINT_SHARE: f64 = 0.3;

/// Score used when either location has no usable tokens
pub const LOCATION_FALLBACK: f64 = 40.0;

/// How a dimension turns two answers into a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionKind {
    /// Linear difference on a bounded numeric scale
    ScaledDifference { max_diff: f64 },
    /// Index distance within a fixed ordering, with a fallback for unknown values
    OrderedCategory {
        ordering: &'static [&'static str],
        fallback: f64,
    },
    /// Interval overlap blended with midpoint proximity
    BudgetRange,
    /// Equal answers score 100, anything else scores the penalty
    BooleanMatch { mismatch: f64 },
    /// Jaccard similarity of free-text tokens
    TokenSet,
}

/// One compatibility axis.
///
/// Keys, labels and weights are stable: changing any of them changes every
/// previously computed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Cleanliness,
    Noise,
    SleepSchedule,
    Budget,
    Smoking,
    Pets,
    GuestsFrequency,
    PreferredLocation,
    StudyStyle,
    ConflictStyle,
    RoutineFlexibility,
    SocialEnergy,
}

impl Dimension {
    /// Every dimension, in the order they appear in a match breakdown
    pub const ALL: [Dimension; 12] = [
        Dimension::Cleanliness,
        Dimension::Noise,
        Dimension::SleepSchedule,
        Dimension::Budget,
        Dimension::Smoking,
        Dimension::Pets,
        Dimension::GuestsFrequency,
        Dimension::PreferredLocation,
        Dimension::StudyStyle,
        Dimension::ConflictStyle,
        Dimension::RoutineFlexibility,
        Dimension::SocialEnergy,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Dimension::Cleanliness => "cleanliness",
            Dimension::Noise => "noise",
            Dimension::SleepSchedule => "sleep_schedule",
            Dimension::Budget => "budget",
            Dimension::Smoking => "smoking",
            Dimension::Pets => "pets",
            Dimension::GuestsFrequency => "guests_frequency",
            Dimension::PreferredLocation => "preferred_location",
            Dimension::StudyStyle => "study_style",
            Dimension::ConflictStyle => "conflict_style",
            Dimension::RoutineFlexibility => "routine_flexibility",
            Dimension::SocialEnergy => "social_energy",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Cleanliness => "Cleanliness",
            Dimension::Noise => "Noise level",
            Dimension::SleepSchedule => "Sleep schedule",
            Dimension::Budget => "Budget",
            Dimension::Smoking => "Smoking",
            Dimension::Pets => "Pets",
            Dimension::GuestsFrequency => "Guests frequency",
            Dimension::PreferredLocation => "Preferred location",
            Dimension::StudyStyle => "Study style",
            Dimension::ConflictStyle => "Conflict style",
            Dimension::RoutineFlexibility => "Routine flexibility",
            Dimension::SocialEnergy => "Social energy",
        }
    }

    pub const fn weight(self) -> f64 {
        match self {
            Dimension::Cleanliness => 0.20,
            Dimension::Noise => 0.20,
            Dimension::SleepSchedule => 0.12,
            Dimension::Budget => 0.18,
            Dimension::Smoking => 0.10,
            Dimension::Pets => 0.08,
            Dimension::GuestsFrequency => 0.06,
            Dimension::PreferredLocation => 0.06,
            Dimension::StudyStyle => 0.07,
            Dimension::ConflictStyle => 0.05,
            Dimension::RoutineFlexibility => 0.06,
            Dimension::SocialEnergy => 0.06,
        }
    }

    pub const fn kind(self) -> DimensionKind {
        match self {
            Dimension::Cleanliness | Dimension::Noise => DimensionKind::ScaledDifference {
                max_diff: LEVEL_MAX_DIFF,
            },
            Dimension::SleepSchedule => DimensionKind::OrderedCategory {
                ordering: SLEEP_SCHEDULES,
                fallback: 45.0,
            },
            Dimension::GuestsFrequency => DimensionKind::OrderedCategory {
                ordering: GUEST_FREQUENCIES,
                fallback: 50.0,
            },
            Dimension::StudyStyle => DimensionKind::OrderedCategory {
                ordering: STUDY_STYLES,
                fallback: 50.0,
            },
            Dimension::ConflictStyle => DimensionKind::OrderedCategory {
                ordering: CONFLICT_STYLES,
                fallback: 55.0,
            },
            Dimension::RoutineFlexibility => DimensionKind::OrderedCategory {
                ordering: ROUTINE_FLEXIBILITIES,
                fallback: 50.0,
            },
            Dimension::SocialEnergy => DimensionKind::OrderedCategory {
                ordering: SOCIAL_ENERGIES,
                fallback: 50.0,
            },
            Dimension::Budget => DimensionKind::BudgetRange,
            // Smoking is the harder dealbreaker
            Dimension::Smoking => DimensionKind::BooleanMatch { mismatch: 15.0 },
            Dimension::Pets => DimensionKind::BooleanMatch { mismatch: 30.0 },
            Dimension::PreferredLocation => DimensionKind::TokenSet,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
