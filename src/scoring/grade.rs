//! Letter grade classification of an EcoScore
//!
//! The canonical scale has six bands, A (best) to F, modelled on EU energy
//! labels. The older five-band scale (no E) is kept for reports that must stay
//! comparable with earlier runs.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Eco grade, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Classify with the canonical six-band scale
    pub fn classify(score: u8) -> Self {
        GradeScale::SixBand.classify(score)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "Excellent",
            Grade::B => "Good",
            Grade::C => "Fair",
            Grade::D => "Poor",
            Grade::E => "Very Poor",
            Grade::F => "Critical",
        }
    }

    /// Hex colour used by dashboards and terminal output
    pub fn color(&self) -> &'static str {
        match self {
            Grade::A => "#00852e",
            Grade::B => "#6cae3a",
            Grade::C => "#b0cc33",
            Grade::D => "#fdd835",
            Grade::E => "#ff9800",
            Grade::F => "#ff5722",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grade::A => "Excellent! The page is highly eco-efficient",
            Grade::B => "Good eco-efficiency with a small margin for improvement",
            Grade::C => "Acceptable, but the page needs moderate eco improvements",
            Grade::D => "Needs improvement: significant eco-efficiency problems",
            Grade::E => "Very poor eco-efficiency: substantial rework recommended",
            Grade::F => "Critical: the page needs radical eco improvements",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold table used to classify scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradeScale {
    /// A >= 80, B >= 65, C >= 50, D >= 35, E >= 20, else F
    #[default]
    SixBand,
    /// A >= 80, B >= 60, C >= 40, D >= 20, else F
    Legacy,
}

impl GradeScale {
    /// Lower bound of each grade, best first. Scores below the last bound are F.
    pub fn thresholds(&self) -> &'static [(u8, Grade)] {
        match self {
            GradeScale::SixBand => &[
                (80, Grade::A),
                (65, Grade::B),
                (50, Grade::C),
                (35, Grade::D),
                (20, Grade::E),
            ],
            GradeScale::Legacy => &[
                (80, Grade::A),
                (60, Grade::B),
                (40, Grade::C),
                (20, Grade::D),
            ],
        }
    }

    pub fn classify(&self, score: u8) -> Grade {
        self.thresholds()
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn label_for(&self, score: u8) -> EcoLabel {
        EcoLabel::from(self.classify(score))
    }
}

/// Grade with its presentation attributes, as embedded in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcoLabel {
    pub grade: Grade,
    pub label: String,
    pub color: String,
}

impl From<Grade> for EcoLabel {
    fn from(grade: Grade) -> Self {
        Self {
            grade,
            label: grade.label().to_string(),
            color: grade.color().to_string(),
        }
    }
}
