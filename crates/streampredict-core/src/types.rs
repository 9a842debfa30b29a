//! Feature layout and stream labels

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Number of positions in a feature vector
pub const FEATURE_COUNT: usize = 13;

/// Inclusive domain of a subject mark
pub const MARK_RANGE: RangeInclusive<u8> = 0..=100;

/// Inclusive domain of an interest or skill rating
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// One named position of the feature vector.
///
/// Declaration order is the order the classifier was trained on, so the
/// discriminant doubles as the vector index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    Maths,
    Science,
    English,
    SocialScience,
    Language,
    InterestMaths,
    InterestScience,
    InterestBusiness,
    InterestArts,
    Analytical,
    Creativity,
    Communication,
    ProblemSolving,
}

impl FeatureField {
    /// All fields in vector order
    pub const ALL: [FeatureField; FEATURE_COUNT] = [
        Self::Maths,
        Self::Science,
        Self::English,
        Self::SocialScience,
        Self::Language,
        Self::InterestMaths,
        Self::InterestScience,
        Self::InterestBusiness,
        Self::InterestArts,
        Self::Analytical,
        Self::Creativity,
        Self::Communication,
        Self::ProblemSolving,
    ];

    /// Position of this field in the feature vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Machine name, matching the request field name
    pub fn name(self) -> &'static str {
        match self {
            Self::Maths => "maths",
            Self::Science => "science",
            Self::English => "english",
            Self::SocialScience => "social_science",
            Self::Language => "language",
            Self::InterestMaths => "interest_maths",
            Self::InterestScience => "interest_science",
            Self::InterestBusiness => "interest_business",
            Self::InterestArts => "interest_arts",
            Self::Analytical => "analytical",
            Self::Creativity => "creativity",
            Self::Communication => "communication",
            Self::ProblemSolving => "problem_solving",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Maths => "Maths Marks",
            Self::Science => "Science Marks",
            Self::English => "English Marks",
            Self::SocialScience => "Social Science Marks",
            Self::Language => "Language Marks",
            Self::InterestMaths => "Interest in Maths",
            Self::InterestScience => "Interest in Science",
            Self::InterestBusiness => "Interest in Business/Commerce",
            Self::InterestArts => "Interest in Arts/Humanities",
            Self::Analytical => "Analytical Skill",
            Self::Creativity => "Creativity Skill",
            Self::Communication => "Communication Skill",
            Self::ProblemSolving => "Problem Solving Skill",
        }
    }

    /// Whether this field is a subject mark (as opposed to a 1-5 rating)
    pub fn is_mark(self) -> bool {
        self.index() < 5
    }

    /// Valid domain for this field
    pub fn range(self) -> RangeInclusive<u8> {
        if self.is_mark() {
            MARK_RANGE
        } else {
            RATING_RANGE
        }
    }

    /// Value the input form starts from
    pub fn default_value(self) -> u8 {
        if self.is_mark() {
            70
        } else {
            3
        }
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered 13-element numeric input to a stream classifier.
///
/// The arity is fixed by the type; ranges are not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    /// Create a vector from values already in training order
    pub fn new(values: [f32; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Create a vector from a slice, rejecting any length other than 13
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let values: [f32; FEATURE_COUNT] = values.try_into().map_err(|_| {
            Error::invalid_input(format!(
                "feature vector must have exactly {} elements, got {}",
                FEATURE_COUNT,
                values.len()
            ))
        })?;
        Ok(Self(values))
    }

    /// Value at a named position
    pub fn get(&self, field: FeatureField) -> f32 {
        self.0[field.index()]
    }

    /// Replace the value at a named position
    pub fn with(mut self, field: FeatureField, value: f32) -> Self {
        self.0[field.index()] = value;
        self
    }

    /// Values in training order
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Owned array of values
    pub fn to_array(self) -> [f32; FEATURE_COUNT] {
        self.0
    }

    /// Fields whose value lies outside its domain
    pub fn out_of_range(&self) -> Vec<FeatureField> {
        FeatureField::ALL
            .iter()
            .copied()
            .filter(|field| {
                let value = self.get(*field);
                let range = field.range();
                !(value >= f32::from(*range.start()) && value <= f32::from(*range.end()))
            })
            .collect()
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for field in FeatureField::ALL {
            values[field.index()] = f32::from(field.default_value());
        }
        Self(values)
    }
}

impl TryFrom<Vec<f32>> for FeatureVector {
    type Error = Error;

    fn try_from(values: Vec<f32>) -> Result<Self> {
        Self::from_slice(&values)
    }
}

impl From<FeatureVector> for Vec<f32> {
    fn from(vector: FeatureVector) -> Self {
        vector.0.to_vec()
    }
}

impl From<[u8; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [u8; FEATURE_COUNT]) -> Self {
        Self(values.map(f32::from))
    }
}

/// Recommended academic stream.
///
/// `Unknown` is the sentinel for class indices the table does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamLabel {
    #[serde(rename = "SCIENCE")]
    Science,
    #[serde(rename = "COMMERCE")]
    Commerce,
    #[serde(rename = "ARTS")]
    Arts,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl StreamLabel {
    /// Map a classifier output through the fixed index table
    pub fn from_class_index(index: i64) -> Self {
        match index {
            0 => Self::Science,
            1 => Self::Commerce,
            2 => Self::Arts,
            _ => Self::Unknown,
        }
    }

    /// Class index for known streams
    pub fn class_index(self) -> Option<i64> {
        match self {
            Self::Science => Some(0),
            Self::Commerce => Some(1),
            Self::Arts => Some(2),
            Self::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Science => "SCIENCE",
            Self::Commerce => "COMMERCE",
            Self::Arts => "ARTS",
            Self::Unknown => "Unknown",
        }
    }

    /// Example careers for this stream, empty for `Unknown`
    pub fn career_suggestions(self) -> &'static [&'static str] {
        match self {
            Self::Science => &["Engineer", "Doctor", "Researcher", "Scientist", "IT Professional"],
            Self::Commerce => &["CA", "Accountant", "MBA", "Banker", "Entrepreneur"],
            Self::Arts => &["Writer", "Artist", "Teacher", "Journalist", "Psychologist"],
            Self::Unknown => &[],
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for StreamLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SCIENCE" => Ok(Self::Science),
            "COMMERCE" => Ok(Self::Commerce),
            "ARTS" => Ok(Self::Arts),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(Error::invalid_input(format!("unknown stream label: {}", other))),
        }
    }
}
