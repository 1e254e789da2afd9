//! Face-shape classification types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SuggestionError;

/// One of the seven face-shape categories a photo can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Diamond,
    Rectangular,
    Oblong,
}

impl FaceShape {
    /// All face shapes, in catalog order.
    pub const ALL: [FaceShape; 7] = [
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Heart,
        FaceShape::Diamond,
        FaceShape::Rectangular,
        FaceShape::Oblong,
    ];

    /// Lowercase identifier used in prompts and storage (e.g. "oval").
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceShape::Oval => "oval",
            FaceShape::Round => "round",
            FaceShape::Square => "square",
            FaceShape::Heart => "heart",
            FaceShape::Diamond => "diamond",
            FaceShape::Rectangular => "rectangular",
            FaceShape::Oblong => "oblong",
        }
    }

    /// Capitalized label shown to users (e.g. "Oval").
    pub fn label(&self) -> &'static str {
        match self {
            FaceShape::Oval => "Oval",
            FaceShape::Round => "Round",
            FaceShape::Square => "Square",
            FaceShape::Heart => "Heart",
            FaceShape::Diamond => "Diamond",
            FaceShape::Rectangular => "Rectangular",
            FaceShape::Oblong => "Oblong",
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaceShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oval" => Ok(FaceShape::Oval),
            "round" => Ok(FaceShape::Round),
            "square" => Ok(FaceShape::Square),
            "heart" => Ok(FaceShape::Heart),
            "diamond" => Ok(FaceShape::Diamond),
            "rectangular" => Ok(FaceShape::Rectangular),
            "oblong" => Ok(FaceShape::Oblong),
            other => Err(format!("invalid face shape: '{other}'")),
        }
    }
}

/// A face-shape classification for one analysis session.
///
/// Immutable once produced; `confidence` is always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub face_shape: FaceShape,
    pub confidence: f64,
}

impl Classification {
    /// Create a classification, rejecting confidences outside `[0, 1]`.
    pub fn new(face_shape: FaceShape, confidence: f64) -> Result<Self, SuggestionError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(SuggestionError::InvalidInput(format!(
                "confidence {confidence} is outside [0, 1]"
            )));
        }
        Ok(Self {
            face_shape,
            confidence,
        })
    }

    /// A caller-supplied classification (the user picked the shape).
    pub fn certain(face_shape: FaceShape) -> Self {
        Self {
            face_shape,
            confidence: 1.0,
        }
    }
}

/// Gender inferred from the model's answer, used to phrase image prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    /// Noun used when describing the subject of a generated portrait.
    pub fn subject(&self) -> &'static str {
        match self {
            Gender::Male => "man",
            Gender::Female => "woman",
            Gender::Unspecified => "person",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Unspecified => write!(f, "unspecified"),
        }
    }
}
