//! Document configuration – raw options, their validation, and the frozen
//! [`DocumentConfig`] handed to the rendering engine.
//!
//! Every `normalize_*` function is pure: it either maps an accepted spelling
//! to its canonical form or rejects the input with a [`ValidationError`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::page_formats;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Height ≥ width (default).
    #[default]
    Portrait,
    /// Width ≥ height.
    Landscape,
}

/// Measurement unit for content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    Centimeter,
    Inch,
    #[default]
    Millimeter,
    Point,
}

impl Unit {
    /// Number of PDF points in one unit.
    pub fn points_per_unit(self) -> f32 {
        match self {
            Unit::Centimeter => 72.0 / 2.54,
            Unit::Inch => 72.0,
            Unit::Millimeter => 72.0 / 25.4,
            Unit::Point => 1.0,
        }
    }
}

/// Archival conformance level requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConformanceMode {
    #[default]
    None,
    /// PDF/A-1b (ISO 19005-1:2005)
    PdfA1b,
    /// PDF/A-2 (ISO 19005-2:2011)
    PdfA2,
    /// PDF/A-3 (ISO 19005-3:2012)
    PdfA3,
}

pub fn normalize_orientation(raw: &str) -> Result<Orientation, ValidationError> {
    match raw.to_lowercase().as_str() {
        "l" | "landscape" => Ok(Orientation::Landscape),
        "p" | "portrait" => Ok(Orientation::Portrait),
        _ => Err(ValidationError::InvalidOrientation(raw.to_string())),
    }
}

pub fn normalize_unit(raw: &str) -> Result<Unit, ValidationError> {
    match raw.to_lowercase().as_str() {
        "cm" | "centimeter" => Ok(Unit::Centimeter),
        "in" | "inch" => Ok(Unit::Inch),
        "mm" | "millimeter" => Ok(Unit::Millimeter),
        "pt" | "point" => Ok(Unit::Point),
        _ => Err(ValidationError::InvalidUnit(raw.to_string())),
    }
}

/// Upper-case `raw` and require it to name a known page format.
pub fn normalize_format(raw: &str) -> Result<String, ValidationError> {
    let upper = raw.to_uppercase();
    match page_formats::lookup(&upper) {
        Some(format) => Ok(format.name.to_string()),
        None => Err(ValidationError::InvalidFormat(raw.to_string())),
    }
}

pub fn normalize_encoding(raw: &str) -> Result<String, ValidationError> {
    let canonical = match raw.to_lowercase().as_str() {
        "utf-8" | "utf8" => "UTF-8",
        "iso-8859-1" | "latin1" => "ISO-8859-1",
        "windows-1252" | "cp1252" => "WINDOWS-1252",
        _ => return Err(ValidationError::InvalidEncoding(raw.to_string())),
    };
    Ok(canonical.to_string())
}

pub fn normalize_conformance(raw: &str) -> Result<ConformanceMode, ValidationError> {
    match raw.to_lowercase().as_str() {
        "" | "none" | "false" | "0" => Ok(ConformanceMode::None),
        "1" | "a1b" | "pdfa1b" | "pdf/a-1b" => Ok(ConformanceMode::PdfA1b),
        "2" | "a2" | "pdfa2" | "pdf/a-2" => Ok(ConformanceMode::PdfA2),
        "3" | "a3" | "pdfa3" | "pdf/a-3" => Ok(ConformanceMode::PdfA3),
        _ => Err(ValidationError::InvalidConformance(raw.to_string())),
    }
}

impl FromStr for Orientation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_orientation(s)
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_unit(s)
    }
}

impl FromStr for ConformanceMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_conformance(s)
    }
}

/// Unvalidated options, e.g. as read from a JSON file or CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    pub orientation: String,
    pub unit: String,
    pub format: String,
    pub use_unicode: bool,
    pub encoding: String,
    pub conformance: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            orientation: "portrait".to_string(),
            unit: "mm".to_string(),
            format: "A4".to_string(),
            use_unicode: true,
            encoding: "UTF-8".to_string(),
            conformance: "none".to_string(),
        }
    }
}

impl DocumentOptions {
    /// Validate every field, failing on the first invalid one.
    pub fn validate(&self) -> Result<DocumentConfig, ValidationError> {
        Ok(DocumentConfig {
            orientation: normalize_orientation(&self.orientation)?,
            unit: normalize_unit(&self.unit)?,
            page_format: normalize_format(&self.format)?,
            use_unicode: self.use_unicode,
            encoding: normalize_encoding(&self.encoding)?,
            conformance: normalize_conformance(&self.conformance)?,
        })
    }

    /// Deserialise from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Validated, immutable configuration.
///
/// Only obtainable through [`DocumentOptions::validate`] or
/// [`DocumentConfig::default`], so every field is in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentConfig {
    orientation: Orientation,
    unit: Unit,
    page_format: String,
    use_unicode: bool,
    encoding: String,
    conformance: ConformanceMode,
}

impl Default for DocumentConfig {
    /// A4 portrait, millimetres, UTF-8, no conformance mode.
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            unit: Unit::Millimeter,
            page_format: "A4".to_string(),
            use_unicode: true,
            encoding: "UTF-8".to_string(),
            conformance: ConformanceMode::None,
        }
    }
}

impl DocumentConfig {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn page_format(&self) -> &str {
        &self.page_format
    }

    pub fn use_unicode(&self) -> bool {
        self.use_unicode
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn conformance(&self) -> ConformanceMode {
        self.conformance
    }

    /// Page `(width, height)` in points after applying orientation.
    pub fn page_size_pt(&self) -> (f32, f32) {
        // page_format is canonical, so the lookup only misses if the table changes.
        let (w, h) = page_formats::lookup(&self.page_format)
            .map(|f| (f.width_pt, f.height_pt))
            .unwrap_or((595.276, 841.890));
        let (short, long) = if w <= h { (w, h) } else { (h, w) };
        match self.orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }

    /// Page `(width, height)` in the configured unit.
    pub fn page_size(&self) -> (f32, f32) {
        let (w, h) = self.page_size_pt();
        let k = self.unit.points_per_unit();
        (w / k, h / k)
    }
}
