//! Compass direction and distance extraction.

use crate::locality::normalize_locality;
use regex::Regex;
use std::sync::LazyLock;

/// One of the eight compass points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compass {
    /// N
    North,
    /// NE
    Northeast,
    /// E
    East,
    /// SE
    Southeast,
    /// S
    South,
    /// SW
    Southwest,
    /// W
    West,
    /// NW
    Northwest,
}

impl Compass {
    /// Upper-case abbreviation, as written in output tables.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::Northeast => "NE",
            Self::East => "E",
            Self::Southeast => "SE",
            Self::South => "S",
            Self::Southwest => "SW",
            Self::West => "W",
            Self::Northwest => "NW",
        }
    }
}

impl std::fmt::Display for Compass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of an extracted distance. Units are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    /// Kilometers.
    Km,
    /// Statute miles.
    Miles,
    /// Meters.
    Meters,
    /// Feet.
    Feet,
    /// Yards.
    Yards,
}

impl DistanceUnit {
    /// Short unit label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Km => "km",
            Self::Miles => "mi",
            Self::Meters => "m",
            Self::Feet => "ft",
            Self::Yards => "yd",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "km" | "kilometers" => Some(Self::Km),
            "mi" | "miles" => Some(Self::Miles),
            "m" | "meters" => Some(Self::Meters),
            "ft" | "feet" => Some(Self::Feet),
            "yd" | "yards" => Some(Self::Yards),
            _ => None,
        }
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A distance value with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    /// Numeric value as written.
    pub value: f64,
    /// Unit as written.
    pub unit: DistanceUnit,
}

/// Normalized locality text plus the features extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalityFeatures {
    /// Output of [`normalize_locality`].
    pub normalized: String,
    /// First compass direction, by priority.
    pub compass: Option<Compass>,
    /// First distance expression.
    pub distance: Option<Distance>,
}

impl LocalityFeatures {
    /// Normalize a raw locality and extract its features.
    pub fn from_locality(raw: Option<&str>) -> Self {
        let normalized = normalize_locality(raw);
        let compass = extract_compass(&normalized);
        let distance = extract_distance(&normalized);
        Self {
            normalized,
            compass,
            distance,
        }
    }
}

#[allow(clippy::expect_used)]
static COMPASS_PATTERNS: LazyLock<Vec<(Compass, Regex)>> = LazyLock::new(|| {
    [
        (Compass::North, r"(?i)\b(?:north|n)\b"),
        (Compass::Northeast, r"(?i)\b(?:northeast|ne)\b"),
        (Compass::East, r"(?i)\b(?:east|e)\b"),
        (Compass::Southeast, r"(?i)\b(?:southeast|se)\b"),
        (Compass::South, r"(?i)\b(?:south|s)\b"),
        (Compass::Southwest, r"(?i)\b(?:southwest|sw)\b"),
        (Compass::West, r"(?i)\b(?:west|w)\b"),
        (Compass::Northwest, r"(?i)\b(?:northwest|nw)\b"),
    ]
    .into_iter()
    .map(|(compass, pattern)| (compass, Regex::new(pattern).expect("compass pattern is valid")))
    .collect()
});

#[allow(clippy::expect_used)]
static DISTANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(kilometers|km|miles|mi|meters|m|feet|ft|yards|yd)\b",
    )
    .expect("distance pattern is valid")
});

/// Find the compass direction of a locality.
///
/// Directions are tried in the fixed order N, NE, E, SE, S, SW, W, NW and the
/// first one present anywhere in the text wins.
pub fn extract_compass(text: &str) -> Option<Compass> {
    COMPASS_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(compass, _)| *compass)
}

/// Find the first `<number> <unit>` expression in a locality.
pub fn extract_distance(text: &str) -> Option<Distance> {
    DISTANCE_RE.captures_iter(text).find_map(|caps| {
        let value: f64 = caps[1].parse().ok()?;
        let unit = DistanceUnit::from_label(&caps[2].to_lowercase())?;
        Some(Distance { value, unit })
    })
}
