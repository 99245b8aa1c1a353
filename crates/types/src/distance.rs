//! Units of one-dimensional space and the distance literal syntax.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::Sp;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistanceError {
    #[error("missing unit")]
    MissingUnit,
    #[error("unknown unit {0}")]
    UnknownUnit(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
}

/// Units to measure 1-dimensional space.
///
/// The point is the base PDF unit, equivalent to TeX's "big point": 72 to the
/// inch, not the printer's 72.27.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceUnit {
    /// Point, 1/72 inch.
    Pt,
    /// Pica, 12 points.
    Pc,
    /// Inch.
    In,
    /// Centimeter, 2.54 cm to the inch.
    Cm,
    /// Millimeter.
    Mm,
    /// Scaled point, about 5 nm. All internal arithmetic uses this.
    Sp,
}

impl SpaceUnit {
    /// Scaled points per unit as an exact rational, so that `2.54 cm` and
    /// `1 in` convert to the same number of scaled points.
    const fn factor(self) -> (i64, i64) {
        match self {
            SpaceUnit::Pt => (65_536, 1),
            SpaceUnit::Pc => (65_536 * 12, 1),
            SpaceUnit::In => (65_536 * 72, 1),
            SpaceUnit::Cm => (65_536 * 7_200, 254),
            SpaceUnit::Mm => (65_536 * 720, 254),
            SpaceUnit::Sp => (1, 1),
        }
    }

    /// Convert from this unit to scaled points, rounding to the nearest sp.
    pub fn to_sp(self, distance: f64) -> Sp {
        let (num, den) = self.factor();
        (distance * num as f64 / den as f64).round() as Sp
    }

    /// Convert from scaled points to this unit.
    pub fn from_sp(self, sp: Sp) -> f64 {
        let (num, den) = self.factor();
        sp as f64 * den as f64 / num as f64
    }

    /// The two-letter abbreviation, as used in distance literals.
    pub fn abbreviation(self) -> &'static str {
        match self {
            SpaceUnit::Pt => "pt",
            SpaceUnit::Pc => "pc",
            SpaceUnit::In => "in",
            SpaceUnit::Cm => "cm",
            SpaceUnit::Mm => "mm",
            SpaceUnit::Sp => "sp",
        }
    }

    fn from_abbreviation(s: &str) -> Option<SpaceUnit> {
        match s.to_ascii_lowercase().as_str() {
            "pt" => Some(SpaceUnit::Pt),
            "pc" => Some(SpaceUnit::Pc),
            "in" => Some(SpaceUnit::In),
            "cm" => Some(SpaceUnit::Cm),
            "mm" => Some(SpaceUnit::Mm),
            "sp" => Some(SpaceUnit::Sp),
            _ => None,
        }
    }
}

impl fmt::Display for SpaceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Parse a distance literal, such as `"2in"`, `"3.5 in"`, or `"-2 mm"`.
///
/// The number must parse as a (possibly signed) double. The unit must be one
/// of the two-letter abbreviations, upper or lower case, preceded by optional
/// whitespace. Anything after the unit is ignored.
pub fn parse_distance(s: &str) -> Result<Sp, DistanceError> {
    let mut chars = s.chars().peekable();

    // Read the number. None of our units start with an 'e', so exponents are
    // unambiguous.
    let mut number = String::new();
    while let Some(&ch) = chars.peek() {
        if ch == '-' || ch == '+' || ch.is_ascii_digit() || ch == 'e' || ch == 'E' || ch == '.' {
            number.push(ch);
            chars.next();
        } else {
            break;
        }
    }

    let value: f64 = number
        .parse()
        .map_err(|_| DistanceError::InvalidNumber(number.clone()))?;

    // Skip whitespace between the number and the unit.
    while matches!(chars.peek(), Some(ch) if ch.is_whitespace()) {
        chars.next();
    }

    // The unit is always exactly two letters.
    let unit_string: String = match (chars.next(), chars.next()) {
        (Some(a), Some(b)) => [a, b].iter().collect(),
        _ => return Err(DistanceError::MissingUnit),
    };

    let unit = SpaceUnit::from_abbreviation(&unit_string)
        .ok_or(DistanceError::UnknownUnit(unit_string))?;

    Ok(unit.to_sp(value))
}

/// Format a distance in the given unit so that [`parse_distance`] recovers it.
pub fn format_distance(sp: Sp, unit: SpaceUnit) -> String {
    format!("{}{}", unit.from_sp(sp), unit.abbreviation())
}

/// A scaled-point distance that deserializes from a literal like `"32pt"` or
/// `"2.5 cm"`. A bare number is taken to be in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Distance(pub Sp);

impl Distance {
    pub fn sp(self) -> Sp {
        self.0
    }
}

impl FromStr for Distance {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_distance(s).map(Distance)
    }
}

impl Serialize for Distance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_distance(self.0, SpaceUnit::Pt))
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DistanceVisitor;

        impl de::Visitor<'_> for DistanceVisitor {
            type Value = Distance;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a distance like '32pt' or '2.5 cm', or a number of points")
            }

            fn visit_str<E>(self, value: &str) -> Result<Distance, E>
            where
                E: de::Error,
            {
                value.parse().map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Distance, E>
            where
                E: de::Error,
            {
                Ok(Distance(SpaceUnit::Pt.to_sp(value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Distance, E>
            where
                E: de::Error,
            {
                Ok(Distance(SpaceUnit::Pt.to_sp(value as f64)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Distance, E>
            where
                E: de::Error,
            {
                Ok(Distance(SpaceUnit::Pt.to_sp(value as f64)))
            }
        }

        deserializer.deserialize_any(DistanceVisitor)
    }
}
