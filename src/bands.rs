//! Resistance band scale - shared between the recommender and the input controls

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Resistance band, ordered weakest to strongest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    #[serde(rename = "No Band")]
    NoBand,
    Green,
    Blue,
    Orange,
    Red,
    Purple,
}

impl Band {
    /// All bands in strength order, as offered by the band selector
    pub fn all() -> &'static [Band] {
        &[
            Band::NoBand,
            Band::Green,
            Band::Blue,
            Band::Orange,
            Band::Red,
            Band::Purple,
        ]
    }

    /// 0-based rank on the strength scale
    pub fn strength(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::NoBand => "No Band",
            Band::Green => "Green",
            Band::Blue => "Blue",
            Band::Orange => "Orange",
            Band::Red => "Red",
            Band::Purple => "Purple",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Band {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "no band" | "no-band" | "no_band" | "none" => return Ok(Band::NoBand),
            _ => {}
        }

        match Band::all()
            .iter()
            .find(|band| band.label().to_lowercase() == normalized)
        {
            Some(band) => Ok(*band),
            None => bail!(
                "unknown band '{}', expected one of: {}",
                s,
                Band::all().iter().map(|b| b.label()).collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_strength_ordered() {
        let bands = Band::all();
        assert_eq!(bands.len(), 6);
        for pair in bands.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].strength() < pair[1].strength());
        }
        assert_eq!(bands[0], Band::NoBand);
        assert_eq!(bands[5], Band::Purple);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Band::NoBand.to_string(), "No Band");
        assert_eq!(Band::Orange.to_string(), "Orange");
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("green".parse::<Band>().unwrap(), Band::Green);
        assert_eq!("  PURPLE ".parse::<Band>().unwrap(), Band::Purple);
        assert_eq!("No Band".parse::<Band>().unwrap(), Band::NoBand);
        assert_eq!("none".parse::<Band>().unwrap(), Band::NoBand);
        assert_eq!("no-band".parse::<Band>().unwrap(), Band::NoBand);
    }

    #[test]
    fn test_parse_unknown_band() {
        let err = "yellow".parse::<Band>().unwrap_err();
        assert!(err.to_string().contains("unknown band 'yellow'"));
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Band::NoBand).unwrap();
        assert_eq!(json, "\"No Band\"");
        let band: Band = serde_json::from_str("\"Red\"").unwrap();
        assert_eq!(band, Band::Red);
    }
}
