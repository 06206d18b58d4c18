//! Ordinal labels shared by every scoring method
//!
//! All three methods (Nutri-Score, ELECTRE TRI, SuperNutri-Score) end in the same
//! five-class scale, A (best) to E (worst).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal grade, totally ordered `A < B < C < D < E` (A = best)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrdinalLabel {
    A,
    B,
    C,
    D,
    E,
}

impl OrdinalLabel {
    /// All labels in order, best first
    pub const ALL: [OrdinalLabel; 5] = [
        OrdinalLabel::A,
        OrdinalLabel::B,
        OrdinalLabel::C,
        OrdinalLabel::D,
        OrdinalLabel::E,
    ];

    /// Position on the scale (A = 0 .. E = 4)
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
        }
    }

    pub const fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }

    /// Display colour used by the official Nutri-Score palette
    pub const fn hex_colour(self) -> &'static str {
        match self {
            Self::A => "#038141",
            Self::B => "#85BB2F",
            Self::C => "#FECB02",
            Self::D => "#EE8100",
            Self::E => "#E63E11",
        }
    }

    /// Parse a label as found in source tables and classifier output.
    ///
    /// Decorative quote marks (`A'`, `"B"`, `’C`) and surrounding whitespace are removed
    /// before matching. Returns `None` for anything outside A–E.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '\'' | '"' | '\u{2019}' | '\u{2032}'))
            .collect();

        match cleaned.trim() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            _ => None,
        }
    }
}

impl fmt::Display for OrdinalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.letter())
    }
}

impl FromStr for OrdinalLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| format!("not an ordinal label: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(OrdinalLabel::A < OrdinalLabel::B);
        assert!(OrdinalLabel::D < OrdinalLabel::E);
        let mut shuffled = vec![OrdinalLabel::C, OrdinalLabel::E, OrdinalLabel::A];
        shuffled.sort();
        assert_eq!(shuffled, vec![OrdinalLabel::A, OrdinalLabel::C, OrdinalLabel::E]);
    }

    #[test]
    fn test_parse_lenient_strips_markers() {
        assert_eq!(OrdinalLabel::parse_lenient("A'"), Some(OrdinalLabel::A));
        assert_eq!(OrdinalLabel::parse_lenient("  'D' "), Some(OrdinalLabel::D));
        assert_eq!(OrdinalLabel::parse_lenient(" E "), Some(OrdinalLabel::E));
        assert_eq!(OrdinalLabel::parse_lenient("\"B\""), Some(OrdinalLabel::B));
        assert_eq!(OrdinalLabel::parse_lenient("C\u{2019}"), Some(OrdinalLabel::C));
    }

    #[test]
    fn test_parse_lenient_rejects_unknown() {
        assert_eq!(OrdinalLabel::parse_lenient("F"), None);
        assert_eq!(OrdinalLabel::parse_lenient(""), None);
        assert_eq!(OrdinalLabel::parse_lenient("nan"), None);
        assert_eq!(OrdinalLabel::parse_lenient("a"), None);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, label) in OrdinalLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
        }
    }
}
