//! Scaffold-definition methods reported by strip-it.

use std::fmt;
use std::str::FromStr;

/// One of the twelve scaffold definitions. Declaration order is the column order
/// of the strip-it output, starting at column 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaffoldMode {
    RingsWithLinkers1,
    RingsWithLinkers2,
    Murcko1,
    Murcko2,
    Oprea1,
    Oprea2,
    Oprea3,
    Schuffenhauer1,
    Schuffenhauer2,
    Schuffenhauer3,
    Schuffenhauer4,
    Schuffenhauer5,
}

/// Columns before the first scaffold column: id, then structure.
pub const LEADING_COLUMNS: usize = 2;

impl ScaffoldMode {
    pub const ALL: [ScaffoldMode; 12] = [
        ScaffoldMode::RingsWithLinkers1,
        ScaffoldMode::RingsWithLinkers2,
        ScaffoldMode::Murcko1,
        ScaffoldMode::Murcko2,
        ScaffoldMode::Oprea1,
        ScaffoldMode::Oprea2,
        ScaffoldMode::Oprea3,
        ScaffoldMode::Schuffenhauer1,
        ScaffoldMode::Schuffenhauer2,
        ScaffoldMode::Schuffenhauer3,
        ScaffoldMode::Schuffenhauer4,
        ScaffoldMode::Schuffenhauer5,
    ];

    /// Position in [`ScaffoldMode::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Scaffold table column holding this method's key.
    pub fn column(self) -> usize {
        LEADING_COLUMNS + self.index()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScaffoldMode::RingsWithLinkers1 => "RINGS_WITH_LINKERS_1",
            ScaffoldMode::RingsWithLinkers2 => "RINGS_WITH_LINKERS_2",
            ScaffoldMode::Murcko1 => "MURCKO_1",
            ScaffoldMode::Murcko2 => "MURCKO_2",
            ScaffoldMode::Oprea1 => "OPREA_1",
            ScaffoldMode::Oprea2 => "OPREA_2",
            ScaffoldMode::Oprea3 => "OPREA_3",
            ScaffoldMode::Schuffenhauer1 => "SCHUFFENHAUER_1",
            ScaffoldMode::Schuffenhauer2 => "SCHUFFENHAUER_2",
            ScaffoldMode::Schuffenhauer3 => "SCHUFFENHAUER_3",
            ScaffoldMode::Schuffenhauer4 => "SCHUFFENHAUER_4",
            ScaffoldMode::Schuffenhauer5 => "SCHUFFENHAUER_5",
        }
    }

    /// All accepted CLI tokens, in column order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.as_str()).collect()
    }
}

impl fmt::Display for ScaffoldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaffoldMode {
    type Err = String;

    /// Tokens are matched exactly; `murcko_1` is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("invalid mode '{}' (choose from {})", s, Self::names().join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_declaration_order() {
        assert_eq!(ScaffoldMode::RingsWithLinkers1.column(), 2);
        assert_eq!(ScaffoldMode::Murcko1.column(), 4);
        assert_eq!(ScaffoldMode::Schuffenhauer5.column(), 13);
        for (i, mode) in ScaffoldMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
    }

    #[test]
    fn test_parse_roundtrip_all_names() {
        for mode in ScaffoldMode::ALL {
            assert_eq!(mode.as_str().parse::<ScaffoldMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("murcko_1".parse::<ScaffoldMode>().is_err());
        assert!("MURCKO_3".parse::<ScaffoldMode>().is_err());
        let err = "BOGUS".parse::<ScaffoldMode>().unwrap_err();
        assert!(err.contains("SCHUFFENHAUER_5"));
    }
}
