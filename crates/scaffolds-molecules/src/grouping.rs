//! Merging molecules that share a scaffold.

use indexmap::IndexMap;
use scaffolds_common::error::{Result, ScaffoldError};
use std::path::Path;
use tracing::info;

use crate::mode::ScaffoldMode;
use crate::repair::strip_ligand_suffix;

/// A molecule in a scaffold group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldMember {
    /// Position among the data rows of the scaffold table.
    pub index: usize,
    pub id: String,
    pub structure: String,
}

/// Scaffold key → members, ordered by ascending member count.
///
/// Groups of equal size keep the order in which their key first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldGroups {
    groups: IndexMap<String, Vec<ScaffoldMember>>,
}

impl ScaffoldGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, scaffold: &str) -> Option<&[ScaffoldMember]> {
        self.groups.get(scaffold).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ScaffoldMember])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total number of grouped molecules.
    pub fn member_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Group the rows of a scaffold table by the key in `mode`'s column.
///
/// The first line is the header. A row too short for the column fails the whole call.
pub fn group_table(table: &str, mode: ScaffoldMode) -> Result<ScaffoldGroups> {
    let column = mode.column();
    let mut groups: IndexMap<String, Vec<ScaffoldMember>> = IndexMap::new();
    let mut index = 0;

    for (line_no, line) in table.lines().enumerate().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() <= column {
            return Err(ScaffoldError::DecompositionOutput {
                line: line_no + 1,
                reason: format!(
                    "{} needs {} columns, found {}",
                    mode,
                    column + 1,
                    fields.len()
                ),
            });
        }

        groups
            .entry(fields[column].to_string())
            .or_default()
            .push(ScaffoldMember {
                index,
                id: strip_ligand_suffix(fields[0]).to_string(),
                structure: fields[1].to_string(),
            });
        index += 1;
    }

    // IndexMap::sort_by is stable, so ties stay in first-seen order.
    groups.sort_by(|_, a, _, b| a.len().cmp(&b.len()));
    Ok(ScaffoldGroups { groups })
}

/// Read a scaffold table and group it. A missing table yields no groups.
pub async fn group_by_scaffold(table_path: Option<&Path>, mode: ScaffoldMode) -> Result<ScaffoldGroups> {
    info!("Merging molecules with same scaffold ({})...", mode);
    let Some(path) = table_path else {
        return Ok(ScaffoldGroups::default());
    };
    let table = tokio::fs::read_to_string(path).await?;
    let groups = group_table(&table, mode)?;
    info!("{} molecules in {} scaffold groups", groups.member_count(), groups.len());
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "NAME SMILES R1 R2 M1 M2 O1 O2 O3 S1 S2 S3 S4 S5";

    fn row(id: &str, structure: &str, keys: [&str; 12]) -> String {
        format!("{} {} {}", id, structure, keys.join(" "))
    }

    fn uniform(id: &str, structure: &str, key: &str) -> String {
        row(id, structure, [key; 12])
    }

    #[test]
    fn test_shared_key_forms_one_group() {
        let table = [
            HEADER.to_string(),
            uniform("ID1", "c1ccccc1O", "c1ccccc1"),
            uniform("ID2", "c1ccccc1N", "c1ccccc1"),
        ]
        .join("\n");

        let groups = group_table(&table, ScaffoldMode::RingsWithLinkers1).unwrap();
        assert_eq!(groups.len(), 1);
        let members = groups.get("c1ccccc1").unwrap();
        assert_eq!(members[0], ScaffoldMember { index: 0, id: "ID1".into(), structure: "c1ccccc1O".into() });
        assert_eq!(members[1].index, 1);
        assert_eq!(members[1].id, "ID2");
    }

    #[test]
    fn test_mode_selects_column() {
        let mut keys = ["x"; 12];
        keys[ScaffoldMode::Oprea2.index()] = "picked";
        let table = format!("{}\n{}\n", HEADER, row("ID1", "CCO", keys));

        let groups = group_table(&table, ScaffoldMode::Oprea2).unwrap();
        assert!(groups.get("picked").is_some());
        let groups = group_table(&table, ScaffoldMode::Murcko1).unwrap();
        assert!(groups.get("x").is_some());
    }

    #[test]
    fn test_ligand_suffix_is_stripped() {
        let table = format!("{}\n{}\n", HEADER, uniform("CHEMBL12_ligand", "CCO", "k"));
        let groups = group_table(&table, ScaffoldMode::Murcko2).unwrap();
        assert_eq!(groups.get("k").unwrap()[0].id, "CHEMBL12");
    }

    #[test]
    fn test_groups_ranked_by_size_with_stable_ties() {
        let table = [
            HEADER.to_string(),
            uniform("A1", "s", "big"),
            uniform("B1", "s", "tie1"),
            uniform("A2", "s", "big"),
            uniform("C1", "s", "tie2"),
            uniform("A3", "s", "big"),
            uniform("D1", "s", "pair"),
            uniform("D2", "s", "pair"),
        ]
        .join("\n");

        let groups = group_table(&table, ScaffoldMode::Schuffenhauer1).unwrap();
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["tie1", "tie2", "pair", "big"]);

        let sizes: Vec<usize> = groups.iter().map(|(_, m)| m.len()).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(groups.member_count(), 7);

        let big: Vec<usize> = groups.get("big").unwrap().iter().map(|m| m.index).collect();
        assert_eq!(big, vec![0, 2, 4]);
    }

    #[test]
    fn test_short_row_is_fatal() {
        let table = format!("{}\n{}\nID2 CCC onlyone\n", HEADER, uniform("ID1", "CCO", "k"));
        let err = group_table(&table, ScaffoldMode::RingsWithLinkers2).unwrap_err();
        assert!(matches!(err, ScaffoldError::DecompositionOutput { line: 3, .. }));
    }

    #[test]
    fn test_header_only_and_blank_lines() {
        assert!(group_table(HEADER, ScaffoldMode::Murcko1).unwrap().is_empty());
        assert!(group_table("", ScaffoldMode::Murcko1).unwrap().is_empty());
        let table = format!("{}\n\n{}\n", HEADER, uniform("ID1", "CCO", "k"));
        assert_eq!(group_table(&table, ScaffoldMode::Murcko1).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_table_yields_no_groups() {
        let groups = group_by_scaffold(None, ScaffoldMode::Murcko1).await.unwrap();
        assert!(groups.is_empty());
    }
}
