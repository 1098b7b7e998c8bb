//! Text rendering of scaffold groups.

use scaffolds_common::error::Result;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::grouping::ScaffoldGroups;

/// Legend printed on the console ahead of the report.
pub const LEGEND: &str = "Scaffold:\n\t<ID>\t<SMILE>\n";

/// One block per group: `scaffold:`, a tab-indented `[index] id<TAB>structure`
/// line per member, then a blank line.
pub fn render(groups: &ScaffoldGroups) -> String {
    let mut out = String::new();
    for (scaffold, members) in groups.iter() {
        let _ = writeln!(out, "{}:", scaffold);
        for m in members {
            let _ = writeln!(out, "\t[{}] {}\t{}", m.index, m.id, m.structure);
        }
        out.push('\n');
    }
    out
}

/// Write the rendered report to `path`, replacing any previous contents.
pub async fn write_report(path: &Path, report: &str) -> Result<()> {
    info!("Writing results to {:?}", path);
    tokio::fs::write(path, report).await?;
    Ok(())
}
