use std::path::Path;

use crate::errors::VigilError;
use crate::models::VulnerabilityRecord;

/// Name of the tabular finding index inside a run directory.
pub const FINDINGS_INDEX: &str = "vulnerabilities.csv";
/// Name of the per-finding document folder inside a run directory.
pub const FINDINGS_DIR: &str = "vulnerabilities";

/// Write the persisted layout for one run: a header-plus-rows finding index
/// and one markdown document per finding.
pub async fn persist_run(
    run_dir: &Path,
    vulnerabilities: &[VulnerabilityRecord],
) -> Result<(), VigilError> {
    let docs_dir = run_dir.join(FINDINGS_DIR);
    tokio::fs::create_dir_all(&docs_dir).await?;

    let mut index = String::from("id,title,severity\n");
    for record in vulnerabilities {
        index.push_str(&format!(
            "{},{},{}\n",
            csv_field(&record.id),
            csv_field(&record.title),
            csv_field(&record.severity),
        ));
    }
    tokio::fs::write(run_dir.join(FINDINGS_INDEX), index).await?;

    for record in vulnerabilities {
        let path = docs_dir.join(format!("{}.md", document_stem(&record.id)));
        tokio::fs::write(&path, &record.content).await?;
    }

    Ok(())
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Finding ids become filenames; strip path separators so a hostile id
/// cannot escape the run directory.
fn document_stem(id: &str) -> String {
    id.chars()
        .map(|c| if c == '/' || c == '\\' || c == '.' { '_' } else { c })
        .collect()
}
