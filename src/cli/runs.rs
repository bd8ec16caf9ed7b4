use std::path::PathBuf;

use crate::errors::VigilError;
use crate::history::RunHistory;
use super::commands::RunsArgs;

pub async fn handle_runs(args: RunsArgs) -> Result<(), VigilError> {
    let history = RunHistory::new(PathBuf::from(&args.runs_dir));
    let runs = history.list_runs().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&runs)?);
        return Ok(());
    }

    if runs.is_empty() {
        println!("No persisted runs under {}", args.runs_dir);
        return Ok(());
    }

    println!("{:<30} {:<28} {:<10} {}", "RUN", "STARTED", "STATUS", "FINDINGS");
    for run in runs {
        println!(
            "{:<30} {:<28} {:<10} {}",
            run.run_name, run.start_time, run.status, run.vuln_count,
        );
    }
    Ok(())
}
