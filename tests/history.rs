use std::path::Path;
use std::time::Duration;

use vigil::history::RunHistory;

fn write_run(runs_dir: &Path, name: &str, csv: Option<&str>) {
    let run_dir = runs_dir.join(name);
    std::fs::create_dir_all(&run_dir).unwrap();
    if let Some(content) = csv {
        std::fs::write(run_dir.join("vulnerabilities.csv"), content).unwrap();
    }
}

#[tokio::test]
async fn test_vuln_count_subtracts_header_row() {
    let tmp = tempfile::tempdir().unwrap();
    let mut csv = String::from("id,title,severity\n");
    for i in 0..7 {
        csv.push_str(&format!("v{i},Finding {i},low\n"));
    }
    write_run(tmp.path(), "seven-findings", Some(&csv));

    let history = RunHistory::new(tmp.path().to_path_buf());
    let runs = history.list_runs().await;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].vuln_count, 7);
}

#[tokio::test]
async fn test_vuln_count_defaults_for_missing_or_empty_index() {
    let tmp = tempfile::tempdir().unwrap();
    write_run(tmp.path(), "no-index", None);
    write_run(tmp.path(), "empty-index", Some(""));

    let history = RunHistory::new(tmp.path().to_path_buf());
    let runs = history.list_runs().await;
    assert_eq!(runs.len(), 2);
    // Neither entry may go negative or fail the listing.
    assert!(runs.iter().all(|r| r.vuln_count == 0));
    assert!(runs.iter().all(|r| r.status == "completed"));
}

#[tokio::test]
async fn test_list_runs_orders_newest_first() {
    let tmp = tempfile::tempdir().unwrap();
    for name in ["oldest", "middle", "newest"] {
        write_run(tmp.path(), name, Some("id,title,severity\n"));
        // Distinct mtimes; directory timestamps are the only ordering signal.
        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    let history = RunHistory::new(tmp.path().to_path_buf());
    let runs = history.list_runs().await;
    let names: Vec<&str> = runs.iter().map(|r| r.run_id.as_str()).collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_list_runs_orders_sub_second_mtimes_within_one_second() {
    let tmp = tempfile::tempdir().unwrap();
    let base = std::time::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    // Three runs inside the same wall-clock second, one on the exact second
    // boundary; ordering must follow the instants themselves.
    let stamps = [
        ("on-the-second", base),
        ("half-past", base + Duration::from_millis(500)),
        ("nearly-next", base + Duration::from_nanos(999_999_999)),
    ];
    for (name, mtime) in stamps {
        write_run(tmp.path(), name, None);
        let dir = std::fs::File::open(tmp.path().join(name)).unwrap();
        dir.set_modified(mtime).unwrap();
    }

    let history = RunHistory::new(tmp.path().to_path_buf());
    let runs = history.list_runs().await;
    let names: Vec<&str> = runs.iter().map(|r| r.run_id.as_str()).collect();
    assert_eq!(names, vec!["nearly-next", "half-past", "on-the-second"]);
}

#[tokio::test]
async fn test_list_runs_missing_root_is_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let history = RunHistory::new(tmp.path().join("nonexistent"));
    assert!(history.list_runs().await.is_empty());
}

#[tokio::test]
async fn test_list_runs_ignores_stray_files() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("README.txt"), "not a run").unwrap();
    write_run(tmp.path(), "real-run", None);

    let history = RunHistory::new(tmp.path().to_path_buf());
    let runs = history.list_runs().await;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, "real-run");
}

#[tokio::test]
async fn test_run_details_reconstructs_documents() {
    let tmp = tempfile::tempdir().unwrap();
    let docs = tmp.path().join("audit-7").join("vulnerabilities");
    std::fs::create_dir_all(&docs).unwrap();
    std::fs::write(docs.join("a.md"), "alpha finding body").unwrap();
    std::fs::write(docs.join("b.md"), "beta finding body").unwrap();
    std::fs::write(docs.join("notes.txt"), "ignored").unwrap();

    let history = RunHistory::new(tmp.path().to_path_buf());
    let detail = history.get_run_details("audit-7").await.unwrap();

    assert!(!detail.is_running);
    assert!(detail.logs.is_empty());
    assert!(detail.stats.is_none());
    assert_eq!(detail.vulnerabilities.len(), 2);

    let a = &detail.vulnerabilities[0];
    assert_eq!(a.id, "a");
    assert_eq!(a.title, "a");
    assert_eq!(a.severity, "unknown");
    assert_eq!(a.content, "alpha finding body");
    assert_eq!(detail.vulnerabilities[1].content, "beta finding body");
}

#[tokio::test]
async fn test_run_details_unknown_run_is_none() {
    let tmp = tempfile::tempdir().unwrap();
    let history = RunHistory::new(tmp.path().to_path_buf());
    assert!(history.get_run_details("missing").await.is_none());
}

#[tokio::test]
async fn test_run_details_rejects_path_escapes() {
    let tmp = tempfile::tempdir().unwrap();
    write_run(tmp.path(), "legit", None);

    let history = RunHistory::new(tmp.path().to_path_buf());
    assert!(history.get_run_details("../legit").await.is_none());
    assert!(history.get_run_details("a/b").await.is_none());
    assert!(history.get_run_details("").await.is_none());
}

#[tokio::test]
async fn test_run_details_skips_unreadable_documents() {
    let tmp = tempfile::tempdir().unwrap();
    let docs = tmp.path().join("partial").join("vulnerabilities");
    std::fs::create_dir_all(&docs).unwrap();
    std::fs::write(docs.join("good.md"), "readable").unwrap();
    // A directory with a .md name cannot be read as a document.
    std::fs::create_dir(docs.join("bad.md")).unwrap();

    let history = RunHistory::new(tmp.path().to_path_buf());
    let detail = history.get_run_details("partial").await.unwrap();
    assert_eq!(detail.vulnerabilities.len(), 1);
    assert_eq!(detail.vulnerabilities[0].id, "good");
}

#[tokio::test]
async fn test_run_details_without_documents_folder() {
    let tmp = tempfile::tempdir().unwrap();
    write_run(tmp.path(), "index-only", Some("id,title,severity\nv0,Something,high\n"));

    let history = RunHistory::new(tmp.path().to_path_buf());
    let detail = history.get_run_details("index-only").await.unwrap();
    assert!(detail.vulnerabilities.is_empty());
}
