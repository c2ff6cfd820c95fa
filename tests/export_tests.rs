mod common;
use common::Sandbox;
use calamine::Reader;
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_csv_all() {
    let sb = Sandbox::new();
    sb.seed();
    let out = sb.out("log.csv");

    sb.mlog()
        .args(["export", "--format", "csv", "--out", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("date,start_time,end_time,total_minutes,total_hours,machine"));
    assert!(lines[1].starts_with("2025-03-03,08:00,12:00,240,4.0,CNC-1,P-100"));
    assert!(lines[3].contains("22:00,02:00,240"));
}

#[test]
fn test_export_json_period() {
    let sb = Sandbox::new();
    sb.seed();
    let out = sb.out("log.json");

    sb.mlog()
        .args(["export", "--format", "json", "--out", &out, "--period", "2025-04"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["machine"], "Mill-1");
    assert_eq!(rows[0]["total_minutes"], 60);
}

#[test]
fn test_export_xlsx() {
    let sb = Sandbox::new();
    sb.seed();
    let out = sb.out("log_export.xlsx");

    sb.mlog()
        .args(["export", "--format", "xlsx", "--out", &out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let mut wb = calamine::open_workbook_auto(&out).expect("open export");
    let range = wb.worksheet_range("Export").expect("export sheet");
    assert_eq!(range.height(), 5);
    assert_eq!(
        range.get_value((0, 5)).map(|v| v.to_string()),
        Some("Machine".into())
    );
    assert_eq!(
        range.get_value((1, 5)).map(|v| v.to_string()),
        Some("CNC-1".into())
    );
}

#[test]
fn test_export_empty_period_writes_nothing() {
    let sb = Sandbox::new();
    sb.seed();
    let out = sb.out("empty.csv");

    sb.mlog()
        .args(["export", "--format", "csv", "--out", &out, "--period", "2020"])
        .assert()
        .success()
        .stdout(contains("No entries found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let sb = Sandbox::new();
    sb.seed();

    sb.mlog()
        .args(["export", "--format", "csv", "--out", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_overwrite_needs_confirmation_or_force() {
    let sb = Sandbox::new();
    sb.seed();
    let out = sb.out("log.csv");
    fs::write(&out, "keep me").expect("write existing file");

    sb.mlog()
        .args(["export", "--format", "csv", "--out", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    sb.mlog()
        .args(["export", "--format", "csv", "--out", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").contains("CNC-1"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let sb = Sandbox::new();
    sb.seed();

    let plain = sb.out("backup/machine_log_copy.xlsx");
    sb.mlog()
        .args(["backup", "--out", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert_eq!(
        fs::read(&plain).expect("read backup"),
        fs::read(sb.workbook()).expect("read workbook")
    );

    let zipped = sb.out("archive.xlsx");
    sb.mlog()
        .args(["backup", "--out", &zipped, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    let zip_path = sb.root().join("archive.zip");
    assert!(zip_path.exists());
    assert!(!sb.root().join("archive.xlsx").exists());

    let archive = zip::ZipArchive::new(fs::File::open(zip_path).expect("open zip")).expect("zip");
    assert_eq!(archive.len(), 1);
}

#[test]
fn test_backup_zip_beside_workbook_keeps_entries() {
    let sb = Sandbox::new();
    sb.seed();

    let zipped = sb.out("machine_log.zip");
    sb.mlog()
        .args(["backup", "--out", &zipped, "--compress"])
        .assert()
        .success();

    assert!(sb.workbook().exists());
    sb.mlog()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Lathe"));

    sb.mlog()
        .args(["backup", "--out", &sb.workbook_str(), "--force"])
        .assert()
        .failure()
        .stderr(contains("is the workbook itself"));
    assert!(sb.workbook().exists());
}

#[test]
fn test_log_print_shows_audited_operations() {
    let sb = Sandbox::new();
    sb.seed();
    let out = sb.out("log.json");

    sb.mlog()
        .args(["export", "--format", "json", "--out", &out])
        .assert()
        .success();

    sb.mlog()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("init"))
        .stdout(contains("CNC-1"))
        .stdout(contains("4 entries as json"));
}

#[test]
fn test_log_print_empty() {
    let sb = Sandbox::new();

    sb.mlog()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log is empty"));
}
