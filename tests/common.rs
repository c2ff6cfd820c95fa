#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Per-test home directory and workbook. Everything is removed on drop.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn workbook(&self) -> PathBuf {
        self.root().join("machine_log.xlsx")
    }

    pub fn workbook_str(&self) -> String {
        self.workbook().to_string_lossy().to_string()
    }

    /// Output file path inside the sandbox.
    pub fn out(&self, name: &str) -> String {
        self.root().join(name).to_string_lossy().to_string()
    }

    /// Write `~/.machlog/machlog.conf` for this sandbox.
    pub fn write_config(&self, yaml: &str) {
        let dir = self.root().join(".machlog");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("machlog.conf"), yaml).expect("write config");
    }

    /// `machlog --file <workbook> --test`, isolated from the real home.
    pub fn mlog(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("machlog");
        cmd.env("HOME", self.root())
            .env("APPDATA", self.root())
            .args(["--file", &self.workbook_str(), "--test"]);
        cmd
    }

    pub fn init(&self) {
        self.mlog().arg("init").assert().success();
    }

    /// `add <date> --start --end --machine --project --operator`
    pub fn add(&self, date: &str, start: &str, end: &str, machine: &str, project: &str, operator: &str) {
        self.mlog()
            .args([
                "add", date, "--start", start, "--end", end, "--machine", machine, "--project",
                project, "--operator", operator,
            ])
            .assert()
            .success();
    }

    /// Small dataset shared by the list / summary / export tests.
    pub fn seed(&self) {
        self.init();
        self.add("2025-03-03", "08:00", "12:00", "CNC-1", "P-100", "Quang");
        self.add("2025-03-03", "13:00", "14:30", "Lathe-2", "P-100", "Minh");
        self.add("2025-03-10", "22:00", "02:00", "CNC-1", "P-200", "Quang");
        self.add("2025-04-01", "09:00", "10:00", "Mill-1", "P-200", "Lan");
    }
}

/// Write a workbook with one sheet per `(name, rows)`; the first row is the header.
pub fn write_sheets(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    for (name, rows) in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(*name).expect("sheet name");
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                match value.parse::<f64>() {
                    Ok(n) if r > 0 => ws.write_number(r as u32, c as u16, n),
                    _ => ws.write_string(r as u32, c as u16, *value),
                }
                .expect("write cell");
            }
        }
    }
    workbook.save(path).expect("save workbook");
}
