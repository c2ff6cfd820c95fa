use crate::errors::AppResult;
use crate::store::audit::{self, AuditRecord};
use ansi_term::Colour;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid regex"));

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// Colour per audited operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "migrate" => Colour::Purple,
        "backup" => Colour::Blue,
        "export" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)` with only the operation coloured, cut to `max` visible chars.
fn format_op_target(rec: &AuditRecord, max: usize) -> String {
    let color = color_for_operation(&rec.operation);
    let plain = if rec.target.is_empty() {
        rec.operation.clone()
    } else {
        format!("{} ({})", rec.operation, rec.target)
    };

    let visible = if plain.chars().count() > max {
        let mut s: String = plain.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(storage: &Path) -> AppResult<()> {
        let entries = audit::read_all(storage)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty ({})", audit::audit_path(storage).display());
            return Ok(());
        }

        let formatted: Vec<String> = entries.iter().map(|r| format_op_target(r, 60)).collect();
        let op_w = formatted
            .iter()
            .map(|s| strip_ansi(s).chars().count())
            .max()
            .unwrap_or(10);
        let date_w = entries.iter().map(|r| r.date.len()).max().unwrap_or(0);
        let id_w = entries.len().to_string().len();

        println!("📜 Internal log:\n");

        for (i, (rec, op_target)) in entries.iter().zip(formatted.iter()).enumerate() {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(op_target).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                i + 1,
                rec.date,
                op_target,
                padding,
                rec.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_targets_are_cut_without_counting_colour_codes() {
        let rec = AuditRecord {
            date: "2025-01-01T00:00:00+00:00".into(),
            operation: "backup".into(),
            target: "/very/long/path/".repeat(10),
            message: "Backup created".into(),
        };
        let s = format_op_target(&rec, 30);
        let visible = strip_ansi(&s);
        assert_eq!(visible.chars().count(), 30);
        assert!(visible.starts_with("backup ("));
        assert!(visible.ends_with("..."));
    }
}
