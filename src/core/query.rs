//! Selection of stored entries and grouping keys for the log views.

use crate::core::aggregate::{Group, Order, group_sum};
use crate::core::filter::{Selection, filter};
use crate::errors::{AppError, AppResult};
use crate::models::LogEntry;
use crate::utils::date::{DateRange, parse_period};
use clap::ValueEnum;

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub period: Option<DateRange>,
    pub machines: Selection,
    pub projects: Selection,
    pub operators: Selection,
}

impl EntryFilter {
    /// Build the filter from raw command-line values. `all` means no period.
    pub fn from_args(
        period: Option<&str>,
        machines: &[String],
        projects: &[String],
        operators: &[String],
    ) -> AppResult<Self> {
        let period = match period.map(str::trim) {
            None => None,
            Some(p) if p.eq_ignore_ascii_case("all") => None,
            Some(p) => Some(parse_period(p).map_err(AppError::InvalidPeriod)?),
        };

        Ok(Self {
            period,
            machines: Selection::from_values(machines),
            projects: Selection::from_values(projects),
            operators: Selection::from_values(operators),
        })
    }

    pub fn apply<'a>(&self, entries: &'a [LogEntry]) -> Vec<&'a LogEntry> {
        let in_period: Vec<&LogEntry> = entries
            .iter()
            .filter(|e| self.period.is_none_or(|p| p.contains(&e.date)))
            .collect();

        let by_machine: Vec<&LogEntry> = filter(&in_period, |e| e.machine.as_str(), &self.machines)
            .into_iter()
            .copied()
            .collect();
        let by_project: Vec<&LogEntry> =
            filter(&by_machine, |e| e.project.as_str(), &self.projects)
                .into_iter()
                .copied()
                .collect();
        filter(&by_project, |e| e.operator.as_str(), &self.operators)
            .into_iter()
            .copied()
            .collect()
    }
}

/// Column used to group log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogKey {
    Machine,
    Project,
    Operator,
    Material,
    Date,
    MachineProject,
}

impl LogKey {
    pub fn label(self) -> &'static str {
        match self {
            LogKey::Machine => "Machine",
            LogKey::Project => "Project",
            LogKey::Operator => "Operator",
            LogKey::Material => "Material",
            LogKey::Date => "Date",
            LogKey::MachineProject => "Machine / Project",
        }
    }

    pub fn key_of(self, e: &LogEntry) -> String {
        match self {
            LogKey::Machine => e.machine.clone(),
            LogKey::Project => or_none(&e.project),
            LogKey::Operator => e.operator.clone(),
            LogKey::Material => or_none(e.material.as_deref().unwrap_or_default()),
            LogKey::Date => e.date.format("%Y-%m-%d").to_string(),
            LogKey::MachineProject => format!("{} / {}", e.machine, or_none(&e.project)),
        }
    }
}

fn or_none(s: &str) -> String {
    if s.is_empty() {
        "(none)".to_string()
    } else {
        s.to_string()
    }
}

/// Hours per key, largest first.
pub fn summarize(entries: &[&LogEntry], key: LogKey) -> Vec<Group> {
    group_sum(
        entries.iter(),
        |e| key.key_of(e),
        |e| Some(e.total_hours),
        Order::Descending,
    )
}
