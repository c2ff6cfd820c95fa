//! Acceptance checks for a new log entry.

use crate::core::duration;
use crate::errors::{AppError, AppResult};
use crate::models::{EntryForm, LogEntry};

#[derive(Debug, Clone, Copy)]
pub struct Rules {
    pub require_project: bool,
}

fn clean(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Check the form and build the entry, or list every problem found.
pub fn validate(form: &EntryForm, rules: &Rules) -> AppResult<LogEntry> {
    let mut problems = Vec::new();

    let machine = clean(Some(&form.machine));
    if machine.is_none() {
        problems.push("machine cannot be blank".to_string());
    }

    let operator = clean(Some(&form.operator));
    if operator.is_none() {
        problems.push("operator cannot be blank".to_string());
    }

    let project = clean(form.project.as_deref());
    if rules.require_project && project.is_none() {
        problems.push("project cannot be blank".to_string());
    }

    let elapsed = duration::compute(form.date, form.start, form.end);
    if elapsed.minutes <= 0 {
        problems.push(format!(
            "{} to {} is under one minute: zero-length entry",
            form.start.format("%H:%M:%S"),
            form.end.format("%H:%M:%S")
        ));
    }

    if !problems.is_empty() {
        return Err(AppError::Validation(problems));
    }

    Ok(LogEntry {
        date: form.date,
        start: form.start,
        end: form.end,
        total_minutes: elapsed.minutes,
        total_hours: elapsed.hours,
        machine: machine.unwrap_or_default(),
        project: project.unwrap_or_default(),
        material: clean(form.material.as_deref()),
        operator: operator.unwrap_or_default(),
        description: clean(form.description.as_deref()),
    })
}
