use crate::core::validate::{Rules, validate};
use crate::errors::AppResult;
use crate::models::{EntryForm, LogEntry};
use crate::store::LogStore;
use crate::store::audit;
use crate::ui::messages::success;
use crate::utils::mins2readable;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate the form, append the entry and record it in the audit trail.
    pub fn apply(store: &LogStore, rules: &Rules, form: &EntryForm) -> AppResult<LogEntry> {
        let entry = validate(form, rules)?;
        let count = store.append(&entry)?;

        let overnight = if entry.end < entry.start {
            " (overnight)"
        } else {
            ""
        };

        success(format!(
            "Logged {} on {}: {} → {}{} = {} ({:.2} h). {} entries in '{}'.",
            entry.machine,
            entry.date,
            entry.start.format("%H:%M"),
            entry.end.format("%H:%M"),
            overnight,
            mins2readable(entry.total_minutes),
            entry.total_hours,
            count,
            store.table_name()
        ));

        audit::record_or_warn(
            store.path(),
            "add",
            &entry.machine,
            &format!(
                "{} {}-{} {:.2}h project={} operator={}",
                entry.date,
                entry.start.format("%H:%M"),
                entry.end.format("%H:%M"),
                entry.total_hours,
                entry.project,
                entry.operator
            ),
        );

        Ok(entry)
    }
}
