//! Value-membership filtering used by the list, summary and report views.

/// Values chosen for one column. `All` is the default: every observed value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(Vec<String>),
}

impl Selection {
    /// An empty list of CLI values means "no restriction".
    pub fn from_values(values: &[String]) -> Self {
        let cleaned: Vec<String> = values
            .iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if cleaned.is_empty() {
            Selection::All
        } else {
            Selection::Only(cleaned)
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(values) => values.iter().any(|v| v == value.trim()),
        }
    }

    /// Values of `observed` that are selected, in observed order.
    pub fn resolve(&self, observed: &[String]) -> Vec<String> {
        observed
            .iter()
            .filter(|v| self.matches(v))
            .cloned()
            .collect()
    }
}

/// Distinct non-blank values of a column, in first-seen order.
pub fn unique_values<T, F>(items: &[T], column: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let v = column(item).trim();
        if !v.is_empty() && !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Items whose column value is selected, original order kept.
pub fn filter<'a, T, F>(items: &'a [T], column: F, selection: &Selection) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .filter(|item| selection.matches(column(item)))
        .collect()
}
