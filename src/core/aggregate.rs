//! Group-by-and-sum over log entries or report rows.

use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    pub total: f64,
}

/// Output order of [`group_sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Largest total first; ties keep first-seen order.
    Descending,
    /// Ascending by key.
    Key,
    /// First-seen order.
    Insertion,
}

/// Sum `measure` per distinct `key`.
///
/// An item with no measure still registers its key, so a machine whose
/// minutes are all missing shows up with 0 instead of disappearing.
pub fn group_sum<I, T, K, M>(items: I, key: K, measure: M, order: Order) -> Vec<Group>
where
    I: IntoIterator<Item = T>,
    K: Fn(&T) -> String,
    M: Fn(&T) -> Option<f64>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for item in items {
        let k = key(&item);
        let i = *index.entry(k.clone()).or_insert_with(|| {
            groups.push(Group { key: k, total: 0.0 });
            groups.len() - 1
        });
        if let Some(v) = measure(&item) {
            groups[i].total += v;
        }
    }

    match order {
        Order::Descending => groups.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
        }),
        Order::Key => groups.sort_by(|a, b| a.key.cmp(&b.key)),
        Order::Insertion => {}
    }

    groups
}

pub fn grand_total(groups: &[Group]) -> f64 {
    groups.iter().map(|g| g.total).sum()
}

/// Outer group with its inner breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub key: String,
    pub total: f64,
    pub children: Vec<Group>,
}

/// Two-level breakdown (e.g. machine → task), both levels in first-seen order.
pub fn nested<I, T, O, N, M>(items: I, outer: O, inner: N, measure: M) -> Vec<Branch>
where
    I: IntoIterator<Item = T>,
    O: Fn(&T) -> String,
    N: Fn(&T) -> String,
    M: Fn(&T) -> Option<f64>,
{
    let mut outer_index: HashMap<String, usize> = HashMap::new();
    let mut inner_index: Vec<HashMap<String, usize>> = Vec::new();
    let mut branches: Vec<Branch> = Vec::new();

    for item in items {
        let ok = outer(&item);
        let b = *outer_index.entry(ok.clone()).or_insert_with(|| {
            branches.push(Branch {
                key: ok,
                total: 0.0,
                children: Vec::new(),
            });
            inner_index.push(HashMap::new());
            branches.len() - 1
        });

        let ik = inner(&item);
        let branch = &mut branches[b];
        let c = *inner_index[b].entry(ik.clone()).or_insert_with(|| {
            branch.children.push(Group { key: ik, total: 0.0 });
            branch.children.len() - 1
        });

        if let Some(v) = measure(&item) {
            branch.total += v;
            branch.children[c].total += v;
        }
    }

    branches
}
