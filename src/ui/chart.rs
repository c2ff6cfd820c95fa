//! Terminal charts for aggregated hours.

use crate::core::aggregate::{Branch, Group};
use crate::utils::formatting::hours;
use unicode_width::UnicodeWidthStr;

const BAR_WIDTH: usize = 40;
const BLOCK: char = '█';

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    BLOCK.to_string().repeat(len.max(1))
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

/// One bar per group, scaled to the largest total.
pub fn bar_chart(title: &str, groups: &[Group]) -> String {
    let mut out = format!("{}\n", title);
    if groups.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let label_w = groups.iter().map(|g| g.key.width()).max().unwrap_or(0);
    let max = groups.iter().map(|g| g.total).fold(0.0_f64, f64::max);

    for g in groups {
        out.push_str(&format!(
            "  {} │{} {}\n",
            pad(&g.key, label_w),
            bar(g.total, max),
            hours(g.total)
        ));
    }
    out
}

/// Indented outer → inner breakdown with totals.
pub fn breakdown(title: &str, branches: &[Branch]) -> String {
    let mut out = format!("{}\n", title);
    if branches.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    for (i, b) in branches.iter().enumerate() {
        out.push_str(&format!("  {} ({} h)\n", b.key, hours(b.total)));
        let last_branch = i + 1 == branches.len();
        for (j, c) in b.children.iter().enumerate() {
            let elbow = if j + 1 == b.children.len() { "└─" } else { "├─" };
            let share = if b.total > 0.0 {
                c.total / b.total * 100.0
            } else {
                0.0
            };
            out.push_str(&format!(
                "    {} {}: {} h ({:.0}%)\n",
                elbow,
                c.key,
                hours(c.total),
                share
            ));
        }
        if !last_branch {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(key: &str, total: f64) -> Group {
        Group {
            key: key.into(),
            total,
        }
    }

    #[test]
    fn bars_scale_to_the_largest_group() {
        let chart = bar_chart("Hours", &[g("CNC", 8.0), g("Lathe", 2.0), g("Idle", 0.0)]);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Hours");
        assert_eq!(lines[1].matches(BLOCK).count(), BAR_WIDTH);
        assert_eq!(lines[2].matches(BLOCK).count(), BAR_WIDTH / 4);
        assert!(lines[2].ends_with("2.00"));
        assert_eq!(lines[3].matches(BLOCK).count(), 0);
    }

    #[test]
    fn breakdown_lists_children_with_shares() {
        let tree = vec![Branch {
            key: "CNC".into(),
            total: 4.0,
            children: vec![g("mill", 3.0), g("drill", 1.0)],
        }];
        let text = breakdown("By task", &tree);
        assert!(text.contains("CNC (4.00 h)"));
        assert!(text.contains("├─ mill: 3.00 h (75%)"));
        assert!(text.contains("└─ drill: 1.00 h (25%)"));
    }
}
