//! Plain-text rendering of store snapshots.

use std::io::{self, Write};

use errand_core::{Account, Activity, DashboardStats, Errand};

/// `1234567` -> `"1,234,567"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn growth(pct: f64) -> String {
    format!("{pct:+.1}%")
}

fn results_footer(out: &mut impl Write, shown: usize, total: usize) -> io::Result<()> {
    if shown == 0 {
        writeln!(out, "0 of {total} results")
    } else {
        writeln!(out, "1-{shown} of {total} results")
    }
}

/// Left-aligned columns sized to the widest cell.
fn table(out: &mut impl Write, header: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(header.to_vec()))?;
    for row in rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

pub fn accounts(out: &mut impl Write, shown: &[&Account], total: usize) -> io::Result<()> {
    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.name.clone(),
                a.email.clone(),
                a.phone.clone(),
                a.role.label().to_string(),
                Activity::of(a).label().to_string(),
                a.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    table(
        out,
        &["ID", "NAME", "EMAIL", "PHONE", "ROLE", "STATUS", "JOINED"],
        &rows,
    )?;
    results_footer(out, shown.len(), total)
}

pub fn errands(out: &mut impl Write, shown: &[&Errand], total: usize) -> io::Result<()> {
    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.title.clone(),
                e.client_name.clone(),
                e.worker_name.clone().unwrap_or_else(|| "-".to_string()),
                e.status.label().to_string(),
                thousands(e.fee),
                e.location.clone(),
                e.due_date.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();
    table(
        out,
        &["ID", "TITLE", "CLIENT", "WORKER", "STATUS", "FEE", "LOCATION", "DUE"],
        &rows,
    )?;
    results_footer(out, shown.len(), total)
}

pub fn stats(out: &mut impl Write, stats: &DashboardStats) -> io::Result<()> {
    writeln!(out, "Total users        {:>12}  {}", thousands(stats.total_users), growth(stats.user_growth))?;
    writeln!(out, "Total errands      {:>12}  {}", thousands(stats.total_errands), growth(stats.errand_growth))?;
    writeln!(out, "In progress        {:>12}", thousands(stats.in_progress_errands))?;
    writeln!(out, "Completed          {:>12}", thousands(stats.completed_errands))?;
    writeln!(out, "Revenue            {:>12}  {}", thousands(stats.total_revenue), growth(stats.revenue_growth))
}

pub fn error_panel(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "error: {message}")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use errand_core::ErrandStatus;

    use super::*;

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(5000), "5,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn errand_table_has_footer_and_labels() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let errand = Errand {
            id: "e1".to_string(),
            title: "Buy groceries".to_string(),
            description: String::new(),
            client_id: "u1".to_string(),
            client_name: "Kim".to_string(),
            worker_id: None,
            worker_name: None,
            status: ErrandStatus::InProgress,
            fee: 15000,
            location: "Mapo".to_string(),
            due_date: at,
            created_at: at,
            updated_at: at,
        };
        let mut out = Vec::new();
        errands(&mut out, &[&errand], 3).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("ID"));
        assert!(text.contains("In progress"));
        assert!(text.contains("15,000"));
        assert!(text.ends_with("1-1 of 3 results\n"));
    }

    #[test]
    fn empty_table_footer() {
        let mut out = Vec::new();
        accounts(&mut out, &[], 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("0 of 0 results\n"));
    }
}
