//! Gantt-style rendering of a promotion timeline for `--format table`.

use cohort_core::entities::Promotion;
use cohort_core::enums::RowKind;
use cohort_core::timeline::Timeline;

const ACTIVE: char = '█';
const IDLE: char = '·';

/// One line per grid row: a label column followed by one cell per week.
#[must_use]
pub fn render_timeline(promotion: &Promotion, timeline: &Timeline) -> String {
    let labels: Vec<String> = timeline
        .grid
        .rows
        .iter()
        .map(|row| {
            let module = promotion
                .modules
                .get(row.module_index)
                .map_or("?", |module| module.name.as_str());
            match row.kind {
                RowKind::Module => module.to_string(),
                RowKind::Courses | RowKind::Projects => {
                    format!("  {}: {}", row.kind, row.labels.join(", "))
                }
            }
        })
        .collect();
    let label_width = labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0)
        .max("week".len());

    let mut lines = Vec::with_capacity(labels.len() + 2);
    let header: String = timeline
        .grid
        .header
        .iter()
        .map(|week| char::from_digit(week % 10, 10).unwrap_or(' '))
        .collect();
    lines.push(format!("{:<label_width$} {header}", "week"));

    for (row, label) in timeline.grid.rows.iter().zip(&labels) {
        let cells: String = row
            .cells
            .iter()
            .map(|cell| if cell.is_some() { ACTIVE } else { IDLE })
            .collect();
        lines.push(format!("{label:<label_width$} {cells}"));
    }

    if timeline.overflow_weeks() > 0 {
        lines.push(format!(
            "curriculum runs {} week(s) past the end of the promotion",
            timeline.overflow_weeks()
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use cohort_core::entities::Module;
    use cohort_core::timeline::schedule;

    use super::*;

    #[test]
    fn capstone_is_clipped_at_the_last_week() {
        let now = Utc::now();
        let promotion = Promotion {
            id: "pro-1".into(),
            name: "FS".into(),
            weeks: 10,
            modules: vec![
                Module::new("Intro", 3),
                Module::new("Backend", 5),
                Module::new("Capstone", 4).with_projects(["Final"]),
            ],
            created_at: now,
            updated_at: now,
        };
        let timeline = schedule(&promotion.plan());
        let out = render_timeline(&promotion, &timeline);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].ends_with("1234567890"));
        assert!(lines[3].starts_with("Capstone"));
        assert!(lines[3].ends_with("········██"));
        assert!(lines[4].contains("projects: Final"));
        assert!(out.contains("runs 2 week(s) past"));
    }
}
