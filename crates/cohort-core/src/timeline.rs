//! Week-by-week timeline of a promotion's curriculum.
//!
//! Modules are laid out back to back in declaration order. Module `i` covers
//! weeks `[start_i, end_i)` where `start_i` is the sum of the durations of the
//! modules before it. Courses and projects inherit their module's range.
//!
//! The logical ranges are never clamped: a module that runs past the
//! promotion's last week keeps its full `end`, and the modules after it keep
//! stacking from there. Clipping only happens when the render grid is built,
//! whose width is exactly the promotion's week count.
//!
//! [`schedule`] never fails. Non-positive durations become zero-width ranges
//! at the current offset, a negative week count becomes an empty grid and the
//! grid never grows wider than [`MAX_GRID_WEEKS`] columns.
//! Callers that want to reject such input before persisting it use
//! [`validate_plan`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Module, PromotionPlan};
use crate::enums::RowKind;
use crate::errors::CoreError;

/// Logical, unclipped week range of one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRange {
    pub index: usize,
    pub start: u32,
    pub end: u32,
}

impl ModuleRange {
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether zero-based week `week` belongs to this module.
    #[must_use]
    pub const fn contains(&self, week: u32) -> bool {
        self.start <= week && week < self.end
    }

    /// The part of the range that fits in a grid of `weeks` columns.
    #[must_use]
    pub fn visible(&self, weeks: u32) -> std::ops::Range<u32> {
        let end = self.end.min(weeks);
        self.start.min(end)..end
    }
}

/// One row of the render grid.
///
/// `cells[w]` holds the module index when week `w` is active for this row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub kind: RowKind,
    pub module_index: usize,
    pub labels: Vec<String>,
    pub cells: Vec<Option<usize>>,
}

impl GridRow {
    /// Zero-based weeks highlighted in this row.
    #[must_use]
    pub fn active_weeks(&self) -> Vec<u32> {
        self.cells
            .iter()
            .zip(0u32..)
            .filter_map(|(cell, week)| cell.map(|_| week))
            .collect()
    }
}

/// Render-ready grid: a header of one-based week numbers plus one row per
/// module, course list and project list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineGrid {
    pub header: Vec<u32>,
    pub rows: Vec<GridRow>,
}

impl TimelineGrid {
    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// Complete scheduler output for one promotion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub weeks: u32,
    pub module_ranges: Vec<ModuleRange>,
    pub grid: TimelineGrid,
}

impl Timeline {
    /// Logical end of the last module (0 for an empty curriculum).
    #[must_use]
    pub fn scheduled_weeks(&self) -> u32 {
        self.module_ranges.last().map_or(0, |range| range.end)
    }

    /// How many weeks the curriculum runs past the promotion's end.
    #[must_use]
    pub fn overflow_weeks(&self) -> u32 {
        self.scheduled_weeks().saturating_sub(self.weeks)
    }

    /// Weeks at the end of the promotion with no module scheduled.
    #[must_use]
    pub fn trailing_gap(&self) -> u32 {
        self.weeks.saturating_sub(self.scheduled_weeks())
    }

    /// Index of the module running in zero-based week `week`, if any.
    #[must_use]
    pub fn module_at(&self, week: u32) -> Option<usize> {
        self.module_ranges
            .iter()
            .find(|range| range.contains(week))
            .map(|range| range.index)
    }
}

/// Widest grid [`schedule`] will build, and the largest week count
/// [`validate_plan`] accepts.
pub const MAX_GRID_WEEKS: u32 = 520;

/// Clamp a signed duration into the scheduler's domain.
fn effective_weeks(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Allocate contiguous week ranges for `modules`, in order.
#[must_use]
pub fn module_ranges(modules: &[Module]) -> Vec<ModuleRange> {
    let mut offset = 0u32;
    modules
        .iter()
        .enumerate()
        .map(|(index, module)| {
            let start = offset;
            let end = start.saturating_add(effective_weeks(module.duration));
            offset = end;
            ModuleRange { index, start, end }
        })
        .collect()
}

fn row(kind: RowKind, range: ModuleRange, labels: Vec<String>, weeks: u32) -> GridRow {
    let mut cells = vec![None; weeks as usize];
    for week in range.visible(weeks) {
        cells[week as usize] = Some(range.index);
    }
    GridRow {
        kind,
        module_index: range.index,
        labels,
        cells,
    }
}

/// Build the full timeline for a promotion.
///
/// The grid is rebuilt from scratch on every call; a duration change in one
/// module moves every module after it.
#[must_use]
pub fn schedule(plan: &PromotionPlan) -> Timeline {
    let weeks = effective_weeks(plan.weeks).min(MAX_GRID_WEEKS);
    let ranges = module_ranges(&plan.modules);

    let mut rows = Vec::with_capacity(plan.modules.len() * 3);
    for (module, range) in plan.modules.iter().zip(&ranges) {
        rows.push(row(RowKind::Module, *range, vec![module.name.clone()], weeks));
        if !module.courses.is_empty() {
            rows.push(row(RowKind::Courses, *range, module.courses.clone(), weeks));
        }
        if !module.projects.is_empty() {
            rows.push(row(RowKind::Projects, *range, module.projects.clone(), weeks));
        }
    }

    Timeline {
        weeks,
        module_ranges: ranges,
        grid: TimelineGrid {
            header: (1..=weeks).collect(),
            rows,
        },
    }
}

/// Strict input check for callers that persist promotion plans.
///
/// Rejects a negative week count or one above [`MAX_GRID_WEEKS`], blank
/// module names and non-positive durations. Running past the last week is allowed; use
/// [`Timeline::overflow_weeks`] to enforce a tighter policy.
///
/// # Errors
///
/// Returns `CoreError::Validation` listing every problem found.
pub fn validate_plan(plan: &PromotionPlan) -> Result<(), CoreError> {
    let mut problems = Vec::new();

    if plan.weeks < 0 {
        problems.push(format!("weeks must not be negative (got {})", plan.weeks));
    } else if plan.weeks > i64::from(MAX_GRID_WEEKS) {
        problems.push(format!(
            "weeks must be at most {MAX_GRID_WEEKS} (got {})",
            plan.weeks
        ));
    }
    for (index, module) in plan.modules.iter().enumerate() {
        if module.name.trim().is_empty() {
            problems.push(format!("module {index} has an empty name"));
        }
        if module.duration <= 0 {
            problems.push(format!(
                "module {index} ('{}') must last at least one week (got {})",
                module.name, module.duration
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn plan(weeks: i64, durations: &[i64]) -> PromotionPlan {
        PromotionPlan {
            weeks,
            modules: durations
                .iter()
                .enumerate()
                .map(|(i, d)| Module::new(format!("M{i}"), *d))
                .collect(),
        }
    }

    fn spans(timeline: &Timeline) -> Vec<(u32, u32)> {
        timeline
            .module_ranges
            .iter()
            .map(|r| (r.start, r.end))
            .collect()
    }

    #[test]
    fn capstone_overflow_is_clipped_only_in_grid() {
        let plan = PromotionPlan {
            weeks: 10,
            modules: vec![
                Module::new("Intro", 3),
                Module::new("Core", 5),
                Module::new("Capstone", 4),
            ],
        };
        let timeline = schedule(&plan);

        assert_eq!(spans(&timeline), vec![(0, 3), (3, 8), (8, 12)]);
        assert_eq!(timeline.grid.width(), 10);
        assert_eq!(timeline.overflow_weeks(), 2);

        let capstone = timeline
            .grid
            .rows
            .iter()
            .find(|r| r.module_index == 2)
            .unwrap();
        assert_eq!(capstone.active_weeks(), vec![8, 9]);
    }

    #[rstest]
    #[case(&[2, 2, 2], vec![(0, 2), (2, 4), (4, 6)])]
    #[case(&[1], vec![(0, 1)])]
    #[case(&[4, 0, 3], vec![(0, 4), (4, 4), (4, 7)])]
    #[case(&[3, -2, 1], vec![(0, 3), (3, 3), (3, 4)])]
    fn starts_are_prefix_sums(#[case] durations: &[i64], #[case] expected: Vec<(u32, u32)>) {
        assert_eq!(spans(&schedule(&plan(20, durations))), expected);
    }

    #[test]
    fn duration_change_shifts_only_later_modules() {
        let before = schedule(&plan(30, &[3, 4, 5, 6]));
        let after = schedule(&plan(30, &[3, 7, 5, 6]));

        for (old, new) in before.module_ranges.iter().zip(&after.module_ranges) {
            match old.index {
                0 => assert_eq!(old, new),
                1 => {
                    assert_eq!(new.start, old.start);
                    assert_eq!(new.end, old.end + 3);
                }
                _ => {
                    assert_eq!(new.start, old.start + 3);
                    assert_eq!(new.end, old.end + 3);
                }
            }
        }
    }

    #[test]
    fn empty_module_list_has_only_header() {
        let timeline = schedule(&plan(6, &[]));
        assert_eq!(timeline.grid.header, vec![1, 2, 3, 4, 5, 6]);
        assert!(timeline.grid.rows.is_empty());
        assert!(timeline.module_ranges.is_empty());
        assert_eq!(timeline.trailing_gap(), 6);
    }

    #[test]
    fn zero_weeks_renders_rows_without_cells() {
        let timeline = schedule(&plan(0, &[2, 3]));
        assert!(timeline.grid.header.is_empty());
        assert_eq!(timeline.grid.rows.len(), 2);
        assert!(timeline.grid.rows.iter().all(|r| r.cells.is_empty()));
        assert_eq!(spans(&timeline), vec![(0, 2), (2, 5)]);
    }

    #[test]
    fn negative_weeks_degrade_to_empty_grid() {
        let timeline = schedule(&plan(-4, &[1]));
        assert_eq!(timeline.weeks, 0);
        assert_eq!(timeline.grid.width(), 0);
    }

    #[rstest]
    #[case(4_000_000_000)]
    #[case(i64::MAX)]
    #[case(i64::from(MAX_GRID_WEEKS) + 1)]
    fn oversized_week_count_is_clamped_to_max_grid(#[case] weeks: i64) {
        let timeline = schedule(&plan(weeks, &[1, 2]));
        assert_eq!(timeline.weeks, MAX_GRID_WEEKS);
        assert_eq!(timeline.grid.width(), MAX_GRID_WEEKS as usize);
        assert!(
            timeline
                .grid
                .rows
                .iter()
                .all(|r| r.cells.len() == MAX_GRID_WEEKS as usize)
        );
        assert_eq!(spans(&timeline), vec![(0, 1), (1, 3)]);
    }

    #[rstest]
    #[case(4_000_000_000, false)]
    #[case(i64::from(MAX_GRID_WEEKS) + 1, false)]
    #[case(i64::from(MAX_GRID_WEEKS), true)]
    fn validate_plan_bounds_week_count(#[case] weeks: i64, #[case] accepted: bool) {
        let result = validate_plan(&plan(weeks, &[1]));
        assert_eq!(result.is_ok(), accepted);
        if let Err(err) = result {
            assert!(err.to_string().contains("weeks must be at most"));
        }
    }

    #[test]
    fn course_and_project_rows_inherit_module_range() {
        let plan = PromotionPlan {
            weeks: 6,
            modules: vec![
                Module::new("Frontend", 2)
                    .with_courses(["HTML", "CSS"])
                    .with_projects(["Portfolio"]),
                Module::new("Backend", 3).with_projects(["API"]),
            ],
        };
        let timeline = schedule(&plan);
        let kinds: Vec<(RowKind, usize)> = timeline
            .grid
            .rows
            .iter()
            .map(|r| (r.kind, r.module_index))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (RowKind::Module, 0),
                (RowKind::Courses, 0),
                (RowKind::Projects, 0),
                (RowKind::Module, 1),
                (RowKind::Projects, 1),
            ]
        );
        assert_eq!(timeline.grid.rows[1].labels, vec!["HTML", "CSS"]);
        assert_eq!(timeline.grid.rows[1].active_weeks(), vec![0, 1]);
        assert_eq!(timeline.grid.rows[4].active_weeks(), vec![2, 3, 4]);
    }

    #[test]
    fn each_column_has_at_most_one_module_per_row() {
        let timeline = schedule(&plan(8, &[3, 3, 3]));
        for row in &timeline.grid.rows {
            for (week, cell) in (0u32..).zip(&row.cells) {
                if let Some(index) = cell {
                    assert_eq!(*index, row.module_index);
                    assert_eq!(timeline.module_at(week), Some(*index));
                }
            }
        }
        assert_eq!(timeline.module_at(8), Some(2));
        assert_eq!(timeline.module_at(9), None);
    }

    #[test]
    fn module_after_overflow_is_entirely_hidden() {
        let timeline = schedule(&plan(4, &[3, 3, 2]));
        assert_eq!(spans(&timeline), vec![(0, 3), (3, 6), (6, 8)]);
        assert!(timeline.grid.rows[2].active_weeks().is_empty());
        assert_eq!(timeline.module_ranges[2].visible(4), 4..4);
    }

    #[test]
    fn timeline_serializes_camel_case() {
        let json = serde_json::to_value(schedule(&plan(2, &[1]))).unwrap();
        assert_eq!(json["moduleRanges"][0]["end"], 1);
        assert_eq!(json["grid"]["rows"][0]["moduleIndex"], 0);
    }

    #[test]
    fn validate_plan_collects_every_problem() {
        let mut bad = plan(-1, &[0, 2]);
        bad.modules[1].name = "  ".into();
        let err = validate_plan(&bad).unwrap_err().to_string();
        assert!(err.contains("weeks must not be negative"));
        assert!(err.contains("module 0"));
        assert!(err.contains("module 1 has an empty name"));
    }

    #[test]
    fn validate_plan_allows_overflow_and_trailing_gap() {
        assert!(validate_plan(&plan(10, &[3, 5, 4])).is_ok());
        assert!(validate_plan(&plan(10, &[3])).is_ok());
    }
}
