//! Calendar grid generation for month and week views.
//!
//! Grids are Sunday-first: weekday index 0 is Sunday, matching the
//! original dashboard's day-zero numbering.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One cell of a rendered calendar view. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// True for padding cells outside the focal month.
    pub outside_month: bool,
}

/// Calendar view mode. Wire keys: `mes`, `semana`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "mes")]
    Month,
    #[serde(rename = "semana")]
    Week,
}

impl ViewMode {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "mes" => Some(ViewMode::Month),
            "semana" => Some(ViewMode::Week),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ViewMode::Month => "mes",
            ViewMode::Week => "semana",
        }
    }
}

/// Cells for a string-keyed view mode. Unknown keys yield an empty grid
/// rather than an error.
pub fn grid_cells(reference: NaiveDate, selected: NaiveDate, mode: &str) -> Vec<GridCell> {
    match ViewMode::from_key(mode) {
        Some(ViewMode::Month) => month_cells(reference),
        Some(ViewMode::Week) => week_cells(selected),
        None => Vec::new(),
    }
}

/// The month grid: every day of the reference month, padded with the
/// surrounding months' days so each row is a full week. The result length
/// is always a multiple of 7.
pub fn month_cells(reference: NaiveDate) -> Vec<GridCell> {
    // Day 1 exists in every month
    let first = reference.with_day(1).expect("day 1 is always valid");
    let lead = first.weekday().num_days_from_sunday() as i64;

    let mut cells = Vec::new();
    let mut day = first - Duration::days(lead);

    while day < first {
        cells.push(GridCell {
            date: day,
            outside_month: true,
        });
        day += Duration::days(1);
    }

    while day.month() == reference.month() && day.year() == reference.year() {
        cells.push(GridCell {
            date: day,
            outside_month: false,
        });
        day += Duration::days(1);
    }

    while cells.len() % 7 != 0 {
        cells.push(GridCell {
            date: day,
            outside_month: true,
        });
        day += Duration::days(1);
    }

    cells
}

/// The week containing `selected`: exactly 7 days starting on Sunday.
pub fn week_cells(selected: NaiveDate) -> Vec<GridCell> {
    let start = selected - Duration::days(selected.weekday().num_days_from_sunday() as i64);
    (0..7)
        .map(|offset| GridCell {
            date: start + Duration::days(offset),
            outside_month: false,
        })
        .collect()
}
