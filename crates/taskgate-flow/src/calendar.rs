// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Date-picker sub-protocol for control-date selection.
//!
//! A [`CalendarView`] is one month rendered as a choice grid. Navigation
//! actions re-render a shifted view; picking a day terminates the
//! sub-protocol with the chosen date. The view is pure state; cancellation
//! happens implicitly when the owning dialogue is cleared.

use chrono::{Datelike, NaiveDate, Utc};

use taskgate_core::error::TaskGateError;

use crate::reply::Choice;

/// Callback payloads for the calendar grid.
pub const CAL_PREV_YEAR: &str = "cal:py";
pub const CAL_NEXT_YEAR: &str = "cal:ny";
pub const CAL_PREV_MONTH: &str = "cal:pm";
pub const CAL_NEXT_MONTH: &str = "cal:nm";
pub const CAL_NOOP: &str = "cal:noop";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// One month of the date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

/// A navigation or selection action inside the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    PrevYear,
    NextYear,
    PrevMonth,
    NextMonth,
    SelectDay(u32),
    /// Filler cells; re-renders without change.
    Noop,
}

/// What a processed action produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarOutcome {
    /// Navigation: show this view next.
    Rerender(CalendarView),
    /// A day was picked; the sub-protocol is over.
    Selected(NaiveDate),
}

impl CalendarView {
    /// The view containing `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The view for the current month (UTC).
    pub fn current() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    /// Applies one action to this view.
    ///
    /// An out-of-range day (e.g. 31 in a 30-day month) is
    /// [`TaskGateError::MalformedUserInput`]; callback payloads cannot be
    /// trusted and must not panic the flow.
    pub fn process(self, action: CalendarAction) -> Result<CalendarOutcome, TaskGateError> {
        match action {
            CalendarAction::PrevYear => Ok(CalendarOutcome::Rerender(Self {
                year: self.year - 1,
                ..self
            })),
            CalendarAction::NextYear => Ok(CalendarOutcome::Rerender(Self {
                year: self.year + 1,
                ..self
            })),
            CalendarAction::PrevMonth => Ok(CalendarOutcome::Rerender(self.shift_month(-1))),
            CalendarAction::NextMonth => Ok(CalendarOutcome::Rerender(self.shift_month(1))),
            CalendarAction::Noop => Ok(CalendarOutcome::Rerender(self)),
            CalendarAction::SelectDay(day) => NaiveDate::from_ymd_opt(self.year, self.month, day)
                .map(CalendarOutcome::Selected)
                .ok_or_else(|| {
                    TaskGateError::MalformedUserInput(format!(
                        "day {day} is out of range for {}-{:02}",
                        self.year, self.month
                    ))
                }),
        }
    }

    fn shift_month(self, delta: i32) -> Self {
        let zero_based = self.month as i32 - 1 + delta;
        Self {
            year: self.year + zero_based.div_euclid(12),
            month: (zero_based.rem_euclid(12) + 1) as u32,
        }
    }

    fn days_in_month(self) -> u32 {
        let next = self.shift_month(1);
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1);
        match (first, next_first) {
            (Some(a), Some(b)) => (b - a).num_days() as u32,
            _ => 31,
        }
    }

    /// Renders the grid: year row, month row, weekday header, day rows.
    pub fn render(&self) -> Vec<Vec<Choice>> {
        let mut rows = Vec::new();

        rows.push(vec![
            Choice::new("<<", CAL_PREV_YEAR),
            Choice::new(self.year.to_string(), CAL_NOOP),
            Choice::new(">>", CAL_NEXT_YEAR),
        ]);
        rows.push(vec![
            Choice::new("<", CAL_PREV_MONTH),
            Choice::new(MONTH_NAMES[(self.month - 1) as usize], CAL_NOOP),
            Choice::new(">", CAL_NEXT_MONTH),
        ]);
        rows.push(
            ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
                .iter()
                .map(|d| Choice::new(*d, CAL_NOOP))
                .collect(),
        );

        let first_weekday = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.weekday().num_days_from_monday())
            .unwrap_or(0);
        let days = self.days_in_month();

        let mut row: Vec<Choice> = (0..first_weekday)
            .map(|_| Choice::new(" ", CAL_NOOP))
            .collect();
        for day in 1..=days {
            row.push(Choice::new(day.to_string(), format!("cal:day:{day}")));
            if row.len() == 7 {
                rows.push(std::mem::take(&mut row));
            }
        }
        if !row.is_empty() {
            while row.len() < 7 {
                row.push(Choice::new(" ", CAL_NOOP));
            }
            rows.push(row);
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_navigation_wraps_across_years() {
        let view = CalendarView { year: 2026, month: 1 };
        match view.process(CalendarAction::PrevMonth).unwrap() {
            CalendarOutcome::Rerender(v) => {
                assert_eq!((v.year, v.month), (2025, 12));
            }
            other => panic!("expected rerender, got {other:?}"),
        }

        let view = CalendarView { year: 2026, month: 12 };
        match view.process(CalendarAction::NextMonth).unwrap() {
            CalendarOutcome::Rerender(v) => {
                assert_eq!((v.year, v.month), (2027, 1));
            }
            other => panic!("expected rerender, got {other:?}"),
        }
    }

    #[test]
    fn year_navigation_keeps_month() {
        let view = CalendarView { year: 2026, month: 6 };
        match view.process(CalendarAction::NextYear).unwrap() {
            CalendarOutcome::Rerender(v) => assert_eq!((v.year, v.month), (2027, 6)),
            other => panic!("expected rerender, got {other:?}"),
        }
    }

    #[test]
    fn day_selection_terminates_with_date() {
        let view = CalendarView { year: 2026, month: 3 };
        match view.process(CalendarAction::SelectDay(15)).unwrap() {
            CalendarOutcome::Selected(date) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
            }
            other => panic!("expected selection, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_day_is_malformed_input() {
        let view = CalendarView { year: 2026, month: 2 };
        let err = view.process(CalendarAction::SelectDay(30)).unwrap_err();
        assert!(matches!(err, TaskGateError::MalformedUserInput(_)));
    }

    #[test]
    fn noop_rerenders_unchanged() {
        let view = CalendarView { year: 2026, month: 5 };
        assert_eq!(
            view.process(CalendarAction::Noop).unwrap(),
            CalendarOutcome::Rerender(view)
        );
    }

    #[test]
    fn render_covers_all_days_once() {
        let view = CalendarView { year: 2026, month: 2 };
        let rows = view.render();
        let day_payloads: Vec<&str> = rows
            .iter()
            .flatten()
            .filter_map(|c| c.payload())
            .filter(|p| p.starts_with("cal:day:"))
            .collect();
        assert_eq!(day_payloads.len(), 28);
        assert_eq!(day_payloads[0], "cal:day:1");
        assert_eq!(day_payloads[27], "cal:day:28");
        // Every day row is exactly one week wide.
        for row in rows.iter().skip(3) {
            assert_eq!(row.len(), 7);
        }
    }
}
