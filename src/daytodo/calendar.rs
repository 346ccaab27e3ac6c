//! # Calendar Navigator
//!
//! Tracks which month is on screen, which day is selected, and which day the
//! caller last observed as "today". It produces plain month-grid data; drawing it
//! is up to the presentation layer.
//!
//! The navigator never reads the clock. The caller passes the current date in,
//! both at construction and to [`CalendarNavigator::detect_day_rollover`], and owns
//! whatever timer decides when to check.

use crate::date::{first_weekday_for, same_day, DateKey, WeekStart, YearMonth};
use crate::error::Result;
use log::debug;

/// One real day in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: DateKey,
    pub is_today: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before day 1 so it lands in its weekday column.
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(cell) => Some(cell),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub week_start: WeekStart,
    /// Leading blanks, then one cell per day of the month. No trailing padding.
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn header(&self) -> [&'static str; 7] {
        self.week_start.header()
    }

    /// Rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> std::slice::Chunks<'_, GridCell> {
        self.cells.chunks(7)
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, GridCell::Blank))
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::day)
    }
}

#[derive(Debug, Clone)]
pub struct CalendarNavigator {
    cursor: YearMonth,
    selected: DateKey,
    today: DateKey,
    week_start: WeekStart,
}

impl CalendarNavigator {
    /// Starts on `today`'s month with `today` selected.
    pub fn new(today: DateKey) -> Self {
        Self {
            cursor: today.year_month(),
            selected: today,
            today,
            week_start: WeekStart::default(),
        }
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn cursor(&self) -> YearMonth {
        self.cursor
    }

    pub fn selected(&self) -> DateKey {
        self.selected
    }

    pub fn today(&self) -> DateKey {
        self.today
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Grid for any month, flagged against the observed today and the selection.
    pub fn grid_for(&self, year: i32, month: u32) -> Result<MonthGrid> {
        let ym = YearMonth::new(year, month)?;
        let blanks = first_weekday_for(year, month, self.week_start)? as usize;
        let days = ym.days()?;

        let mut cells = Vec::with_capacity(blanks + days as usize);
        cells.extend(std::iter::repeat(GridCell::Blank).take(blanks));
        for day in 1..=days {
            let date = DateKey::new(year, month, day)?;
            cells.push(GridCell::Day(DayCell {
                date,
                is_today: same_day(&date, &self.today),
                is_selected: same_day(&date, &self.selected),
            }));
        }

        Ok(MonthGrid {
            month: ym,
            week_start: self.week_start,
            cells,
        })
    }

    /// Grid for the month under the cursor.
    pub fn current_grid(&self) -> Result<MonthGrid> {
        self.grid_for(self.cursor.year, self.cursor.month)
    }

    /// Moves the cursor by `delta` months (normally +1 or -1).
    ///
    /// On error the cursor stays where it was.
    pub fn advance_month(&mut self, delta: i32) -> Result<YearMonth> {
        self.cursor = self.cursor.shift(delta)?;
        Ok(self.cursor)
    }

    pub fn show_month(&mut self, month: YearMonth) {
        self.cursor = month;
    }

    /// Sets the selection. Loading the day's tasks is the caller's job.
    pub fn select(&mut self, date: DateKey) {
        self.selected = date;
    }

    /// True when `now` is a different day from the last observed today.
    ///
    /// Records `now` as the observed today, so each transition reports true once.
    pub fn detect_day_rollover(&mut self, now: DateKey) -> bool {
        if same_day(&now, &self.today) {
            return false;
        }
        debug!(
            "event=day_rollover module=calendar from={} to={}",
            self.today, now
        );
        self.today = now;
        true
    }
}
