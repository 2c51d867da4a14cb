//! Calendar domain logic for the booking flow.
//!
//! This module contains all business logic related to calendar operations
//! and date calculations. The UI should only handle presentation concerns;
//! all grid generation and date rules live here.

use chrono::{Datelike, Local, NaiveDate};
use shared::{CalendarCell, CalendarMonth, CurrentDateResponse};

/// Every generated grid covers 6 weeks x 7 days
pub const GRID_CELLS: usize = 42;

/// Calendar service that handles all calendar-related business logic
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new() -> Self {
        Self
    }

    /// Generate the fixed 42-cell booking grid for a month.
    ///
    /// `today` and `selected` are explicit inputs rather than reads of the
    /// ambient clock, so two calls with identical arguments always produce
    /// identical grids. Leading cells carry the trailing days of the
    /// previous month and trailing cells the first days of the next month;
    /// those filler cells never set `is_today`, `is_past`, or `is_selected`.
    pub fn month_grid(
        &self,
        month: u32,
        year: i32,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> CalendarMonth {
        let first_day = self.first_day_of_month(month, year);
        let days_in_month = self.days_in_month(month, year);

        let (prev_month, prev_year) = self.previous_month(month, year);
        let (next_month, next_year) = self.next_month(month, year);
        let days_in_prev = self.days_in_month(prev_month, prev_year);

        let mut cells = Vec::with_capacity(GRID_CELLS);

        // Leading filler: the last `first_day` days of the previous month
        for i in 0..first_day {
            cells.push(CalendarCell {
                year: prev_year,
                month: prev_month,
                day: days_in_prev - first_day + 1 + i,
                in_current_month: false,
                is_today: false,
                is_past: false,
                is_selected: false,
            });
        }

        // Actual days of the month, with flags from the supplied reference dates
        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year, month, day);
            let is_today = date == Some(today);
            let is_past = date.map(|d| d < today).unwrap_or(false);
            let is_selected = date.is_some() && date == selected;

            cells.push(CalendarCell {
                year,
                month,
                day,
                in_current_month: true,
                is_today,
                is_past,
                is_selected,
            });
        }

        // Trailing filler from the next month to complete the 42-cell grid
        let mut next_day = 1;
        while cells.len() < GRID_CELLS {
            cells.push(CalendarCell {
                year: next_year,
                month: next_month,
                day: next_day,
                in_current_month: false,
                is_today: false,
                is_past: false,
                is_selected: false,
            });
            next_day += 1;
        }

        CalendarMonth {
            month,
            year,
            cells,
            first_day_of_week: first_day,
        }
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
            // chrono's weekday(): Monday = 1, ..., Sunday = 7
            // Our format: Sunday = 0, Monday = 1, ..., Saturday = 6
            date.weekday().num_days_from_sunday()
        } else {
            // Invalid date, fallback to 0 (Sunday)
            0
        }
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Invalid Month",
        }
    }

    /// The month preceding the given one, rolling over year boundaries
    pub fn previous_month(&self, month: u32, year: i32) -> (u32, i32) {
        if month == 1 {
            (12, year - 1)
        } else {
            (month - 1, year)
        }
    }

    /// The month following the given one, rolling over year boundaries
    pub fn next_month(&self, month: u32, year: i32) -> (u32, i32) {
        if month == 12 {
            (1, year + 1)
        } else {
            (month + 1, year)
        }
    }

    /// Get current date information from the local clock.
    ///
    /// This is the one place the ambient clock is read; callers feed the
    /// result into `month_grid` so the generator itself stays pure.
    pub fn get_current_date(&self) -> CurrentDateResponse {
        let now = Local::now();
        let month = now.month();
        let year = now.year();
        let day = now.day();

        let formatted_date = format!("{} {}, {}", self.month_name(month), day, year);
        let iso_date = format!("{:04}-{:02}-{:02}", year, month, day);

        CurrentDateResponse {
            month,
            year,
            day,
            formatted_date,
            iso_date,
        }
    }

    /// Today's date from the local clock, time-of-day truncated
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        let service = CalendarService::new();

        // Test regular months
        assert_eq!(service.days_in_month(1, 2025), 31); // January
        assert_eq!(service.days_in_month(4, 2025), 30); // April
        assert_eq!(service.days_in_month(2, 2025), 28); // February (non-leap)
        assert_eq!(service.days_in_month(2, 2024), 29); // February (leap year)
    }

    #[test]
    fn test_is_leap_year() {
        let service = CalendarService::new();

        assert!(!service.is_leap_year(2025)); // Regular year
        assert!(service.is_leap_year(2024)); // Divisible by 4
        assert!(!service.is_leap_year(1900)); // Divisible by 100 but not 400
        assert!(service.is_leap_year(2000)); // Divisible by 400
    }

    #[test]
    fn test_month_name() {
        let service = CalendarService::new();

        assert_eq!(service.month_name(1), "January");
        assert_eq!(service.month_name(6), "June");
        assert_eq!(service.month_name(12), "December");
        assert_eq!(service.month_name(13), "Invalid Month");
    }

    #[test]
    fn test_month_navigation() {
        let service = CalendarService::new();

        assert_eq!(service.previous_month(6, 2025), (5, 2025));
        assert_eq!(service.previous_month(1, 2025), (12, 2024));

        assert_eq!(service.next_month(6, 2025), (7, 2025));
        assert_eq!(service.next_month(12, 2025), (1, 2026));
    }

    #[test]
    fn test_grid_always_42_cells() {
        let service = CalendarService::new();
        let today = date(2024, 6, 15);

        for year in [2023, 2024, 2025] {
            for month in 1..=12 {
                let grid = service.month_grid(month, year, today, None);
                assert_eq!(grid.cells.len(), GRID_CELLS, "{}/{}", month, year);
            }
        }
    }

    #[test]
    fn test_grid_in_month_count_matches_calendar() {
        let service = CalendarService::new();
        let today = date(2024, 6, 15);

        for year in [2023, 2024] {
            for month in 1..=12 {
                let grid = service.month_grid(month, year, today, None);
                let in_month = grid.cells.iter().filter(|c| c.in_current_month).count();
                assert_eq!(
                    in_month,
                    service.days_in_month(month, year) as usize,
                    "{}/{}",
                    month,
                    year
                );
            }
        }
    }

    #[test]
    fn test_grid_april_2024() {
        // April 2024 has 30 days and starts on a Monday: 1 leading filler
        // cell, 30 month cells, 11 trailing filler cells.
        let service = CalendarService::new();
        let grid = service.month_grid(4, 2024, date(2024, 4, 10), None);

        assert_eq!(grid.first_day_of_week, 1);
        assert_eq!(grid.cells.len(), 42);

        let leading: Vec<_> = grid
            .cells
            .iter()
            .take_while(|c| !c.in_current_month)
            .collect();
        assert_eq!(leading.len(), 1);
        assert_eq!(leading[0].day, 31); // March 31
        assert_eq!(leading[0].month, 3);

        let in_month = grid.cells.iter().filter(|c| c.in_current_month).count();
        assert_eq!(in_month, 30);

        let trailing: Vec<_> = grid.cells[1 + 30..].to_vec();
        assert_eq!(trailing.len(), 11);
        assert!(trailing.iter().all(|c| !c.in_current_month && c.month == 5));
        assert_eq!(trailing[0].day, 1);
        assert_eq!(trailing[10].day, 11);
    }

    #[test]
    fn test_grid_february_2024_leap_year() {
        // February 2024 has 29 days and starts on a Thursday: 4 leading
        // filler cells, 29 month cells, 9 trailing filler cells.
        let service = CalendarService::new();
        let grid = service.month_grid(2, 2024, date(2024, 2, 1), None);

        assert_eq!(grid.first_day_of_week, 4);

        let leading = grid
            .cells
            .iter()
            .take_while(|c| !c.in_current_month)
            .count();
        assert_eq!(leading, 4);

        let in_month = grid.cells.iter().filter(|c| c.in_current_month).count();
        assert_eq!(in_month, 29);

        let trailing = grid.cells.len() - leading - in_month;
        assert_eq!(trailing, 9);

        // Leading cells are the last days of January 2024
        assert_eq!(grid.cells[0].day, 28);
        assert_eq!(grid.cells[0].month, 1);
        assert_eq!(grid.cells[3].day, 31);
    }

    #[test]
    fn test_grid_year_rollover() {
        let service = CalendarService::new();
        let today = date(2024, 6, 15);

        // January leading fillers come from December of the previous year
        let january = service.month_grid(1, 2025, today, None);
        let leading: Vec<_> = january
            .cells
            .iter()
            .take_while(|c| !c.in_current_month)
            .collect();
        assert!(leading.iter().all(|c| c.month == 12 && c.year == 2024));

        // December trailing fillers come from January of the next year
        let december = service.month_grid(12, 2024, today, None);
        let trailing: Vec<_> = december
            .cells
            .iter()
            .skip_while(|c| !c.in_current_month)
            .skip_while(|c| c.in_current_month)
            .collect();
        assert!(!trailing.is_empty());
        assert!(trailing.iter().all(|c| c.month == 1 && c.year == 2025));
    }

    #[test]
    fn test_grid_today_past_and_selected_flags() {
        let service = CalendarService::new();
        let today = date(2024, 6, 15);
        let selected = date(2024, 6, 20);

        let grid = service.month_grid(6, 2024, today, Some(selected));

        for cell in grid.cells.iter().filter(|c| c.in_current_month) {
            assert_eq!(cell.is_today, cell.day == 15);
            assert_eq!(cell.is_past, cell.day < 15, "day {}", cell.day);
            assert_eq!(cell.is_selected, cell.day == 20);
        }

        // Today itself is never past
        let today_cell = grid
            .cells
            .iter()
            .find(|c| c.in_current_month && c.day == 15)
            .unwrap();
        assert!(today_cell.is_today && !today_cell.is_past);
    }

    #[test]
    fn test_grid_filler_cells_are_inert() {
        let service = CalendarService::new();
        // Today and selection both fall on day numbers that also appear in
        // the filler regions; the filler cells must stay unflagged anyway.
        let today = date(2024, 7, 1);
        let selected = date(2024, 7, 2);

        let grid = service.month_grid(6, 2024, today, Some(selected));

        for cell in grid.cells.iter().filter(|c| !c.in_current_month) {
            assert!(!cell.is_today);
            assert!(!cell.is_past);
            assert!(!cell.is_selected);
        }
    }

    #[test]
    fn test_grid_is_deterministic() {
        let service = CalendarService::new();
        let today = date(2024, 6, 15);
        let selected = Some(date(2024, 6, 20));

        let first = service.month_grid(6, 2024, today, selected);
        let second = service.month_grid(6, 2024, today, selected);
        assert_eq!(first, second);
    }
}
