use std::fmt;
use std::iter::successors;
use std::slice::ChunksExact;
use std::str::FromStr;
use thiserror::Error;
use time::{
    error::ComponentRange,
    format_description::BorrowedFormatItem,
    macros::format_description,
    Date, Month,
    Month::*,
    Weekday,
};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) const WEEKS_IN_GRID: usize = 6;

/// Number of cells in every month grid, regardless of the month's length or
/// starting weekday
pub(crate) const GRID_CELLS: usize = DAYS_IN_WEEK * WEEKS_IN_GRID;

/// Width in columns of a single rendered day, e.g. `" 12 "` or `"[12]"`
pub(crate) const DAY_CELL_WIDTH: usize = 4;

/// Width in columns of a full week row: seven day cells separated by single
/// spaces
pub(crate) const GRID_WIDTH: usize = DAYS_IN_WEEK * (DAY_CELL_WIDTH + 1) - 1;

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) trait WeekdayExt {
    fn abbrev(&self) -> &'static str;
}

impl WeekdayExt for Weekday {
    fn abbrev(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Su",
            Weekday::Monday => "Mo",
            Weekday::Tuesday => "Tu",
            Weekday::Wednesday => "We",
            Weekday::Thursday => "Th",
            Weekday::Friday => "Fr",
            Weekday::Saturday => "Sa",
        }
    }
}

/// A month of a particular year whose first day is a representable [`Date`]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
// Invariant: The wrapped date is always the first of its month
pub(crate) struct YearMonth(Date);

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, ComponentRange> {
        Date::from_calendar_date(year, month, 1).map(YearMonth)
    }

    pub(crate) fn containing(date: Date) -> YearMonth {
        YearMonth(
            date.replace_day(1)
                .expect("the first of a month should always be a valid day"),
        )
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> Month {
        self.0.month()
    }

    pub(crate) fn first_day(self) -> Date {
        self.0
    }

    /// Number of days in the month
    pub(crate) fn length(self) -> u8 {
        self.month().length(self.year())
    }

    pub(crate) fn previous(self) -> Option<YearMonth> {
        match self.month() {
            January => YearMonth::new(self.year().checked_sub(1)?, December).ok(),
            m => YearMonth::new(self.year(), m.previous()).ok(),
        }
    }

    pub(crate) fn next(self) -> Option<YearMonth> {
        match self.month() {
            December => YearMonth::new(self.year().checked_add(1)?, January).ok(),
            m => YearMonth::new(self.year(), m.next()).ok(),
        }
    }

    pub(crate) fn previous_year(self) -> Option<YearMonth> {
        YearMonth::new(self.year().checked_sub(1)?, self.month()).ok()
    }

    pub(crate) fn next_year(self) -> Option<YearMonth> {
        YearMonth::new(self.year().checked_add(1)?, self.month()).ok()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month(), self.year())
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    /// Parse a month in `YYYY-MM` format
    fn from_str(s: &str) -> Result<YearMonth, ParseYearMonthError> {
        Date::parse(&format!("{s}-01"), &YMD_FMT)
            .map(YearMonth::containing)
            .map_err(|source| ParseYearMonthError {
                input: s.to_owned(),
                source,
            })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid month {input:?}; expected YYYY-MM")]
pub(crate) struct ParseYearMonthError {
    input: String,
    source: time::error::Parse,
}

/// Which weekday occupies the leftmost column of a month grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct WeekStart(Weekday);

impl WeekStart {
    pub(crate) const SUNDAY: WeekStart = WeekStart(Weekday::Sunday);
    pub(crate) const MONDAY: WeekStart = WeekStart(Weekday::Monday);

    pub(crate) fn new(weekday: Weekday) -> WeekStart {
        WeekStart(weekday)
    }

    pub(crate) fn weekday(self) -> Weekday {
        self.0
    }

    /// Returns the zero-based grid column in which `weekday` is drawn
    pub(crate) fn column(self, weekday: Weekday) -> usize {
        let offset = weekday.number_days_from_sunday() + 7 - self.0.number_days_from_sunday();
        usize::from(offset % 7)
    }

    /// Iterate over the days of the week in column order
    pub(crate) fn weekdays(self) -> impl Iterator<Item = Weekday> {
        successors(Some(self.0), |wd| Some(wd.next())).take(DAYS_IN_WEEK)
    }
}

impl Default for WeekStart {
    fn default() -> WeekStart {
        WeekStart::SUNDAY
    }
}

impl FromStr for WeekStart {
    type Err = ParseWeekStartError;

    fn from_str(s: &str) -> Result<WeekStart, ParseWeekStartError> {
        let wd = match s.to_ascii_lowercase().as_str() {
            "sunday" | "sun" | "su" => Weekday::Sunday,
            "monday" | "mon" | "mo" => Weekday::Monday,
            "tuesday" | "tue" | "tu" => Weekday::Tuesday,
            "wednesday" | "wed" | "we" => Weekday::Wednesday,
            "thursday" | "thu" | "th" => Weekday::Thursday,
            "friday" | "fri" | "fr" => Weekday::Friday,
            "saturday" | "sat" | "sa" => Weekday::Saturday,
            _ => return Err(ParseWeekStartError(s.to_owned())),
        };
        Ok(WeekStart::new(wd))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday {0:?}")]
pub(crate) struct ParseWeekStartError(String);

/// A single slot in a month grid
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct CalendarDay {
    label: String,
    is_current_month: bool,
}

impl CalendarDay {
    fn current(day: usize) -> CalendarDay {
        CalendarDay {
            label: day.to_string(),
            is_current_month: true,
        }
    }

    fn filler(day: usize) -> CalendarDay {
        CalendarDay {
            label: day.to_string(),
            is_current_month: false,
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn is_current_month(&self) -> bool {
        self.is_current_month
    }

    pub(crate) fn show(&self, is_today: bool) -> String {
        if is_today {
            format!("[{:>2}]", self.label)
        } else {
            format!(" {:>2} ", self.label)
        }
    }
}

/// Six weeks' worth of days covering a month, padded on either side with days
/// from the neighboring months
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    month: YearMonth,
    week_start: WeekStart,
    days: [CalendarDay; GRID_CELLS],
}

impl MonthGrid {
    pub(crate) fn new(month: YearMonth, week_start: WeekStart) -> MonthGrid {
        let leading = week_start.column(month.first_day().weekday());
        let length = usize::from(month.length());
        let prev_length = usize::from(previous_month_length(month));
        let days = std::array::from_fn(|i| {
            if i < leading {
                CalendarDay::filler(prev_length + i + 1 - leading)
            } else if i < leading + length {
                CalendarDay::current(i + 1 - leading)
            } else {
                CalendarDay::filler(i + 1 - leading - length)
            }
        });
        MonthGrid {
            month,
            week_start,
            days,
        }
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub(crate) fn days(&self) -> &[CalendarDay; GRID_CELLS] {
        &self.days
    }

    /// Iterate over the rows of the grid, each of which is seven days long
    pub(crate) fn weeks(&self) -> ChunksExact<'_, CalendarDay> {
        self.days.chunks_exact(DAYS_IN_WEEK)
    }

    /// Number of days from the previous month shown before the first of the
    /// month
    pub(crate) fn leading_filler(&self) -> usize {
        self.days()
            .iter()
            .take_while(|d| !d.is_current_month())
            .count()
    }

    /// Number of days from the next month shown after the end of the month
    pub(crate) fn trailing_filler(&self) -> usize {
        GRID_CELLS - self.leading_filler() - usize::from(self.month.length())
    }

    /// Returns the index into [`MonthGrid::days()`] of the cell for `date`, or
    /// `None` if `date` is not in the grid's month
    pub(crate) fn index_of(&self, date: Date) -> Option<usize> {
        (YearMonth::containing(date) == self.month)
            .then(|| self.leading_filler() + usize::from(date.day()) - 1)
    }
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{:^width$}", self.month.to_string(), width = GRID_WIDTH);
        writeln!(f, "{}", title.trim_end())?;
        let header = self
            .week_start
            .weekdays()
            .map(|wd| format!(" {} ", wd.abbrev()))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "{}", header.trim_end())?;
        for week in self.weeks() {
            let row = week
                .iter()
                .map(|d| {
                    if d.is_current_month() {
                        d.show(false)
                    } else {
                        format!("({:>2})", d.label())
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}

// Computed arithmetically so that it remains defined for the month before the
// earliest representable `YearMonth`
fn previous_month_length(month: YearMonth) -> u8 {
    match month.month() {
        January => December.length(month.year().saturating_sub(1)),
        m => m.previous().length(month.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn labels(days: &[CalendarDay]) -> Vec<&str> {
        days.iter().map(CalendarDay::label).collect()
    }

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_month_starting_on_wednesday() {
        // 2025-10-01 is a Wednesday
        let grid = MonthGrid::new(ym(2025, October), WeekStart::SUNDAY);
        assert_eq!(grid.days().len(), 42);
        assert_eq!(grid.leading_filler(), 3);
        assert_eq!(grid.trailing_filler(), 8);
        assert_eq!(labels(&grid.days()[..3]), ["28", "29", "30"]);
        assert_eq!(
            labels(&grid.days()[34..]),
            ["1", "2", "3", "4", "5", "6", "7", "8"]
        );
    }

    #[test]
    fn test_february_starting_on_week_start() {
        // 2015-02-01 is a Sunday
        let grid = MonthGrid::new(ym(2015, February), WeekStart::SUNDAY);
        assert_eq!(grid.leading_filler(), 0);
        assert_eq!(grid.trailing_filler(), 14);
        assert!(grid.days()[..28].iter().all(CalendarDay::is_current_month));
        assert_eq!(grid.days()[27].label(), "28");
        assert_eq!(grid.days()[28].label(), "1");
        assert_eq!(grid.days()[41].label(), "14");
    }

    #[test]
    fn test_leap_february() {
        // 2024-02-01 is a Thursday
        let grid = MonthGrid::new(ym(2024, February), WeekStart::SUNDAY);
        assert_eq!(grid.leading_filler(), 4);
        assert_eq!(labels(&grid.days()[..4]), ["28", "29", "30", "31"]);
        assert_eq!(grid.days()[4 + 28].label(), "29");
        assert!(grid.days()[4 + 28].is_current_month());
        assert_eq!(grid.trailing_filler(), 42 - 4 - 29);
    }

    #[test]
    fn test_monday_week_start() {
        // 2015-02-01 is a Sunday, which is the last column when weeks start on
        // Monday
        let grid = MonthGrid::new(ym(2015, February), WeekStart::MONDAY);
        assert_eq!(grid.leading_filler(), 6);
        assert_eq!(
            labels(&grid.days()[..7]),
            ["26", "27", "28", "29", "30", "31", "1"]
        );
        assert!(grid.days()[6].is_current_month());
        assert_eq!(grid.trailing_filler(), 8);
    }

    #[test]
    fn test_january_pads_with_december() {
        // 2026-01-01 is a Thursday
        let grid = MonthGrid::new(ym(2026, January), WeekStart::SUNDAY);
        assert_eq!(labels(&grid.days()[..4]), ["28", "29", "30", "31"]);
    }

    #[test]
    fn test_march_pads_with_february() {
        // 2023-03-01 is a Wednesday; February 2023 has 28 days
        let grid = MonthGrid::new(ym(2023, March), WeekStart::SUNDAY);
        assert_eq!(labels(&grid.days()[..3]), ["26", "27", "28"]);
    }

    #[test]
    fn test_grid_properties_for_every_month() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in [
                January, February, March, April, May, June, July, August, September, October,
                November, December,
            ] {
                for wd in WeekStart::SUNDAY.weekdays() {
                    let month = ym(year, month);
                    let week_start = WeekStart::new(wd);
                    let grid = MonthGrid::new(month, week_start);
                    assert_eq!(grid.days().len(), GRID_CELLS);
                    let leading = grid.leading_filler();
                    assert_eq!(leading, week_start.column(month.first_day().weekday()));
                    let length = usize::from(month.length());
                    assert_eq!(leading + length + grid.trailing_filler(), GRID_CELLS);
                    let trailing = grid.days().iter().rev().take_while(|d| !d.is_current_month());
                    assert_eq!(trailing.count(), grid.trailing_filler());
                    let current = &grid.days()[leading..leading + length];
                    assert!(current.iter().all(CalendarDay::is_current_month));
                    for (i, d) in current.iter().enumerate() {
                        assert_eq!(d.label(), (i + 1).to_string());
                    }
                    assert_eq!(grid.weeks().count(), WEEKS_IN_GRID);
                    assert_eq!(grid, MonthGrid::new(month, week_start));
                }
            }
        }
    }

    #[test]
    fn test_edges_of_time() {
        let first = ym(-9999, January);
        let grid = MonthGrid::new(first, WeekStart::SUNDAY);
        assert_eq!(grid.days().len(), GRID_CELLS);
        assert_eq!(first.previous(), None);
        assert_eq!(first.previous_year(), None);
        let last = ym(9999, December);
        let grid = MonthGrid::new(last, WeekStart::SUNDAY);
        assert_eq!(grid.trailing_filler() + grid.leading_filler() + 31, 42);
        assert_eq!(last.next(), None);
        assert_eq!(last.next_year(), None);
    }

    #[test]
    fn test_index_of() {
        // 2026-10-01 is a Thursday
        let grid = MonthGrid::new(ym(2026, October), WeekStart::SUNDAY);
        assert_eq!(grid.index_of(date!(2026 - 10 - 01)), Some(4));
        assert_eq!(grid.index_of(date!(2026 - 10 - 16)), Some(19));
        assert_eq!(grid.days()[19].label(), "16");
        assert_eq!(grid.index_of(date!(2026 - 09 - 30)), None);
        assert_eq!(grid.index_of(date!(2025 - 10 - 16)), None);
    }

    #[test]
    fn test_year_month_navigation() {
        let m = ym(2024, December);
        assert_eq!(m.next(), Some(ym(2025, January)));
        assert_eq!(ym(2025, January).previous(), Some(m));
        assert_eq!(ym(2024, March).previous(), Some(ym(2024, February)));
        assert_eq!(m.next_year(), Some(ym(2025, December)));
        assert_eq!(m.previous_year(), Some(ym(2023, December)));
    }

    #[test]
    fn test_year_month_containing() {
        assert_eq!(
            YearMonth::containing(date!(2026 - 10 - 16)),
            ym(2026, October)
        );
        assert_eq!(
            YearMonth::containing(date!(2026 - 10 - 16)).first_day(),
            date!(2026 - 10 - 01)
        );
    }

    #[test]
    fn test_year_month_length() {
        assert_eq!(ym(2024, February).length(), 29);
        assert_eq!(ym(2023, February).length(), 28);
        assert_eq!(ym(1900, February).length(), 28);
        assert_eq!(ym(2000, February).length(), 29);
        assert_eq!(ym(2026, September).length(), 30);
        assert_eq!(ym(2026, December).length(), 31);
    }

    #[test]
    fn test_trailing_filler_counts_next_month_days() {
        // 2026-10-01 is a Thursday: 4 + 31 + 7
        let grid = MonthGrid::new(ym(2026, October), WeekStart::SUNDAY);
        assert_eq!(grid.trailing_filler(), 7);
        assert!(grid.days()[35..].iter().all(|d| !d.is_current_month()));
        assert!(grid.days()[34].is_current_month());
    }

    #[test]
    fn test_year_month_display() {
        assert_eq!(ym(2026, October).to_string(), "October 2026");
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!("2026-10".parse::<YearMonth>(), Ok(ym(2026, October)));
        assert_eq!("0044-03".parse::<YearMonth>(), Ok(ym(44, March)));
        assert!("2026-13".parse::<YearMonth>().is_err());
        assert!("2026".parse::<YearMonth>().is_err());
        assert!("2026-10-16".parse::<YearMonth>().is_err());
        assert!("October".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_week_start_column() {
        assert_eq!(WeekStart::SUNDAY.column(Weekday::Sunday), 0);
        assert_eq!(WeekStart::SUNDAY.column(Weekday::Saturday), 6);
        assert_eq!(WeekStart::MONDAY.column(Weekday::Monday), 0);
        assert_eq!(WeekStart::MONDAY.column(Weekday::Sunday), 6);
        assert_eq!(WeekStart::new(Weekday::Saturday).column(Weekday::Sunday), 1);
    }

    #[test]
    fn test_week_start_weekdays() {
        let days = WeekStart::MONDAY.weekdays().collect::<Vec<_>>();
        assert_eq!(
            days,
            [
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
                Weekday::Saturday,
                Weekday::Sunday,
            ]
        );
    }

    #[test]
    fn test_parse_week_start() {
        assert_eq!("monday".parse::<WeekStart>(), Ok(WeekStart::MONDAY));
        assert_eq!("Mon".parse::<WeekStart>(), Ok(WeekStart::MONDAY));
        assert_eq!("SU".parse::<WeekStart>(), Ok(WeekStart::SUNDAY));
        assert_eq!(
            "sat".parse::<WeekStart>(),
            Ok(WeekStart::new(Weekday::Saturday))
        );
        assert_eq!(
            "funday".parse::<WeekStart>(),
            Err(ParseWeekStartError(String::from("funday")))
        );
        assert_eq!(WeekStart::default(), WeekStart::SUNDAY);
    }

    #[test]
    fn test_display_grid() {
        let grid = MonthGrid::new(ym(2015, February), WeekStart::SUNDAY);
        assert_eq!(
            grid.to_string(),
            concat!(
                "          February 2015\n",
                " Su   Mo   Tu   We   Th   Fr   Sa\n",
                "  1    2    3    4    5    6    7\n",
                "  8    9   10   11   12   13   14\n",
                " 15   16   17   18   19   20   21\n",
                " 22   23   24   25   26   27   28\n",
                "( 1) ( 2) ( 3) ( 4) ( 5) ( 6) ( 7)\n",
                "( 8) ( 9) (10) (11) (12) (13) (14)\n",
            )
        );
    }
}
