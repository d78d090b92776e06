use super::grid::{MonthGrid, WeekStart, YearMonth};
use thiserror::Error;
use time::Date;

/// The month currently on display, along with the information needed to lay
/// it out.  Grids are rebuilt on every call to [`MonthPager::grid()`] rather
/// than stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthPager {
    pub(super) today: Date,
    shown: YearMonth,
    week_start: WeekStart,
}

impl MonthPager {
    pub(crate) fn new(today: Date, week_start: WeekStart) -> Self {
        MonthPager {
            today,
            shown: YearMonth::containing(today),
            week_start,
        }
    }

    pub(crate) fn start_month(mut self, month: YearMonth) -> Self {
        self.shown = month;
        self
    }

    pub(crate) fn shown(&self) -> YearMonth {
        self.shown
    }

    pub(crate) fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.shown(), self.week_start)
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.show(YearMonth::containing(self.today));
    }

    pub(crate) fn jump_to(&mut self, month: YearMonth) {
        self.show(month);
    }

    pub(crate) fn one_month_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.step(YearMonth::next)
    }

    pub(crate) fn one_month_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.step(YearMonth::previous)
    }

    pub(crate) fn one_year_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.step(YearMonth::next_year)
    }

    pub(crate) fn one_year_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.step(YearMonth::previous_year)
    }

    fn step<F>(&mut self, func: F) -> Result<(), OutOfTimeError>
    where
        F: FnOnce(YearMonth) -> Option<YearMonth>,
    {
        if let Some(month) = func(self.shown) {
            self.show(month);
            Ok(())
        } else {
            log::info!("Cannot move past {}: reached the end of time", self.shown);
            Err(OutOfTimeError)
        }
    }

    fn show(&mut self, month: YearMonth) {
        log::debug!("Displaying {month}");
        self.shown = month;
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
