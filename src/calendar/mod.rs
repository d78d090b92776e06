mod grid;
mod pager;
mod widget;
pub(crate) use self::grid::{MonthGrid, WeekStart, YearMonth};
pub(crate) use self::pager::MonthPager;
pub(crate) use self::widget::MonthView;
