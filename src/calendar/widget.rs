use super::grid::WeekdayExt;
use super::pager::MonthPager;
use crate::theme::{DAY_STYLE, FILLER_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Paragraph, StatefulWidget, Widget},
};

/// Number of columns per day of week, including the separating space
const DAY_WIDTH: u16 = 5;

/// Width of the grid in columns; the last day has no trailing space
const MAIN_WIDTH: u16 = DAY_WIDTH * 7 - 1;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the grid
const WEEK_LINES: u16 = 2;

/// The last of the six weeks is not followed by a blank line
const TOTAL_HEIGHT: u16 = HEADER_LINES + WEEK_LINES * 6 - 1;

const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView;

impl StatefulWidget for MonthView {
    type State = MonthPager;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [area] = Layout::horizontal([MAIN_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([TOTAL_HEIGHT])
            .flex(Flex::Center)
            .areas(area);
        let grid = state.grid();
        let today = grid.index_of(state.today);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&grid.month().to_string());
        let header = grid
            .week_start()
            .weekdays()
            .map(|wd| format!(" {} ", wd.abbrev()))
            .collect::<Vec<_>>()
            .join(" ");
        canvas.draw_header(&header);
        for (i, week) in std::iter::zip(0u16.., grid.weeks()) {
            for (j, day) in std::iter::zip(0u16.., week) {
                let is_today = today == Some(usize::from(i * 7 + j));
                let style = if is_today {
                    TODAY_STYLE
                } else if day.is_current_month() {
                    DAY_STYLE
                } else {
                    FILLER_STYLE
                };
                canvas.draw_day(i, j, day.show(is_today), style);
            }
        }
    }
}

#[derive(Debug)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.len()).unwrap_or(u16::MAX);
        self.mvprint(
            0,
            MAIN_WIDTH.saturating_sub(width) / 2,
            title,
            Some(TITLE_STYLE),
        );
    }

    fn draw_header(&mut self, header: &str) {
        self.mvprint(1, 0, header, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, column: u16, s: String, style: Style) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * column,
            s,
            Some(style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text that extends past the area, so long
            // as the Rect handed to it lies entirely within the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
