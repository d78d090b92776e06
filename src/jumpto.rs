use crate::calendar::YearMonth;
use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Month;

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;
const YEAR_DIGITS: usize = 4;
const ENTER_POS: usize = YEAR_DIGITS + 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * .................
     * .┌─ Jump To… ──┐.
     * .│             │.
     * .│  -YYYY-MM   │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Jump To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    negative: bool,
    year: [Option<u8>; YEAR_DIGITS],
    month: [Option<u8>; 2],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line so that only "[ENTER]"
            // and not its centering padding gets underlined
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        spans.push(Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        ));
        let mut first = true;
        for (fallback, digits) in [("Y", self.year.as_slice()), ("M", self.month.as_slice())] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    fn cell(&mut self, pos: usize) -> &mut Option<u8> {
        if pos < YEAR_DIGITS {
            &mut self.year[pos]
        } else {
            &mut self.month[pos - YEAR_DIGITS]
        }
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Negative, 0) => {
                self.negative = !self.negative;
                JumpToOutput::Ok
            }
            (JumpToInput::Positive, 0) => {
                self.negative = false;
                JumpToOutput::Ok
            }
            (JumpToInput::Digit(d), 0..ENTER_POS) => {
                *self.cell(self.pos) = Some(d);
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                *self.cell(self.pos) = None;
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, ENTER_POS) => {
                let mut year = 0i32;
                for d in self.year {
                    let d = d.expect("All year digits should be set");
                    year = year * 10 + i32::from(d);
                }
                if self.negative {
                    year *= -1;
                }
                let mut month = 0u8;
                for d in self.month {
                    let d = d.expect("All month digits should be set");
                    month = month * 10 + d;
                }
                let Ok(month) = Month::try_from(month) else {
                    return JumpToOutput::Invalid;
                };
                match YearMonth::new(year, month) {
                    Ok(ym) => JumpToOutput::Jump(ym),
                    Err(_) => JumpToOutput::Invalid,
                }
            }
            _ => JumpToOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(YearMonth),
}
