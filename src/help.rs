use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Key bindings paired with what they do
static COMMANDS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous month"),
    ("l, RIGHT", "Next month"),
    ("k, PAGE UP", "Previous year"),
    ("j, PAGE DOWN", "Next year"),
    ("0, HOME", "Jump to this month"),
    ("g", "Input month to jump to"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEYS_WIDTH: usize = 16;

const DISMISS: &str = "Press the Any Key to dismiss.";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn text() -> Text<'static> {
        let mut lines = COMMANDS
            .iter()
            .map(|(keys, action)| Line::raw(format!("{keys:width$}{action}", width = KEYS_WIDTH)))
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw(DISMISS));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Room for the border on each side
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(popup);
        // Blank a column of padding on either side of the border, clipped to
        // the frame
        let padded = Rect {
            x: popup.x.saturating_sub(1),
            width: popup.width.saturating_add(2),
            ..popup
        }
        .intersection(area);
        Clear.render(padded, buf);
        Block::new().style(BASE_STYLE).render(padded, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(popup, buf);
    }
}
