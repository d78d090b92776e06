use crate::calendar::{MonthPager, MonthView};
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    pager: MonthPager,
    state: AppState,
}

impl App {
    pub(crate) fn new(pager: MonthPager) -> App {
        App {
            pager,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = read()?
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.pager.one_month_backwards().is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.pager.one_month_forwards().is_ok(),
                KeyCode::Char('k') | KeyCode::PageUp => self.pager.one_year_backwards().is_ok(),
                KeyCode::Char('j') | KeyCode::PageDown => self.pager.one_year_forwards().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.pager.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c) => match c.to_digit(10).map(u8::try_from) {
                            Some(Ok(d)) => state.handle_input(JumpToInput::Digit(d)),
                            _ => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(month) => {
                            self.state = AppState::Calendar;
                            self.pager.jump_to(month);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        MonthView.render(area, buf, &mut self.pager);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
