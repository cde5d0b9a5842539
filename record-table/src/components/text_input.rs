//! Single-line text field used by the filter panel and the edit form

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use record_table_core::{Component, EventKind};

pub struct TextInputProps<'a, A> {
    pub value: &'a str,
    /// Shown dimmed while the value is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    pub on_change: fn(String) -> A,
}

/// Editing keys for one line of text.
///
/// The value lives in app state; this only tracks the cursor, counted in
/// characters. A cursor of `None` sits after the last character, which is
/// where it lands whenever the field is (re)opened.
#[derive(Debug, Default)]
pub struct TextInput {
    cursor: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor back to the end of whatever value comes next
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    fn cursor(&self, value: &str) -> usize {
        let len = value.chars().count();
        self.cursor.map_or(len, |c| c.min(len))
    }

    fn byte_offset(value: &str, char_index: usize) -> usize {
        value
            .char_indices()
            .nth(char_index)
            .map_or(value.len(), |(i, _)| i)
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let at = self.cursor(value);
        let offset = Self::byte_offset(value, at);
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..offset]);
        next.push(c);
        next.push_str(&value[offset..]);
        self.cursor = Some(at + 1);
        next
    }

    fn remove_at(value: &str, char_index: usize) -> String {
        value
            .chars()
            .enumerate()
            .filter(|&(i, _)| i != char_index)
            .map(|(_, c)| c)
            .collect()
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let at = self.cursor(value);
        if at == 0 {
            return None;
        }
        self.cursor = Some(at - 1);
        Some(Self::remove_at(value, at - 1))
    }

    fn delete(&mut self, value: &str) -> Option<String> {
        let at = self.cursor(value);
        (at < value.chars().count()).then(|| Self::remove_at(value, at))
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        let value = props.value;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = Some(0);
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = None;
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = Some(0);
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some((props.on_change)(self.insert(value, c))),
            KeyCode::Backspace => self.backspace(value).map(props.on_change),
            KeyCode::Delete => self.delete(value).map(props.on_change),
            KeyCode::Left => {
                self.cursor = Some(self.cursor(value).saturating_sub(1));
                None
            }
            KeyCode::Right => {
                self.cursor = Some(self.cursor(value) + 1);
                None
            }
            KeyCode::Home => {
                self.cursor = Some(0);
                None
            }
            KeyCode::End => {
                self.cursor = None;
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let style = if props.is_focused {
            Style::default().fg(Color::White).bg(Color::Rgb(45, 45, 60))
        } else {
            Style::default().fg(Color::Gray)
        };

        let line = if props.value.is_empty() {
            Line::from(Span::styled(
                props.placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(props.value)
        };
        frame.render_widget(Paragraph::new(line).style(style), area);

        if props.is_focused && area.width > 0 {
            let cursor = self.cursor(props.value) as u16;
            let x = area.x + cursor.min(area.width - 1);
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }
}
