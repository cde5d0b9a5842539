//! Test helpers: key construction, a render harness over ratatui's
//! `TestBackend`, and assertion macros for emitted actions.
//!
//! ```ignore
//! use record_table_core::testing::{key, RenderHarness};
//!
//! let mut render = RenderHarness::new(80, 24);
//! let output = render.render_to_string_plain(|frame| table.render(frame, frame.area(), props));
//! assert!(output.contains("John Brown"));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Frame, Terminal};

use crate::event::EventKind;
use crate::keybindings::parse_key_string;

/// `KeyEvent` from a key string such as `"ctrl+s"` or `"enter"`.
///
/// # Panics
///
/// Panics if the string does not parse.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Key press for a plain character
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key string wrapped as an [`EventKind`]
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// One `EventKind` per character, for typing text into inputs
pub fn typed(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// Renders into an in-memory terminal of fixed size
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|e| panic!("failed to draw test frame: {e}"));
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, one line per row
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Buffer contents without styling, trailing spaces trimmed per line
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Text of `rect` within `buffer`
pub fn buffer_rect_to_string_plain(buffer: &Buffer, rect: Rect) -> String {
    let mut lines = Vec::with_capacity(rect.height as usize);
    for y in rect.y..rect.y.saturating_add(rect.height) {
        let mut line = String::new();
        for x in rect.x..rect.x.saturating_add(rect.width) {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Position of the first occurrence of `needle` in the rendered buffer
pub fn find_text(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    let area = buffer.area;
    for y in area.y..area.y.saturating_add(area.height) {
        let row = buffer_rect_to_string_plain(buffer, Rect::new(area.x, y, area.width, 1));
        if let Some(byte_idx) = row.find(needle) {
            let col = row[..byte_idx].chars().count() as u16;
            return Some((area.x + col, y));
        }
    }
    None
}

/// Assert that an action matching the pattern was emitted
///
/// ```ignore
/// let actions: Vec<_> = component.handle_event(&event, props).into_iter().collect();
/// assert_emitted!(actions, Action::RecordAddRequested);
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching the pattern was emitted
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}
