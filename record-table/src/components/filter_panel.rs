use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use record_table_core::{table::ColumnFilter, Column, EventKind, Keybindings};

use super::modal::{centered_rect, render_modal};
use super::text_input::{TextInput, TextInputProps};
use super::Component;
use crate::action::Action;
use crate::keymap::{resolve, Command, KeyContext};

/// Per-column search popup: one input and Search / Reset / Filter / Close
#[derive(Default)]
pub struct FilterPanel {
    input: TextInput,
    was_open: Option<Column>,
}

pub struct FilterPanelProps<'a> {
    pub column: Column,
    pub filter: &'a ColumnFilter,
    pub keybindings: &'a Keybindings<KeyContext>,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track which column is open so the cursor starts at the end of the
    /// text each time the panel opens
    pub fn set_open(&mut self, column: Option<Column>) {
        if column.is_some() && column != self.was_open {
            self.input.reset();
        }
        self.was_open = column;
    }

    fn placeholder(column: Column) -> String {
        format!("Search {}", column.field())
    }
}

/// `[Enter] Search` style hint for a command, skipped when unbound
pub(crate) fn button<'a>(
    keybindings: &Keybindings<KeyContext>,
    context: KeyContext,
    command: Command,
    label: &'a str,
) -> Option<Vec<Span<'a>>> {
    let key = keybindings.first_key(command.name(), context)?;
    Some(vec![
        Span::styled(
            format!("[{}]", record_table_core::format_key_for_display(key)),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(format!(" {}  ", label), Style::default().fg(Color::Gray)),
    ])
}

impl Component<Action> for FilterPanel {
    type Props<'a> = FilterPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };

        match resolve(props.keybindings, key, KeyContext::Filter) {
            Some(Command::Search) => return Some(Action::FilterSearch),
            Some(Command::Apply) => return Some(Action::FilterApply),
            Some(Command::Reset) => {
                self.input.reset();
                return Some(Action::FilterReset);
            }
            Some(Command::Close) => return Some(Action::FilterClose),
            Some(Command::Quit) => return Some(Action::Quit),
            _ => {}
        }

        let placeholder = Self::placeholder(props.column);
        let action = self
            .input
            .handle_event(
                event,
                TextInputProps {
                    value: &props.filter.pending,
                    placeholder: &placeholder,
                    is_focused: true,
                    on_change: Action::FilterInputChange,
                },
            )
            .into_iter()
            .next();
        action
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(60, 7, area);
        let title = format!("Filter {}", props.column.title());
        let inner = render_modal(frame, modal_area, &title);

        let [input_area, status_area, buttons_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(inner);

        let placeholder = Self::placeholder(props.column);
        self.input.render(
            frame,
            input_area,
            TextInputProps {
                value: &props.filter.pending,
                placeholder: &placeholder,
                is_focused: true,
                on_change: Action::FilterInputChange,
            },
        );

        let status = match props.filter.applied.as_deref() {
            Some(text) => format!("Active: \"{}\"", text),
            None => "No filter".to_string(),
        };
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
            status_area,
        );

        let kb = props.keybindings;
        let ctx = KeyContext::Filter;
        let spans: Vec<Span> = [
            button(kb, ctx, Command::Search, "Search"),
            button(kb, ctx, Command::Reset, "Reset"),
            button(kb, ctx, Command::Apply, "Filter"),
            button(kb, ctx, Command::Close, "close"),
        ]
        .into_iter()
        .flatten()
        .flatten()
        .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), buttons_area);
    }
}
