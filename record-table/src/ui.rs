//! Top-level screen: lays out the components and routes events to the one
//! that owns the active key context

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use record_table_core::{format_key_for_display, EventKind, Keybindings};

use crate::action::Action;
use crate::components::{
    Component, EditFormModal, EditFormProps, FilterPanel, FilterPanelProps, HelpBar,
    HelpBarProps, RecordTable, RecordTableProps,
};
use crate::keymap::{Command, KeyContext};
use crate::state::AppState;

pub struct RecordTableUi {
    table: RecordTable,
    filter: FilterPanel,
    form: EditFormModal,
    keybindings: Keybindings<KeyContext>,
}

impl RecordTableUi {
    pub fn new(keybindings: Keybindings<KeyContext>) -> Self {
        Self {
            table: RecordTable::new(),
            filter: FilterPanel::new(),
            form: EditFormModal::new(),
            keybindings,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [toolbar_area, table_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_toolbar(frame, toolbar_area);

        let context = state.key_context();
        let view = state.view();
        self.table.render(
            frame,
            table_area,
            RecordTableProps {
                view: &view,
                table: &state.table,
                keybindings: &self.keybindings,
                is_focused: context == KeyContext::Table,
            },
        );

        if let Some(status) = &state.status {
            frame.render_widget(
                Paragraph::new(format!(" {}", status)).style(Style::default().fg(Color::Green)),
                status_area,
            );
        }

        HelpBar.render(
            frame,
            help_area,
            HelpBarProps {
                context,
                keybindings: &self.keybindings,
            },
        );

        self.filter.set_open(state.table.filter_open);
        if let Some(column) = state.table.filter_open.filter(|_| state.editing.is_none()) {
            self.filter.render(
                frame,
                area,
                FilterPanelProps {
                    column,
                    filter: state.table.filter(column),
                    keybindings: &self.keybindings,
                },
            );
        }

        self.form.set_open(state.editing.is_some());
        if let Some(form) = &state.editing {
            self.form.render(
                frame,
                area,
                EditFormProps {
                    form,
                    keybindings: &self.keybindings,
                },
            );
        }
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" Records ", Style::default().fg(Color::White).bold())];
        if let Some(key) = self.keybindings.first_key(Command::Add.name(), KeyContext::Table) {
            spans.push(Span::styled(
                format!(" [{}] Add Person ", format_key_for_display(key)),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Turn one terminal event into actions for the focused component
    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        if let EventKind::Resize(width, height) = event {
            return vec![Action::UiTerminalResize(*width, *height)];
        }

        if let Some(form) = &state.editing {
            self.form.set_open(true);
            return self
                .form
                .handle_event(
                    event,
                    EditFormProps {
                        form,
                        keybindings: &self.keybindings,
                    },
                )
                .into_iter()
                .collect();
        }

        if let Some(column) = state.table.filter_open {
            self.filter.set_open(Some(column));
            return self
                .filter
                .handle_event(
                    event,
                    FilterPanelProps {
                        column,
                        filter: state.table.filter(column),
                        keybindings: &self.keybindings,
                    },
                )
                .into_iter()
                .collect();
        }

        let view = state.view();
        self.table
            .handle_event(
                event,
                RecordTableProps {
                    view: &view,
                    table: &state.table,
                    keybindings: &self.keybindings,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }
}
