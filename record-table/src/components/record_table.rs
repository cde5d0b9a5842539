use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState as Selection},
    Frame,
};
use record_table_core::{
    table::highlight_segments, Column, EventKind, Keybindings, Record, SortDirection, TableState,
    TableView,
};

use super::Component;
use crate::action::Action;
use crate::keymap::{resolve, Command, KeyContext};

const HIGHLIGHT: Style = Style::new().fg(Color::Black).bg(Color::Rgb(255, 192, 105));
const ACTION_WIDTH: u16 = 14;

/// The paged record table with its Delete/Edit row actions
#[derive(Default)]
pub struct RecordTable;

pub struct RecordTableProps<'a> {
    pub view: &'a TableView<'a>,
    pub table: &'a TableState,
    pub keybindings: &'a Keybindings<KeyContext>,
    pub is_focused: bool,
}

impl RecordTable {
    pub fn new() -> Self {
        Self
    }

    fn header_cell(column: Column, table: &TableState) -> Cell<'static> {
        let mut title = column.title().to_string();
        if let Some(sort) = table.sort.filter(|s| s.column == column) {
            title.push_str(match sort.direction {
                SortDirection::Descend => " ▼",
                SortDirection::Ascend => " ▲",
            });
        }
        if table.filter(column).is_active() {
            title.push_str(" *");
        }

        let mut style = Style::default().fg(Color::White).bold();
        if table.focused_column == column {
            style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(title).style(style)
    }

    fn data_cell(column: Column, record: &Record, table: &TableState) -> Cell<'static> {
        let text = column.cell_text(record);
        let Some(query) = table.highlight.query_for(column) else {
            return Cell::from(text);
        };
        let spans: Vec<Span<'static>> = highlight_segments(&text, query)
            .into_iter()
            .map(|(segment, hit)| {
                if hit {
                    Span::styled(segment.to_string(), HIGHLIGHT)
                } else {
                    Span::raw(segment.to_string())
                }
            })
            .collect();
        Cell::from(Line::from(spans))
    }

    fn action_cell() -> Cell<'static> {
        Cell::from(Line::from(vec![
            Span::styled("Delete", Style::default().fg(Color::LightRed)),
            Span::raw("  "),
            Span::styled("Edit", Style::default().fg(Color::LightBlue)),
        ]))
    }

    fn widths() -> Vec<Constraint> {
        Column::ALL
            .iter()
            .map(|c| match c.width_percent() {
                Some(p) => Constraint::Percentage(p),
                None => Constraint::Fill(1),
            })
            .chain(std::iter::once(Constraint::Length(ACTION_WIDTH)))
            .collect()
    }
}

impl Component<Action> for RecordTable {
    type Props<'a> = RecordTableProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        let focused = props.table.focused_column;
        let cursor = props.table.cursor;
        let Some(command) = resolve(props.keybindings, key, KeyContext::Table) else {
            return None;
        };
        match command {
            Command::CursorUp => Some(Action::TableCursorMove(-1)),
            Command::CursorDown => Some(Action::TableCursorMove(1)),
            Command::ColumnNext => Some(Action::TableColumnNext),
            Command::ColumnPrev => Some(Action::TableColumnPrev),
            Command::Sort => Some(Action::TableSortToggle(focused)),
            Command::Filter => Some(Action::FilterOpen(focused)),
            Command::Add => Some(Action::RecordAddRequested),
            Command::Edit => props
                .view
                .row(cursor)
                .map(|r| Action::RecordEditRequested(r.key.clone())),
            Command::Delete => props
                .view
                .row(cursor)
                .map(|_| Action::RecordDeleteRequested(cursor)),
            Command::PageNext => Some(Action::TablePageNext),
            Command::PagePrev => Some(Action::TablePagePrev),
            Command::Quit => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        let table = props.table;
        let header = Row::new(
            Column::ALL
                .iter()
                .map(|&c| Self::header_cell(c, table))
                .chain(std::iter::once(Cell::from("Action").bold())),
        )
        .bottom_margin(1);

        let rows: Vec<Row> = if props.view.rows.is_empty() {
            vec![Row::new([Cell::from("No data").fg(Color::DarkGray)])]
        } else {
            props
                .view
                .rows
                .iter()
                .map(|record| {
                    Row::new(
                        Column::ALL
                            .iter()
                            .map(|&c| Self::data_cell(c, record, table))
                            .chain(std::iter::once(Self::action_cell())),
                    )
                })
                .collect()
        };

        let border_color = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let widget = Table::new(rows, Self::widths())
            .header(header)
            .column_spacing(2)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color))
                    .title(" Records "),
            )
            .row_highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("› ");

        let mut selection = Selection::default();
        if !props.view.rows.is_empty() {
            selection.select(Some(table.cursor));
        }
        frame.render_stateful_widget(widget, table_area, &mut selection);

        let footer = Line::from(vec![
            Span::styled(props.view.range_label(), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("  page {}/{}", props.view.page + 1, props.view.page_count),
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}
