//! Table view model: columns, per-column filters, single-column sort,
//! pagination and the row cursor.
//!
//! Nothing here mutates records. [`TableState::view`] derives the rows to
//! show from a record slice (filter, then sort, then page), and the state
//! operations only touch presentation data.

use std::cmp::Ordering;

use crate::record::{format_number, Record};

/// Rows per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Data columns of the table. The action column is rendered separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Date,
    NumberValue,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Name, Column::Date, Column::NumberValue];

    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Date => "Date",
            Column::NumberValue => "NumberValue",
        }
    }

    /// Field name, used in the filter placeholder ("Search name")
    pub fn field(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Date => "date",
            Column::NumberValue => "numberValue",
        }
    }

    /// Share of the table width; `None` takes what is left
    pub fn width_percent(self) -> Option<u16> {
        match self {
            Column::Name => Some(30),
            Column::Date => Some(20),
            Column::NumberValue => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Column::Name => 0,
            Column::Date => 1,
            Column::NumberValue => 2,
        }
    }

    pub fn next(self) -> Self {
        Column::ALL[(self.index() + 1) % Column::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Column::ALL[(self.index() + Column::ALL.len() - 1) % Column::ALL.len()]
    }

    /// The string a cell shows and a filter matches against
    pub fn cell_text(self, record: &Record) -> String {
        match self {
            Column::Name => record.name.clone(),
            Column::Date => record.date.clone(),
            Column::NumberValue => format_number(record.number_value),
        }
    }

    /// Ascending order: strings lexicographically, numbers numerically
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            Column::Name => a.name.cmp(&b.name),
            Column::Date => a.date.cmp(&b.date),
            Column::NumberValue => a.number_value.total_cmp(&b.number_value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Descend,
    Ascend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

/// Next sort after the user toggles `column`.
///
/// Cycle per column is unsorted, descend, ascend, unsorted. Another
/// column always starts at descend.
pub fn next_sort(current: Option<SortState>, column: Column) -> Option<SortState> {
    match current {
        Some(SortState {
            column: c,
            direction: SortDirection::Descend,
        }) if c == column => Some(SortState {
            column,
            direction: SortDirection::Ascend,
        }),
        Some(SortState {
            column: c,
            direction: SortDirection::Ascend,
        }) if c == column => None,
        _ => Some(SortState {
            column,
            direction: SortDirection::Descend,
        }),
    }
}

/// Filter state of one column
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnFilter {
    /// Text typed in the filter panel, not yet applied
    pub pending: String,
    /// Active predicate text
    pub applied: Option<String>,
}

impl ColumnFilter {
    pub fn is_active(&self) -> bool {
        self.applied.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Which column's cells highlight which text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchHighlight {
    pub column: Option<Column>,
    pub text: String,
}

impl SearchHighlight {
    /// Highlight query for cells of `column`, if any
    pub fn query_for(&self, column: Column) -> Option<&str> {
        (self.column == Some(column) && !self.text.is_empty()).then_some(self.text.as_str())
    }
}

/// Presentation state of the record table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
    filters: [ColumnFilter; 3],
    pub sort: Option<SortState>,
    pub highlight: SearchHighlight,
    /// Column whose filter panel is open
    pub filter_open: Option<Column>,
    /// Column targeted by sort/filter keys
    pub focused_column: Column,
    /// Zero-based page
    pub page: usize,
    pub page_size: usize,
    /// Row within the current page
    pub cursor: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: Default::default(),
            sort: None,
            highlight: SearchHighlight::default(),
            filter_open: None,
            focused_column: Column::Name,
            page: 0,
            page_size: page_size.max(1),
            cursor: 0,
        }
    }

    pub fn filter(&self, column: Column) -> &ColumnFilter {
        &self.filters[column.index()]
    }

    fn filter_mut(&mut self, column: Column) -> &mut ColumnFilter {
        &mut self.filters[column.index()]
    }

    /// Whether `record` passes every applied column filter
    pub fn matches(&self, record: &Record) -> bool {
        Column::ALL.iter().all(|&column| match &self.filter(column).applied {
            Some(text) => contains_ignore_case(&column.cell_text(record), text),
            None => true,
        })
    }

    /// Storage indices of the rows that pass the filters, in display order
    pub fn visible_indices(&self, records: &[Record]) -> Vec<usize> {
        let mut indices: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect();

        if let Some(sort) = self.sort {
            indices.sort_by(|&a, &b| {
                let ord = sort.column.compare(&records[a], &records[b]);
                match sort.direction {
                    SortDirection::Ascend => ord,
                    SortDirection::Descend => ord.reverse(),
                }
            });
        }
        indices
    }

    /// Rows of the current page
    pub fn view<'a>(&self, records: &'a [Record]) -> TableView<'a> {
        let indices = self.visible_indices(records);
        let total = indices.len();
        let page_count = page_count(total, self.page_size);
        let page = self.page.min(page_count - 1);
        let start = page * self.page_size;
        let rows = indices
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&i| &records[i])
            .collect();

        TableView {
            rows,
            total,
            start,
            page,
            page_count,
        }
    }

    /// Pull page and cursor back inside the data after it changed
    pub fn clamp(&mut self, records: &[Record]) {
        let total = self.visible_indices(records).len();
        let last_page = page_count(total, self.page_size) - 1;
        self.page = self.page.min(last_page);
        let on_page = total
            .saturating_sub(self.page * self.page_size)
            .min(self.page_size);
        self.cursor = self.cursor.min(on_page.saturating_sub(1));
    }

    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = next_sort(self.sort, column);
        self.first_page();
    }

    pub fn open_filter(&mut self, column: Column) {
        self.focused_column = column;
        self.filter_open = Some(column);
    }

    pub fn close_filter(&mut self) {
        self.filter_open = None;
    }

    pub fn set_pending(&mut self, column: Column, text: String) {
        self.filter_mut(column).pending = text;
    }

    /// Apply the pending text and highlight it. The panel stays open.
    pub fn apply_filter(&mut self, column: Column) {
        let filter = self.filter_mut(column);
        let text = filter.pending.clone();
        filter.applied = (!text.is_empty()).then(|| text.clone());
        self.highlight = SearchHighlight {
            column: Some(column),
            text,
        };
        self.first_page();
    }

    /// Apply the pending text, highlight it and close the panel
    pub fn search(&mut self, column: Column) {
        self.apply_filter(column);
        self.close_filter();
    }

    /// Clear the column's text and predicate plus the highlight text
    pub fn reset_filter(&mut self, column: Column) {
        *self.filter_mut(column) = ColumnFilter::default();
        self.highlight.text.clear();
        self.first_page();
    }

    pub fn move_cursor(&mut self, delta: isize, rows_on_page: usize) {
        let last = rows_on_page.saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn next_page(&mut self, page_count: usize) -> bool {
        if self.page + 1 < page_count {
            self.page += 1;
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    fn first_page(&mut self) {
        self.page = 0;
        self.cursor = 0;
    }
}

fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

/// One rendered page of the table
#[derive(Debug)]
pub struct TableView<'a> {
    pub rows: Vec<&'a Record>,
    /// Rows passing the filters, over all pages
    pub total: usize,
    /// Position of `rows[0]` among the filtered rows
    pub start: usize,
    pub page: usize,
    pub page_count: usize,
}

impl<'a> TableView<'a> {
    /// Record shown at `display_index` on this page
    pub fn row(&self, display_index: usize) -> Option<&'a Record> {
        self.rows.get(display_index).copied()
    }

    /// `"1-10 of 23"`, or `"0 of 0"` when empty
    pub fn range_label(&self) -> String {
        if self.rows.is_empty() {
            format!("0 of {}", self.total)
        } else {
            format!(
                "{}-{} of {}",
                self.start + 1,
                self.start + self.rows.len(),
                self.total
            )
        }
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte end of a case-insensitive match of `needle` at `start`
fn match_at(haystack: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut chars = haystack[start..].char_indices();
    for &n in needle {
        let (_, h) = chars.next()?;
        if !chars_eq_ignore_case(h, n) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(i, _)| start + i))
}

/// Case-insensitive substring test over the lowercased strings; an empty
/// needle always matches
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Split `text` into `(segment, is_match)` runs for every non-overlapping
/// case-insensitive occurrence of `query`.
///
/// Folding is per char, so a char whose lowercase form is several chars
/// (`İ`) may pass the filter without being highlighted.
pub fn highlight_segments<'t>(text: &'t str, query: &str) -> Vec<(&'t str, bool)> {
    let needle: Vec<char> = query.chars().collect();
    if needle.is_empty() {
        return vec![(text, false)];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        if let Some(end) = match_at(text, pos, &needle) {
            if plain_start < pos {
                segments.push((&text[plain_start..pos], false));
            }
            segments.push((&text[pos..end], true));
            pos = end;
            plain_start = end;
        } else {
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if plain_start < text.len() {
        segments.push((&text[plain_start..], false));
    }
    segments
}
