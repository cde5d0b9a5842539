//! Application state

use chrono::NaiveDate;
use record_table_core::{EditForm, RecordStore, TableState, TableView};

use crate::keymap::KeyContext;

/// Source of "today" for new drafts
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub records: RecordStore,
    pub table: TableState,
    /// Open edit modal, if any
    pub editing: Option<EditForm>,
    /// One-line notice shown under the table
    pub status: Option<String>,
    pub terminal_size: (u16, u16),
    pub today: Clock,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RecordStore::default(), TableState::default())
    }
}

impl AppState {
    pub fn new(records: RecordStore, table: TableState) -> Self {
        Self {
            records,
            table,
            editing: None,
            status: None,
            terminal_size: (80, 24),
            today: local_today,
        }
    }

    /// Replace the clock, mainly for tests
    pub fn with_clock(mut self, today: Clock) -> Self {
        self.today = today;
        self
    }

    /// Rows currently on screen
    pub fn view(&self) -> TableView<'_> {
        self.table.view(self.records.records())
    }

    /// Which keybinding context is active. The form wins over the filter panel.
    pub fn key_context(&self) -> KeyContext {
        if self.editing.is_some() {
            KeyContext::Form
        } else if self.table.filter_open.is_some() {
            KeyContext::Filter
        } else {
            KeyContext::Table
        }
    }
}
