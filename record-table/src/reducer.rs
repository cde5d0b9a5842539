//! Reducer: `(state, action) -> changed`
//!
//! Every mutation of the record list and the table happens here. Stale
//! references (unknown key, index past the page) are logged and ignored.

use record_table_core::{Draft, EditForm};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> bool {
    let cleared = clears_status(&action) && state.status.take().is_some();
    apply(state, action) || cleared
}

/// Commands after which the last status notice no longer applies
fn clears_status(action: &Action) -> bool {
    matches!(
        action,
        Action::RecordAddRequested
            | Action::RecordEditRequested(_)
            | Action::RecordDeleteRequested(_)
            | Action::FilterSearch
            | Action::FilterApply
            | Action::FilterReset
            | Action::TableSortToggle(_)
            | Action::TablePageNext
            | Action::TablePagePrev
    )
}

fn apply(state: &mut AppState, action: Action) -> bool {
    match action {
        // ===== Record commands =====
        Action::RecordAddRequested => {
            state.editing = Some(EditForm::new(Draft::blank((state.today)())));
            true
        }

        Action::RecordEditRequested(key) => match state.records.get(&key) {
            Some(record) => {
                state.editing = Some(EditForm::new(Draft::from(record.clone())));
                true
            }
            None => {
                debug!(key = %key, "edit requested for unknown key");
                false
            }
        },

        Action::RecordDeleteRequested(display_index) => delete_row(state, display_index),

        Action::RecordDraftSubmitted(draft) => {
            state.editing = None;
            submit_draft(state, draft);
            state.table.clamp(state.records.records());
            true
        }

        // ===== Form =====
        Action::FormValueChange(value) => match state.editing.as_mut() {
            Some(form) => {
                let field = form.focus;
                form.set_value(field, value);
                true
            }
            None => false,
        },

        Action::FormFocusNext => match state.editing.as_mut() {
            Some(form) => {
                form.focus = form.focus.next();
                true
            }
            None => false,
        },

        Action::FormFocusPrev => match state.editing.as_mut() {
            Some(form) => {
                form.focus = form.focus.prev();
                true
            }
            None => false,
        },

        Action::FormDidReject(error) => match state.editing.as_mut() {
            Some(form) => {
                form.error = Some(error);
                true
            }
            None => false,
        },

        Action::FormCancel => state.editing.take().is_some(),

        // ===== Filter panel =====
        Action::FilterOpen(column) => {
            state.table.open_filter(column);
            true
        }

        Action::FilterInputChange(text) => match state.table.filter_open {
            Some(column) => {
                state.table.set_pending(column, text);
                true
            }
            None => false,
        },

        Action::FilterSearch => match state.table.filter_open {
            Some(column) => {
                state.table.search(column);
                state.table.clamp(state.records.records());
                true
            }
            None => false,
        },

        Action::FilterApply => match state.table.filter_open {
            Some(column) => {
                state.table.apply_filter(column);
                state.table.clamp(state.records.records());
                true
            }
            None => false,
        },

        Action::FilterReset => match state.table.filter_open {
            Some(column) => {
                state.table.reset_filter(column);
                state.table.clamp(state.records.records());
                true
            }
            None => false,
        },

        Action::FilterClose => {
            let was_open = state.table.filter_open.is_some();
            state.table.close_filter();
            was_open
        }

        // ===== Table =====
        Action::TableSortToggle(column) => {
            state.table.focused_column = column;
            state.table.toggle_sort(column);
            true
        }

        Action::TableColumnNext => {
            state.table.focused_column = state.table.focused_column.next();
            true
        }

        Action::TableColumnPrev => {
            state.table.focused_column = state.table.focused_column.prev();
            true
        }

        Action::TableCursorMove(delta) => {
            let rows = state.view().rows.len();
            let before = state.table.cursor;
            state.table.move_cursor(delta, rows);
            state.table.cursor != before
        }

        Action::TablePageNext => {
            let page_count = state.view().page_count;
            state.table.next_page(page_count)
        }

        Action::TablePagePrev => state.table.prev_page(),

        // ===== UI =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                true
            } else {
                false
            }
        }

        // handled by the main loop
        Action::Quit => false,
    }
}

/// Delete the record shown at `display_index` on the current page
fn delete_row(state: &mut AppState, display_index: usize) -> bool {
    let Some(key) = state.view().row(display_index).map(|r| r.key.clone()) else {
        debug!(display_index, "delete requested outside the current page");
        return false;
    };
    let Some(position) = state.records.position(&key) else {
        return false;
    };

    match state.records.delete(position) {
        Ok(record) => {
            info!(key = %record.key, "record deleted");
            state.status = Some(format!("Deleted {}", record.name));
            state.table.clamp(state.records.records());
            true
        }
        Err(e) => {
            warn!(error = %e, "delete failed");
            false
        }
    }
}

/// Update when the draft carries a key, add otherwise
fn submit_draft(state: &mut AppState, draft: Draft) {
    match draft.existing_key().map(str::to_owned) {
        Some(key) => {
            let name = draft.name.clone();
            if state.records.update(draft.into_record(key.clone())) {
                info!(key = %key, "record updated");
                state.status = Some(format!("Saved {}", name));
            } else {
                warn!(key = %key, "update for a record that no longer exists");
                state.status = Some(format!("Record {} no longer exists", key));
            }
        }
        None => match state.records.add(draft) {
            Ok(record) => {
                info!(key = %record.key, "record added");
                state.status = Some(format!("Added {}", record.name));
            }
            Err(e) => {
                warn!(error = %e, "add failed");
                state.status = Some(e.to_string());
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use record_table_core::{
        seed_records, Column, FormError, FormField, Record, RecordStore, TableState,
    };

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn seeded() -> AppState {
        AppState::new(
            RecordStore::from_records(seed_records()).unwrap(),
            TableState::default(),
        )
        .with_clock(fixed_today)
    }

    fn with_records(records: Vec<Record>, page_size: usize) -> AppState {
        AppState::new(
            RecordStore::from_records(records).unwrap(),
            TableState::new(page_size),
        )
        .with_clock(fixed_today)
    }

    fn keys(state: &AppState) -> Vec<&str> {
        state
            .records
            .records()
            .iter()
            .map(|r| r.key.as_str())
            .collect()
    }

    fn visible_names(state: &AppState) -> Vec<String> {
        state.view().rows.iter().map(|r| r.name.clone()).collect()
    }

    fn draft(key: Option<&str>, name: &str) -> Draft {
        Draft {
            key: key.map(str::to_owned),
            name: name.into(),
            date: "2024-01-01".into(),
            number_value: 7.0,
        }
    }

    #[test]
    fn test_add_requested_opens_blank_form() {
        let mut state = seeded();

        assert!(reducer(&mut state, Action::RecordAddRequested));

        let form = state.editing.as_ref().unwrap();
        assert!(form.is_new());
        assert_eq!(form.value(FormField::Name), "");
        assert_eq!(form.value(FormField::Date), "2024-05-17");
        assert_eq!(form.value(FormField::NumberValue), "0");
    }

    #[test]
    fn test_edit_requested_prefills_form() {
        let mut state = seeded();

        assert!(reducer(&mut state, Action::RecordEditRequested("2".into())));

        let form = state.editing.as_ref().unwrap();
        assert_eq!(form.original().existing_key(), Some("2"));
        assert_eq!(form.value(FormField::Name), "Joe Black");
        assert_eq!(form.value(FormField::NumberValue), "321");
    }

    #[test]
    fn test_edit_unknown_key_is_noop() {
        let mut state = seeded();
        assert!(!reducer(&mut state, Action::RecordEditRequested("99".into())));
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_submit_without_key_adds_next_numeric_key() {
        let mut records = seed_records();
        records.truncate(3);
        records.remove(1); // keys 1, 3
        let mut state = with_records(records, 10);
        state.editing = Some(EditForm::new(draft(None, "A")));

        assert!(reducer(&mut state, Action::RecordDraftSubmitted(draft(None, "A"))));

        assert_eq!(keys(&state), vec!["1", "3", "4"]);
        assert_eq!(state.records.get("4").unwrap().name, "A");
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_submit_on_empty_list_uses_key_one() {
        let mut state = with_records(Vec::new(), 10);
        reducer(&mut state, Action::RecordDraftSubmitted(draft(None, "First")));
        assert_eq!(keys(&state), vec!["1"]);
    }

    #[test]
    fn test_submit_with_empty_key_adds() {
        let mut state = seeded();
        reducer(&mut state, Action::RecordDraftSubmitted(draft(Some(""), "Blank key")));
        assert_eq!(keys(&state), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_submit_with_key_updates_in_place() {
        let mut state = seeded();
        state.editing = Some(EditForm::new(draft(Some("2"), "B")));

        reducer(&mut state, Action::RecordDraftSubmitted(draft(Some("2"), "B")));

        assert_eq!(keys(&state), vec!["1", "2", "3", "4"]);
        let updated = &state.records.records()[1];
        assert_eq!(updated.name, "B");
        assert_eq!(updated.number_value, 7.0);
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_submit_with_unknown_key_leaves_list() {
        let mut state = seeded();
        let before = state.records.clone();

        reducer(&mut state, Action::RecordDraftSubmitted(draft(Some("99"), "Ghost")));

        assert_eq!(state.records, before);
        assert_eq!(state.status.as_deref(), Some("Record 99 no longer exists"));
    }

    #[test]
    fn test_delete_by_display_index() {
        let mut state = seeded();

        assert!(reducer(&mut state, Action::RecordDeleteRequested(1)));

        assert_eq!(keys(&state), vec!["1", "3", "4"]);
        assert_eq!(state.status.as_deref(), Some("Deleted Joe Black"));
    }

    #[test]
    fn test_delete_while_sorted_removes_shown_row() {
        let mut state = seeded();
        // descending by name: John Brown, Joe Black, Jim Red, Jim Green
        reducer(&mut state, Action::TableSortToggle(Column::Name));

        reducer(&mut state, Action::RecordDeleteRequested(2));

        assert!(state.records.get("4").is_none());
        assert_eq!(keys(&state), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_delete_while_filtered_removes_shown_row() {
        let mut state = seeded();
        reducer(&mut state, Action::FilterOpen(Column::Name));
        reducer(&mut state, Action::FilterInputChange("jim".into()));
        reducer(&mut state, Action::FilterSearch);
        assert_eq!(visible_names(&state), vec!["Jim Green", "Jim Red"]);

        reducer(&mut state, Action::RecordDeleteRequested(1));

        assert_eq!(keys(&state), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_delete_outside_page_is_noop() {
        let mut state = seeded();
        assert!(!reducer(&mut state, Action::RecordDeleteRequested(4)));
        assert_eq!(state.records.len(), 4);
    }

    #[test]
    fn test_add_then_delete_restores_list() {
        let mut state = seeded();
        let before = state.records.clone();

        reducer(&mut state, Action::RecordDraftSubmitted(draft(None, "Temp")));
        assert_eq!(state.records.len(), 5);
        reducer(&mut state, Action::RecordDeleteRequested(4));

        assert_eq!(state.records, before);
    }

    #[test]
    fn test_delete_last_row_of_last_page_clamps() {
        let records: Vec<Record> = (1..=11)
            .map(|i| Record {
                key: i.to_string(),
                name: format!("Row {i}"),
                date: "2024-01-01".into(),
                number_value: i as f64,
            })
            .collect();
        let mut state = with_records(records, 10);
        assert!(reducer(&mut state, Action::TablePageNext));
        assert_eq!(state.table.page, 1);

        reducer(&mut state, Action::RecordDeleteRequested(0));

        assert_eq!(state.table.page, 0);
        assert_eq!(state.view().rows.len(), 10);
    }

    #[test]
    fn test_form_value_change_targets_focused_field() {
        let mut state = seeded();
        reducer(&mut state, Action::RecordEditRequested("1".into()));
        reducer(&mut state, Action::FormFocusNext);

        reducer(&mut state, Action::FormValueChange("2024-02-02".into()));

        let form = state.editing.as_ref().unwrap();
        assert_eq!(form.focus, FormField::Date);
        assert_eq!(form.value(FormField::Date), "2024-02-02");
        assert_eq!(form.value(FormField::Name), "John Brown");
    }

    #[test]
    fn test_form_reject_keeps_form_open() {
        let mut state = seeded();
        reducer(&mut state, Action::RecordAddRequested);

        reducer(
            &mut state,
            Action::FormDidReject(FormError::Required(FormField::Name)),
        );

        let form = state.editing.as_ref().unwrap();
        assert_eq!(form.error, Some(FormError::Required(FormField::Name)));
        assert_eq!(state.records.len(), 4);

        // typing clears the message
        reducer(&mut state, Action::FormValueChange("N".into()));
        assert_eq!(state.editing.as_ref().unwrap().error, None);
    }

    #[test]
    fn test_form_cancel() {
        let mut state = seeded();
        reducer(&mut state, Action::RecordEditRequested("3".into()));
        reducer(&mut state, Action::FormValueChange("Changed".into()));

        assert!(reducer(&mut state, Action::FormCancel));
        assert!(state.editing.is_none());
        assert_eq!(state.records.get("3").unwrap().name, "Jim Green");
        assert!(!reducer(&mut state, Action::FormCancel));
    }

    #[test]
    fn test_filter_apply_keeps_panel_search_closes() {
        let mut state = seeded();
        reducer(&mut state, Action::FilterOpen(Column::Name));
        reducer(&mut state, Action::FilterInputChange("jo".into()));

        reducer(&mut state, Action::FilterApply);
        assert_eq!(state.table.filter_open, Some(Column::Name));
        assert_eq!(visible_names(&state), vec!["John Brown", "Joe Black"]);

        reducer(&mut state, Action::FilterInputChange("joe".into()));
        reducer(&mut state, Action::FilterSearch);
        assert_eq!(state.table.filter_open, None);
        assert_eq!(visible_names(&state), vec!["Joe Black"]);
    }

    #[test]
    fn test_filter_reset_and_close() {
        let mut state = seeded();
        reducer(&mut state, Action::FilterOpen(Column::Name));
        reducer(&mut state, Action::FilterInputChange("red".into()));
        reducer(&mut state, Action::FilterApply);
        assert_eq!(state.view().total, 1);

        reducer(&mut state, Action::FilterReset);
        assert_eq!(state.view().total, 4);
        assert_eq!(state.table.highlight.query_for(Column::Name), None);

        assert!(reducer(&mut state, Action::FilterClose));
        assert!(!reducer(&mut state, Action::FilterClose));
    }

    #[test]
    fn test_filter_close_discards_pending_text() {
        let mut state = seeded();
        reducer(&mut state, Action::FilterOpen(Column::Name));
        reducer(&mut state, Action::FilterInputChange("red".into()));

        reducer(&mut state, Action::FilterClose);

        assert_eq!(state.table.filter_open, None);
        assert_eq!(state.table.filter(Column::Name).applied, None);
        assert_eq!(state.view().total, 4);
        assert_eq!(state.table.highlight.query_for(Column::Name), None);
    }

    #[test]
    fn test_sort_returns_to_first_page() {
        let records: Vec<Record> = (1..=15)
            .map(|i| Record {
                key: i.to_string(),
                name: format!("Row {i:02}"),
                date: "2024-01-01".into(),
                number_value: i as f64,
            })
            .collect();
        let mut state = with_records(records, 10);
        reducer(&mut state, Action::TablePageNext);
        assert_eq!(state.table.page, 1);

        reducer(&mut state, Action::TableSortToggle(Column::NumberValue));

        assert_eq!(state.table.page, 0);
        assert_eq!(state.view().rows[0].name, "Row 15");
    }

    #[test]
    fn test_status_cleared_by_next_command() {
        let mut state = seeded();
        reducer(&mut state, Action::RecordDeleteRequested(0));
        assert_eq!(state.status.as_deref(), Some("Deleted John Brown"));

        // cursor moves keep the notice
        reducer(&mut state, Action::TableCursorMove(1));
        assert!(state.status.is_some());

        assert!(reducer(&mut state, Action::TableSortToggle(Column::Name)));
        assert_eq!(state.status, None);
    }

    #[test]
    fn test_status_cleared_even_when_command_is_noop() {
        let mut state = seeded();
        state.status = Some("Saved Jim Red".into());

        assert!(reducer(&mut state, Action::TablePageNext));
        assert_eq!(state.status, None);
        assert!(!reducer(&mut state, Action::TablePageNext));
    }

    #[test]
    fn test_filter_actions_without_panel_are_noops() {
        let mut state = seeded();
        assert!(!reducer(&mut state, Action::FilterInputChange("x".into())));
        assert!(!reducer(&mut state, Action::FilterSearch));
        assert!(!reducer(&mut state, Action::FilterApply));
        assert!(!reducer(&mut state, Action::FilterReset));
    }

    #[test]
    fn test_sort_toggle_focuses_column() {
        let mut state = seeded();
        reducer(&mut state, Action::TableSortToggle(Column::NumberValue));
        assert_eq!(state.table.focused_column, Column::NumberValue);
        assert_eq!(visible_names(&state)[0], "Jim Red");
    }

    #[test]
    fn test_cursor_stays_on_page() {
        let mut state = seeded();
        assert!(!reducer(&mut state, Action::TableCursorMove(-1)));
        assert!(reducer(&mut state, Action::TableCursorMove(1)));
        reducer(&mut state, Action::TableCursorMove(10));
        assert_eq!(state.table.cursor, 3);
    }

    #[test]
    fn test_page_bounds() {
        let mut state = seeded();
        assert!(!reducer(&mut state, Action::TablePageNext));
        assert!(!reducer(&mut state, Action::TablePagePrev));
    }

    #[test]
    fn test_terminal_resize() {
        let mut state = seeded();
        assert!(reducer(&mut state, Action::UiTerminalResize(100, 40)));
        assert!(!reducer(&mut state, Action::UiTerminalResize(100, 40)));
    }
}
