//! Actions: everything that can happen in the app
//!
//! Naming follows `<Category><Verb>`: `RecordAddRequested` and
//! `RecordDeleteRequested` belong to "record", `FilterSearch` to "filter".
//! `Did` marks an outcome reported back by a component.

use record_table_core::{ActionSummary, Column, Draft, FormError};

record_table_core::action_enum! {
    #[derive(Clone, Debug, PartialEq)]
    pub enum Action {
        record {
            /// Open the form with an empty draft
            RecordAddRequested,
            /// Open the form on the record with this key
            RecordEditRequested(String),
            /// Delete the row at this index of the current page
            RecordDeleteRequested(usize),
            /// The form produced a draft: update when keyed, add otherwise
            RecordDraftSubmitted(Draft),
        }

        form {
            /// New text for the focused field
            FormValueChange(String),
            FormFocusNext,
            FormFocusPrev,
            FormDidReject(FormError),
            FormCancel,
        }

        filter {
            FilterOpen(Column),
            FilterInputChange(String),
            /// Apply and close
            FilterSearch,
            /// Apply, keep the panel open
            FilterApply,
            FilterReset,
            FilterClose,
        }

        table {
            TableSortToggle(Column),
            TableColumnNext,
            TableColumnPrev,
            TableCursorMove(isize),
            TablePageNext,
            TablePagePrev,
        }

        ui {
            UiTerminalResize(u16, u16),
        }

        _ {
            Quit,
        }
    }
}

/// Typed text is not logged verbatim
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::RecordDraftSubmitted(draft) => format!(
                "RecordDraftSubmitted {{ key: {:?} }}",
                draft.existing_key().unwrap_or("<new>")
            ),
            Action::FormValueChange(value) => {
                format!("FormValueChange({} chars)", value.chars().count())
            }
            Action::FilterInputChange(value) => {
                format!("FilterInputChange({} chars)", value.chars().count())
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_table_core::Action as _;

    #[test]
    fn test_categories() {
        assert_eq!(Action::RecordDeleteRequested(0).category(), Some("record"));
        assert_eq!(Action::FilterSearch.category(), Some("filter"));
        assert_eq!(Action::TableSortToggle(Column::Name).category(), Some("table"));
        assert_eq!(Action::Quit.category(), None);
    }

    #[test]
    fn test_names_follow_variants() {
        assert_eq!(Action::RecordAddRequested.name(), "RecordAddRequested");
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            Action::RecordDraftSubmitted(Draft::blank(today)).category(),
            Some("record")
        );
        assert_eq!(Action::UiTerminalResize(80, 24).name(), "UiTerminalResize");
        let rejected = Action::FormDidReject(FormError::InvalidDate("x".into()));
        assert_eq!(rejected.category(), Some("form"));
    }

    #[test]
    fn test_summary_hides_text() {
        let summary = Action::FilterInputChange("secret".into()).summary();
        assert!(!summary.contains("secret"));
        assert_eq!(summary, "FilterInputChange(6 chars)");
    }
}
