pub mod edit_form;
pub mod filter_panel;
pub mod help_bar;
pub mod modal;
pub mod record_table;
pub mod text_input;

pub use record_table_core::Component;

pub use edit_form::{EditFormModal, EditFormProps};
pub use filter_panel::{FilterPanel, FilterPanelProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use modal::{centered_rect, render_modal};
pub use record_table::{RecordTable, RecordTableProps};
pub use text_input::{TextInput, TextInputProps};
