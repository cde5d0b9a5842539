//! Core of record-table: the record store, the table view model, the edit
//! form, and the small Redux-style dispatch layer the terminal app is built on.
//!
//! # Data
//!
//! - [`RecordStore`]: owns the ordered list of [`Record`]s (add/update/delete)
//! - [`TableState`]: per-column filters, sort, pagination, cursor
//! - [`EditForm`]: field values for one [`Draft`], validated into a draft
//!
//! # Dispatch
//!
//! - [`Action`]: typed events describing what happened
//! - [`Store`]: state plus a reducer `fn(&mut S, A) -> bool`
//! - [`Component`]: renders from props, turns events into actions
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> bool {
//!     match action {
//!         Action::RecordDraftSubmitted(draft) => state.submit(draft),
//!         // ...
//!     }
//! }
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! store.dispatch(Action::RecordAddRequested);
//! ```

pub mod action;
pub mod component;
pub mod error;
pub mod event;
pub mod form;
pub mod keybindings;
pub mod record;
pub mod records;
pub mod store;
pub mod table;
pub mod testing;

pub use action::{Action, ActionSummary};
pub use component::Component;
pub use error::{FormError, RecordError};
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use form::{EditForm, FormField, FormInput};
pub use keybindings::{format_key_for_display, parse_key_string, BindingContext, Keybindings};
pub use record::{seed_records, Draft, Record};
pub use records::RecordStore;
pub use store::{Middleware, Reducer, Store, StoreWithMiddleware, TracingMiddleware};
pub use table::{Column, SortDirection, SortState, TableState, TableView};
