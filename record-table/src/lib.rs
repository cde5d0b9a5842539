//! record-table: a terminal table of records with per-column search, sort,
//! paging and an add/edit form
//!
//! Flow: crossterm event -> [`ui::RecordTableUi::map_event`] -> [`action::Action`]
//! -> [`reducer::reducer`] -> re-render when the reducer reports a change.

pub mod action;
pub mod components;
pub mod config;
pub mod keymap;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod ui;
