//! Keybinding contexts, commands and their default keys

use crossterm::event::KeyEvent;
use record_table_core::{BindingContext, Keybindings};

/// Which part of the UI receives keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Table,
    Filter,
    Form,
}

impl BindingContext for KeyContext {
    fn name(&self) -> &'static str {
        match self {
            KeyContext::Table => "table",
            KeyContext::Filter => "filter",
            KeyContext::Form => "form",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "table" => Some(KeyContext::Table),
            "filter" => Some(KeyContext::Filter),
            "form" => Some(KeyContext::Form),
            _ => None,
        }
    }
}

/// Named commands keys can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    // table
    CursorUp,
    CursorDown,
    ColumnNext,
    ColumnPrev,
    Sort,
    Filter,
    Add,
    Edit,
    Delete,
    PageNext,
    PagePrev,
    // filter panel
    Search,
    Apply,
    Reset,
    Close,
    // form
    FieldNext,
    FieldPrev,
    Confirm,
    Submit,
    Cancel,
    // global
    Quit,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::CursorUp => "up",
            Command::CursorDown => "down",
            Command::ColumnNext => "column_next",
            Command::ColumnPrev => "column_prev",
            Command::Sort => "sort",
            Command::Filter => "filter",
            Command::Add => "add",
            Command::Edit => "edit",
            Command::Delete => "delete",
            Command::PageNext => "page_next",
            Command::PagePrev => "page_prev",
            Command::Search => "search",
            Command::Apply => "apply",
            Command::Reset => "reset",
            Command::Close => "close",
            Command::FieldNext => "next_field",
            Command::FieldPrev => "prev_field",
            Command::Confirm => "confirm",
            Command::Submit => "submit",
            Command::Cancel => "cancel",
            Command::Quit => "quit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: [Command; 21] = [
            Command::CursorUp,
            Command::CursorDown,
            Command::ColumnNext,
            Command::ColumnPrev,
            Command::Sort,
            Command::Filter,
            Command::Add,
            Command::Edit,
            Command::Delete,
            Command::PageNext,
            Command::PagePrev,
            Command::Search,
            Command::Apply,
            Command::Reset,
            Command::Close,
            Command::FieldNext,
            Command::FieldPrev,
            Command::Confirm,
            Command::Submit,
            Command::Cancel,
            Command::Quit,
        ];
        ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Command bound to `key` in `context`, if any
pub fn resolve(
    keybindings: &Keybindings<KeyContext>,
    key: &KeyEvent,
    context: KeyContext,
) -> Option<Command> {
    keybindings
        .command_for(key, context)
        .and_then(Command::from_name)
}

pub fn default_keybindings() -> Keybindings<KeyContext> {
    let mut kb = Keybindings::new();

    kb.add_global(Command::Quit.name(), &["ctrl+c"]);

    let table = KeyContext::Table;
    kb.add(table, Command::CursorUp.name(), &["up", "k"]);
    kb.add(table, Command::CursorDown.name(), &["down", "j"]);
    kb.add(table, Command::ColumnNext.name(), &["right", "l", "tab"]);
    kb.add(table, Command::ColumnPrev.name(), &["left", "h", "shift+tab"]);
    kb.add(table, Command::Sort.name(), &["s"]);
    kb.add(table, Command::Filter.name(), &["/", "f"]);
    kb.add(table, Command::Add.name(), &["a", "insert"]);
    kb.add(table, Command::Edit.name(), &["e", "enter"]);
    kb.add(table, Command::Delete.name(), &["d", "delete"]);
    kb.add(table, Command::PageNext.name(), &["n", "pagedown"]);
    kb.add(table, Command::PagePrev.name(), &["p", "pageup"]);
    kb.add(table, Command::Quit.name(), &["q", "ctrl+c"]);

    let filter = KeyContext::Filter;
    kb.add(filter, Command::Search.name(), &["enter"]);
    kb.add(filter, Command::Apply.name(), &["ctrl+f"]);
    kb.add(filter, Command::Reset.name(), &["ctrl+r"]);
    kb.add(filter, Command::Close.name(), &["esc"]);

    let form = KeyContext::Form;
    kb.add(form, Command::FieldNext.name(), &["tab", "down"]);
    kb.add(form, Command::FieldPrev.name(), &["shift+tab", "up"]);
    kb.add(form, Command::Confirm.name(), &["enter"]);
    kb.add(form, Command::Submit.name(), &["ctrl+s"]);
    kb.add(form, Command::Cancel.name(), &["esc"]);

    kb
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_table_core::testing::key;

    #[test]
    fn test_command_names_round_trip() {
        for name in ["up", "sort", "apply", "next_field", "quit"] {
            assert_eq!(Command::from_name(name).map(Command::name), Some(name));
        }
        assert_eq!(Command::from_name("launch"), None);
    }

    #[test]
    fn test_defaults_per_context() {
        let kb = default_keybindings();
        assert_eq!(
            resolve(&kb, &key("enter"), KeyContext::Table),
            Some(Command::Edit)
        );
        assert_eq!(
            resolve(&kb, &key("enter"), KeyContext::Filter),
            Some(Command::Search)
        );
        assert_eq!(
            resolve(&kb, &key("enter"), KeyContext::Form),
            Some(Command::Confirm)
        );
        assert_eq!(
            resolve(&kb, &key("shift+tab"), KeyContext::Form),
            Some(Command::FieldPrev)
        );
        // plain letters are text in the form
        assert_eq!(resolve(&kb, &key("q"), KeyContext::Form), None);
        assert_eq!(
            resolve(&kb, &key("ctrl+c"), KeyContext::Form),
            Some(Command::Quit)
        );
    }
}
