//! Context-aware keybindings: key strings, lookup and config merging

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::hash::Hash;

/// Where a binding applies (table, filter panel, form...)
///
/// `name` is the key used in config files; `"global"` is reserved.
pub trait BindingContext: Clone + Copy + Eq + Hash {
    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

/// Command name -> key strings, per context plus a global fallback
#[derive(Debug, Clone)]
pub struct Keybindings<C: BindingContext> {
    global: HashMap<String, Vec<String>>,
    contexts: HashMap<C, HashMap<String, Vec<String>>>,
}

impl<C: BindingContext> Default for Keybindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de, C: BindingContext> Deserialize<'de> for Keybindings<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, HashMap<String, Vec<String>>> =
            HashMap::deserialize(deserializer)?;

        let mut keybindings = Keybindings::new();
        for (context_name, bindings) in raw {
            if context_name == "global" {
                keybindings.global = bindings;
            } else if let Some(context) = C::from_name(&context_name) {
                keybindings.contexts.insert(context, bindings);
            } else {
                tracing::warn!(context = %context_name, "ignoring unknown keybinding context");
            }
        }
        Ok(keybindings)
    }
}

impl<C: BindingContext> Keybindings<C> {
    pub fn new() -> Self {
        Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        }
    }

    pub fn add_global(&mut self, command: impl Into<String>, keys: &[&str]) {
        self.global
            .insert(command.into(), keys.iter().map(|k| k.to_string()).collect());
    }

    pub fn add(&mut self, context: C, command: impl Into<String>, keys: &[&str]) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(command.into(), keys.iter().map(|k| k.to_string()).collect());
    }

    /// Command bound to `key` in `context`, falling back to global bindings
    pub fn command_for(&self, key: &KeyEvent, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| match_key(key, bindings))
            .or_else(|| match_key(key, &self.global))
    }

    /// First key string bound to `command`, for help text
    pub fn first_key(&self, command: &str, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| bindings.get(command))
            .or_else(|| self.global.get(command))
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    /// Overlay `user` onto `self`; user entries replace whole commands
    pub fn merge(mut self, user: Self) -> Self {
        self.global.extend(user.global);
        for (context, bindings) in user.contexts {
            tracing::debug!(
                context = context.name(),
                commands = bindings.len(),
                "keybinding overrides"
            );
            self.contexts.entry(context).or_default().extend(bindings);
        }
        self
    }
}

fn match_key<'a>(key: &KeyEvent, bindings: &'a HashMap<String, Vec<String>>) -> Option<&'a str> {
    bindings
        .iter()
        .find(|(_, keys)| {
            keys.iter()
                .filter_map(|k| parse_key_string(k))
                .any(|bound| keys_match(&bound, key))
        })
        .map(|(command, _)| command.as_str())
}

fn keys_match(bound: &KeyEvent, pressed: &KeyEvent) -> bool {
    match (bound.code, pressed.code) {
        // Terminals report shifted letters with SHIFT set; the char already says it
        (KeyCode::Char(a), KeyCode::Char(b)) => {
            let strip = |m: KeyModifiers| m.difference(KeyModifiers::SHIFT);
            a == b && strip(bound.modifiers) == strip(pressed.modifiers)
        }
        (a, b) => a == b && bound.modifiers == pressed.modifiers,
    }
}

/// Parse `"q"`, `"esc"`, `"ctrl+s"`, `"shift+tab"` into a `KeyEvent`
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    let make = |code, modifiers| KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    };

    // "+" alone is a key, not a separator
    if key_str == "+" {
        return Some(make(KeyCode::Char('+'), KeyModifiers::empty()));
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let (key_part, modifier_parts) = parts.split_last()?;

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts {
        match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let key_part = key_part.trim();
    let code = match key_part.to_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        _ => {
            let mut chars = key_part.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                KeyCode::Char(ch.to_ascii_lowercase())
            } else {
                KeyCode::Char(ch)
            }
        }
    };

    Some(make(code, modifiers))
}

/// Format a key string for help text: `"ctrl+s"` -> `"^S"`, `"pagedown"` -> `"PgDn"`
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.to_string();
    };

    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }

    let name = match key.code {
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => return format!("{out}Shift+Tab"),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            c.to_ascii_uppercase().to_string()
        }
        KeyCode::Char(c) => c.to_string(),
        other => format!("{other:?}"),
    };
    if key.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key.code, KeyCode::Char(_)) {
        out.push_str("Shift+");
    }
    out.push_str(&name);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Ctx {
        Table,
        Form,
    }

    impl BindingContext for Ctx {
        fn name(&self) -> &'static str {
            match self {
                Ctx::Table => "table",
                Ctx::Form => "form",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "table" => Some(Ctx::Table),
                "form" => Some(Ctx::Form),
                _ => None,
            }
        }
    }

    fn pressed(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_parse_plain_and_special() {
        assert_eq!(parse_key_string("q").map(|k| k.code), Some(KeyCode::Char('q')));
        assert_eq!(parse_key_string("esc").map(|k| k.code), Some(KeyCode::Esc));
        assert_eq!(parse_key_string("/").map(|k| k.code), Some(KeyCode::Char('/')));
        assert_eq!(parse_key_string("f12").map(|k| k.code), Some(KeyCode::F(12)));
        assert_eq!(parse_key_string("pagedown").map(|k| k.code), Some(KeyCode::PageDown));
        assert!(parse_key_string("").is_none());
        assert!(parse_key_string("hyper+x").is_none());
    }

    #[test]
    fn test_parse_modifiers() {
        let k = parse_key_string("ctrl+S").unwrap();
        assert_eq!(k.code, KeyCode::Char('s'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));

        let k = parse_key_string("shift+tab").unwrap();
        assert_eq!(k.code, KeyCode::BackTab);
        assert!(k.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn test_context_then_global_lookup() {
        let mut bindings = Keybindings::<Ctx>::new();
        bindings.add(Ctx::Table, "add", &["a"]);
        bindings.add(Ctx::Form, "submit", &["ctrl+s"]);
        bindings.add_global("quit", &["ctrl+c"]);

        let a = pressed(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(bindings.command_for(&a, Ctx::Table), Some("add"));
        assert_eq!(bindings.command_for(&a, Ctx::Form), None);

        let ctrl_c = pressed(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(bindings.command_for(&ctrl_c, Ctx::Form), Some("quit"));

        let ctrl_s = pressed(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(bindings.command_for(&ctrl_s, Ctx::Form), Some("submit"));
    }

    #[test]
    fn test_shifted_char_matches() {
        let mut bindings = Keybindings::<Ctx>::new();
        bindings.add(Ctx::Table, "last_page", &["G"]);

        let shifted = pressed(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(bindings.command_for(&shifted, Ctx::Table), Some("last_page"));
        let lower = pressed(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(bindings.command_for(&lower, Ctx::Table), None);
    }

    #[test]
    fn test_merge_user_overrides() {
        let mut defaults = Keybindings::<Ctx>::new();
        defaults.add(Ctx::Table, "add", &["a"]);
        defaults.add(Ctx::Table, "delete", &["d"]);

        let user: Keybindings<Ctx> =
            serde_json::from_str(r#"{ "table": { "add": ["insert"] }, "bogus": {} }"#).unwrap();
        let merged = defaults.merge(user);

        assert_eq!(merged.first_key("add", Ctx::Table), Some("insert"));
        assert_eq!(merged.first_key("delete", Ctx::Table), Some("d"));
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_key_for_display("ctrl+s"), "^S");
        assert_eq!(format_key_for_display("pagedown"), "PgDn");
        assert_eq!(format_key_for_display("shift+tab"), "Shift+Tab");
        assert_eq!(format_key_for_display("a"), "a");
        assert_eq!(format_key_for_display("enter"), "Enter");
    }
}
