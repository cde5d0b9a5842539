use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use record_table_core::{format_key_for_display, Keybindings};

use super::Component;
use crate::action::Action;
use crate::keymap::{Command, KeyContext};

/// One line of key hints for the active context
pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub context: KeyContext,
    pub keybindings: &'a Keybindings<KeyContext>,
}

impl HelpBar {
    fn entries(context: KeyContext) -> &'static [(Command, &'static str)] {
        match context {
            KeyContext::Table => &[
                (Command::CursorDown, "row"),
                (Command::ColumnNext, "column"),
                (Command::Sort, "sort"),
                (Command::Filter, "filter"),
                (Command::Add, "add"),
                (Command::Edit, "edit"),
                (Command::Delete, "delete"),
                (Command::PageNext, "next"),
                (Command::PagePrev, "prev"),
                (Command::Quit, "quit"),
            ],
            KeyContext::Filter => &[
                (Command::Search, "search"),
                (Command::Apply, "filter"),
                (Command::Reset, "reset"),
                (Command::Close, "close"),
            ],
            KeyContext::Form => &[
                (Command::FieldNext, "next field"),
                (Command::Submit, "save"),
                (Command::Cancel, "cancel"),
            ],
        }
    }
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = Self::entries(props.context)
            .iter()
            .filter_map(|&(command, label)| {
                let key = props.keybindings.first_key(command.name(), props.context)?;
                Some([
                    Span::styled(
                        format!(" {}", format_key_for_display(key)),
                        Style::default().fg(Color::Cyan).bold(),
                    ),
                    Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray)),
                ])
            })
            .flatten()
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::default_keybindings;
    use record_table_core::testing::RenderHarness;

    #[test]
    fn test_shows_first_key_per_command() {
        let kb = default_keybindings();
        let mut render = RenderHarness::new(120, 1);
        let output = render.render_to_string_plain(|frame| {
            HelpBar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    context: KeyContext::Table,
                    keybindings: &kb,
                },
            );
        });
        assert!(output.contains("a add"));
        assert!(output.contains("/ filter"));
        assert!(output.contains("q quit"));
    }

    #[test]
    fn test_form_context() {
        let kb = default_keybindings();
        let mut render = RenderHarness::new(80, 1);
        let output = render.render_to_string_plain(|frame| {
            HelpBar.render(
                frame,
                frame.area(),
                HelpBarProps {
                    context: KeyContext::Form,
                    keybindings: &kb,
                },
            );
        });
        assert!(output.contains("^S save"));
        assert!(output.contains("Esc cancel"));
    }
}
