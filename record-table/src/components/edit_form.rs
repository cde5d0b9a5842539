use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use record_table_core::{EditForm, EventKind, FormField, Keybindings};

use super::filter_panel::button;
use super::modal::{centered_rect, render_modal};
use super::text_input::{TextInput, TextInputProps};
use super::Component;
use crate::action::Action;
use crate::keymap::{resolve, Command, KeyContext};

const LABEL_WIDTH: u16 = 8;

/// Modal form for adding or editing one record
#[derive(Default)]
pub struct EditFormModal {
    inputs: [TextInput; 3],
    was_open: bool,
}

pub struct EditFormProps<'a> {
    pub form: &'a EditForm,
    pub keybindings: &'a Keybindings<KeyContext>,
}

impl EditFormModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.inputs.iter_mut().for_each(TextInput::reset);
        }
        self.was_open = is_open;
    }

    fn slot(field: FormField) -> usize {
        match field {
            FormField::Name => 0,
            FormField::Date => 1,
            FormField::NumberValue => 2,
        }
    }

    /// Validate the form; a valid draft is submitted, an invalid one
    /// reported back into the form
    fn confirm(form: &EditForm) -> Action {
        match form.submit() {
            Ok(draft) => Action::RecordDraftSubmitted(draft),
            Err(error) => Action::FormDidReject(error),
        }
    }
}

impl Component<Action> for EditFormModal {
    type Props<'a> = EditFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        let form = props.form;

        match resolve(props.keybindings, key, KeyContext::Form) {
            Some(Command::FieldNext) => return Some(Action::FormFocusNext),
            Some(Command::FieldPrev) => return Some(Action::FormFocusPrev),
            Some(Command::Confirm) if form.focus.is_last() => return Some(Self::confirm(form)),
            Some(Command::Confirm) => return Some(Action::FormFocusNext),
            Some(Command::Submit) => return Some(Self::confirm(form)),
            Some(Command::Cancel) => return Some(Action::FormCancel),
            Some(Command::Quit) => return Some(Action::Quit),
            _ => {}
        }

        let field = form.focus;
        self.inputs[Self::slot(field)]
            .handle_event(
                event,
                TextInputProps {
                    value: form.value(field),
                    placeholder: field.placeholder(),
                    is_focused: true,
                    on_change: Action::FormValueChange,
                },
            )
            .into_iter()
            .next()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let form = props.form;
        let title = match form.original().existing_key() {
            Some(key) => format!("Edit record #{}", key),
            None => "Add Person".to_string(),
        };
        let modal_area = centered_rect(56, 11, area);
        let inner = render_modal(frame, modal_area, &title);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        for (i, field) in FormField::ALL.into_iter().enumerate() {
            let [label_area, input_area] =
                Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)])
                    .areas(rows[i * 2]);

            let focused = form.focus == field;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(format!("{}:", field.label())).style(label_style),
                label_area,
            );

            self.inputs[Self::slot(field)].render(
                frame,
                input_area,
                TextInputProps {
                    value: form.value(field),
                    placeholder: field.placeholder(),
                    is_focused: focused,
                    on_change: Action::FormValueChange,
                },
            );
        }

        if let Some(error) = &form.error {
            frame.render_widget(
                Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red)),
                rows[5],
            );
        }

        let kb = props.keybindings;
        let ctx = KeyContext::Form;
        let spans: Vec<Span> = [
            button(kb, ctx, Command::Submit, "Accept"),
            button(kb, ctx, Command::FieldNext, "next"),
            button(kb, ctx, Command::Cancel, "cancel"),
        ]
        .into_iter()
        .flatten()
        .flatten()
        .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[6]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::default_keybindings;
    use record_table_core::testing::{char_key, key_event, RenderHarness};
    use record_table_core::{assert_emitted, Draft, FormError};

    fn existing() -> EditForm {
        EditForm::new(Draft {
            key: Some("3".into()),
            name: "Jim Green".into(),
            date: "2023-07-14".into(),
            number_value: 456.0,
        })
    }

    fn emit(modal: &mut EditFormModal, form: &EditForm, event: EventKind) -> Vec<Action> {
        let kb = default_keybindings();
        modal
            .handle_event(
                &event,
                EditFormProps {
                    form,
                    keybindings: &kb,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut modal = EditFormModal::new();
        let form = existing();
        let actions = emit(&mut modal, &form, EventKind::Key(char_key('!')));
        assert_emitted!(actions, Action::FormValueChange(v) if v == "Jim Green!");
    }

    #[test]
    fn test_enter_advances_then_submits_on_last_field() {
        let mut modal = EditFormModal::new();
        let mut form = existing();

        assert_eq!(
            emit(&mut modal, &form, key_event("enter")),
            vec![Action::FormFocusNext]
        );

        form.focus = FormField::NumberValue;
        let actions = emit(&mut modal, &form, key_event("enter"));
        assert_emitted!(
            actions,
            Action::RecordDraftSubmitted(d)
                if d.key.as_deref() == Some("3") && d.name == "Jim Green"
        );
    }

    #[test]
    fn test_ctrl_s_submits_from_any_field() {
        let mut modal = EditFormModal::new();
        let form = existing();
        assert_emitted!(
            emit(&mut modal, &form, key_event("ctrl+s")),
            Action::RecordDraftSubmitted(_)
        );
    }

    #[test]
    fn test_invalid_form_is_rejected() {
        let mut modal = EditFormModal::new();
        let mut form = existing();
        form.set_value(FormField::Date, "14/07/2023".into());

        let actions = emit(&mut modal, &form, key_event("ctrl+s"));
        assert_eq!(
            actions,
            vec![Action::FormDidReject(FormError::InvalidDate("14/07/2023".into()))]
        );
    }

    #[test]
    fn test_focus_and_cancel_keys() {
        let mut modal = EditFormModal::new();
        let form = existing();
        assert_emitted!(emit(&mut modal, &form, key_event("tab")), Action::FormFocusNext);
        assert_emitted!(emit(&mut modal, &form, key_event("shift+tab")), Action::FormFocusPrev);
        assert_emitted!(emit(&mut modal, &form, key_event("esc")), Action::FormCancel);
    }

    #[test]
    fn test_render_shows_fields_and_error() {
        let kb = default_keybindings();
        let mut form = existing();
        form.error = Some(FormError::Required(FormField::Name));
        let mut modal = EditFormModal::new();
        let mut render = RenderHarness::new(80, 24);

        let output = render.render_to_string_plain(|frame| {
            modal.render(
                frame,
                frame.area(),
                EditFormProps {
                    form: &form,
                    keybindings: &kb,
                },
            );
        });

        assert!(output.contains("Edit record #3"));
        assert!(output.contains("Name:"));
        assert!(output.contains("Jim Green"));
        assert!(output.contains("2023-07-14"));
        assert!(output.contains("456"));
        assert!(output.contains(&FormError::Required(FormField::Name).to_string()));
        assert!(output.contains("[^S] Accept"));
    }
}
