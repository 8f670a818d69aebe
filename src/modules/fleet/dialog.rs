//! Create/update dialog for a car

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::core::{Action, Module};
use crate::domain::{CarField, FieldKind, FieldSource};
use crate::ui::widgets::{draw_form, Form, FormField};

/// The car dialog: one input per [`CarField`], in schema order.
///
/// An empty `id` input saves a new car; anything typed there updates that car.
#[derive(Debug, Clone)]
pub struct CarDialog {
    form: Form,
}

impl CarDialog {
    pub fn new() -> Self {
        let fields = CarField::ALL
            .iter()
            .map(|field| match field.kind() {
                FieldKind::Choice(options) => {
                    FormField::choice(field.name(), field.label(), options)
                }
                _ => FormField::text(field.name(), field.label()),
            })
            .collect();
        Self {
            form: Form::new(fields),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn set(&mut self, field: CarField, value: &str) {
        self.form.set_value(field.name(), value);
    }

    pub fn is_update(&self) -> bool {
        self.form
            .value(CarField::Id.name())
            .is_some_and(|id| !id.is_empty())
    }
}

impl Default for CarDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldSource for CarDialog {
    fn field_value(&self, name: &str) -> Option<&str> {
        self.form.value(name)
    }
}

impl Module for CarDialog {
    fn id(&self) -> &'static str {
        "car-dialog"
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.is_update() {
            " Edit car "
        } else {
            " New car "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);
        draw_form(&self.form, frame, chunks[0]);
        frame.render_widget(
            Paragraph::new("Tab/Up/Down move  Left/Right choose  Enter save  Esc cancel")
                .style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return Action::SubmitCar;
        }

        match key.code {
            KeyCode::Esc => return Action::CloseDialog,
            KeyCode::Enter => return Action::SubmitCar,
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Right => self.form.cycle_choice(true),
            KeyCode::Left => self.form.cycle_choice(false),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Char(ch) => self.form.insert_char(ch),
            _ => {}
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SaveRequest;

    fn press(dialog: &mut CarDialog, code: KeyCode) -> Action {
        dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(dialog: &mut CarDialog, text: &str) {
        for ch in text.chars() {
            press(dialog, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_every_field_is_readable() {
        let dialog = CarDialog::new();
        for field in CarField::ALL {
            assert!(dialog.require(field).is_ok(), "{}", field.name());
        }
    }

    #[test]
    fn test_choice_fields_start_empty() {
        let dialog = CarDialog::new();
        assert_eq!(dialog.field_value("status"), Some(""));
        assert_eq!(dialog.field_value("transmission"), Some(""));
    }

    #[test]
    fn test_typing_walks_the_fields() {
        let mut dialog = CarDialog::new();
        press(&mut dialog, KeyCode::Tab);
        type_text(&mut dialog, "Toyota");
        press(&mut dialog, KeyCode::Tab);
        type_text(&mut dialog, "Camry");
        press(&mut dialog, KeyCode::Backspace);

        assert_eq!(dialog.field_value("brand"), Some("Toyota"));
        assert_eq!(dialog.field_value("model"), Some("Camr"));
        assert!(!dialog.is_update());
    }

    #[test]
    fn test_arrows_cycle_choices() {
        let mut dialog = CarDialog::new();
        let status_index = CarField::ALL
            .iter()
            .position(|field| *field == CarField::Status)
            .unwrap();
        for _ in 0..status_index {
            press(&mut dialog, KeyCode::Down);
        }
        press(&mut dialog, KeyCode::Right);
        assert_eq!(dialog.field_value("status"), Some("available"));
        press(&mut dialog, KeyCode::Left);
        press(&mut dialog, KeyCode::Left);
        assert_eq!(dialog.field_value("status"), Some("sold"));
    }

    #[test]
    fn test_enter_and_esc() {
        let mut dialog = CarDialog::new();
        assert_eq!(press(&mut dialog, KeyCode::Enter), Action::SubmitCar);
        assert_eq!(press(&mut dialog, KeyCode::Esc), Action::CloseDialog);
        assert_eq!(
            dialog.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Action::SubmitCar
        );
    }

    #[test]
    fn test_typed_identifier_updates() {
        let mut dialog = CarDialog::new();
        type_text(&mut dialog, "7");
        dialog.set(CarField::Mileage, "12k");
        let request = SaveRequest::from_source(&dialog).unwrap();
        assert!(dialog.is_update());
        assert_eq!(request.path(), "/api/cars/7");
        assert_eq!(request.record.mileage, 12);
    }
}
