//! Multi-field form widget used by dialogs

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const LABEL_WIDTH: usize = 22;

/// A single input within a [`Form`]
#[derive(Debug, Clone)]
pub struct FormField {
    /// Lookup key
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    /// Fixed option list for choice inputs; free text when `None`
    pub options: Option<&'static [&'static str]>,
}

impl FormField {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: String::new(),
            options: None,
        }
    }

    /// Starts on the first option.
    pub fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            value: options.first().copied().unwrap_or_default().to_string(),
            options: Some(options),
        }
    }

    pub fn is_choice(&self) -> bool {
        self.options.is_some()
    }
}

/// Fields plus the index of the focused one
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Appends to the focused text input. Choice inputs ignore typing.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if !field.is_choice() {
                field.value.push(ch);
            }
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if !field.is_choice() {
                field.value.pop();
            }
        }
    }

    /// Steps the focused choice input through its options, wrapping around.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        let Some(options) = field.options else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|option| *option == field.value)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        field.value = options[next].to_string();
    }

    /// Value of the input named `name`, or `None` if the form has no such input.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Returns `false` if the form has no such input.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// Renders one row per field, scrolled so the focused row stays visible.
pub fn draw_form(form: &Form, frame: &mut Frame, area: Rect) {
    let visible = area.height as usize;
    if visible == 0 {
        return;
    }
    let offset = if form.focus >= visible {
        form.focus + 1 - visible
    } else {
        0
    };

    let lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, field)| field_line(field, i == form.focus))
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn field_line(field: &FormField, focused: bool) -> Line<'_> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled(
        format!("{:<width$}", field.label, width = LABEL_WIDTH),
        label_style,
    )];

    if field.is_choice() {
        let shown = if field.value.is_empty() {
            "-"
        } else {
            field.value.as_str()
        };
        spans.push(Span::raw(format!("< {shown} >")));
    } else {
        spans.push(Span::raw(field.value.as_str()));
        if focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
    }

    Line::from(spans)
}
