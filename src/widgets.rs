use eframe::egui::{Align, FontId, Response, TextEdit, Ui, Widget};

/// Single line entry showing `placeholder` while it is empty and unfocused.
///
/// The placeholder is real text in the buffer (so submitting it untouched can be caught),
/// it gets cleared when the entry gains focus and put back when focus leaves an empty entry.
pub struct TimeEntry<'a> {
    text: &'a mut String,
    placeholder: &'a str,
    font_size: Option<f32>,
    width: Option<f32>,
}

impl<'a> TimeEntry<'a> {
    pub fn new(text: &'a mut String, placeholder: &'a str) -> Self {
        Self {
            text,
            placeholder,
            font_size: None,
            width: None,
        }
    }

    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    #[must_use]
    pub fn desired_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

/// focus moved onto the entry
pub fn focus_gained(text: &mut String, placeholder: &str) {
    if text.as_str() == placeholder {
        text.clear();
    }
}

/// focus left the entry
pub fn focus_lost(text: &mut String, placeholder: &str) {
    if text.is_empty() {
        text.push_str(placeholder);
    }
}

impl Widget for TimeEntry<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            text,
            placeholder,
            font_size,
            width,
        } = self;

        let mut edit = TextEdit::singleline(&mut *text).horizontal_align(Align::Center);
        if let Some(size) = font_size {
            edit = edit.font(FontId::proportional(size));
        }
        if let Some(width) = width {
            edit = edit.desired_width(width);
        }
        let response = edit.ui(ui);
        if response.gained_focus() {
            focus_gained(text, placeholder);
        }
        if response.lost_focus() {
            focus_lost(text, placeholder);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::PLACEHOLDER;

    #[test]
    fn placeholder_cleared_on_focus() {
        let mut text = PLACEHOLDER.to_string();
        focus_gained(&mut text, PLACEHOLDER);
        assert!(text.is_empty());
    }

    #[test]
    fn typed_text_survives_focus_changes() {
        let mut text = "07:30:00".to_string();
        focus_gained(&mut text, PLACEHOLDER);
        focus_lost(&mut text, PLACEHOLDER);
        assert_eq!(text, "07:30:00");
    }

    #[test]
    fn placeholder_restored_when_left_empty() {
        let mut text = String::new();
        focus_lost(&mut text, PLACEHOLDER);
        assert_eq!(text, PLACEHOLDER);
    }
}
