use egui::TextEdit;

/// Single-line text input that shows dimmed hint text while it holds
/// no user content. Whether the buffer currently contains the hint is
/// tracked explicitly, never inferred by comparing strings, so a user
/// who literally types the hint text is not mistaken for an empty
/// field.
pub struct PlaceholderField {
    placeholder: &'static str,
    buffer: String,
    showing_placeholder: bool,
}

impl PlaceholderField {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            buffer: placeholder.to_string(),
            showing_placeholder: true,
        }
    }

    /// The committed value: empty while the placeholder is displayed.
    pub fn read_value(&self) -> &str {
        if self.showing_placeholder {
            ""
        } else {
            &self.buffer
        }
    }

    /// Clear back to the placeholder, e.g. after the value was applied.
    pub fn reset(&mut self) {
        self.buffer = self.placeholder.to_string();
        self.showing_placeholder = true;
    }

    pub fn on_focus_gained(&mut self) {
        if self.showing_placeholder {
            self.buffer.clear();
            self.showing_placeholder = false;
        }
    }

    pub fn on_focus_lost(&mut self) {
        if self.buffer.is_empty() {
            self.reset();
        }
    }

    pub fn render(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let text_color = if self.showing_placeholder {
            ui.visuals().weak_text_color()
        } else {
            ui.visuals().text_color()
        };
        let response = ui.add(
            TextEdit::singleline(&mut self.buffer)
                .text_color(text_color)
                .desired_width(f32::INFINITY),
        );
        if response.gained_focus() {
            self.on_focus_gained();
        }
        if response.lost_focus() {
            self.on_focus_lost();
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_placeholder_and_empty_value() {
        let field = PlaceholderField::new("Enter title");
        assert!(field.showing_placeholder);
        assert_eq!(field.read_value(), "");
    }

    #[test]
    fn test_focus_gain_clears_hint_once() {
        let mut field = PlaceholderField::new("Enter title");
        field.on_focus_gained();
        assert_eq!(field.buffer, "");
        // typing, then re-focusing must not wipe user content
        field.buffer.push_str("Run 42");
        field.on_focus_gained();
        assert_eq!(field.read_value(), "Run 42");
    }

    #[test]
    fn test_blur_on_empty_restores_hint() {
        let mut field = PlaceholderField::new("Enter title");
        field.on_focus_gained();
        field.on_focus_lost();
        assert!(field.showing_placeholder);
        assert_eq!(field.buffer, "Enter title");
        assert_eq!(field.read_value(), "");
    }

    #[test]
    fn test_blur_keeps_user_content() {
        let mut field = PlaceholderField::new("Enter title");
        field.on_focus_gained();
        field.buffer.push_str("kept");
        field.on_focus_lost();
        assert_eq!(field.read_value(), "kept");
    }

    #[test]
    fn test_typing_the_hint_text_is_real_content() {
        let mut field = PlaceholderField::new("Enter title");
        field.on_focus_gained();
        field.buffer.push_str("Enter title");
        field.on_focus_lost();
        assert_eq!(field.read_value(), "Enter title");
    }

    #[test]
    fn test_reset_after_apply() {
        let mut field = PlaceholderField::new("Enter title");
        field.on_focus_gained();
        field.buffer.push_str("applied");
        field.reset();
        assert_eq!(field.read_value(), "");
    }
}
