//! Text input key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::TextInputState;

/// Events that can be returned from text input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    /// Text was changed
    Changed(String),
    /// Input was submitted (Enter pressed)
    Submitted(String),
    /// Input was cancelled (Escape pressed)
    Cancelled,
}

impl TextInputState {
    /// Handle a keyboard event for this text input
    ///
    /// # Returns
    /// * `Some(TextInputEvent)` if the event submitted, cancelled or changed the text
    /// * `None` if the event only moved the cursor or was not relevant
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TextInputEvent> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter => Some(TextInputEvent::Submitted(self.value.clone())),
            KeyCode::Esc => Some(TextInputEvent::Cancelled),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.backspace();
                    Some(TextInputEvent::Changed(self.value.clone()))
                } else {
                    None
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.delete();
                    Some(TextInputEvent::Changed(self.value.clone()))
                } else {
                    None
                }
            }
            KeyCode::Left => {
                if ctrl {
                    self.move_home();
                } else {
                    self.move_left();
                }
                None
            }
            KeyCode::Right => {
                if ctrl {
                    self.move_end();
                } else {
                    self.move_right();
                }
                None
            }
            KeyCode::Home => {
                self.move_home();
                None
            }
            KeyCode::End => {
                self.move_end();
                None
            }
            KeyCode::Char('u') if ctrl => {
                if self.value.is_empty() {
                    None
                } else {
                    self.clear();
                    Some(TextInputEvent::Changed(String::new()))
                }
            }
            KeyCode::Char('a') if ctrl => {
                self.move_home();
                None
            }
            KeyCode::Char('e') if ctrl => {
                self.move_end();
                None
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert(c);
                Some(TextInputEvent::Changed(self.value.clone()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing() {
        let mut state = TextInputState::new();

        let result = state.handle_key(key(KeyCode::Char('a')));
        assert_eq!(result, Some(TextInputEvent::Changed("a".to_string())));

        state.handle_key(key(KeyCode::Char('b')));
        assert_eq!(state.value, "ab");
    }

    #[test]
    fn test_shifted_chars_are_typed() {
        let mut state = TextInputState::new();
        state.handle_key(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT));
        assert_eq!(state.value, "H");
    }

    #[test]
    fn test_backspace() {
        let mut state = TextInputState::new().with_value("abc");
        let result = state.handle_key(key(KeyCode::Backspace));
        assert_eq!(result, Some(TextInputEvent::Changed("ab".to_string())));
    }

    #[test]
    fn test_backspace_on_empty_is_ignored() {
        let mut state = TextInputState::new();
        assert_eq!(state.handle_key(key(KeyCode::Backspace)), None);
    }

    #[test]
    fn test_submit() {
        let mut state = TextInputState::new().with_value("John");
        let result = state.handle_key(key(KeyCode::Enter));
        assert_eq!(result, Some(TextInputEvent::Submitted("John".to_string())));
    }

    #[test]
    fn test_cancel() {
        let mut state = TextInputState::new().with_value("John");
        let result = state.handle_key(key(KeyCode::Esc));
        assert_eq!(result, Some(TextInputEvent::Cancelled));
        // Cancelling does not touch the text; the owner decides what to do
        assert_eq!(state.value, "John");
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = TextInputState::new().with_value("hello");

        state.handle_key(key(KeyCode::Left));
        assert_eq!(state.cursor, 4);

        state.handle_key(key(KeyCode::Home));
        assert_eq!(state.cursor, 0);

        state.handle_key(key(KeyCode::End));
        assert_eq!(state.cursor, 5);

        state.handle_key(ctrl('a'));
        assert_eq!(state.cursor, 0);

        state.handle_key(ctrl('e'));
        assert_eq!(state.cursor, 5);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut state = TextInputState::new().with_value("hello");
        assert_eq!(
            state.handle_key(ctrl('u')),
            Some(TextInputEvent::Changed(String::new()))
        );
        assert!(state.value.is_empty());
        assert_eq!(state.handle_key(ctrl('u')), None);
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        let mut state = TextInputState::new();
        assert_eq!(state.handle_key(ctrl('x')), None);
        assert_eq!(
            state.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
        assert!(state.value.is_empty());
    }
}
