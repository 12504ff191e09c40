use crossterm::event::{KeyCode, KeyEvent};

/// Single-line text editor. The cursor counts characters, not bytes, so
/// emoji icons edit correctly.
#[derive(Debug, Default, Clone)]
pub struct LineEdit {
    pub value: String,
    pub cursor: usize,
    pub password: bool,
}

impl LineEdit {
    pub fn with(value: impl Into<String>) -> Self {
        let mut edit = Self::default();
        edit.set(value);
        edit
    }

    pub fn set(&mut self, s: impl Into<String>) {
        self.value = s.into();
        self.cursor = self.value.chars().count();
    }

    fn byte_at(&self, cursor: usize) -> usize {
        self.value.char_indices().nth(cursor).map(|(i, _)| i).unwrap_or(self.value.len())
    }

    pub fn push(&mut self, ch: char) {
        let at = self.byte_at(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_at(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_at(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn rendered(&self) -> String {
        if self.password {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Applies an editing key. Returns whether the value changed.
    pub fn handle(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.push(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.left();
                false
            }
            KeyCode::Right => {
                self.right();
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                false
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub edit: LineEdit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Submit,
    Cancel,
    Edited,
    Moved,
    Ignored,
}

/// Modal form: a titled column of line editors with one focused field.
#[derive(Debug, Clone)]
pub struct Form {
    pub title: &'static str,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Form {
    pub fn new(title: &'static str, fields: &[(&'static str, &str)]) -> Self {
        Self {
            title,
            fields: fields.iter().map(|(label, v)| Field { label, edit: LineEdit::with(*v) }).collect(),
            focus: 0,
            error: None,
        }
    }

    pub fn value(&self, i: usize) -> &str {
        self.fields.get(i).map(|f| f.edit.value.as_str()).unwrap_or("")
    }

    pub fn trimmed(&self, i: usize) -> String {
        self.value(i).trim().to_string()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> FormKey {
        let n = self.fields.len().max(1);
        match key.code {
            KeyCode::Enter => FormKey::Submit,
            KeyCode::Esc => FormKey::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % n;
                FormKey::Moved
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + n - 1) % n;
                FormKey::Moved
            }
            _ => match self.fields.get_mut(self.focus) {
                Some(field) => {
                    if field.edit.handle(key) {
                        FormKey::Edited
                    } else {
                        FormKey::Ignored
                    }
                }
                None => FormKey::Ignored,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn edits_multibyte_text_by_character() {
        let mut edit = LineEdit::with("🍽️a");
        edit.backspace();
        edit.push('b');
        assert_eq!(edit.value, "🍽️b");
        edit.left();
        edit.left();
        edit.delete();
        assert_eq!(edit.value, "🍽b");
    }

    #[test]
    fn password_renders_masked() {
        let edit = LineEdit { password: true, ..LineEdit::with("secret") };
        assert_eq!(edit.rendered(), "******");
    }

    #[test]
    fn form_cycles_focus_and_types_into_focused_field() {
        let mut form = Form::new("Test", &[("Name", ""), ("Amount", "0")]);
        assert_eq!(form.handle_key(&key(KeyCode::Char('x'))), FormKey::Edited);
        assert_eq!(form.handle_key(&key(KeyCode::Tab)), FormKey::Moved);
        form.handle_key(&key(KeyCode::Char('5')));
        assert_eq!(form.value(0), "x");
        assert_eq!(form.value(1), "05");
        form.handle_key(&key(KeyCode::BackTab));
        assert_eq!(form.focus, 0);
        assert_eq!(form.handle_key(&key(KeyCode::Enter)), FormKey::Submit);
    }

    #[test]
    fn unhandled_keys_leave_the_form_alone() {
        let mut form = Form::new("Test", &[("Name", "ab")]);
        assert_eq!(form.handle_key(&key(KeyCode::F(5))), FormKey::Ignored);
        assert_eq!(form.handle_key(&key(KeyCode::Backspace)), FormKey::Edited);
        assert_eq!(form.value(0), "a");

        let mut empty = Form::new("Empty", &[]);
        assert_eq!(empty.handle_key(&key(KeyCode::Char('x'))), FormKey::Ignored);
    }
}
