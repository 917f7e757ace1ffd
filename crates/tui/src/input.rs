const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVisibility {
    Masked,
    Plain,
}

/// Editing state of the API key field.
///
/// Edits report whether the value changed so the caller can write it through
/// to storage.
#[derive(Debug, Clone)]
pub struct KeyField {
    value: String,
    visibility: KeyVisibility,
}

impl Default for KeyField {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl KeyField {
    pub fn new(value: String) -> Self {
        Self {
            value,
            visibility: KeyVisibility::Masked,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn visibility(&self) -> KeyVisibility {
        self.visibility
    }

    pub fn is_showing(&self) -> bool {
        self.visibility == KeyVisibility::Plain
    }

    pub fn set_value(&mut self, value: String) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }

    pub fn handle_char(&mut self, c: char) -> bool {
        self.value.push(c);
        true
    }

    pub fn handle_backspace(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub fn clear(&mut self) -> bool {
        if self.value.is_empty() {
            return false;
        }
        self.value.clear();
        true
    }

    pub fn paste(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.value.push_str(text);
        true
    }

    pub fn toggle_visibility(&mut self) {
        self.visibility = match self.visibility {
            KeyVisibility::Masked => KeyVisibility::Plain,
            KeyVisibility::Plain => KeyVisibility::Masked,
        };
    }

    pub fn display_text(&self) -> String {
        match self.visibility {
            KeyVisibility::Plain => self.value.clone(),
            KeyVisibility::Masked => self.value.chars().map(|_| MASK_CHAR).collect(),
        }
    }

    /// Affordance shown next to the field; clicking it toggles visibility.
    pub fn icon(&self) -> &'static str {
        match self.visibility {
            KeyVisibility::Masked => "🔒",
            KeyVisibility::Plain => "🔓",
        }
    }
}
