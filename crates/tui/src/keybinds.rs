pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

Focus:
  Tab / Shift+Tab   Switch between key field and buttons

Key field:
  Type / paste      Edit the API key (saved as you type)
  Backspace         Delete last character
  Ctrl + U          Clear the key
  Ctrl + R          Show / hide the key

Buttons:
  ↑ / ↓  (k / j)    Select a command
  Enter / Space     Send the selected command
  1 - 5             Send Light / Off / Speed 1-3

General:
  ?                 Toggle this help (buttons focused)
  Esc               Close help, or quit
  Ctrl + Q          Quit

Mouse:
  Click button      Send that command
  Click 🔒 / 🔓     Show / hide the key
"#
        .to_string()
    }

    pub fn footer_hint(&self) -> &'static str {
        " [Tab] focus   [Ctrl+R] show key   [1-5] send   [?] help   [Ctrl+Q] quit "
    }
}
