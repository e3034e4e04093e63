use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Blocks until a key is pressed and returns its code. Ctrl-C is reported as
/// `Esc` so every view can treat it as "close".
pub fn read_key_press() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            {
                return Ok(KeyCode::Esc);
            }
            return Ok(key.code);
        }
    }
}
