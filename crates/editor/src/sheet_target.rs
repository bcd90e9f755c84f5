// Chunk: docs/chunks/editing_session - Keyboard command resolution

//! Keyboard handling for the focused sheet.
//!
//! Chord resolution is a stateless pure function — every binding is a
//! single-step modifier+key combination, so no resolution state machine
//! is needed. Resolved commands execute against the editing session; a
//! `Handled::Yes` result tells the host to suppress its default key
//! handling, and nothing is handled while no line is focused.

use copybook_input::{Key, KeyEvent};

use crate::editor_state::{EditorSession, FocusState};

/// Whether a key event was consumed by the sheet.
///
/// The host suppresses its default handling (the `preventDefault`
/// equivalent) exactly when the answer is `Yes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event was consumed; suppress default handling
    Yes,
    /// The event was not for the sheet
    No,
}

/// Commands that can be executed on the focused sheet.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    /// Insert a character at the caret (replace-on-type over a selection)
    InsertChar(char),
    /// Delete the character before the caret, or the selection
    DeleteBackward,
    /// Delete the character at the caret, or the selection
    DeleteForward,
    /// Move the caret left; optionally extending the selection
    MoveLeft { extend: bool },
    /// Move the caret right; optionally extending the selection
    MoveRight { extend: bool },
    /// Move to the line start; with extend, select to the start
    MoveToLineStart { extend: bool },
    /// Move to the line end; with extend, select to the end
    MoveToLineEnd { extend: bool },
    /// Drop the caret and selection
    ClearFocus,
    /// Step the history back
    Undo,
    /// Step the history forward
    Redo,
}

/// Resolves a key event to a command.
///
/// Pure and stateless: (modifiers, key) → Option<Command>. Return, Tab,
/// and the vertical arrows resolve to nothing — lines are fixed ruled
/// slots, so there is no line splitting and no caret line traversal.
fn resolve_command(event: &KeyEvent) -> Option<Command> {
    let mods = &event.modifiers;

    match &event.key {
        // Cmd+Z / Ctrl+Z → undo, with shift → redo
        Key::Char('z') | Key::Char('Z') if mods.command || mods.control => {
            Some(if mods.shift { Command::Redo } else { Command::Undo })
        }

        // Ctrl+Y → redo
        Key::Char('y') if mods.control && !mods.command => Some(Command::Redo),

        // Printable characters (no Command/Control modifier)
        Key::Char(ch) if !mods.command && !mods.control => Some(Command::InsertChar(*ch)),

        // Backspace (Delete backward)
        Key::Backspace => Some(Command::DeleteBackward),

        // Forward delete
        Key::Delete => Some(Command::DeleteForward),

        // Horizontal arrows, shift extends the selection
        Key::Left => Some(Command::MoveLeft { extend: mods.shift }),
        Key::Right => Some(Command::MoveRight { extend: mods.shift }),

        // Home/End
        Key::Home => Some(Command::MoveToLineStart { extend: mods.shift }),
        Key::End => Some(Command::MoveToLineEnd { extend: mods.shift }),

        // Escape drops the caret
        Key::Escape => Some(Command::ClearFocus),

        // Unhandled (Return, Tab, Up, Down, modified chars)
        _ => None,
    }
}

/// Routes a key event into the session.
///
/// Ignored entirely (`Handled::No`) while no line is focused, so page
/// chrome keeps its shortcuts when the sheet is idle.
pub(crate) fn handle_key(session: &mut EditorSession, event: &KeyEvent) -> Handled {
    if session.focus() == FocusState::Idle {
        return Handled::No;
    }

    let Some(command) = resolve_command(event) else {
        return Handled::No;
    };

    match command {
        Command::InsertChar(ch) => session.insert_char(ch),
        Command::DeleteBackward => session.delete_backward(),
        Command::DeleteForward => session.delete_forward(),
        Command::MoveLeft { extend } => session.move_left(extend),
        Command::MoveRight { extend } => session.move_right(extend),
        Command::MoveToLineStart { extend } => session.move_to_line_start(extend),
        Command::MoveToLineEnd { extend } => session.move_to_line_end(extend),
        Command::ClearFocus => session.clear_focus(),
        Command::Undo => session.undo(),
        Command::Redo => session.redo(),
    }

    Handled::Yes
}

#[cfg(test)]
mod tests {
    use super::*;
    use copybook_input::Modifiers;

    #[test]
    fn plain_characters_insert() {
        assert_eq!(
            resolve_command(&KeyEvent::char('a')),
            Some(Command::InsertChar('a'))
        );
        assert_eq!(
            resolve_command(&KeyEvent::char_shifted('A')),
            Some(Command::InsertChar('A'))
        );
    }

    #[test]
    fn modified_characters_do_not_insert() {
        let event = KeyEvent::new(
            Key::Char('s'),
            Modifiers {
                command: true,
                ..Default::default()
            },
        );
        assert_eq!(resolve_command(&event), None);
    }

    #[test]
    fn undo_redo_chords() {
        let cmd_z = KeyEvent::new(
            Key::Char('z'),
            Modifiers {
                command: true,
                ..Default::default()
            },
        );
        assert_eq!(resolve_command(&cmd_z), Some(Command::Undo));

        let shift_cmd_z = KeyEvent::new(
            Key::Char('Z'),
            Modifiers {
                command: true,
                shift: true,
                ..Default::default()
            },
        );
        assert_eq!(resolve_command(&shift_cmd_z), Some(Command::Redo));

        let ctrl_y = KeyEvent::new(
            Key::Char('y'),
            Modifiers {
                control: true,
                ..Default::default()
            },
        );
        assert_eq!(resolve_command(&ctrl_y), Some(Command::Redo));
    }

    #[test]
    fn shift_arrows_extend() {
        let shifted = KeyEvent::new(
            Key::Left,
            Modifiers {
                shift: true,
                ..Default::default()
            },
        );
        assert_eq!(
            resolve_command(&shifted),
            Some(Command::MoveLeft { extend: true })
        );
        assert_eq!(
            resolve_command(&KeyEvent::new(Key::Right, Modifiers::default())),
            Some(Command::MoveRight { extend: false })
        );
    }

    #[test]
    fn structural_keys_are_unhandled() {
        for key in [Key::Return, Key::Tab, Key::Up, Key::Down] {
            assert_eq!(resolve_command(&KeyEvent::new(key, Modifiers::default())), None);
        }
    }
}
