//! Line-based gesture scripts for driving an editing session headlessly.
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! tool rect
//! color #ff8000
//! width 4
//! down 10 10
//! move 50 40
//! up 50 40
//! key Ctrl+Z
//! ```
//!
//! Coordinates are image pixels. `down`/`up` take an optional button
//! (`left`, `right`, `middle`).

use crate::config::KeyBinding;
use crate::draw::Color;
use crate::input::{InputState, Key, MouseButton, Tool};
use log::debug;
use thiserror::Error;

/// A script line that could not be understood.
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {message}")]
    InvalidArgument { line: usize, message: String },
}

/// One parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(Tool),
    Color(Color),
    Width(f64),
    Font(f64),
    Down(MouseButton, f64, f64),
    Move(f64, f64),
    Up(MouseButton, f64, f64),
    DoubleClick(f64, f64),
    Type(String),
    Blur,
    /// Chord such as `Ctrl+Shift+Z`: modifiers down, key, modifiers up
    Key(KeyBinding),
    Press(Key),
    Release(Key),
    Undo,
    Redo,
    ClearCrop,
}

/// Parses a whole script, stopping at the first bad line.
pub fn parse(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (number, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        commands.push(parse_line(number + 1, line)?);
    }
    Ok(commands)
}

fn parse_line(line: usize, text: &str) -> Result<Command, ScriptError> {
    let (name, rest) = match text.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (text, ""),
    };
    let invalid = |message: String| ScriptError::InvalidArgument { line, message };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match name.to_lowercase().as_str() {
        "tool" => Command::Tool(rest.parse::<Tool>().map_err(invalid)?),
        "color" => Command::Color(
            crate::util::name_to_color(rest)
                .ok_or_else(|| invalid(format!("unknown color '{rest}'")))?,
        ),
        "width" => Command::Width(number(line, &args, 0)?),
        "font" => Command::Font(number(line, &args, 0)?),
        "down" => {
            let (x, y) = point(line, &args)?;
            Command::Down(button(line, args.get(2).copied())?, x, y)
        }
        "move" => {
            let (x, y) = point(line, &args)?;
            Command::Move(x, y)
        }
        "up" => {
            let (x, y) = point(line, &args)?;
            Command::Up(button(line, args.get(2).copied())?, x, y)
        }
        "dblclick" => {
            let (x, y) = point(line, &args)?;
            Command::DoubleClick(x, y)
        }
        "type" => Command::Type(rest.to_string()),
        "blur" => Command::Blur,
        "key" => {
            let binding = KeyBinding::parse(rest).map_err(invalid)?;
            if Key::from_name(&binding.key) == Key::Unknown {
                return Err(invalid(format!("unknown key '{}'", binding.key)));
            }
            Command::Key(binding)
        }
        "press" | "release" => {
            let key = Key::from_name(rest);
            if key == Key::Unknown {
                return Err(invalid(format!("unknown key '{rest}'")));
            }
            if name.eq_ignore_ascii_case("press") {
                Command::Press(key)
            } else {
                Command::Release(key)
            }
        }
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "crop-clear" => Command::ClearCrop,
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: name.to_string(),
            });
        }
    };
    Ok(command)
}

fn number(line: usize, args: &[&str], index: usize) -> Result<f64, ScriptError> {
    let raw = args.get(index).ok_or_else(|| ScriptError::InvalidArgument {
        line,
        message: format!("missing argument {}", index + 1),
    })?;
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ScriptError::InvalidArgument {
            line,
            message: format!("'{raw}' is not a number"),
        })
}

fn point(line: usize, args: &[&str]) -> Result<(f64, f64), ScriptError> {
    Ok((number(line, args, 0)?, number(line, args, 1)?))
}

fn button(line: usize, name: Option<&str>) -> Result<MouseButton, ScriptError> {
    match name.map(str::to_lowercase).as_deref() {
        None | Some("left") => Ok(MouseButton::Left),
        Some("right") => Ok(MouseButton::Right),
        Some("middle") => Ok(MouseButton::Middle),
        Some(other) => Err(ScriptError::InvalidArgument {
            line,
            message: format!("unknown button '{other}'"),
        }),
    }
}

/// Feeds parsed commands into a session, in order.
pub fn run(state: &mut InputState, commands: &[Command]) {
    for command in commands {
        debug!("Script: {:?}", command);
        apply(state, command);
    }
}

fn apply(state: &mut InputState, command: &Command) {
    match command {
        Command::Tool(tool) => state.set_tool(*tool),
        Command::Color(color) => state.set_color(*color),
        Command::Width(width) => state.set_thickness(*width),
        Command::Font(size) => state.set_font_size(*size),
        Command::Down(button, x, y) => state.on_pointer_down(*button, *x, *y),
        Command::Move(x, y) => state.on_pointer_move(*x, *y),
        Command::Up(button, x, y) => state.on_pointer_up(*button, *x, *y),
        Command::DoubleClick(x, y) => state.on_double_click(*x, *y),
        Command::Type(text) => state.insert_text(text),
        Command::Blur => state.blur(),
        Command::Key(binding) => {
            let modifiers: Vec<Key> = [
                (binding.ctrl, Key::Ctrl),
                (binding.shift, Key::Shift),
                (binding.alt, Key::Alt),
            ]
            .into_iter()
            .filter_map(|(held, key)| held.then_some(key))
            .collect();

            for key in &modifiers {
                state.on_key_press(*key);
            }
            let key = Key::from_name(&binding.key);
            state.on_key_press(key);
            state.on_key_release(key);
            for key in modifiers.iter().rev() {
                state.on_key_release(*key);
            }
        }
        Command::Press(key) => state.on_key_press(*key),
        Command::Release(key) => state.on_key_release(*key),
        Command::Undo => {
            state.undo();
        }
        Command::Redo => {
            state.redo();
        }
        Command::ClearCrop => state.clear_crop(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingsConfig;
    use crate::draw::{FontDescriptor, Shape, color::RED};
    use crate::image::BaseImage;

    fn session() -> InputState {
        let mut state = InputState::with_defaults(
            RED,
            3.0,
            20.0,
            FontDescriptor::default(),
            Tool::Select,
            0,
            KeybindingsConfig::default().build_action_map().unwrap(),
        );
        state.load_image(BaseImage::from_rgba(100, 100, &[255; 100 * 100 * 4]).unwrap());
        state
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let commands = parse("# setup\n\ntool rect\n  down 1 2\nup 3.5 4 right\n").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Tool(Tool::Rect),
                Command::Down(MouseButton::Left, 1.0, 2.0),
                Command::Up(MouseButton::Right, 3.5, 4.0),
            ]
        );
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse("tool rect\nwiggle 3\n").unwrap_err();
        assert_eq!(
            err,
            ScriptError::UnknownCommand {
                line: 2,
                command: "wiggle".to_string()
            }
        );

        let err = parse("tool rect\n\ndown 1\n").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidArgument { line: 3, .. }));
        assert!(err.to_string().starts_with("line 3:"));

        assert!(parse("tool lasso").is_err());
        assert!(parse("move 1 NaN").is_err());
        assert!(parse("key Ctrl+F13").is_err());
    }

    #[test]
    fn run_draws_text_and_undoes_with_chord() {
        let mut state = session();
        let commands = parse(
            "tool rect\ndown 10 10\nmove 40 30\nup 40 30\n\
             tool text\ndown 20 80\nup 20 80\ntype Hello world\nblur\n\
             key Ctrl+Z\n",
        )
        .unwrap();
        run(&mut state, &commands);

        assert_eq!(state.frame.len(), 1);
        assert!(matches!(state.frame.shapes[0], Shape::Rect { width, .. } if width == 30.0));
        assert!(!state.modifiers.ctrl);
        assert!(state.history.can_redo());
    }
}
