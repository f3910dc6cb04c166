use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::errors::ClipboardError;
use crate::generators::{CharacterClass, IndexSource};
use crate::password::{GeneratedPassword, Session, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Length(usize),
    Toggle(CharacterClass),
    Generate,
    Copy,
    Reset,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or_else(|| String::from("empty command"))?;

        let parsed = match command {
            "length" | "len" => {
                let value = words.next().ok_or_else(|| String::from("missing length"))?;
                let length = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid password length: {}", value))?;
                Command::Length(length)
            }
            "lower" | "lowercase" => Command::Toggle(CharacterClass::Lowercase),
            "upper" | "uppercase" => Command::Toggle(CharacterClass::Uppercase),
            "numbers" | "digits" => Command::Toggle(CharacterClass::Digits),
            "symbols" => Command::Toggle(CharacterClass::Symbols),
            "generate" | "g" => Command::Generate,
            "copy" | "c" => Command::Copy,
            "reset" | "r" => Command::Reset,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {}", other)),
        };

        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument: {}", extra));
        }

        Ok(parsed)
    }
}

const HELP: &str = "\
commands:
  length N   set password length
  lower      toggle lowercase letters
  upper      toggle uppercase letters
  numbers    toggle digits
  symbols    toggle symbols
  generate   generate a password
  copy       copy the current password to the clipboard
  reset      clear the password and restore defaults
  show       show current settings
  quit       exit";

/// Runs the command loop until `quit` or end of input.
///
/// With `auto_copy` set, every generated password is handed to `copy` as well.
pub fn run<S, R, W, C>(
    session: &mut Session,
    source: &mut S,
    input: R,
    mut output: W,
    auto_copy: bool,
    mut copy: C,
) -> io::Result<()>
where
    S: IndexSource + ?Sized,
    R: BufRead,
    W: Write,
    C: FnMut(&GeneratedPassword) -> Result<(), ClipboardError>,
{
    writeln!(output, "{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };

        log::debug!("command: {:?}", command);

        match command {
            Command::Length(length) => match session.set_length(length) {
                Ok(()) => writeln!(output, "length set to {}", length)?,
                Err(e) => writeln!(output, "{}", e)?,
            },
            Command::Toggle(class) => {
                session.toggle(class);
                show_settings(session, &mut output)?;
            }
            Command::Generate => match session.submit(source) {
                Ok(password) => {
                    writeln!(output, "{}", password)?;
                    if auto_copy {
                        report_copy(copy(&password), &mut output)?;
                    }
                }
                Err(e) => writeln!(output, "{}", e)?,
            },
            Command::Copy => match session.password() {
                Some(password) => report_copy(copy(password), &mut output)?,
                None => writeln!(output, "nothing to copy")?,
            },
            Command::Reset => {
                session.reset();
                writeln!(output, "reset")?;
            }
            Command::Show => show_settings(session, &mut output)?,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    Ok(())
}

fn report_copy<W: Write>(result: Result<(), ClipboardError>, output: &mut W) -> io::Result<()> {
    match result {
        Ok(()) => writeln!(output, "copied to clipboard"),
        Err(e) => writeln!(output, "{}", e),
    }
}

fn show_settings<W: Write>(session: &Session, output: &mut W) -> io::Result<()> {
    let request = session.request();
    let mark = |on: bool| if on { 'x' } else { ' ' };

    writeln!(
        output,
        "length {} [{}] lower [{}] upper [{}] numbers [{}] symbols",
        request.length,
        mark(request.lowercase),
        mark(request.uppercase),
        mark(request.numbers),
        mark(request.symbols),
    )?;

    if let State::Generated(password) = session.state() {
        writeln!(output, "password: {}", password)?;
    }

    Ok(())
}
