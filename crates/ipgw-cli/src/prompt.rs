//! Interactive prompts for values missing from flags and config
//!
//! Prompts are written to stderr so stdout carries only the gateway reply.
//! Empty input or end of input is an error: a request is never sent with an
//! empty required field.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Result};
use zeroize::Zeroizing;

use ipgw_core::Settings;
use ipgw_protocol::{Operation, Password};

/// Prompt for whatever `operation` needs and `settings` lacks
pub fn fill_missing(settings: &mut Settings, operation: Operation) -> Result<()> {
    if operation.requires_credentials() {
        if settings.user.is_empty() {
            settings.user = prompt_line("User: ", "user")?;
        }
        if settings.password.is_empty() {
            settings.password = prompt_password("Password: ")?;
        }
    }

    if operation.requires_ip() && settings.ip.is_none() {
        settings.ip = Some(prompt_line("IP: ", "ip")?);
    }

    Ok(())
}

/// Read one visible line from stdin
pub fn prompt_line(label: &str, field: &str) -> Result<String> {
    let stdin = io::stdin();
    let value = read_required_line(&mut stdin.lock(), &mut io::stderr(), label, field)?;
    Ok(value.as_str().to_string())
}

/// Read a password from stdin without echo
///
/// On a terminal, keys are read in raw mode and nothing is echoed. When stdin
/// is not a terminal the password is read as a plain line.
pub fn prompt_password(label: &str) -> Result<Password> {
    if !io::stdin().is_terminal() {
        let stdin = io::stdin();
        let value = read_secret_line(&mut stdin.lock(), &mut io::stderr(), label, "password")?;
        return Ok(Password::new(value.as_str()));
    }

    let mut stderr = io::stderr();
    write!(stderr, "{}", label)?;
    stderr.flush()?;

    crossterm::terminal::enable_raw_mode()?;
    let result = read_hidden_keys();
    crossterm::terminal::disable_raw_mode()?;
    writeln!(stderr)?;

    let input = result?;
    if input.is_empty() {
        bail!("No password given (use --password)");
    }
    Ok(Password::new(input.as_str()))
}

/// Write `label`, then read one trimmed, non-empty line
///
/// The read buffer is wiped once the value has been copied out.
pub fn read_required_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
    field: &str,
) -> Result<Zeroizing<String>> {
    let line = read_prompted(reader, writer, label)?;
    require(writer, line.trim(), field)
}

/// Write `label`, then read one non-empty line with only its terminator removed
///
/// Surrounding whitespace is kept, as on the terminal path.
pub fn read_secret_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
    field: &str,
) -> Result<Zeroizing<String>> {
    let line = read_prompted(reader, writer, label)?;
    let value = line.as_str();
    let value = value.strip_suffix('\n').unwrap_or(value);
    let value = value.strip_suffix('\r').unwrap_or(value);
    require(writer, value, field)
}

fn read_prompted<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> Result<Zeroizing<String>> {
    write!(writer, "{}", label)?;
    writer.flush()?;

    let mut line = Zeroizing::new(String::new());
    reader.read_line(&mut line)?;
    Ok(line)
}

fn require<W: Write>(writer: &mut W, value: &str, field: &str) -> Result<Zeroizing<String>> {
    if value.is_empty() {
        writeln!(writer)?;
        bail!("No {} given (use --{})", field, field);
    }
    Ok(Zeroizing::new(value.to_string()))
}

fn read_hidden_keys() -> Result<Zeroizing<String>> {
    use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    let mut input = Zeroizing::new(String::new());
    loop {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter => return Ok(input),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char('c') | KeyCode::Char('d')
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    bail!("Password entry interrupted");
                }
                KeyCode::Esc => bail!("Password entry cancelled"),
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
        }
    }
}
