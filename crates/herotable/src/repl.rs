//! Interactive mode: one table command per input line.
//!
//! ```text
//! search <text>     filter by name (empty text clears)
//! size <n|all>      rows per page
//! sort <column>     header click on a column path or title
//! page <n>          jump to a page
//! next | prev       step one page
//! quit              leave
//! ```
//!
//! Each accepted command re-renders the page. Rejected commands print an
//! error and leave the table as it was.

use std::io::{BufRead, Write};

use herotable_seeker::{Event, PageSize, PageTarget, SeekerError, Session};
use thiserror::Error;
use tracing::debug;

use crate::output::{render_session, OutputError, OutputMode, TableStyle};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Event),
    Help,
    Quit,
}

/// Errors from one input line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("not a page number: {0}")]
    InvalidPage(String),

    #[error(transparent)]
    Seeker(#[from] SeekerError),
}

/// Errors that end the loop.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Output(#[from] OutputError),
}

const HELP: &str = "commands: search <text>, size <n|all>, sort <column>, page <n>, next, prev, quit";

/// Parses one input line. Blank lines are `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Apply(Event::SearchChanged(rest.to_string())),
        "size" => {
            let size: PageSize = required(rest, "size")?.parse()?;
            Command::Apply(Event::PageSizeChanged(size))
        }
        "sort" => Command::Apply(Event::SortColumnClicked(required(rest, "sort")?.into())),
        "page" | "p" => {
            let arg = required(rest, "page")?;
            let n = arg
                .parse()
                .map_err(|_| CommandError::InvalidPage(arg.to_string()))?;
            Command::Apply(Event::PageButtonClicked(PageTarget::Number(n)))
        }
        "next" | "n" => Command::Apply(Event::PageButtonClicked(PageTarget::Next)),
        "prev" => Command::Apply(Event::PageButtonClicked(PageTarget::Previous)),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(arg: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(arg)
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// The current page is written once up front and after every accepted
/// command.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
    mode: OutputMode,
    style: &TableStyle,
) -> Result<(), ReplError> {
    output.write_all(render_session(session, mode, style)?.as_bytes())?;
    for line in input.lines() {
        let line = line?;
        let result = parse_command(&line)
            .and_then(|command| apply(session, command));
        match result {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(output, "{HELP}")?,
            Ok(Some(Command::Apply(_))) => {
                output.write_all(render_session(session, mode, style)?.as_bytes())?;
            }
            Ok(None) => {}
            Err(err) => {
                debug!(%err, line = %line, "rejected command");
                writeln!(output, "error: {err}")?;
            }
        }
        output.flush()?;
    }
    Ok(())
}

fn apply(session: &mut Session, command: Option<Command>) -> Result<Option<Command>, CommandError> {
    if let Some(Command::Apply(event)) = &command {
        session.handle(event.clone())?;
    }
    Ok(command)
}
