//! Interactive command session.
//!
//! # Responsibility
//! - Read one command per line and dispatch it to the note store.
//! - Render notes and not-found messages for the user.
//!
//! # Invariants
//! - Not-found outcomes are reported and the session continues.
//! - A non-integer id, an I/O failure or a storage failure ends the session
//!   with an error. Integers no note can carry are reported as not found.
//! - End of input ends the session like `quit`, also mid-command; a
//!   half-entered command never reaches the store.
//!
//! # See also
//! - DESIGN.md (command prompt decisions)

use jotter_core::{Note, NoteId, NoteStorage, NoteStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::num::IntErrorKind;

const COMMAND_PROMPT: &str = "Enter command (new/list/view/update/delete/quit): ";
const NEW_TITLE_PROMPT: &str = "Enter new title (leave empty to keep current): ";
const NEW_BODY_PROMPT: &str = "Enter new body (leave empty to keep current): ";
const NOT_FOUND_MESSAGE: &str = "Note not found";

/// Failure that terminates a session.
#[derive(Debug)]
pub enum SessionError {
    /// Reading input or writing output failed.
    Io(std::io::Error),
    /// Entered id is not an integer.
    InvalidId(String),
    /// Store failure other than not-found.
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidId(value) => write!(f, "invalid note id `{value}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InvalidId(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One line-oriented command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    List,
    View,
    Update,
    Delete,
    Quit,
}

impl Command {
    /// Parses an exact command word; anything else is `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line {
            "new" => Some(Self::New),
            "list" => Some(Self::List),
            "view" => Some(Self::View),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Prompt loop over an explicitly constructed store.
pub struct Session<'a, S: NoteStorage, R: BufRead, W: Write> {
    store: &'a mut NoteStore<S>,
    input: R,
    output: W,
}

impl<'a, S: NoteStorage, R: BufRead, W: Write> Session<'a, S, R, W> {
    pub fn new(store: &'a mut NoteStore<S>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            let Some(line) = self.prompt(COMMAND_PROMPT)? else {
                info!("event=session_end module=cli status=ok reason=eof");
                return Ok(());
            };
            let Some(command) = Command::parse(&line) else {
                continue;
            };
            if command == Command::Quit {
                info!("event=session_end module=cli status=ok reason=quit");
                return Ok(());
            }
            if self.dispatch(command)? == Flow::Stop {
                info!(
                    "event=session_end module=cli status=ok reason=eof command={:?}",
                    command
                );
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow, SessionError> {
        match command {
            Command::New => {
                // Why: a cut-off script must not persist a half-entered note.
                let Some(title) = self.prompt("Enter title: ")? else {
                    return Ok(Flow::Stop);
                };
                let Some(body) = self.prompt("Enter body: ")? else {
                    return Ok(Flow::Stop);
                };
                let id = self.store.create(title, body)?.id();
                writeln!(self.output, "Created note {id}")?;
            }
            Command::List => {
                for note in self.store.list() {
                    write_note(&mut self.output, note)?;
                    writeln!(self.output, "---")?;
                }
            }
            Command::View => {
                let Some(input) = self.prompt_id()? else {
                    return Ok(Flow::Stop);
                };
                if let Some(id) = self.known_id(input)? {
                    let shown = self
                        .store
                        .view(id)
                        .map(|note| write_note(&mut self.output, note));
                    match shown {
                        Ok(written) => written?,
                        Err(err) => self.report(err)?,
                    }
                }
            }
            Command::Update => {
                let Some(input) = self.prompt_id()? else {
                    return Ok(Flow::Stop);
                };
                let Some(title) = self.prompt(NEW_TITLE_PROMPT)? else {
                    return Ok(Flow::Stop);
                };
                let Some(body) = self.prompt(NEW_BODY_PROMPT)? else {
                    return Ok(Flow::Stop);
                };
                if let Some(id) = self.known_id(input)? {
                    let updated = self.store.update(id, Some(&title), Some(&body)).map(|_| ());
                    if let Err(err) = updated {
                        self.report(err)?;
                    }
                }
            }
            Command::Delete => {
                let Some(input) = self.prompt_id()? else {
                    return Ok(Flow::Stop);
                };
                if let Some(id) = self.known_id(input)? {
                    if let Err(err) = self.store.delete(id) {
                        self.report(err)?;
                    }
                }
            }
            Command::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    /// Prints not-found; every other store error ends the session.
    fn report(&mut self, err: StoreError) -> Result<(), SessionError> {
        if err.is_not_found() {
            writeln!(self.output, "{NOT_FOUND_MESSAGE}")?;
            return Ok(());
        }
        Err(err.into())
    }

    /// Returns the id to look up, or prints not-found for ids no note can carry.
    fn known_id(&mut self, input: IdInput) -> Result<Option<NoteId>, SessionError> {
        match input {
            IdInput::Id(id) => Ok(Some(id)),
            IdInput::Unassignable => {
                writeln!(self.output, "{NOT_FOUND_MESSAGE}")?;
                Ok(None)
            }
        }
    }

    /// Reads and parses one id line; `None` at EOF.
    fn prompt_id(&mut self) -> Result<Option<IdInput>, SessionError> {
        self.prompt("Enter ID: ")?
            .map(|raw| parse_note_id(&raw))
            .transpose()
    }

    /// Writes `text` and reads one line without its terminator; `None` at EOF.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Whether the prompt loop keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// An id line that parsed as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdInput {
    /// Fits a note id; the store may still not know it.
    Id(NoteId),
    /// Negative or too large for any note, so never found.
    Unassignable,
}

/// Parses an id line, tolerating surrounding whitespace.
///
/// Any integer is accepted; only non-integer text is an error.
pub fn parse_note_id(raw: &str) -> Result<IdInput, SessionError> {
    match raw.trim().parse::<i128>() {
        Ok(value) => Ok(NoteId::try_from(value).map_or(IdInput::Unassignable, IdInput::Id)),
        Err(err)
            if matches!(
                err.kind(),
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
            ) =>
        {
            Ok(IdInput::Unassignable)
        }
        Err(_) => Err(SessionError::InvalidId(raw.to_string())),
    }
}

fn write_note(output: &mut impl Write, note: &Note) -> std::io::Result<()> {
    writeln!(output, "ID: {}", note.id())?;
    writeln!(output, "Title: {}", note.title())?;
    writeln!(output, "Body: {}", note.body())?;
    writeln!(output, "Created at: {}", note.created_at())?;
    writeln!(output, "Updated at: {}", note.updated_at())
}

#[cfg(test)]
mod tests {
    use super::{parse_note_id, Command, IdInput, Session, SessionError};
    use jotter_core::{JsonFileStorage, NoteStore};
    use std::io::Cursor;

    fn run_script(
        store: &mut NoteStore<JsonFileStorage>,
        script: &str,
    ) -> (Result<(), SessionError>, String) {
        let mut output = Vec::new();
        let result = Session::new(store, Cursor::new(script.to_string()), &mut output).run();
        (result, String::from_utf8(output).expect("utf-8 output"))
    }

    fn temp_store() -> (tempfile::TempDir, NoteStore<JsonFileStorage>) {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("notes.json"));
        let store = NoteStore::open(storage).expect("open store");
        (dir, store)
    }

    #[test]
    fn command_parse_matches_exact_words_only() {
        assert_eq!(Command::parse("new"), Some(Command::New));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse("NEW"), None);
        assert_eq!(Command::parse(" list"), None);
    }

    #[test]
    fn parse_note_id_accepts_any_integer_and_rejects_other_text() {
        assert_eq!(parse_note_id(" 42 ").unwrap(), IdInput::Id(42));
        assert_eq!(parse_note_id("+7").unwrap(), IdInput::Id(7));
        assert_eq!(parse_note_id("-1").unwrap(), IdInput::Unassignable);
        assert_eq!(
            parse_note_id("18446744073709551616").unwrap(),
            IdInput::Unassignable
        );
        assert_eq!(
            parse_note_id("-9999999999999999999999999999999999999999999").unwrap(),
            IdInput::Unassignable
        );
        assert!(matches!(
            parse_note_id("abc"),
            Err(SessionError::InvalidId(raw)) if raw == "abc"
        ));
        assert!(parse_note_id("").is_err());
        assert!(parse_note_id("1.5").is_err());
    }

    #[test]
    fn new_then_list_prints_blocks_in_order() {
        let (_dir, mut store) = temp_store();
        let (result, output) = run_script(&mut store, "new\nA\nb1\nnew\nB\nb2\nlist\nquit\n");
        result.unwrap();

        let a = output.find("Title: A").expect("A listed");
        let b = output.find("Title: B").expect("B listed");
        assert!(a < b);
        assert_eq!(output.matches("---").count(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn view_unknown_id_reports_and_continues() {
        let (_dir, mut store) = temp_store();
        let (result, output) = run_script(&mut store, "view\n12345\nnew\nT\nB\nquit\n");
        result.unwrap();
        assert!(output.contains("Note not found"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_with_empty_input_keeps_fields() {
        let (_dir, mut store) = temp_store();
        let id = store.create("title", "body").unwrap().id();

        let script = format!("update\n{id}\n\nnew body\nview\n{id}\nquit\n");
        let (result, output) = run_script(&mut store, &script);
        result.unwrap();

        let note = store.find_by_id(id).unwrap();
        assert_eq!(note.title(), "title");
        assert_eq!(note.body(), "new body");
        assert!(output.contains("Body: new body"));
    }

    #[test]
    fn delete_removes_note() {
        let (_dir, mut store) = temp_store();
        let id = store.create("gone", "soon").unwrap().id();

        let (result, _) = run_script(&mut store, &format!("delete\n{id}\nquit\n"));
        result.unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn non_numeric_id_ends_session_with_error() {
        let (_dir, mut store) = temp_store();
        let (result, _) = run_script(&mut store, "delete\nnope\nnew\nT\nB\n");
        assert!(matches!(result, Err(SessionError::InvalidId(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn end_of_input_ends_session_cleanly() {
        let (_dir, mut store) = temp_store();
        let (result, output) = run_script(&mut store, "bogus\n");
        result.unwrap();
        assert_eq!(output.matches("Enter command").count(), 2);
    }

    #[test]
    fn negative_id_reports_not_found_and_continues() {
        let (_dir, mut store) = temp_store();
        let id = store.create("kept", "body").unwrap().id();

        let script = "view\n-1\nupdate\n-1\nX\nY\ndelete\n-1\nlist\nquit\n";
        let (result, output) = run_script(&mut store, script);
        result.unwrap();

        assert_eq!(output.matches("Note not found").count(), 3);
        assert!(output.contains("Title: kept"));
        assert_eq!(store.find_by_id(id).unwrap().title(), "kept");
    }

    #[test]
    fn end_of_input_inside_new_creates_nothing() {
        for script in ["new\n", "new\nonly a title\n"] {
            let (dir, mut store) = temp_store();
            let (result, _) = run_script(&mut store, script);
            result.unwrap();
            assert!(store.is_empty());
            assert!(!dir.path().join("notes.json").exists());
        }
    }

    #[test]
    fn end_of_input_inside_update_changes_nothing() {
        let (dir, mut store) = temp_store();
        let id = store.create("title", "body").unwrap().id();
        let path = dir.path().join("notes.json");
        let bytes_before = std::fs::read(&path).unwrap();

        let (result, _) = run_script(&mut store, &format!("update\n{id}\nnew title\n"));
        result.unwrap();

        assert_eq!(store.find_by_id(id).unwrap().title(), "title");
        assert_eq!(std::fs::read(&path).unwrap(), bytes_before);
    }

    #[test]
    fn end_of_input_at_id_prompt_ends_session_cleanly() {
        let (_dir, mut store) = temp_store();
        let id = store.create("stay", "here").unwrap().id();
        let (result, _) = run_script(&mut store, "delete\n");
        result.unwrap();
        assert!(store.find_by_id(id).is_some());
    }
}
