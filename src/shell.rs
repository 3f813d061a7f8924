//! Line-oriented command shell that drives a queue through [`crate::handle`].
//!
//! The shell owns an optional queue handle, so `free` followed by further
//! commands exercises the absent-handle paths exactly as a driver would.
//!
//! # Commands
//!
//! ```text
//! new                 destroy the current queue (if any), create an empty one
//! free                destroy the current queue
//! ih <str> [n]        insert <str> at head n times (default 1)
//! it <str> [n]        insert <str> at tail n times (default 1)
//! rh [expected]       remove head and print it; compare with [expected]
//! rhq                 remove head without printing it
//! size [expected]     print queue size; compare with [expected]
//! reverse             reverse the queue in place
//! sort                sort the queue ascending
//! show                print the queue contents
//! option <k> <v>      set `length` (removal buffer bytes) or `echo` (0/1)
//! help                list commands
//! quit                stop processing input
//! ```
//!
//! Blank lines and `#` comments are skipped. A failing command prints
//! `error: ...`, bumps [`ShellReport::errors`] and processing continues.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::error::QueueError;
use crate::handle;
use crate::queue::Queue;

/// Upper bound accepted for [`ShellConfig::buffer_capacity`].
pub const MAX_BUFFER_CAPACITY: usize = 1 << 20;

/// Shell tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShellConfig {
    /// Removal buffer size in bytes, terminator included.
    ///
    /// Default: 1024.
    pub buffer_capacity: usize,

    /// Echo each command as `cmd> <line>` before running it.
    ///
    /// Default: off.
    pub echo: bool,
}

impl ShellConfig {
    pub const DEFAULT: Self = Self {
        buffer_capacity: 1024,
        echo: false,
    };

    /// Non-panicking validation for runtime configuration.
    pub const fn try_validate(&self) -> Result<(), &'static str> {
        if self.buffer_capacity == 0 {
            return Err("buffer capacity must be > 0");
        }
        if self.buffer_capacity > MAX_BUFFER_CAPACITY {
            return Err("buffer capacity > 1 MiB is unreasonable");
        }
        Ok(())
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors from parsing or executing a shell command.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("{0}: missing argument")]
    MissingArgument(&'static str),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("removed \"{actual}\", expected \"{expected}\"")]
    RemovedMismatch { actual: String, expected: String },
    #[error("size is {actual}, expected {expected}")]
    SizeMismatch { actual: usize, expected: usize },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid configuration: {0}")]
    Config(&'static str),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Whether the shell should keep reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Summary of a [`Shell::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShellReport {
    /// Commands executed (blank lines and comments excluded).
    pub commands: usize,
    /// Commands that failed.
    pub errors: usize,
    /// Input stopped at a `quit` command.
    pub quit: bool,
}

impl ShellReport {
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

/// Command interpreter over an optional queue handle.
pub struct Shell<W: Write> {
    queue: Option<Box<Queue>>,
    config: ShellConfig,
    buf: Vec<u8>,
    out: W,
}

impl<W: Write> Shell<W> {
    /// Creates a shell with no queue (as after `free`).
    pub fn new(config: ShellConfig, out: W) -> Result<Self, ShellError> {
        config.try_validate().map_err(ShellError::Config)?;

        Ok(Self {
            queue: None,
            config,
            buf: vec![0; config.buffer_capacity],
            out,
        })
    }

    pub fn queue(&self) -> Option<&Queue> {
        self.queue.as_deref()
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs every command in `input` until EOF or `quit`.
    ///
    /// Command failures are reported on the output and counted; only I/O
    /// errors abort the run.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<ShellReport, ShellError> {
        let mut report = ShellReport::default();

        for line in input.lines() {
            let line = line?;
            if is_skipped(&line) {
                continue;
            }
            report.commands += 1;

            match self.execute(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => {
                    report.quit = true;
                    break;
                }
                Err(ShellError::Io(err)) => return Err(ShellError::Io(err)),
                Err(err) => {
                    report.errors += 1;
                    tracing::warn!(error = %err, command = line.trim(), "command failed");
                    writeln!(self.out, "error: {err}")?;
                }
            }
        }

        self.out.flush()?;
        tracing::debug!(
            commands = report.commands,
            errors = report.errors,
            "shell run finished"
        );
        Ok(report)
    }

    /// Runs the commands in the file at `path`.
    pub fn run_script(&mut self, path: &Path) -> Result<ShellReport, ShellError> {
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "running script");
        self.run(BufReader::new(file))
    }

    /// Executes a single command line.
    pub fn execute(&mut self, line: &str) -> Result<Flow, ShellError> {
        if is_skipped(line) {
            return Ok(Flow::Continue);
        }
        let line = line.trim();
        if self.config.echo {
            writeln!(self.out, "cmd> {line}")?;
        }

        let mut args = line.split_whitespace();
        let Some(cmd) = args.next() else {
            return Ok(Flow::Continue);
        };
        tracing::trace!(command = cmd, "executing");

        match cmd {
            "new" => {
                handle::destroy(self.queue.take());
                self.queue = handle::create();
                self.show()?;
            }
            "free" => {
                handle::destroy(self.queue.take());
                self.show()?;
            }
            "ih" => {
                let value = args.next().ok_or(ShellError::MissingArgument("ih"))?;
                let count = parse_count(args.next())?;
                for _ in 0..count {
                    handle::insert_head(self.queue.as_deref_mut(), Some(value.as_bytes()))?;
                }
                self.show()?;
            }
            "it" => {
                let value = args.next().ok_or(ShellError::MissingArgument("it"))?;
                let count = parse_count(args.next())?;
                for _ in 0..count {
                    handle::insert_tail(self.queue.as_deref_mut(), Some(value.as_bytes()))?;
                }
                self.show()?;
            }
            "rh" => self.remove(false, args.next())?,
            "rhq" => self.remove(true, None)?,
            "size" => {
                let actual = handle::size(self.queue.as_deref());
                writeln!(self.out, "Queue size = {actual}")?;
                if let Some(expected) = args.next() {
                    let expected = parse_number(expected)?;
                    if expected != actual {
                        return Err(ShellError::SizeMismatch { actual, expected });
                    }
                }
            }
            "reverse" => {
                handle::reverse(self.queue.as_deref_mut());
                self.show()?;
            }
            "sort" => {
                handle::sort(self.queue.as_deref_mut());
                self.show()?;
            }
            "show" => self.show()?,
            "option" => self.set_option(args.next(), args.next())?,
            "help" => self.help()?,
            "quit" => return Ok(Flow::Quit),
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        }

        Ok(Flow::Continue)
    }

    fn remove(&mut self, quiet: bool, expected: Option<&str>) -> Result<(), ShellError> {
        let n = handle::remove_head(self.queue.as_deref_mut(), Some(self.buf.as_mut_slice()))?;
        let removed = &self.buf[..n];

        if !quiet {
            writeln!(
                self.out,
                "Removed {} from queue",
                String::from_utf8_lossy(removed)
            )?;
        }

        // The expected string is compared as the buffer would hold it.
        let mismatch = expected.and_then(|expected| {
            let room = self.config.buffer_capacity - 1;
            let want = &expected.as_bytes()[..expected.len().min(room)];
            (removed != want).then(|| ShellError::RemovedMismatch {
                actual: String::from_utf8_lossy(removed).into_owned(),
                expected: String::from_utf8_lossy(want).into_owned(),
            })
        });

        self.show()?;
        match mismatch {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn set_option(&mut self, name: Option<&str>, value: Option<&str>) -> Result<(), ShellError> {
        let name = name.ok_or(ShellError::MissingArgument("option"))?;
        let value = value.ok_or(ShellError::MissingArgument("option"))?;

        let mut config = self.config;
        match name {
            "length" => config.buffer_capacity = parse_number(value)?,
            "echo" => config.echo = parse_number(value)? != 0,
            other => return Err(ShellError::UnknownOption(other.to_string())),
        }
        config.try_validate().map_err(ShellError::Config)?;

        tracing::debug!(option = name, value, "option updated");
        self.buf.resize(config.buffer_capacity, 0);
        self.config = config;
        Ok(())
    }

    fn show(&mut self) -> io::Result<()> {
        let Some(q) = self.queue.as_deref() else {
            return writeln!(self.out, "q = NULL");
        };

        write!(self.out, "q = [")?;
        for (i, value) in q.iter().enumerate() {
            if i > 0 {
                write!(self.out, " ")?;
            }
            write!(self.out, "{}", String::from_utf8_lossy(value))?;
        }
        writeln!(self.out, "]")
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Commands:
    new                 Create new queue
    free                Delete queue
    ih <str> [n]        Insert string at head (n times)
    it <str> [n]        Insert string at tail (n times)
    rh [expected]       Remove from head, optionally compare with expected
    rhq                 Remove from head without reporting value
    size [expected]     Show queue size, optionally compare with expected
    reverse             Reverse queue
    sort                Sort queue ascending
    show                Show queue contents
    option <k> <v>      Set option: length <bytes> | echo <0|1>
    help                Show this message
    quit                Exit"
        )
    }
}

fn is_skipped(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

fn parse_count(arg: Option<&str>) -> Result<usize, ShellError> {
    arg.map_or(Ok(1), parse_number)
}

fn parse_number(arg: &str) -> Result<usize, ShellError> {
    arg.parse()
        .map_err(|_| ShellError::InvalidNumber(arg.to_string()))
}
