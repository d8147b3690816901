//! This module provides a simple logging API.
//!
//! Records are appended to a single file shared by the whole process. Nothing is written until
//! [`init`] is called, so the macros are free to use from library code.

use std::{
    fmt::Display,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, Once,
    },
};

#[repr(usize)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub enum Level {
    /// Designates serious errors.
    Error = 1,
    /// Designates hazardous situations.
    Warn,
    /// Designates useful information.
    Info,
    /// Designates lower priority information.
    Debug,
}

#[derive(Debug, PartialEq, PartialOrd)]
pub enum ParseError<'p> {
    InvalidString(&'p str),
}

static INIT: Once = Once::new();
static LOG_LEVEL: AtomicUsize = AtomicUsize::new(Level::Info as usize);
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

#[macro_export]
macro_rules! log_at {
    ($level:expr, $($args:tt)*) => {
        if let Err(err) = $crate::log::log(
            $level,
            &format!("{}:{} - {}", file!(), line!(), format_args!($($args)*))
        ) {
            if err.kind() != std::io::ErrorKind::NotConnected {
                eprintln!("Failed to log: {err}");
            }
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($args:tt)*) => { $crate::log_at!($crate::log::Level::Error, $($args)*) };
}

#[macro_export]
macro_rules! warn {
    ($($args:tt)*) => { $crate::log_at!($crate::log::Level::Warn, $($args)*) };
}

#[macro_export]
macro_rules! info {
    ($($args:tt)*) => { $crate::log_at!($crate::log::Level::Info, $($args)*) };
}

#[macro_export]
macro_rules! debug {
    ($($args:tt)*) => { $crate::log_at!($crate::log::Level::Debug, $($args)*) };
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        };

        f.write_str(string)
    }
}

/// Opens (or creates) the log file at `path` and sets the maximum level to record.
///
/// Only the first call has any effect; later calls return `Ok(())` without touching the sink.
pub fn init(level: Level, path: impl AsRef<Path>) -> io::Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                *LOG_FILE.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(file)
            }
            Err(e) => result = Err(e),
        };

        LOG_LEVEL.store(level as usize, Ordering::Release);
    });

    result
}

#[doc(hidden)]
pub fn log(level: Level, message: &str) -> io::Result<()> {
    let global_level = LOG_LEVEL.load(Ordering::Acquire);
    if (level as usize) > global_level {
        return Ok(());
    }

    let mut sink = LOG_FILE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    match sink.as_mut() {
        Some(file) => {
            writeln!(file, "[{level}]: {message}")?;
            file.flush()
        }
        None => Err(io::Error::new(
            io::ErrorKind::NotConnected,
            "Attempted to write to logger not initialised",
        )),
    }
}

impl<'p> TryFrom<&'p str> for Level {
    type Error = ParseError<'p>;

    fn try_from(s: &'p str) -> Result<Self, ParseError<'p>> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            _ => Err(ParseError::InvalidString(s)),
        }
    }
}

impl Display for ParseError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidString(s) => {
                write!(f, "Attempted to convert a string {s} that doesn't match a log level")
            }
        }
    }
}
