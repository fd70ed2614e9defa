use std::path::PathBuf;
use std::process;

use colored::Colorize;
use itertools::Itertools;
use lazy_static::lazy_static;
use num_enum::IntoPrimitive;
use strum::IntoStaticStr;
use thiserror::Error;

use crate::source::Span;
use crate::source_file::{EncodingError, LineOutOfRange, SourceFile};
use crate::traceback::{tabulate, ErrorTraceback};

// char_no is a 0-based column, line_no is 1-based
#[derive(Error, IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected specifier '{ch}' at position {char_no} (line {line_no})")]
    UnexpectedSpecifier {
        ch: char,
        char_no: usize,
        line_no: usize,
    },
    #[error("unexpected operator '{ch}' at position {char_no} (line {line_no})")]
    UnexpectedOperator {
        ch: char,
        char_no: usize,
        line_no: usize,
    },
    #[error("missing specifier at position {char_no} (line {line_no})")]
    MissingSpecifier { char_no: usize, line_no: usize },
    #[error("missing operator at position {char_no} (line {line_no})")]
    MissingOperator { char_no: usize, line_no: usize },
    #[error("empty loop at position {char_no} (line {line_no})")]
    EmptyLoop { char_no: usize, line_no: usize },
    #[error("no operation in array at position {char_no} (line {line_no})")]
    NoOperationInArray { char_no: usize, line_no: usize },
}

impl SyntaxError {
    pub fn char_no(&self) -> usize {
        match *self {
            SyntaxError::UnexpectedSpecifier { char_no, .. }
            | SyntaxError::UnexpectedOperator { char_no, .. }
            | SyntaxError::MissingSpecifier { char_no, .. }
            | SyntaxError::MissingOperator { char_no, .. }
            | SyntaxError::EmptyLoop { char_no, .. }
            | SyntaxError::NoOperationInArray { char_no, .. } => char_no,
        }
    }

    pub fn line_no(&self) -> usize {
        match *self {
            SyntaxError::UnexpectedSpecifier { line_no, .. }
            | SyntaxError::UnexpectedOperator { line_no, .. }
            | SyntaxError::MissingSpecifier { line_no, .. }
            | SyntaxError::MissingOperator { line_no, .. }
            | SyntaxError::EmptyLoop { line_no, .. }
            | SyntaxError::NoOperationInArray { line_no, .. } => line_no,
        }
    }

    pub fn span(&self) -> Span {
        Span::single(self.char_no())
    }

    pub fn traceback(&self, file: &SourceFile) -> ErrorTraceback {
        ErrorTraceback::from_file(file.clone(), self.line_no(), self.span())
    }
}

#[derive(Error, IntoStaticStr, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("file '{}' could not be found", .0.display())]
    FileNotFound(PathBuf),
    #[error("file '{}' is not readable", .0.display())]
    NotReadableFile(PathBuf),
}

#[derive(Error, Debug)]
pub enum BrackenError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("an unknown error occurred")]
    Unknown,
}

impl BrackenError {
    pub fn name(&self) -> &'static str {
        match self {
            BrackenError::Syntax(err) => err.into(),
            BrackenError::Load(err) => err.into(),
            BrackenError::Encoding(_) => "EncodingError",
            BrackenError::Unknown => "Unknown",
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            BrackenError::Syntax(_) | BrackenError::Unknown => ExitCode::Syntax,
            BrackenError::Load(_) | BrackenError::Encoding(_) => ExitCode::Io,
        }
    }

    pub fn note(&self) -> Option<&'static str> {
        match self {
            BrackenError::Syntax(SyntaxError::MissingSpecifier { .. }) => {
                Some("operators act on a subject; introduce one with '&' (reference) or '$' (value)")
            }
            BrackenError::Syntax(SyntaxError::MissingOperator { .. }) => {
                Some("this scope is never closed")
            }
            _ => None,
        }
    }
}

#[derive(IntoPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Syntax = 1,
    Io = 2,
}

lazy_static! {
    static ref TAG: String = format!(
        "{}{}",
        " ERR ".bold().on_red(),
        " Bracken ".black().on_white()
    );
}

fn render_message(error: &BrackenError) -> String {
    let mut out = format!(
        "{} {} {}",
        TAG.as_str(),
        format!("{}:", error.name()).bold(),
        error.to_string().red()
    );
    if let Some(note) = error.note() {
        let note = format!("note: {}", note);
        out.push('\n');
        out.push_str(&note.lines().map(|line| tabulate(line, 1)).join("\n"));
    }
    out
}

pub fn render(
    error: &BrackenError,
    traceback: Option<&ErrorTraceback>,
) -> Result<String, LineOutOfRange> {
    let mut out = String::new();
    if let Some(traceback) = traceback {
        out.push_str(&traceback.format()?);
    }
    out.push_str(&render_message(error));
    Ok(out)
}

pub fn throw(error: &BrackenError, traceback: Option<&ErrorTraceback>) -> ! {
    let rendered = render(error, traceback).unwrap_or_else(|_| render_message(error));
    println!("{}", rendered);
    process::exit(error.exit_code().into())
}
