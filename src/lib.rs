mod errors;
mod source;
mod source_file;
mod traceback;
mod validator;

pub use errors::{render, throw, BrackenError, ExitCode, LoadError, SyntaxError};
pub use source::{EndPos, InvalidSpan, Span, StartPos};
pub use source_file::{EncodingError, LineOutOfRange, SourceFile};
pub use traceback::{ErrorTraceback, StackLimitError, Traceback, TracebackStack, STACK_SIZE_LIMIT};
pub use validator::{is_specifier, requires_subject, ScopeKind, Subject, Validator};
