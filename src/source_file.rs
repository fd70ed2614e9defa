use std::string::FromUtf8Error;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("file '{name}' is not valid UTF-8")]
pub struct EncodingError {
    name: String,
    #[source]
    source: FromUtf8Error,
}

impl EncodingError {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line_no} is out of range for '{name}' ({line_count} lines)")]
pub struct LineOutOfRange {
    name: String,
    line_no: usize,
    line_count: usize,
}

#[derive(Debug)]
struct SourceFileInner {
    name: String,
    contents: String,
}

#[derive(Clone, Debug)]
pub struct SourceFile(Arc<SourceFileInner>);

impl SourceFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        SourceFile(Arc::new(SourceFileInner {
            name: name.into(),
            contents: contents.into(),
        }))
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, EncodingError> {
        let name = name.into();
        match String::from_utf8(bytes) {
            Ok(contents) => Ok(Self::new(name, contents)),
            Err(source) => Err(EncodingError { name, source }),
        }
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn contents(&self) -> &str {
        &self.0.contents
    }

    // line terminators are dropped, and a trailing terminator does not
    // produce a final empty line
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.0.contents.lines()
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn line(&self, line_index: usize) -> Result<&str, LineOutOfRange> {
        self.lines().nth(line_index).ok_or_else(|| LineOutOfRange {
            name: self.name().to_string(),
            line_no: line_index,
            line_count: self.line_count(),
        })
    }

    pub(crate) fn same_allocation(&self, other: &SourceFile) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
