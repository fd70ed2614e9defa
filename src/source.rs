use std::convert::TryFrom;
use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StartPos(usize);

impl StartPos {
    pub fn column(&self) -> usize {
        self.0
    }
}

impl From<usize> for StartPos {
    fn from(column: usize) -> Self {
        Self(column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EndPos(usize);

impl EndPos {
    pub fn column(&self) -> usize {
        self.0
    }
}

impl From<usize> for EndPos {
    fn from(column: usize) -> Self {
        Self(column)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("span start {start} is past its end {end}")]
pub struct InvalidSpan {
    start: usize,
    end: usize,
}

// start inclusive, end exclusive, both counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: StartPos,
    end: EndPos,
}

impl Span {
    pub fn new(start: StartPos, end: EndPos) -> Result<Self, InvalidSpan> {
        if start.column() > end.column() {
            Err(InvalidSpan {
                start: start.column(),
                end: end.column(),
            })
        } else {
            Ok(Self { start, end })
        }
    }

    pub fn point(column: usize) -> Self {
        Self {
            start: column.into(),
            end: column.into(),
        }
    }

    pub fn single(column: usize) -> Self {
        Self {
            start: column.into(),
            end: (column + 1).into(),
        }
    }

    pub fn start(&self) -> StartPos {
        self.start
    }

    pub fn end(&self) -> EndPos {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end.column() - self.start.column()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<Range<usize>> for Span {
    type Error = InvalidSpan;

    fn try_from(range: Range<usize>) -> Result<Self, Self::Error> {
        Self::new(range.start.into(), range.end.into())
    }
}
