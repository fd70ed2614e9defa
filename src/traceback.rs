use colored::Colorize;
use thiserror::Error;

use crate::source::Span;
use crate::source_file::{LineOutOfRange, SourceFile};

pub const STACK_SIZE_LIMIT: usize = 900;

const TAB_SIZE: usize = 2;

pub(crate) fn tabulate(text: &str, tabs: usize) -> String {
    format!("{}{}", " ".repeat(TAB_SIZE * tabs), text)
}

#[derive(Clone, Debug)]
pub struct Traceback {
    file: SourceFile,
    line_index: usize,
}

impl Traceback {
    // line_no is 1-based, as printed in diagnostics
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>, line_no: usize) -> Self {
        Self::from_file(SourceFile::new(file_name, contents), line_no)
    }

    pub fn from_file(file: SourceFile, line_no: usize) -> Self {
        Self {
            file,
            line_index: line_no.saturating_sub(1),
        }
    }

    // re-stamp the current line without re-reading the source
    pub fn from_line_update(old: &Traceback, line_no: usize) -> Self {
        Self {
            file: old.file.clone(),
            line_index: line_no.saturating_sub(1),
        }
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn line_no(&self) -> usize {
        self.line_index + 1
    }

    pub fn source_line(&self) -> Result<&str, LineOutOfRange> {
        self.file.line(self.line_index)
    }

    fn synopsis(&self) -> String {
        format!(
            "Panicked at {}, line {}:",
            format!("\"{}\"", self.file.name()).cyan(),
            self.line_no()
        )
    }

    pub fn format(&self) -> Result<String, LineOutOfRange> {
        let line = self.source_line()?;
        Ok(format!("{}\n{}\n", self.synopsis(), tabulate(line, 2)))
    }
}

#[derive(Clone, Debug)]
pub struct ErrorTraceback {
    context: Traceback,
    span: Span,
}

impl ErrorTraceback {
    pub fn new(
        file_name: impl Into<String>,
        contents: impl Into<String>,
        line_no: usize,
        span: Span,
    ) -> Self {
        Self::from_file(SourceFile::new(file_name, contents), line_no, span)
    }

    pub fn from_file(file: SourceFile, line_no: usize, span: Span) -> Self {
        Self {
            context: Traceback::from_file(file, line_no),
            span,
        }
    }

    pub fn context(&self) -> &Traceback {
        &self.context
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn highlighted_line(&self) -> Result<String, LineOutOfRange> {
        let line = self.context.source_line()?;
        let (start, end) = byte_range(line, self.span);
        Ok(format!(
            "{}{}{}",
            &line[..start],
            line[start..end].bold(),
            &line[end..]
        ))
    }

    pub fn format(&self) -> Result<String, LineOutOfRange> {
        let line = self.highlighted_line()?;
        let carets = format!(
            "{}{}",
            " ".repeat(self.span.start().column()),
            "^".repeat(self.span.len()).red().bold()
        );
        Ok(format!(
            "{}\n{}\n{}\n",
            self.context.synopsis(),
            tabulate(&line, 2),
            tabulate(&carets, 2)
        ))
    }
}

// span columns count characters; clamp past-the-end columns to the line end
fn byte_range(line: &str, span: Span) -> (usize, usize) {
    let byte_at = |column: usize| {
        line.char_indices()
            .nth(column)
            .map(|(offset, _)| offset)
            .unwrap_or_else(|| line.len())
    };
    (byte_at(span.start().column()), byte_at(span.end().column()))
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("stack size ({size}) cannot go above {limit}", limit = STACK_SIZE_LIMIT)]
pub struct StackLimitError {
    size: usize,
}

#[derive(Debug, Default)]
pub struct TracebackStack {
    frames: Vec<Traceback>,
}

impl TracebackStack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    // frames are given oldest first, so the last one becomes the top
    pub fn from_frames(frames: impl IntoIterator<Item = Traceback>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, traceback: Traceback) -> Result<(), StackLimitError> {
        if self.frames.len() >= STACK_SIZE_LIMIT {
            return Err(StackLimitError {
                size: self.frames.len(),
            });
        }
        self.frames.push(traceback);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Traceback> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    // newest frame first
    pub fn iter(&self) -> impl Iterator<Item = &Traceback> {
        self.frames.iter().rev()
    }

    pub fn format(&self) -> Result<String, LineOutOfRange> {
        let mut out = String::new();
        for frame in self.iter() {
            out.push_str(&frame.format()?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn empty_span_highlight_keeps_line_intact() {
        plain();
        let traceback = ErrorTraceback::new("ex.bk", "&+$-", 1, Span::point(2));
        assert_eq!(traceback.highlighted_line().unwrap(), "&+$-");
    }

    #[test]
    fn highlight_preserves_every_character() {
        plain();
        let traceback = ErrorTraceback::new("ex.bk", "&+$-", 1, Span::single(1));
        assert_eq!(traceback.highlighted_line().unwrap(), "&+$-");
    }

    #[test]
    fn format_layout() {
        plain();
        let traceback = ErrorTraceback::new("ex.bk", "&x", 1, Span::single(0));
        assert_eq!(
            traceback.format().unwrap(),
            "Panicked at \"ex.bk\", line 1:\n    &x\n    ^\n"
        );
    }

    #[test]
    fn caret_line_tracks_span() {
        plain();
        let traceback = ErrorTraceback::new("ex.bk", "abcd", 1, Span::new(1.into(), 3.into()).unwrap());
        assert_eq!(
            traceback.format().unwrap(),
            "Panicked at \"ex.bk\", line 1:\n    abcd\n     ^^\n"
        );
    }

    #[test]
    fn empty_span_renders_no_carets() {
        plain();
        let traceback = ErrorTraceback::new("ex.bk", "abcd", 1, Span::point(2));
        assert_eq!(
            traceback.format().unwrap(),
            "Panicked at \"ex.bk\", line 1:\n    abcd\n      \n"
        );
    }

    #[test]
    fn highlight_counts_characters_not_bytes() {
        plain();
        let traceback = ErrorTraceback::new("ex.bk", "αβγδ", 1, Span::new(1.into(), 3.into()).unwrap());
        assert_eq!(traceback.highlighted_line().unwrap(), "αβγδ");
        assert_eq!(
            traceback.format().unwrap(),
            "Panicked at \"ex.bk\", line 1:\n    αβγδ\n     ^^\n"
        );
    }

    #[test]
    fn picks_the_stamped_line() {
        plain();
        let traceback = ErrorTraceback::new("ex.bk", "&+\n$x\n", 2, Span::single(1));
        assert_eq!(
            traceback.format().unwrap(),
            "Panicked at \"ex.bk\", line 2:\n    $x\n     ^\n"
        );
    }

    #[test]
    fn format_fails_past_the_last_line() {
        let traceback = Traceback::new("ex.bk", "&+", 5);
        assert!(traceback.format().is_err());
    }

    #[test]
    fn line_update_shares_the_file() {
        let first = Traceback::new("ex.bk", "&+\n$-", 1);
        let second = Traceback::from_line_update(&first, 2);
        assert!(first.file().same_allocation(second.file()));
        assert_eq!(second.line_no(), 2);
        assert_eq!(second.source_line().unwrap(), "$-");
    }

    #[test]
    fn stack_push_fails_exactly_at_the_limit() {
        let frame = Traceback::new("ex.bk", "&+", 1);
        let mut stack = TracebackStack::new();
        for _ in 0..STACK_SIZE_LIMIT {
            stack.push(frame.clone()).unwrap();
        }
        assert_eq!(stack.len(), STACK_SIZE_LIMIT);

        let err = stack.push(frame).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "stack size ({}) cannot go above {}",
                STACK_SIZE_LIMIT, STACK_SIZE_LIMIT
            )
        );
        assert_eq!(stack.len(), STACK_SIZE_LIMIT);
    }

    #[test]
    fn stack_iterates_newest_first() {
        let file = SourceFile::new("ex.bk", "&+\n$-\n&.");
        let oldest = Traceback::from_file(file.clone(), 1);
        let middle = Traceback::from_line_update(&oldest, 2);
        let mut stack = TracebackStack::from_frames(vec![oldest, middle]);
        stack.push(Traceback::from_file(file, 3)).unwrap();

        let lines: Vec<_> = stack.iter().map(Traceback::line_no).collect();
        assert_eq!(lines, vec![3, 2, 1]);

        assert_eq!(stack.pop().map(|tb| tb.line_no()), Some(3));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn empty_stack() {
        let stack = TracebackStack::new();
        assert_eq!(stack.len(), 0);
        assert!(stack.is_empty());
        assert_eq!(stack.format().unwrap(), "");
    }

    #[test]
    fn stack_format_renders_each_frame() {
        plain();
        let first = Traceback::new("ex.bk", "&+\n$-", 1);
        let second = Traceback::from_line_update(&first, 2);
        let stack = TracebackStack::from_frames(vec![first, second]);
        assert_eq!(
            stack.format().unwrap(),
            "Panicked at \"ex.bk\", line 2:\n    $-\nPanicked at \"ex.bk\", line 1:\n    &+\n"
        );
    }
}
