use crate::errors::SyntaxError;
use crate::source_file::SourceFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    None,
    ByReference,
    ByValue,
}

impl Subject {
    fn from_specifier(ch: char) -> Option<Subject> {
        match ch {
            '&' => Some(Subject::ByReference),
            '$' => Some(Subject::ByValue),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Subject::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Loop,
    Slice,
}

impl ScopeKind {
    fn opened_by(ch: char) -> Option<ScopeKind> {
        match ch {
            '[' => Some(ScopeKind::Loop),
            '{' => Some(ScopeKind::Slice),
            _ => None,
        }
    }

    fn closed_by(ch: char) -> Option<ScopeKind> {
        match ch {
            ']' => Some(ScopeKind::Loop),
            '}' => Some(ScopeKind::Slice),
            _ => None,
        }
    }

    fn opener(self) -> char {
        match self {
            ScopeKind::Loop => '[',
            ScopeKind::Slice => '{',
        }
    }

    fn empty_scope_error(self, char_no: usize, line_no: usize) -> SyntaxError {
        match self {
            ScopeKind::Loop => SyntaxError::EmptyLoop { char_no, line_no },
            ScopeKind::Slice => SyntaxError::NoOperationInArray { char_no, line_no },
        }
    }
}

pub fn is_specifier(ch: char) -> bool {
    matches!(ch, '&' | '$')
}

pub fn requires_subject(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-' | '^' | '@' | '\'' | '"' | '.' | ',' | '!' | '#' | 'r' | 's' | 'm'
    )
}

#[derive(Debug, Clone, Copy)]
struct OpenScope {
    kind: ScopeKind,
    char_no: usize,
    line_no: usize,
}

pub struct Validator {
    file: SourceFile,
    subject: Subject,
    scopes: Vec<OpenScope>,
    previous: Option<char>,
}

impl Validator {
    pub fn validate(file: SourceFile) -> Result<(), SyntaxError> {
        Self::new(file).run()
    }

    pub fn new(file: SourceFile) -> Self {
        Self {
            file,
            subject: Subject::None,
            scopes: Vec::new(),
            previous: None,
        }
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    fn run(mut self) -> Result<(), SyntaxError> {
        let file = self.file.clone();
        for (line_index, line) in file.lines().enumerate() {
            let line_no = line_index + 1;
            for (char_no, ch) in line.chars().enumerate() {
                self.step(ch, char_no, line_no)?;
            }
            self.end_line(line, line_no)?;
        }
        self.finish()
    }

    fn step(&mut self, ch: char, char_no: usize, line_no: usize) -> Result<(), SyntaxError> {
        if requires_subject(ch) {
            if self.subject.is_none() {
                return Err(SyntaxError::MissingSpecifier { char_no, line_no });
            }
        } else if let Some(kind) = ScopeKind::closed_by(ch) {
            self.close_scope(kind, ch, char_no, line_no)?;
        } else if let Some(kind) = ScopeKind::opened_by(ch) {
            self.scopes.push(OpenScope {
                kind,
                char_no,
                line_no,
            });
            self.subject = Subject::None;
        } else if let Some(subject) = Subject::from_specifier(ch) {
            self.subject = subject;
        } else if let Some(previous) = self.previous {
            // an inert character cannot consume the specifier left just
            // before it, so the specifier itself is flagged
            if is_specifier(previous) {
                return Err(SyntaxError::UnexpectedSpecifier {
                    ch: previous,
                    char_no: char_no - 1,
                    line_no,
                });
            }
        }
        self.previous = Some(ch);
        Ok(())
    }

    fn close_scope(
        &mut self,
        kind: ScopeKind,
        ch: char,
        char_no: usize,
        line_no: usize,
    ) -> Result<(), SyntaxError> {
        let top = match self.scopes.last() {
            Some(top) => *top,
            None => return Err(SyntaxError::UnexpectedSpecifier { ch, char_no, line_no }),
        };
        if top.kind != kind {
            return Err(SyntaxError::UnexpectedSpecifier { ch, char_no, line_no });
        }
        if self.previous == Some(kind.opener()) {
            return Err(kind.empty_scope_error(char_no, line_no));
        }
        self.scopes.pop();
        Ok(())
    }

    // a specifier that ends a line can no longer be consumed by an operator
    fn end_line(&mut self, line: &str, line_no: usize) -> Result<(), SyntaxError> {
        if let Some(previous) = self.previous {
            if is_specifier(previous) {
                return Err(SyntaxError::UnexpectedSpecifier {
                    ch: previous,
                    char_no: line.chars().count() - 1,
                    line_no,
                });
            }
        }
        Ok(())
    }

    fn finish(&self) -> Result<(), SyntaxError> {
        match self.scopes.last() {
            Some(scope) => Err(SyntaxError::MissingOperator {
                char_no: scope.char_no,
                line_no: scope.line_no,
            }),
            None => Ok(()),
        }
    }
}
