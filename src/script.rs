//! # Script splitting
//!
//! Splits a multi-statement SQL script into individual statements.
//!
//! The scanner understands:
//!
//! - `/* block */` and `-- line` comments
//! - `'single'` and `"double"` quoted literals, where a backslash escapes the
//!   next character
//! - `delimiter <token>` directives that change the statement terminator for
//!   the rest of the script (default `;`)
//!
//! Delimiters and comment markers inside literals are ignored, and delimiters
//! inside comments are ignored. Statements are trimmed and empty ones dropped.
//!
//! ```
//! use sqlexpr::script::parse_statements;
//!
//! let script = "create table t (x int);\n\
//!               delimiter $$\n\
//!               create trigger tr before insert on t for each row begin set new.x = 1; end $$\n\
//!               delimiter ;\n\
//!               insert into t values (2);";
//!
//! let statements = parse_statements(script, false).unwrap();
//! assert_eq!(statements.len(), 3);
//! assert!(statements[1].ends_with("set new.x = 1; end"));
//! ```

use tracing::debug;

use crate::{error::ScriptError, lexer::Position};

const DEFAULT_DELIMITER: &str = ";";
const DIRECTIVE: &str = "delimiter";

/// Splits `script` into statements.
///
/// With `keep_comments` comment text stays inside the statement it appears in,
/// and a run of comments with no code before the next delimiter becomes a
/// statement of its own. Without it comments are removed and the whitespace
/// around them collapses to a single space.
pub fn parse_statements(script: &str, keep_comments: bool) -> Result<Vec<String>, ScriptError> {
    let statements = ScriptScanner::new(script, keep_comments).run()?;
    debug!(count = statements.len(), keep_comments, "split script");
    Ok(statements)
}

struct ScriptScanner {
    input: Vec<char>,
    position: Position,
    keep_comments: bool,
    delimiter: String,
    /// Text of the statement being collected.
    buffer: String,
    /// Whether `buffer` holds anything besides whitespace and comments.
    has_code: bool,
    statements: Vec<String>,
}

impl ScriptScanner {
    fn new(script: &str, keep_comments: bool) -> Self {
        ScriptScanner {
            input: script.chars().collect(),
            position: Position::start(),
            keep_comments,
            delimiter: DEFAULT_DELIMITER.to_string(),
            buffer: String::new(),
            has_code: false,
            statements: Vec::new(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position.offset).copied()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.input.get(offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position.offset += 1;
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn starts_with_at(&self, offset: usize, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, expected)| self.char_at(offset + i) == Some(expected))
    }

    fn starts_with(&self, text: &str) -> bool {
        self.starts_with_at(self.position.offset, text)
    }

    fn run(mut self) -> Result<Vec<String>, ScriptError> {
        while let Some(ch) = self.current_char() {
            if !self.has_code
                && let Some((delimiter, length)) = self.directive()
            {
                self.flush();
                self.advance_by(length);
                debug!(from = %self.delimiter, to = %delimiter, line = self.position.line, "delimiter changed");
                self.delimiter = delimiter;
                continue;
            }

            if self.starts_with("/*") {
                self.block_comment()?;
            } else if self.starts_with("--") {
                self.line_comment();
            } else if ch == '\'' || ch == '"' {
                self.quoted(ch)?;
            } else if self.starts_with(&self.delimiter) {
                self.advance_by(self.delimiter.chars().count());
                self.flush();
            } else {
                self.buffer.push(ch);
                if !ch.is_whitespace() {
                    self.has_code = true;
                }
                self.advance();
            }
        }

        self.flush();
        Ok(self.statements)
    }

    /// Recognizes `delimiter <token>` at the current position. Returns the new
    /// delimiter and the number of characters the directive spans.
    ///
    /// The token ends at whitespace. If the same token is repeated after
    /// spaces on the same line, the repetition belongs to the directive too.
    fn directive(&self) -> Option<(String, usize)> {
        let start = self.position.offset;
        let word_matches = DIRECTIVE
            .chars()
            .enumerate()
            .all(|(i, expected)| {
                self.char_at(start + i)
                    .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
            });
        if !word_matches {
            return None;
        }

        let mut i = start + DIRECTIVE.len();
        if !self.char_at(i).is_some_and(is_blank) {
            return None;
        }
        while self.char_at(i).is_some_and(is_blank) {
            i += 1;
        }

        let mut token = String::new();
        while let Some(c) = self.char_at(i).filter(|c| !c.is_whitespace()) {
            token.push(c);
            i += 1;
        }
        if token.is_empty() {
            return None;
        }

        let mut j = i;
        while self.char_at(j).is_some_and(is_blank) {
            j += 1;
        }
        if self.starts_with_at(j, &token) {
            i = j + token.chars().count();
        }

        Some((token, i - start))
    }

    fn block_comment(&mut self) -> Result<(), ScriptError> {
        let start = self.position;
        let mut text = String::from("/*");
        self.advance_by(2);

        loop {
            if self.starts_with("*/") {
                self.advance_by(2);
                text.push_str("*/");
                break;
            }
            match self.current_char() {
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
                None => return Err(ScriptError::UnterminatedComment { position: start }),
            }
        }

        self.comment(text);
        Ok(())
    }

    /// Consumes `-- ...` up to, not including, the end of line.
    fn line_comment(&mut self) {
        let mut text = String::new();
        while let Some(c) = self.current_char().filter(|c| *c != '\n') {
            text.push(c);
            self.advance();
        }
        let text = text.trim_end_matches('\r').to_string();
        self.comment(text);
    }

    fn comment(&mut self, text: String) {
        if self.keep_comments {
            self.buffer.push_str(&text);
            return;
        }

        let kept = self.buffer.trim_end().len();
        self.buffer.truncate(kept);
        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn quoted(&mut self, quote: char) -> Result<(), ScriptError> {
        let start = self.position;
        self.buffer.push(quote);
        self.has_code = true;
        self.advance();

        while let Some(c) = self.current_char() {
            self.buffer.push(c);
            self.advance();
            if c == '\\' {
                match self.current_char() {
                    Some(escaped) => {
                        self.buffer.push(escaped);
                        self.advance();
                    }
                    None => break,
                }
            } else if c == quote {
                return Ok(());
            }
        }

        Err(ScriptError::UnterminatedQuote {
            quote,
            position: start,
        })
    }

    /// Ends the current statement.
    fn flush(&mut self) {
        let statement = trim_statement(&self.buffer, &self.delimiter);
        if !statement.is_empty() {
            self.statements.push(statement.to_string());
        }
        self.buffer.clear();
        self.has_code = false;
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Strips whitespace and stray copies of `delimiter` from both ends.
fn trim_statement<'s>(text: &'s str, delimiter: &str) -> &'s str {
    let mut s = text.trim();
    loop {
        if let Some(rest) = s.strip_prefix(delimiter) {
            s = rest.trim_start();
        } else if let Some(rest) = s.strip_suffix(delimiter) {
            s = rest.trim_end();
        } else {
            return s;
        }
    }
}
