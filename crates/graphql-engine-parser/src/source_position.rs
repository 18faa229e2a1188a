use crate::ast::AstPos;

/// A position in source text as tracked by the lexer.
///
/// All values are 0-based:
/// - `line`: line index within the document
/// - `col_utf8`: count of characters since the start of the line
/// - `col_utf16`: count of UTF-16 code units since the start of the line
/// - `byte_offset`: byte index within the whole document
///
/// For ASCII text both columns agree. Characters outside the Basic
/// Multilingual Plane advance `col_utf8` by 1 and `col_utf16` by 2.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    col_utf8: usize,
    col_utf16: usize,
    byte_offset: usize,
}

impl SourcePosition {
    pub fn new(
        line: usize,
        col_utf8: usize,
        col_utf16: usize,
        byte_offset: usize,
    ) -> Self {
        Self {
            line,
            col_utf8,
            col_utf16,
            byte_offset,
        }
    }

    /// 0-based line index.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based character column within the current line.
    pub fn col_utf8(&self) -> usize {
        self.col_utf8
    }

    /// 0-based UTF-16 code unit column within the current line.
    pub fn col_utf16(&self) -> usize {
        self.col_utf16
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Converts to the 1-based `{line, column}` pair that GraphQL error
    /// locations report. The column is character based.
    pub fn to_ast_pos(&self) -> AstPos {
        AstPos {
            line: self.line + 1,
            column: self.col_utf8 + 1,
        }
    }
}
