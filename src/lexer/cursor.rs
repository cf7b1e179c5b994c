//! # Cursor
//!
//! Provides character-by-character navigation through a `PositionedText`
//! source, the way the teacher's byte `Cursor` navigates raw ASCII — except
//! position tracking here comes for free from the text's own coordinates
//! rather than being maintained by hand, since every character already
//! knows its `(line, col)`.

use crate::text::PositionedText;

pub struct Cursor<'a> {
    text: &'a PositionedText,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a PositionedText) -> Self {
        Self { text, pos: 0 }
    }

    pub fn peek(&self) -> Option<char> {
        if self.pos < self.text.len() {
            Some(self.text.char_at(self.pos))
        } else {
            None
        }
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        let idx = self.pos + offset;
        if idx < self.text.len() {
            Some(self.text.char_at(idx))
        } else {
            None
        }
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Source line of the character `offset` positions ahead of the cursor,
    /// or `None` past the end. Newlines themselves never appear in the
    /// underlying `PositionedText` (see `text::PositionedText::from_source`),
    /// so this is how the lexer notices a line break happened at all.
    pub fn line_at(&self, offset: usize) -> Option<usize> {
        let idx = self.pos + offset;
        if idx < self.text.len() {
            Some(self.text.coord_at(idx).line)
        } else {
            None
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Slice of the source from `start` up to (not including) the current
    /// position.
    pub fn slice_from(&self, start: usize) -> PositionedText {
        self.text.slice(start, self.pos)
    }
}
