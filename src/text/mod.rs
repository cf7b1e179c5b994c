//! # Positioned text
//!
//! `PositionedText` is a string that carries a `(line, col)` coordinate for
//! every character through slicing and concatenation. The lexer slices
//! pieces of the source off a single `PositionedText` built from the whole
//! file, so every token — however it was produced — still knows exactly
//! where in the original file it came from, which is what lets later phases
//! print a caret under the offending span.
//!
//! Grounded in `text_utils/positioned_string.py`'s `PositionedString`: this
//! is the same design (parallel `text`/`coordinates` sequences, line-number
//! bookkeeping that survives slicing), translated from a Python list-backed
//! class into a `Vec<char>`-backed Rust struct.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coordinate {
    pub line: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// A string where every character remembers the `(line, col)` it was
/// originally read from.
#[derive(Debug, Clone, Default)]
pub struct PositionedText {
    chars: Vec<char>,
    coords: Vec<Coordinate>,
}

impl PositionedText {
    pub fn empty() -> Self {
        Self {
            chars: Vec::new(),
            coords: Vec::new(),
        }
    }

    /// Build a `PositionedText` from raw source, assigning `(line, col)` to
    /// each character by scanning for line breaks. Line-break characters
    /// themselves are dropped, since their position is implied by the
    /// coordinates of the characters around them.
    pub fn from_source(source: &str) -> Self {
        let mut chars = Vec::with_capacity(source.len());
        let mut coords = Vec::with_capacity(source.len());
        let mut line = 0;
        let mut col = 0;
        let mut chars_iter = source.chars().peekable();
        while let Some(c) = chars_iter.next() {
            match c {
                '\n' => {
                    line += 1;
                    col = 0;
                }
                '\r' => {
                    if chars_iter.peek() == Some(&'\n') {
                        chars_iter.next();
                    }
                    line += 1;
                    col = 0;
                }
                _ => {
                    chars.push(c);
                    coords.push(Coordinate::new(line, col));
                    col += 1;
                }
            }
        }
        Self { chars, coords }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, index: usize) -> char {
        self.chars[index]
    }

    pub fn coord_at(&self, index: usize) -> Coordinate {
        self.coords[index]
    }

    pub fn first_coordinate(&self) -> Option<Coordinate> {
        self.coords.first().copied()
    }

    /// Zero-based line number of the character at `index` (0 for an empty
    /// span, mirroring the Python `line()` default).
    pub fn line(&self, index: usize) -> usize {
        self.coords.get(index).map(|c| c.line).unwrap_or(0)
    }

    /// Sub-span `[start, end)`, keeping each character's original coordinate.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            chars: self.chars[start..end].to_vec(),
            coords: self.coords[start..end].to_vec(),
        }
    }

    /// Append raw (unpositioned) text. Every appended character inherits the
    /// coordinate one column after this text's last character (or `(0, 0)`
    /// if this text is empty), matching `PositionedString.__add__`'s
    /// treatment of plain `str` operands.
    pub fn concat_str(&self, s: &str) -> Self {
        let coord = match self.coords.last() {
            Some(c) => Coordinate::new(c.line, c.col + 1),
            None => Coordinate::new(0, 0),
        };
        let mut chars = self.chars.clone();
        let mut coords = self.coords.clone();
        for c in s.chars() {
            chars.push(c);
            coords.push(coord);
        }
        Self { chars, coords }
    }

    pub fn concat(&self, other: &Self) -> Self {
        let mut chars = self.chars.clone();
        chars.extend_from_slice(&other.chars);
        let mut coords = self.coords.clone();
        coords.extend_from_slice(&other.coords);
        Self { chars, coords }
    }

    pub fn as_str(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_whitespace(&self) -> bool {
        !self.chars.is_empty() && self.chars.iter().all(|c| c.is_whitespace())
    }

    pub fn is_alphabetic(&self) -> bool {
        !self.chars.is_empty() && self.chars.iter().all(|c| c.is_alphabetic())
    }

    pub fn is_alphanumeric(&self) -> bool {
        !self.chars.is_empty() && self.chars.iter().all(|c| c.is_alphanumeric())
    }

    pub fn is_numeric(&self) -> bool {
        !self.chars.is_empty() && self.chars.iter().all(|c| c.is_ascii_digit())
    }

    /// Decodes the first character as a hex digit, as
    /// `PositionedString.__int__` does.
    pub fn hex_digit_value(&self) -> Option<u8> {
        self.chars.first().and_then(|c| c.to_digit(16)).map(|v| v as u8)
    }
}

impl PartialEq for PositionedText {
    fn eq(&self, other: &Self) -> bool {
        self.chars == other.chars
    }
}

impl PartialEq<str> for PositionedText {
    fn eq(&self, other: &str) -> bool {
        self.chars.iter().collect::<String>() == other
    }
}

impl Eq for PositionedText {}

impl std::hash::Hash for PositionedText {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.chars.hash(state);
    }
}

impl std::fmt::Display for PositionedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
