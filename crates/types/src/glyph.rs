//! Glyphs and text runs accepted by the drawing primitives.
//!
//! The font has 256 glyphs. A glyph is addressed either by a character
//! (which must map onto a single font code unit) or by a raw code for the
//! non-ASCII tiles (bricks, cars, faces). Validation happens at
//! construction, never at render time.

use thiserror::Error;

/// Highest valid glyph code.
pub const MAX_GLYPH: u16 = 0xFF;

/// A character or glyph code the font cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("invalid character {0:?}; no glyph above code point 0xFF")]
    InvalidChar(char),
    #[error("invalid glyph code {0}; the font has 256 glyphs")]
    InvalidCode(u16),
}

/// A single validated glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// A printable character (code point <= 0xFF).
    Char(char),
    /// A raw font code for tiles with no character equivalent.
    Raw(u16),
}

impl Glyph {
    pub fn from_char(c: char) -> Result<Self, TextError> {
        if (c as u32) <= MAX_GLYPH as u32 {
            Ok(Glyph::Char(c))
        } else {
            Err(TextError::InvalidChar(c))
        }
    }

    pub fn raw(code: u16) -> Result<Self, TextError> {
        if code <= MAX_GLYPH {
            Ok(Glyph::Raw(code))
        } else {
            Err(TextError::InvalidCode(code))
        }
    }

    /// Font code for this glyph.
    pub fn code(self) -> u16 {
        match self {
            Glyph::Char(c) => c as u16,
            Glyph::Raw(code) => code,
        }
    }
}

/// An ordered run of validated glyphs.
///
/// Room scripts build these to mix literal text with tile glyphs:
///
/// ```
/// use tui_rooms_types::Text;
///
/// let line = Text::from_str("  PRESS ").unwrap().raw(24).unwrap();
/// assert_eq!(line.len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text(Vec<Glyph>);

impl Text {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_str(s: &str) -> Result<Self, TextError> {
        Self::new().str(s)
    }

    /// A run of `count` copies of one glyph code.
    pub fn repeat(code: u16, count: usize) -> Result<Self, TextError> {
        let glyph = Glyph::raw(code)?;
        Ok(Self(vec![glyph; count]))
    }

    /// Stencil over a pattern: spaces stay true blanks, everything else
    /// becomes `replacement`. Used for ASCII-art letterforms.
    pub fn stencil(pattern: &str, replacement: u16) -> Result<Self, TextError> {
        let brick = Glyph::raw(replacement)?;
        let glyphs = pattern
            .chars()
            .map(|c| {
                if c == ' ' {
                    Glyph::from_char(' ')
                } else {
                    Ok(brick)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(glyphs))
    }

    /// Append a literal string (builder form).
    pub fn str(mut self, s: &str) -> Result<Self, TextError> {
        for c in s.chars() {
            self.0.push(Glyph::from_char(c)?);
        }
        Ok(self)
    }

    /// Append one raw glyph code (builder form).
    pub fn raw(mut self, code: u16) -> Result<Self, TextError> {
        self.0.push(Glyph::raw(code)?);
        Ok(self)
    }

    pub fn push(&mut self, glyph: Glyph) {
        self.0.push(glyph);
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Text {
    type Item = Glyph;
    type IntoIter = std::vec::IntoIter<Glyph>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Conversion into a [`Text`] run, validating every element.
///
/// Mirrors the loosely-typed arguments the drawing API accepts: a literal
/// string, a single glyph code, or a prebuilt run.
pub trait IntoText {
    fn into_text(self) -> Result<Text, TextError>;
}

impl IntoText for Text {
    fn into_text(self) -> Result<Text, TextError> {
        Ok(self)
    }
}

impl IntoText for &str {
    fn into_text(self) -> Result<Text, TextError> {
        Text::from_str(self)
    }
}

impl IntoText for String {
    fn into_text(self) -> Result<Text, TextError> {
        Text::from_str(&self)
    }
}

impl IntoText for u16 {
    fn into_text(self) -> Result<Text, TextError> {
        Ok(Text(vec![Glyph::raw(self)?]))
    }
}

impl IntoText for char {
    fn into_text(self) -> Result<Text, TextError> {
        Ok(Text(vec![Glyph::from_char(self)?]))
    }
}

impl IntoText for Glyph {
    fn into_text(self) -> Result<Text, TextError> {
        Ok(Text(vec![self]))
    }
}

/// Lets builder chains flow straight into the drawing primitives:
/// `ctx.print(Text::from_str("PRESS ").and_then(|t| t.raw(24)))`.
impl IntoText for Result<Text, TextError> {
    fn into_text(self) -> Result<Text, TextError> {
        self
    }
}
