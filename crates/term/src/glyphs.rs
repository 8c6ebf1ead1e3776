//! Mapping from font glyph codes to displayable characters.
//!
//! The games address a 256-glyph tile font by code. Printable ASCII maps
//! through unchanged; the handful of tile glyphs the games use get a
//! unicode stand-in. Unknown codes render as '?' so a bad mapping is
//! visible instead of silent.

/// Displayable character for a glyph code.
pub fn glyph_char(code: u16) -> char {
    match code {
        0 => ' ',
        3 => '▒',   // brick
        8 => '☺',   // player face
        24 => '✕',  // X button icon
        143 => '█', // solid block
        149 => '─', // horizontal rule
        150 => '│', // lane line
        232 => '⌂', // house
        236 => '▲', // player car
        238 => '▼', // oncoming car
        254 => '✶', // explosion
        32..=126 => code as u8 as char,
        _ => '?',
    }
}
