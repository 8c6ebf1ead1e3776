//! The character grid handed to the rendering backend.

/// A single grid cell: glyph code plus palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub glyph: u16,
    pub fg: u8,
    pub bg: u8,
}

impl Character {
    /// The sentinel blank cell every frame starts from.
    pub const EMPTY: Character = Character {
        glyph: 0,
        fg: 0,
        bg: 1,
    };
}

impl Default for Character {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A background-music directive. Compared by value so two consecutive
/// frames with the same song do not restart playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Music {
    pub song: u16,
    pub looping: bool,
}

impl Music {
    pub fn new(song: u16, looping: bool) -> Self {
        Self { song, looping }
    }
}

/// One render pass worth of output: `width * height` characters in
/// row-major order plus the pending music directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Character>,
    music: Option<Music>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Character::EMPTY; len],
            music: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Character] {
        &self.cells
    }

    pub fn music(&self) -> Option<Music> {
        self.music
    }

    pub fn set_music(&mut self, music: Option<Music>) {
        self.music = music;
    }

    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Character> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Write one cell. Returns false when (x, y) is outside the grid.
    pub fn set(&mut self, x: u16, y: u16, character: Character) -> bool {
        match self.idx(x, y) {
            Some(i) => {
                self.cells[i] = character;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to [`Character::EMPTY`] and drop the music
    /// directive.
    pub fn clear(&mut self) {
        self.cells.fill(Character::EMPTY);
        self.music = None;
    }

    /// True when no cell has been drawn and no music is pending.
    pub fn is_blank(&self) -> bool {
        self.music.is_none() && self.cells.iter().all(|c| *c == Character::EMPTY)
    }
}
