//! Logical button bitmask shared by every input source.

use bitflags::bitflags;

bitflags! {
    /// Currently pressed logical buttons. An empty set means no input.
    ///
    /// The bit layout follows the standard gamepad button order;
    /// keyboard sources synthesize the same bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        const UP    = 1;
        const DOWN  = 2;
        const LEFT  = 4;
        const RIGHT = 8;
        const A     = 16;
        const B     = 32;
        const X     = 64;
        const Y     = 128;
        const L     = 256;
        const R     = 512;
        const START = 1024;
    }
}
