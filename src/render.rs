//! Fixed-layout text rendering
//!
//! ```text
//!   a b c d e f g h i
//! 0 r h e a k a e h r
//! 1 . . . . . . . . .
//! ...
//! 9 R H E A K A E H R
//! ```
//!
//! Upper-case letters are first-side pieces, lower-case second-side:
//! `K` general, `A` advisor, `E` elephant, `H` horse, `R` chariot,
//! `C` cannon, `P` soldier. Every line has the same width, so the text is
//! always [`RENDER_LEN`] bytes.

use std::fmt;

use crate::board::{Board, Piece, COLS, ROWS};

/// Bytes per line, newline included
const LINE_LEN: usize = 2 + 2 * COLS;
/// Rendered text length without the terminator
pub const RENDER_LEN: usize = LINE_LEN * (ROWS + 1);

/// Rendered board in a fixed buffer with a trailing NUL.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedBoard {
    buf: [u8; RENDER_LEN + 1],
}

impl RenderedBoard {
    /// Text without the terminator
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever written into the buffer
        std::str::from_utf8(&self.buf[..RENDER_LEN]).unwrap_or_default()
    }

    /// The full buffer, ending in a single NUL byte
    pub fn as_bytes_with_nul(&self) -> &[u8; RENDER_LEN + 1] {
        &self.buf
    }
}

impl fmt::Display for RenderedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for RenderedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a board into its fixed-size text form.
pub fn render(board: &Board) -> RenderedBoard {
    let mut buf = [b' '; RENDER_LEN + 1];

    // Header: column letters
    let header = &mut buf[..LINE_LEN];
    for col in 0..COLS {
        header[2 + 2 * col] = b'a' + col as u8;
    }
    header[LINE_LEN - 1] = b'\n';

    for row in 0..ROWS {
        let line = &mut buf[LINE_LEN * (row + 1)..LINE_LEN * (row + 2)];
        line[0] = b'0' + row as u8;
        for col in 0..COLS {
            let code = board.cells()[row * COLS + col];
            line[2 + 2 * col] = Piece::from_code(code).map_or(b'.', |p| p.glyph() as u8);
        }
        line[LINE_LEN - 1] = b'\n';
    }

    buf[RENDER_LEN] = 0;
    RenderedBoard { buf }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(render(self).as_str())
    }
}
