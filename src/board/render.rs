use super::Board;
use super::fen_tables::piece_to_glyph;
use crate::square::Square;

impl Board {
    /// Console diagram, rank 8 at the top:
    ///
    /// ```text
    /// [8] r  n  b  q  k  b  n  r
    /// ...
    /// [1] R  N  B  Q  K  B  N  R
    ///      a  b  c  d  e  f  g  h
    /// ```
    ///
    /// Empty squares print as `-`; white is upper case.
    pub fn render_ascii(&self, flip: bool) -> String {
        let mut out = String::with_capacity(8 * 30 + 32);
        let ranks: Vec<u8> = if flip {
            (0..8).collect()
        } else {
            (0..8).rev().collect()
        };
        let files: Vec<u8> = if flip {
            (0..8).rev().collect()
        } else {
            (0..8).collect()
        };

        for &rank in &ranks {
            out.push_str(&format!("[{}]", rank + 1));
            for &file in &files {
                let glyph = self
                    .piece_at(Square::from_index(rank * 8 + file))
                    .map(|(color, piece)| piece_to_glyph(color, piece))
                    .unwrap_or('-');
                out.push(' ');
                out.push(glyph);
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("   ");
        for &file in &files {
            out.push(' ');
            out.push((b'a' + file) as char);
            out.push(' ');
        }
        out.push('\n');
        out
    }
}
