//! Console rendering of board snapshots.

use wator_core::{CellContent, Position, Snapshot};

/// Draw a snapshot in pipe-separated form, one board row per line:
///
/// ```text
/// |o| |x|
/// | |o| |
/// ```
///
/// `o` is prey, `x` is a predator, a space is an empty cell.
pub fn draw(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    for y in 0..snapshot.height {
        out.push('|');
        for x in 0..snapshot.width {
            let symbol = match snapshot.get(Position::new(x, y)) {
                CellContent::Empty => ' ',
                CellContent::Prey => 'o',
                CellContent::Predator => 'x',
            };
            out.push(symbol);
            out.push('|');
        }
        out.push('\n');
    }

    out
}
