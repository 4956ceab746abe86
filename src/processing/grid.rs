//! Grid tile geometry.

use serde::Serialize;

/// Half-open pixel rectangle `[left, right) × [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// One tile of the grid with its 1-based, row-major ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub ordinal: u32,
    pub rect: Rect,
}

/// Splits an image into `across × high` equal tiles in row-major order.
///
/// Tile size uses integer division; a right or bottom remainder strip that
/// does not divide evenly is dropped. `across` and `high` must be at least 1.
pub fn tiles(image_width: u32, image_height: u32, across: u32, high: u32) -> Vec<Tile> {
    let tile_width = image_width / across;
    let tile_height = image_height / high;

    (0..high)
        .flat_map(|row| (0..across).map(move |col| (row, col)))
        .zip(1..)
        .map(|((row, col), ordinal)| Tile {
            ordinal,
            rect: Rect {
                left: col * tile_width,
                top: row * tile_height,
                right: (col + 1) * tile_width,
                bottom: (row + 1) * tile_height,
            },
        })
        .collect()
}
