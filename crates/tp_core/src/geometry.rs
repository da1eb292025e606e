//! Static level geometry: the solid rectangles an actor collides against.
//!
//! Levels are authored in tile units, either as explicit rectangles or as a
//! grid of tile codes. Both forms are resolved once, at load time, into a flat
//! list of world-pixel rectangles. Trigger tiles (hazards, collectibles, the
//! exit door) are kept apart from the solid geometry so the collision resolver
//! never sees them.

use serde::Deserialize;

use crate::error::LevelError;

/// Axis-aligned rectangle in world pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CollisionRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CollisionRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect,
    /// which is what lets an actor rest exactly on a platform.
    #[inline]
    pub fn intersects(&self, other: &CollisionRect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// What an authored grid cell means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Empty,
    Ground,
    Platform,
    Hazard,
    Collectible,
    Exit,
}

impl TileKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Ground),
            2 => Some(Self::Platform),
            3 => Some(Self::Hazard),
            4 => Some(Self::Collectible),
            5 => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn is_solid(self) -> bool {
        matches!(self, Self::Ground | Self::Platform)
    }
}

/// One authored piece of level layout, in tile units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileDescriptor {
    /// Explicit solid block, `w` by `h` tiles with its top-left at (`x`, `y`).
    Rect { x: i32, y: i32, w: i32, h: i32 },
    /// A single grid cell of the given kind.
    Cell {
        col: usize,
        row: usize,
        kind: TileKind,
    },
}

/// Immutable set of solid rectangles for one level.
///
/// Iteration order is build order. It only matters when an actor overlaps
/// several rectangles in the same pass and the resolver runs with
/// [`ContactPolicy::LastMatch`](crate::collision::ContactPolicy::LastMatch).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelGeometry {
    rects: Vec<CollisionRect>,
}

impl LevelGeometry {
    pub fn from_rects(rects: Vec<CollisionRect>) -> Self {
        Self { rects }
    }

    pub fn build(tiles: &[TileDescriptor], tile_size: f32) -> Result<Self, LevelError> {
        validate_tile_size(tile_size)?;

        let mut rects = Vec::with_capacity(tiles.len());
        for (i, tile) in tiles.iter().enumerate() {
            match *tile {
                TileDescriptor::Rect { x, y, w, h } => {
                    if w <= 0 || h <= 0 {
                        return Err(LevelError::malformed(format!(
                            "tile {i}: rectangle extent must be positive, got {w}x{h}"
                        )));
                    }
                    rects.push(CollisionRect::new(
                        x as f32 * tile_size,
                        y as f32 * tile_size,
                        w as f32 * tile_size,
                        h as f32 * tile_size,
                    ));
                }
                TileDescriptor::Cell { col, row, kind } => {
                    if kind.is_solid() {
                        rects.push(cell_rect(col, row, tile_size));
                    }
                }
            }
        }

        Ok(Self { rects })
    }

    pub fn rects(&self) -> &[CollisionRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn overlaps(&self, bounds: &CollisionRect) -> bool {
        self.rects.iter().any(|r| r.intersects(bounds))
    }
}

/// Everything a level grid produces: solid geometry plus trigger rectangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelLayout {
    pub geometry: LevelGeometry,
    pub hazards: Vec<CollisionRect>,
    pub collectibles: Vec<CollisionRect>,
    pub exit: Option<CollisionRect>,
    pub tile_size: f32,
}

impl LevelLayout {
    /// Builds a layout from rows of tile codes. Every row must be as long as the
    /// first one and every code must name a known [`TileKind`]; otherwise nothing
    /// is built.
    pub fn from_grid(rows: &[Vec<u8>], tile_size: f32) -> Result<Self, LevelError> {
        validate_tile_size(tile_size)?;

        let expected = rows.first().map(Vec::len).unwrap_or(0);
        let mut cells = Vec::new();
        for (row, codes) in rows.iter().enumerate() {
            if codes.len() != expected {
                return Err(LevelError::malformed(format!(
                    "row {row} has {} cells, expected {expected}",
                    codes.len()
                )));
            }
            for (col, &code) in codes.iter().enumerate() {
                let kind = TileKind::from_code(code).ok_or_else(|| {
                    LevelError::malformed(format!(
                        "invalid tile code {code} at row {row}, column {col}"
                    ))
                })?;
                if kind != TileKind::Empty {
                    cells.push(TileDescriptor::Cell { col, row, kind });
                }
            }
        }

        let layout = Self::from_descriptors(&cells, tile_size)?;
        log::debug!(
            "Built level grid {}x{}: {} solids, {} hazards, {} collectibles",
            expected,
            rows.len(),
            layout.geometry.len(),
            layout.hazards.len(),
            layout.collectibles.len()
        );
        Ok(layout)
    }

    /// Sorts descriptors into solid geometry and trigger lists.
    pub fn from_descriptors(tiles: &[TileDescriptor], tile_size: f32) -> Result<Self, LevelError> {
        let geometry = LevelGeometry::build(tiles, tile_size)?;
        let mut hazards = Vec::new();
        let mut collectibles = Vec::new();
        let mut exit = None;

        for tile in tiles {
            let TileDescriptor::Cell { col, row, kind } = *tile else {
                continue;
            };
            let rect = cell_rect(col, row, tile_size);
            match kind {
                TileKind::Hazard => hazards.push(rect),
                TileKind::Collectible => collectibles.push(rect),
                TileKind::Exit => {
                    if exit.replace(rect).is_some() {
                        return Err(LevelError::malformed(format!(
                            "second exit tile at row {row}, column {col}"
                        )));
                    }
                }
                TileKind::Empty | TileKind::Ground | TileKind::Platform => {}
            }
        }

        Ok(Self {
            geometry,
            hazards,
            collectibles,
            exit,
            tile_size,
        })
    }
}

fn cell_rect(col: usize, row: usize, tile_size: f32) -> CollisionRect {
    CollisionRect::new(
        col as f32 * tile_size,
        row as f32 * tile_size,
        tile_size,
        tile_size,
    )
}

fn validate_tile_size(tile_size: f32) -> Result<(), LevelError> {
    if !(tile_size.is_finite() && tile_size > 0.0) {
        return Err(LevelError::malformed(format!(
            "tile size must be > 0, got {tile_size}"
        )));
    }
    Ok(())
}
