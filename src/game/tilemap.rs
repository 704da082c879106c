use crate::engine::physics::{body::presets, ColliderHandle, PhysicsWorld};
use glam::{IVec2, Vec2};
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur while loading a map
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Map has no rows")]
    Empty,

    #[error("Unknown glyph '{glyph}' at row {row}, column {column}")]
    UnknownGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },
}

/// Solid-tile lookup used by the character's movement probes
pub trait TileQuery {
    /// Whether the character-convention cell containing `point` is solid
    fn is_solid_at(&self, point: Vec2) -> bool;
}

/// Grid of solid tiles, one world unit per cell
///
/// Cell (x, y) covers the world square [x, x+1) x [y, y+1), with y
/// growing upward. Two cell conventions are in play: contact points
/// floor both axes, while the character's own probes round x and floor
/// y so the probe tracks the sprite's center column.
pub struct TileMap {
    solid: HashSet<IVec2>,
    width: i32,
    height: i32,
}

impl TileMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            solid: HashSet::new(),
            width: 0,
            height: 0,
        }
    }

    /// Parse a map from glyph rows, listed top to bottom
    ///
    /// '#' marks a solid tile, '.' and ' ' are open air.
    pub fn from_rows(rows: &[&str]) -> Result<Self, MapError> {
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let height = rows.len() as i32;
        let mut width = 0;
        let mut solid = HashSet::new();

        for (row, line) in rows.iter().enumerate() {
            width = width.max(line.chars().count() as i32);
            for (column, glyph) in line.chars().enumerate() {
                match glyph {
                    '#' => {
                        // Row 0 is the top of the map
                        let y = height - 1 - row as i32;
                        solid.insert(IVec2::new(column as i32, y));
                    }
                    '.' | ' ' => {}
                    _ => {
                        return Err(MapError::UnknownGlyph { glyph, row, column });
                    }
                }
            }
        }

        log::info!(
            "Loaded map: {}x{} cells, {} solid",
            width,
            height,
            solid.len()
        );

        Ok(Self {
            solid,
            width,
            height,
        })
    }

    /// Map width in cells
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Map height in cells
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Mark a single cell as solid
    pub fn insert_solid(&mut self, cell: IVec2) {
        self.width = self.width.max(cell.x + 1);
        self.height = self.height.max(cell.y + 1);
        self.solid.insert(cell);
    }

    /// Whether a cell is solid
    pub fn is_solid(&self, cell: IVec2) -> bool {
        self.solid.contains(&cell)
    }

    /// Cell containing a world point (floor on both axes)
    pub fn world_to_cell(point: Vec2) -> IVec2 {
        IVec2::new(point.x.floor() as i32, point.y.floor() as i32)
    }

    /// Cell the character considers itself in (round x, floor y)
    pub fn probe_cell(point: Vec2) -> IVec2 {
        IVec2::new(point.x.round() as i32, point.y.floor() as i32)
    }

    /// Build fixed physics bodies for the solid tiles
    ///
    /// Horizontal runs are merged into single cuboids so a floor strip
    /// becomes one collider instead of one per cell. Returns the
    /// collider handles so callers can tag them for event routing.
    pub fn populate_physics(&self, physics: &mut PhysicsWorld) -> Vec<ColliderHandle> {
        let mut handles = Vec::new();

        for y in 0..self.height {
            let mut x = 0;
            while x < self.width {
                if !self.is_solid(IVec2::new(x, y)) {
                    x += 1;
                    continue;
                }

                // Extend the run as far as it stays solid
                let start = x;
                while x < self.width && self.is_solid(IVec2::new(x, y)) {
                    x += 1;
                }
                let run = (x - start) as f32;

                let center_x = start as f32 + run / 2.0;
                let center_y = y as f32 + 0.5;

                let body = physics.add_rigid_body(presets::terrain_body(center_x, center_y));
                handles.push(physics.add_collider(presets::terrain_collider(run, 1.0), body));
            }
        }

        log::info!("Populated physics with {} terrain colliders", handles.len());
        handles
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TileQuery for TileMap {
    fn is_solid_at(&self, point: Vec2) -> bool {
        self.is_solid(Self::probe_cell(point))
    }
}
