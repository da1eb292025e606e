//! Level JSON: the on-disk form of a level, loaded and validated up front so
//! the simulation can assume well-formed geometry.
//!
//! A level is authored either as a `grid` of tile codes or as tile-unit
//! `rects` with optional trigger rect lists. Exactly one form must be used.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tp_core::{CollisionRect, LevelLayout, MovementConfig, TileDescriptor};

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    pub tile_size: f32,
    /// Actor spawn box in world pixels.
    pub spawn: CollisionRect,
    #[serde(default)]
    pub grid: Option<Vec<Vec<u8>>>,
    #[serde(default)]
    pub rects: Vec<TileRect>,
    #[serde(default)]
    pub hazards: Vec<TileRect>,
    #[serde(default)]
    pub collectibles: Vec<TileRect>,
    #[serde(default)]
    pub exit: Option<TileRect>,
    #[serde(default)]
    pub physics: MovementConfig,
}

/// Rectangle in tile units.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TileRect {
    fn to_world(self, tile_size: f32) -> CollisionRect {
        CollisionRect::new(
            self.x as f32 * tile_size,
            self.y as f32 * tile_size,
            self.w as f32 * tile_size,
            self.h as f32 * tile_size,
        )
    }
}

/// A level ready to start a session from.
#[derive(Debug, Clone)]
pub struct Level {
    pub id: String,
    pub layout: LevelLayout,
    pub spawn: CollisionRect,
    pub config: MovementConfig,
}

impl LevelFile {
    pub fn into_level(self) -> Result<Level, String> {
        validate_level_file(&self)?;

        let layout = match &self.grid {
            Some(rows) => LevelLayout::from_grid(rows, self.tile_size),
            None => {
                let tiles: Vec<TileDescriptor> = self
                    .rects
                    .iter()
                    .map(|r| TileDescriptor::Rect {
                        x: r.x,
                        y: r.y,
                        w: r.w,
                        h: r.h,
                    })
                    .collect();
                LevelLayout::from_descriptors(&tiles, self.tile_size).map(|mut layout| {
                    let scale = |r: &TileRect| r.to_world(self.tile_size);
                    layout.hazards = self.hazards.iter().map(scale).collect();
                    layout.collectibles = self.collectibles.iter().map(scale).collect();
                    layout.exit = self.exit.as_ref().map(scale);
                    layout
                })
            }
        }
        .map_err(|e| format!("Level '{}': {e}", self.level_id))?;

        Ok(Level {
            id: self.level_id,
            layout,
            spawn: self.spawn,
            config: self.physics,
        })
    }
}

pub fn load_level_from_path(path: &Path) -> Result<Level, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let file: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    let level = file.into_level()?;
    log::info!(
        "Loaded level '{}' from {}: {} solids",
        level.id,
        path.display(),
        level.layout.geometry.len()
    );
    Ok(level)
}

fn validate_level_file(file: &LevelFile) -> Result<(), String> {
    if file.grid.is_some() && !file.rects.is_empty() {
        return Err(format!(
            "Level validation failed: '{}' defines both grid and rects",
            file.level_id
        ));
    }
    if file.grid.is_some()
        && (!file.hazards.is_empty() || !file.collectibles.is_empty() || file.exit.is_some())
    {
        return Err(format!(
            "Level validation failed: '{}' grid levels place triggers with tile codes",
            file.level_id
        ));
    }
    for trigger in file.hazards.iter().chain(&file.collectibles).chain(&file.exit) {
        if trigger.w <= 0 || trigger.h <= 0 {
            return Err(format!(
                "Level validation failed: '{}' trigger {:?} has non-positive size",
                file.level_id, trigger
            ));
        }
    }
    if file.physics.world_width <= 0.0 || file.physics.world_height <= 0.0 {
        return Err(format!(
            "Level validation failed: '{}' world size must be > 0",
            file.level_id
        ));
    }
    Ok(())
}
