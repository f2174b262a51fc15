//! Generator configuration
//!
//! Both configs deserialize with defaults for missing fields, so a config
//! file only has to name what it changes.

use serde::{Deserialize, Serialize};

use crate::consts::{MAP_BORDER, MIN_SECTION_SIZE};
use crate::error::{GenError, GenResult};

/// Settings for the area (recursive split) generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Map width in tiles
    pub width: i32,
    /// Map height in tiles
    pub height: i32,
    /// Number of splits requested; fewer may happen
    pub split_count: u32,
    /// Redundant corridors added after everything is connected
    pub extra_corridors: u32,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            split_count: 6,
            extra_corridors: 1,
        }
    }
}

impl AreaConfig {
    /// Check dimensions before any work is done
    ///
    /// The map must leave at least one cell inside the fixed border.
    pub fn validate(&self) -> GenResult<()> {
        if self.width <= 2 * MAP_BORDER
            || self.height <= 2 * MAP_BORDER
            || self.width.checked_mul(self.height).is_none()
        {
            return Err(GenError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Settings for the section (uniform grid) generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Edge length of one square section, in tiles
    pub section_size: i32,
    /// Sections along x
    pub sections_x: i32,
    /// Sections along y
    pub sections_y: i32,
    /// Fewest sections that receive a room
    pub min_rooms: u32,
    /// Most sections that receive a room
    pub max_rooms: u32,
    /// Redundant corridors added after everything is connected
    pub extra_corridors: u32,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            section_size: 10,
            sections_x: 5,
            sections_y: 5,
            min_rooms: 5,
            max_rooms: 10,
            extra_corridors: 5,
        }
    }
}

impl SectionConfig {
    pub fn validate(&self) -> GenResult<()> {
        if self.sections_x <= 0 || self.sections_y <= 0 {
            return Err(GenError::InvalidSize {
                width: self.sections_x,
                height: self.sections_y,
            });
        }
        if self.section_size < MIN_SECTION_SIZE {
            return Err(GenError::InvalidConfig(format!(
                "section size {} is below the minimum of {}",
                self.section_size, MIN_SECTION_SIZE
            )));
        }
        let Some((width, height)) = self.checked_map_size() else {
            return Err(GenError::InvalidConfig(format!(
                "{}x{} sections of size {} exceed the largest supported map",
                self.sections_x, self.sections_y, self.section_size
            )));
        };
        if width.checked_mul(height).is_none() {
            return Err(GenError::InvalidSize { width, height });
        }
        if self.max_rooms > i32::MAX as u32 {
            return Err(GenError::InvalidConfig(format!(
                "max_rooms ({}) is out of range",
                self.max_rooms
            )));
        }
        if self.min_rooms > self.max_rooms {
            return Err(GenError::InvalidConfig(format!(
                "min_rooms ({}) is greater than max_rooms ({})",
                self.min_rooms, self.max_rooms
            )));
        }
        Ok(())
    }

    /// Total number of sections
    pub fn section_count(&self) -> usize {
        (self.sections_x.max(0) as usize) * (self.sections_y.max(0) as usize)
    }

    /// Map size in tiles
    ///
    /// Saturates on a config that fails `validate`.
    pub fn map_size(&self) -> (i32, i32) {
        (
            self.sections_x.saturating_mul(self.section_size),
            self.sections_y.saturating_mul(self.section_size),
        )
    }

    fn checked_map_size(&self) -> Option<(i32, i32)> {
        Some((
            self.sections_x.checked_mul(self.section_size)?,
            self.sections_y.checked_mul(self.section_size)?,
        ))
    }
}
