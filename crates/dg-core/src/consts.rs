//! Layout constants shared by the generators

/// Cells around the whole map that are always painted as walls
pub const MAP_BORDER: i32 = 2;

/// Space added to the smallest template to get the minimum area extent
pub const AREA_BORDER_SPACE: i32 = 2;

/// Free cells kept between a placed room and its area's edge
pub const ROOM_BLANK_SPACE: i32 = 1;

/// Free cells kept between a room (or relay) and a section's edge
pub const SECTION_ROOM_SPACE: i32 = 2;

/// Smallest section edge that still leaves room for a 1x1 room and a relay
pub const MIN_SECTION_SIZE: i32 = 2 * SECTION_ROOM_SPACE + 1;
