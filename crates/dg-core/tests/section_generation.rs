use dg_core::dungeon::{Direction, JointKind, SectionGrid};
use dg_core::*;
use proptest::prelude::*;

fn templates() -> Vec<RoomTemplate> {
    vec![
        RoomTemplate::solid("cell", 1, 1).unwrap(),
        RoomTemplate::solid("small", 3, 3).unwrap(),
        RoomTemplate::solid("hall", 6, 4).unwrap(),
    ]
}

fn section_config(size: i32, cols: i32, rows: i32, min_rooms: u32, max_rooms: u32) -> SectionConfig {
    SectionConfig {
        section_size: size,
        sections_x: cols,
        sections_y: rows,
        min_rooms,
        max_rooms,
        extra_corridors: 3,
    }
}

/// Every relay of every section is reachable from the first relay of section (0, 0)
fn all_sections_reachable(layout: &SectionLayout) -> bool {
    let sections = layout.sections.sections();
    let Some(&start) = sections[0].joints(JointKind::Relay).first() else {
        return false;
    };
    let mask = layout.grid.flood_fill(start);
    sections.iter().all(|s| {
        s.joints(JointKind::Relay)
            .iter()
            .all(|p| mask[(p.x + layout.grid.width() * p.y) as usize])
    })
}

fn frame_is_wall(layout: &SectionLayout) -> bool {
    let grid = &layout.grid;
    let (w, h) = (grid.width(), grid.height());
    (0..w).all(|x| grid.get(x, 0) == Ok(Tile::Wall) && grid.get(x, h - 1) == Ok(Tile::Wall))
        && (0..h).all(|y| grid.get(0, y) == Ok(Tile::Wall) && grid.get(w - 1, y) == Ok(Tile::Wall))
}

/// Exits come in facing pairs and never point off the map
fn exits_are_paired(sections: &SectionGrid) -> bool {
    sections.sections().iter().enumerate().all(|(idx, s)| {
        Direction::ALL.into_iter().all(|dir| {
            if !s.has_exit(dir) {
                return true;
            }
            match sections.neighbor(idx, dir).and_then(|n| sections.get(n)) {
                Some(n) => n.has_exit(dir.opposite()),
                None => false,
            }
        })
    })
}

#[test]
fn test_default_sections_connected() {
    let layout = generate_sections(&SectionConfig::default(), templates(), 42).unwrap();

    assert_eq!(layout.grid.width(), 50);
    assert_eq!(layout.grid.height(), 50);
    assert!((5..=10).contains(&layout.rooms_placed));
    assert_eq!(
        layout.sections.sections().iter().filter(|s| s.has_room()).count(),
        layout.rooms_placed
    );
    assert!(all_sections_reachable(&layout));
    assert!(frame_is_wall(&layout));
    assert!(exits_are_paired(&layout.sections));
    assert_eq!(layout.grid.count(Tile::Empty), 0);
}

#[test]
fn test_roomless_sections_get_second_exit() {
    let config = section_config(8, 4, 4, 0, 0);
    let layout = generate_sections(&config, templates(), 8).unwrap();
    assert_eq!(layout.rooms_placed, 0);
    for s in layout.sections.sections() {
        assert!(s.exit_count() >= 2, "section ({}, {})", s.col, s.row);
        assert!(s.connected);
    }
    assert!(all_sections_reachable(&layout));
}

#[test]
fn test_single_section() {
    let layout = generate_sections(&section_config(7, 1, 1, 1, 1), templates(), 1).unwrap();
    assert_eq!(layout.rooms_placed, 1);
    assert_eq!(layout.corridors.total(), 0);
    assert_eq!(layout.sections.sections()[0].exit_count(), 0);
}

#[test]
fn test_section_too_small() {
    let err = generate_sections(&section_config(4, 2, 2, 0, 1), templates(), 1).unwrap_err();
    assert_eq!(err.stage, Stage::Setup);
    assert!(matches!(err.source, GenError::InvalidConfig(_)));
}

#[test]
fn test_rooms_stay_inside_section_margin() {
    let layout = generate_sections(&section_config(10, 3, 3, 9, 9), templates(), 77).unwrap();
    assert_eq!(layout.rooms_placed, 9);
    for s in layout.sections.sections() {
        let room = s.room.as_ref().unwrap();
        let r = s.rect;
        let inner = dg_core::dungeon::Rect::new(r.x0 + 2, r.y0 + 2, r.x1 - 2, r.y1 - 2);
        assert!(inner.contains_rect(&room.bounds));
    }
}

#[test]
fn test_same_seed_same_sections() {
    let config = SectionConfig::default();
    let a = generate_sections(&config, templates(), 5).unwrap();
    let b = generate_sections(&config, templates(), 5).unwrap();
    assert_eq!(a, b);
}

proptest! {
    #[test]
    fn prop_sections_always_connected(
        size in 5i32..14,
        cols in 1i32..7,
        rows in 1i32..7,
        min_rooms in 0u32..6,
        spread in 0u32..6,
        seed in any::<u64>(),
    ) {
        let config = section_config(size, cols, rows, min_rooms, min_rooms + spread);
        let layout = generate_sections(&config, templates(), seed).unwrap();

        prop_assert!(all_sections_reachable(&layout));
        prop_assert!(frame_is_wall(&layout));
        prop_assert!(exits_are_paired(&layout.sections));
        prop_assert!(layout.sections.sections().iter().all(|s| s.connected));
        prop_assert!(layout.rooms_placed <= config.section_count());
    }
}
