use dg_core::dungeon::{Area, Grid, Partitioner, Pos, Rect};
use dg_core::*;
use proptest::prelude::*;

fn solid(name: &str, w: i32, h: i32) -> RoomTemplate {
    RoomTemplate::solid(name, w, h).unwrap()
}

fn area_config(width: i32, height: i32, split_count: u32) -> AreaConfig {
    AreaConfig {
        width,
        height,
        split_count,
        extra_corridors: 0,
    }
}

fn reached(grid: &Grid, mask: &[bool], p: Pos) -> bool {
    mask[(p.x + grid.width() * p.y) as usize]
}

fn border_is_wall(grid: &Grid) -> bool {
    (0..grid.height()).all(|y| {
        (0..grid.width()).all(|x| {
            let inside = x >= MAP_BORDER
                && y >= MAP_BORDER
                && x < grid.width() - MAP_BORDER
                && y < grid.height() - MAP_BORDER;
            inside || grid.get(x, y) == Ok(Tile::Wall)
        })
    })
}

#[test]
fn test_four_areas_with_one_room_each() {
    let config = area_config(40, 40, 3);
    let layout = generate_areas(&config, vec![solid("block", 5, 5)], 1234).unwrap();

    assert_eq!(layout.partition.performed, 3);
    assert!(!layout.partition.exhausted);
    assert_eq!(layout.areas.len(), 4);

    for area in &layout.areas {
        let room = area.room.as_ref().unwrap();
        assert_eq!((room.bounds.width(), room.bounds.height()), (5, 5));
        assert!(area.rect.contains_rect(&room.bounds));
        assert!(room.bounds.cells().all(|p| layout.grid.get_pos(p) == Ok(Tile::Ground)));
    }

    let start = layout.areas[0].relay.unwrap();
    let mask = layout.grid.flood_fill(start);
    for area in &layout.areas {
        assert!(reached(&layout.grid, &mask, area.relay.unwrap()));
    }
}

#[test]
fn test_no_split_single_room() {
    let layout = generate_areas(&area_config(20, 20, 0), vec![solid("block", 5, 5)], 7).unwrap();

    assert_eq!(layout.areas.len(), 1);
    assert_eq!(layout.partition.performed, 0);
    assert_eq!(layout.areas[0].rect, Rect::new(2, 2, 18, 18));
    assert_eq!(layout.corridors.total(), 0);
    assert!(border_is_wall(&layout.grid));
    // only the room is walkable
    assert_eq!(layout.grid.count(Tile::Ground), 25);
}

#[test]
fn test_oversized_template_fails_placement() {
    let err = generate_areas(&area_config(10, 10, 0), vec![solid("huge", 9, 9)], 0).unwrap_err();

    assert_eq!(err.stage, Stage::Placement);
    assert_eq!(
        err.source,
        GenError::NoFittingTemplate {
            width: 4,
            height: 4
        }
    );
    assert_eq!(
        err.to_string(),
        "placement failed for area 0: no room template fits into a 4x4 interior"
    );
}

#[test]
fn test_partition_stops_when_map_is_too_small() {
    let layout = generate_areas(&area_config(20, 20, 10), vec![solid("block", 5, 5)], 3).unwrap();
    assert!(layout.partition.exhausted);
    assert_eq!(layout.areas.len() as u32, layout.partition.performed + 1);
}

#[test]
fn test_same_seed_same_layout() {
    let config = AreaConfig::default();
    let templates = || vec![solid("small", 4, 3), solid("mid", 6, 5), solid("big", 9, 7)];
    let a = generate_areas(&config, templates(), 99).unwrap();
    let b = generate_areas(&config, templates(), 99).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_ascii(), b.to_ascii());
}

#[test]
fn test_generator_reuses_catalog() {
    let catalog = TemplateCatalog::new(vec![solid("block", 4, 4)]).unwrap();
    let mut generator = DungeonGenerator::new(catalog, 5);
    let first = generator.generate_areas(&AreaConfig::default()).unwrap();
    let second = generator.generate_areas(&AreaConfig::default()).unwrap();
    assert_eq!(first.seed, second.seed);
    assert_eq!(first.grid.width(), second.grid.width());
}

#[test]
fn test_layout_serializes() {
    let layout = generate_areas(&area_config(30, 30, 1), vec![solid("block", 4, 4)], 2).unwrap();
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["seed"], 2);
    assert_eq!(json["areas"].as_array().unwrap().len(), layout.areas.len());
    assert_eq!(json["grid"]["width"], 30);
}

proptest! {
    #[test]
    fn prop_split_conserves_cells(
        w in 7i32..80,
        h in 7i32..80,
        tw in 1i32..6,
        th in 1i32..6,
        seed in any::<u64>(),
    ) {
        let partitioner = Partitioner::new(&solid("min", tw, th));
        let parent = Rect::with_size(2, 2, w, h);
        let mut grid = Grid::new(w + 4, h + 4).unwrap();
        let mut rng = GenRng::new(seed);
        let mut area = Area::new(parent);

        match partitioner.split(&mut area, &mut grid, &mut rng).unwrap() {
            Some(other) => {
                prop_assert!(!area.rect.intersects(&other.rect));
                prop_assert!(parent.contains_rect(&area.rect));
                prop_assert!(parent.contains_rect(&other.rect));
                let divider = grid.count(Tile::Wall) as i64;
                prop_assert_eq!(area.rect.area() + other.rect.area() + divider, parent.area());
                let (min_w, min_h) = partitioner.min_area_size();
                for r in [area.rect, other.rect] {
                    prop_assert!(r.width() >= min_w && r.height() >= min_h);
                }
            }
            None => {
                prop_assert!(!partitioner.can_split(&parent));
                prop_assert_eq!(area.rect, parent);
            }
        }
    }

    #[test]
    fn prop_area_maps_are_walled_and_connected(
        width in 24i32..90,
        height in 24i32..90,
        split_count in 0u32..10,
        extra_corridors in 0u32..4,
        seed in any::<u64>(),
    ) {
        let config = AreaConfig { width, height, split_count, extra_corridors };
        let templates = vec![solid("small", 3, 3), solid("wide", 6, 4), solid("tall", 4, 7)];
        let layout = generate_areas(&config, templates, seed).unwrap();

        prop_assert!(border_is_wall(&layout.grid));
        prop_assert_eq!(layout.grid.count(Tile::Empty), 0);
        prop_assert_eq!(layout.areas.len() as u32, layout.partition.performed + 1);

        for (i, a) in layout.areas.iter().enumerate() {
            for b in &layout.areas[i + 1..] {
                prop_assert!(!a.rect.intersects(&b.rect));
            }
        }

        let start = layout.areas[0].relay.unwrap();
        let mask = layout.grid.flood_fill(start);
        for area in &layout.areas {
            prop_assert!(reached(&layout.grid, &mask, area.relay.unwrap()));
        }
    }

    #[test]
    fn prop_same_seed_is_bit_identical(seed in any::<u64>(), split_count in 0u32..8) {
        let config = AreaConfig { split_count, ..Default::default() };
        let templates = || vec![solid("small", 3, 3), solid("big", 8, 6)];
        let a = generate_areas(&config, templates(), seed).unwrap();
        let b = generate_areas(&config, templates(), seed).unwrap();
        prop_assert_eq!(a.grid.tiles(), b.grid.tiles());
    }
}
