use cellgrid::{
    Cell, CellState, Drawable, GridPos, HighlightState, HighlightStyle, MemorySurface, Organism,
    Renderer, RendererConfig, Rgb, Surface, FALLBACK,
};

fn renderer(w: u32, h: u32) -> Renderer<MemorySurface> {
    Renderer::new(MemorySurface::new(w, h), &RendererConfig::default()).expect("renderer")
}

fn pixel(r: &Renderer<MemorySurface>, x: u32, y: u32) -> [u8; 4] {
    r.surface().read_pixel(x, y).expect("pixel in bounds")
}

fn opaque(c: Rgb) -> [u8; 4] {
    [c.r, c.g, c.b, 255]
}

/// Organism laid out as offsets from an origin, like a simulation would keep it
struct Blob {
    origin: (i64, i64),
    parts: Vec<(i64, i64, CellState)>,
    world: (u32, u32),
}

impl Organism for Blob {
    type Part = (i64, i64, CellState);
    type Cell = Cell;

    fn anatomy(&self) -> &[Self::Part] {
        &self.parts
    }

    fn real_cell(&self, &(dx, dy, state): &Self::Part) -> Option<Cell> {
        let x = u32::try_from(self.origin.0 + dx).ok()?;
        let y = u32::try_from(self.origin.1 + dy).ok()?;
        (x < self.world.0 && y < self.world.1).then_some(Cell::new(x, y, state))
    }
}

#[test]
fn full_grid_paints_cells_over_background() {
    let mut r = renderer(4, 4);
    r.clear().unwrap();

    // 4x4 grid of empty cells except a producer at (1, 1); empty cells are
    // left out so the background shows through
    let grid = vec![vec![Cell::new(1, 1, CellState::Producer)]];
    r.render_full_grid(&grid).unwrap();

    let producer = r.colors().resolve(CellState::Producer);
    assert_eq!(pixel(&r, 1, 1), opaque(producer));
    assert_eq!(pixel(&r, 1, 1), [20, 223, 89, 255]);
    for y in 0..4 {
        for x in 0..4 {
            if (x, y) != (1, 1) {
                assert_eq!(pixel(&r, x, y), opaque(r.background()), "({x}, {y})");
            }
        }
    }
}

#[test]
fn full_grid_of_empty_cells_paints_fallback() {
    let mut r = renderer(4, 4);
    r.clear().unwrap();

    let grid: Vec<Vec<Cell>> = (0..4)
        .map(|x| {
            (0..4)
                .map(|y| {
                    let state = if (x, y) == (1, 1) {
                        CellState::Producer
                    } else {
                        CellState::Empty
                    };
                    Cell::new(x, y, state)
                })
                .collect()
        })
        .collect();
    assert_eq!(r.render_full_grid(&grid).unwrap(), 16);

    assert_eq!(pixel(&r, 1, 1), [20, 223, 89, 255]);
    for y in 0..4 {
        for x in 0..4 {
            if (x, y) != (1, 1) {
                assert_eq!(pixel(&r, x, y), opaque(FALLBACK), "({x}, {y})");
            }
        }
    }
}

#[test]
fn state_change_after_request_uses_new_state() {
    let mut r = renderer(4, 4);
    let producer = Cell::new(1, 1, CellState::Producer);
    r.render_full_grid([[producer]]).unwrap();

    // Requested, then eaten in the same tick before either pass runs
    r.highlight_cell(producer);
    let food = Cell::new(1, 1, CellState::Food);
    r.add_to_render(food);

    r.render_cells().unwrap();
    r.render_highlights().unwrap();
    assert_eq!(pixel(&r, 1, 1), opaque(r.colors().highlight(CellState::Food)));
    assert_eq!(pixel(&r, 1, 1), [226, 255, 2, 255]);

    r.clear_all_highlights(false).unwrap();
    assert_eq!(pixel(&r, 1, 1), opaque(r.colors().resolve(CellState::Food)));
    assert_eq!(pixel(&r, 1, 1), [46, 122, 182, 255]);
}

#[test]
fn repeated_add_paints_once_and_empties_queue() {
    let mut r = renderer(4, 4);
    let a = Cell::new(2, 3, CellState::Mouth);
    r.add_to_render(a);
    r.add_to_render(a);
    r.add_to_render(&a);

    let before = r.compositor().paint_count();
    assert_eq!(r.render_cells().unwrap(), 1);
    assert_eq!(r.compositor().paint_count() - before, 1);
    assert_eq!(r.pending_len(), 0);
    assert_eq!(pixel(&r, 2, 3), [222, 176, 76, 255]);
}

#[test]
fn second_render_cells_changes_nothing() {
    let mut r = renderer(4, 4);
    r.add_to_render(Cell::new(0, 0, CellState::Killer));
    r.render_cells().unwrap();
    let frame = r.surface().frame().clone();
    let paints = r.compositor().paint_count();

    assert_eq!(r.render_cells().unwrap(), 0);
    assert_eq!(r.compositor().paint_count(), paints);
    assert_eq!(r.surface().frame(), &frame);
}

#[test]
fn highlight_then_clear_restores_base_colour() {
    let mut r = renderer(4, 4);
    let b = Cell::new(3, 0, CellState::Mover);
    r.add_to_render(b);
    r.render_cells().unwrap();

    r.highlight_cell(b);
    assert_eq!(r.highlight_state(b.pos), HighlightState::Requested);
    assert_eq!(r.render_highlights().unwrap(), 1);
    let highlighted = pixel(&r, 3, 0);
    assert_ne!(highlighted, opaque(r.colors().resolve(b.state)));
    assert_eq!(highlighted, opaque(r.colors().highlight(b.state)));
    assert!(r.is_highlighted(b.pos));

    assert_eq!(r.clear_all_highlights(false).unwrap(), 1);
    assert_eq!(pixel(&r, 3, 0), opaque(r.colors().resolve(b.state)));
    assert_eq!(r.highlighted_cells().count(), 0);
}

#[test]
fn reversibility_holds_for_every_state() {
    let mut r = renderer(CellState::COUNT as u32, 1);
    for (x, state) in CellState::ALL.iter().enumerate() {
        let c = Cell::new(x as u32, 0, *state);
        r.highlight_cell(c);
    }
    r.render_highlights().unwrap();
    r.clear_all_highlights(false).unwrap();
    for (x, state) in CellState::ALL.iter().enumerate() {
        assert_eq!(pixel(&r, x as u32, 0), opaque(r.colors().resolve(*state)));
    }
}

#[test]
fn unknown_state_names_fall_back() {
    let r = renderer(1, 1);
    for name in ["", "lava", "Food", "producer "] {
        assert_eq!(r.colors().resolve_name(name), FALLBACK);
    }
    assert_eq!(FALLBACK, Rgb::BLACK);
}

#[test]
fn organism_highlight_skips_parts_outside_world() {
    let mut r = renderer(3, 3);
    let blob = Blob {
        origin: (0, 0),
        parts: vec![
            (0, 0, CellState::Mouth),
            (1, 0, CellState::Producer),
            (-1, 0, CellState::Eye),
            (0, 5, CellState::Armor),
        ],
        world: (3, 3),
    };
    r.render_organism(&blob).unwrap();
    assert_eq!(pixel(&r, 1, 0), [20, 223, 89, 255]);

    r.highlight_organism(&blob);
    assert_eq!(r.render_highlights().unwrap(), 2);
    assert!(r.is_highlighted(GridPos::new(0, 0)));
    assert!(r.is_highlighted(GridPos::new(1, 0)));
    assert_eq!(r.highlighted_cells().count(), 2);
}

#[test]
fn moving_highlighted_cell_keeps_its_highlight() {
    let mut r = renderer(4, 4);
    let here = Cell::new(1, 1, CellState::Eye);
    r.add_to_render(here);
    r.highlight_cell(here);
    r.render_cells().unwrap();
    r.render_highlights().unwrap();

    // Same position redrawn by the simulation in the next tick
    r.add_to_render(here);
    r.render_cells().unwrap();
    assert_eq!(pixel(&r, 1, 1), opaque(r.colors().resolve(CellState::Eye)));
    r.render_highlights().unwrap();
    assert_eq!(pixel(&r, 1, 1), opaque(r.colors().highlight(CellState::Eye)));
    assert!(r.is_highlighted(here.pos));
}

#[test]
fn blend_style_and_cell_size() {
    let config = RendererConfig::default()
        .with_cell_size(2)
        .with_background(Rgb::BLACK)
        .with_highlight(HighlightStyle::Blend {
            color: Rgb::WHITE,
            alpha: 255,
        });
    let mut r = Renderer::new(MemorySurface::new(4, 4), &config).unwrap();
    let c = Cell::new(1, 1, CellState::Wall);
    r.highlight_cell(c);
    r.render_highlights().unwrap();

    for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
        assert_eq!(pixel(&r, x, y), [255, 255, 255, 255]);
    }
    assert_eq!(pixel(&r, 1, 1), [0, 0, 0, 255]);

    r.clear_all_highlights(false).unwrap();
    assert_eq!(pixel(&r, 3, 3), [128, 128, 128, 255]);
}

#[test]
fn custom_drawable_type() {
    struct Tile {
        col: u32,
        row: u32,
        alive: bool,
    }

    impl Drawable for Tile {
        fn pos(&self) -> GridPos {
            GridPos::new(self.col, self.row)
        }

        fn state(&self) -> CellState {
            if self.alive {
                CellState::Producer
            } else {
                CellState::Empty
            }
        }
    }

    let mut r = renderer(2, 1);
    r.add_to_render(Tile {
        col: 0,
        row: 0,
        alive: true,
    });
    r.add_to_render(Tile {
        col: 1,
        row: 0,
        alive: false,
    });
    assert_eq!(r.render_cells().unwrap(), 2);
    assert_eq!(pixel(&r, 0, 0), [20, 223, 89, 255]);
    assert_eq!(pixel(&r, 1, 0), opaque(FALLBACK));
}
