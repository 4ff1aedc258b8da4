//! Board: the scaled terrain grid with area property queries.

use glam::IVec2;
use tracing::debug;

use tankfield_core::constants::*;
use tankfield_core::enums::{BlockProps, BlockType, EnemyVariant};
use tankfield_core::error::MapError;
use tankfield_core::types::{scale_point, Rect};

use crate::supplier::MapSupplier;

/// Scaled positions are clamped to this distance from the origin. Anything
/// beyond is off the board either way.
const POSITION_LIMIT: i32 = MAX_BOARD_EXTENT * 4;

/// Supplier-space point to board cells.
fn to_cells(p: IVec2) -> IVec2 {
    scale_point(p, SUB_DIVISION).clamp(IVec2::splat(-POSITION_LIMIT), IVec2::splat(POSITION_LIMIT))
}

/// Loaded terrain grid plus the spawn layout read from the supplier.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// Extent in cells.
    size: IVec2,
    /// Block type per cell, row-major.
    cells: Vec<BlockType>,
    objective_position: IVec2,
    enemy_starts: Vec<IVec2>,
    friendly_starts: Vec<IVec2>,
    initial_enemy_tanks: Vec<EnemyVariant>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the board with the supplier's map.
    ///
    /// Placements are scaled by [`SUB_DIVISION`] and clipped to the board;
    /// placements that clip to nothing are dropped. The objective and every
    /// start position then get a clearing, and the objective a breakable frame.
    pub fn load(&mut self, supplier: &mut dyn MapSupplier) -> Result<(), MapError> {
        supplier.open()?;

        let dims = supplier.dimensions();
        if dims.x <= 0 || dims.y <= 0 {
            return Err(MapError::InvalidDimensions {
                width: dims.x,
                height: dims.y,
            });
        }

        self.size = scale_point(dims, SUB_DIVISION).min(IVec2::splat(MAX_BOARD_EXTENT));
        self.cells = vec![BlockType::Nothing; (self.size.x * self.size.y) as usize];
        self.enemy_starts.clear();
        self.friendly_starts.clear();

        let bounds = self.bounds();
        let mut applied = 0usize;
        let mut dropped = 0usize;
        while let Some(placement) = supplier.next_placement() {
            let cropped = placement.rect.scaled(SUB_DIVISION).intersection(&bounds);
            if cropped.is_empty() {
                dropped += 1;
                continue;
            }
            self.fill(placement.block, &cropped);
            applied += 1;
        }

        self.objective_position = to_cells(supplier.objective_position());
        self.set_area(
            BlockType::Nothing,
            &Rect::from_origin_size(self.objective_position, IVec2::splat(OBJECTIVE_SIZE)),
        );
        self.stamp_objective_frame(BlockType::Brick);

        self.initial_enemy_tanks = supplier.enemy_composition();
        for p in supplier.enemy_start_positions() {
            let start = to_cells(p);
            self.enemy_starts.push(start);
            self.clear_spawn(start);
        }
        for p in supplier.friendly_start_positions() {
            let start = to_cells(p);
            self.friendly_starts.push(start);
            self.clear_spawn(start);
        }

        debug!(
            width = self.size.x,
            height = self.size.y,
            applied,
            dropped,
            enemies = self.initial_enemy_tanks.len(),
            "map loaded"
        );
        Ok(())
    }

    /// Overwrite every in-bounds cell of `area` with `block`.
    /// Returns the clipped area, empty when nothing was written.
    pub fn set_area(&mut self, block: BlockType, area: &Rect) -> Rect {
        let clipped = self.bounds().intersection(area);
        if !clipped.is_empty() {
            self.fill(block, &clipped);
        }
        clipped
    }

    /// OR of the properties of every cell under `rect`.
    ///
    /// A rect that is not entirely on the board reports a bare tank obstacle:
    /// the board edge blocks movement but is never destructible.
    pub fn area_properties(&self, rect: &Rect) -> BlockProps {
        if !self.bounds().contains_rect(rect) {
            return BlockProps::TANK_OBSTACLE;
        }
        rect.cells()
            .fold(BlockProps::NONE, |acc, p| acc | self.block_properties(p))
    }

    /// Properties of one cell; off-board cells have none.
    pub fn block_properties(&self, p: IVec2) -> BlockProps {
        self.cell(p).map(BlockType::properties).unwrap_or_default()
    }

    pub fn cell(&self, p: IVec2) -> Option<BlockType> {
        self.index(p).map(|i| self.cells[i])
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(IVec2::ZERO, self.size)
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn sub_division(&self) -> i32 {
        SUB_DIVISION
    }

    pub fn objective_position(&self) -> IVec2 {
        self.objective_position
    }

    pub fn enemy_start_positions(&self) -> &[IVec2] {
        &self.enemy_starts
    }

    pub fn friendly_start_positions(&self) -> &[IVec2] {
        &self.friendly_starts
    }

    pub fn initial_enemy_tanks(&self) -> &[EnemyVariant] {
        &self.initial_enemy_tanks
    }

    /// One glyph per cell, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.size.x + 1) * self.size.y) as usize);
        for row in self.cells.chunks(self.size.x.max(1) as usize) {
            out.extend(row.iter().map(|b| b.glyph()));
            out.push('\n');
        }
        out
    }

    fn index(&self, p: IVec2) -> Option<usize> {
        if !self.bounds().contains_point(p) {
            return None;
        }
        Some((p.y * self.size.x + p.x) as usize)
    }

    /// Write `block` into an already clipped area.
    fn fill(&mut self, block: BlockType, clipped: &Rect) {
        let width = self.size.x as usize;
        let mut start = (clipped.top() * self.size.x + clipped.left()) as usize;
        for _ in 0..clipped.height() {
            self.cells[start..start + clipped.width() as usize].fill(block);
            start += width;
        }
    }

    fn clear_spawn(&mut self, start: IVec2) {
        self.set_area(
            BlockType::Nothing,
            &Rect::from_origin_size(start, IVec2::splat(SPAWN_CLEARING)),
        );
    }

    /// Four walls around the objective clearing.
    fn stamp_objective_frame(&mut self, block: BlockType) {
        let margin = (OBJECTIVE_FRAME_SIZE - OBJECTIVE_SIZE) / 2;
        let tl = self.objective_position - IVec2::splat(margin);
        let (side, wall) = (OBJECTIVE_FRAME_SIZE, OBJECTIVE_FRAME_THICKNESS);
        let far = side - wall;
        self.set_area(block, &Rect::new(tl.x, tl.y, wall, side));
        self.set_area(block, &Rect::new(tl.x, tl.y, side, wall));
        self.set_area(block, &Rect::new(tl.x, tl.y + far, side, wall));
        self.set_area(block, &Rect::new(tl.x + far, tl.y, wall, side));
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::supplier::{MapDocument, MemorySupplier, Placement};

    /// 50×50 map with the objective tucked into the bottom-right corner.
    fn make_document(placements: Vec<Placement>) -> MapDocument {
        MapDocument {
            size: IVec2::new(50, 50),
            objective: IVec2::new(46, 46),
            placements,
            ..Default::default()
        }
    }

    fn load(document: MapDocument) -> Board {
        let mut board = Board::new();
        board
            .load(&mut MemorySupplier::new(document))
            .expect("memory supplier always opens");
        board
    }

    /// Cells touched by the objective clearing and frame.
    fn objective_zone(board: &Board) -> Rect {
        let margin = (OBJECTIVE_FRAME_SIZE - OBJECTIVE_SIZE) / 2;
        Rect::from_origin_size(
            board.objective_position() - IVec2::splat(margin),
            IVec2::splat(OBJECTIVE_FRAME_SIZE),
        )
    }

    #[test]
    fn test_scaled_brick_placement() {
        let board = load(make_document(vec![Placement {
            rect: Rect::new(0, 0, 4, 20),
            block: BlockType::Brick,
        }]));

        assert_eq!(board.size(), IVec2::new(100, 100));
        let brick = Rect::new(0, 0, 8, 40);
        let zone = objective_zone(&board);
        for p in board.bounds().cells() {
            let cell = board.cell(p).unwrap();
            if brick.contains_point(p) {
                assert_eq!(cell, BlockType::Brick, "cell {p} should be brick");
            } else if !zone.contains_point(p) {
                assert_eq!(cell, BlockType::Nothing, "cell {p} should be empty");
            }
        }
        assert_eq!(board.cell(IVec2::new(7, 39)), Some(BlockType::Brick));
        assert_eq!(board.cell(IVec2::new(8, 39)), Some(BlockType::Nothing));
        assert_eq!(board.cell(IVec2::new(7, 40)), Some(BlockType::Nothing));
    }

    #[test]
    fn test_objective_clearing_and_frame() {
        let board = load(make_document(vec![Placement {
            rect: Rect::new(40, 40, 10, 10),
            block: BlockType::Water,
        }]));
        let objective = board.objective_position();
        assert_eq!(objective, IVec2::new(92, 92));

        let clearing = Rect::from_origin_size(objective, IVec2::splat(OBJECTIVE_SIZE));
        assert!(clearing
            .cells()
            .all(|p| board.cell(p) == Some(BlockType::Nothing)));

        let tl = objective - IVec2::splat(2);
        assert_eq!(board.cell(tl), Some(BlockType::Brick));
        assert_eq!(board.cell(tl + IVec2::new(7, 1)), Some(BlockType::Brick));
        assert_eq!(board.cell(tl + IVec2::new(1, 7)), Some(BlockType::Brick));
        // Outside the frame the water stays.
        assert_eq!(board.cell(tl - IVec2::ONE), Some(BlockType::Water));
    }

    #[test]
    fn test_start_positions_are_cleared() {
        let mut doc = make_document(vec![Placement {
            rect: Rect::new(0, 0, 50, 10),
            block: BlockType::Concrete,
        }]);
        doc.enemy_starts = vec![IVec2::new(0, 0), IVec2::new(48, 0)];
        doc.friendly_starts = vec![IVec2::new(20, 4)];
        let board = load(doc);

        assert_eq!(board.enemy_start_positions(), &[IVec2::new(0, 0), IVec2::new(96, 0)]);
        for start in board
            .enemy_start_positions()
            .iter()
            .chain(board.friendly_start_positions())
        {
            let tank = Rect::from_origin_size(*start, IVec2::splat(TANK_SIZE));
            assert!(board.area_properties(&tank).is_empty());
        }
        assert_eq!(board.cell(IVec2::new(4, 0)), Some(BlockType::Concrete));
    }

    #[test]
    fn test_placements_clip_to_board_and_empty_ones_drop() {
        let board = load(make_document(vec![
            Placement {
                rect: Rect::new(48, 0, 10, 2),
                block: BlockType::Ice,
            },
            Placement {
                rect: Rect::new(-10, -10, 3, 3),
                block: BlockType::Brick,
            },
        ]));
        assert_eq!(board.cell(IVec2::new(99, 0)), Some(BlockType::Ice));
        assert_eq!(board.cell(IVec2::new(96, 3)), Some(BlockType::Ice));
        assert_eq!(board.cell(IVec2::new(95, 0)), Some(BlockType::Nothing));
        assert_eq!(board.cell(IVec2::new(0, 0)), Some(BlockType::Nothing));
    }

    #[test]
    fn test_board_extent_is_clamped() {
        let mut doc = make_document(Vec::new());
        doc.size = IVec2::new(600, 40);
        let board = load(doc);
        assert_eq!(board.size(), IVec2::new(MAX_BOARD_EXTENT, 80));
    }

    #[test]
    fn test_huge_coordinates_clamp_instead_of_overflowing() {
        let mut doc = make_document(vec![
            Placement {
                rect: Rect::new(1_500_000_000, 0, 1, 1),
                block: BlockType::Brick,
            },
            Placement {
                rect: Rect::new(-2_000_000_000, 3, 2_000_000_000, 1),
                block: BlockType::Water,
            },
            Placement {
                rect: Rect::new(2, 2, 1, 1),
                block: BlockType::Concrete,
            },
        ]);
        doc.size = IVec2::new(1_500_000_000, 10);
        doc.objective = IVec2::new(i32::MAX, i32::MIN);
        doc.enemy_starts = vec![IVec2::new(i32::MIN, i32::MAX)];
        doc.friendly_starts = vec![IVec2::new(i32::MAX, 5)];
        let board = load(doc);

        assert_eq!(board.size(), IVec2::new(MAX_BOARD_EXTENT, 20));
        assert!(!board.bounds().contains_point(board.objective_position()));
        assert!(!board.bounds().contains_point(board.enemy_start_positions()[0]));
        assert!(!board.bounds().contains_point(board.friendly_start_positions()[0]));
        assert_eq!(board.cell(IVec2::new(4, 4)), Some(BlockType::Concrete));
        let bricks = board
            .bounds()
            .cells()
            .filter(|p| board.cell(*p) == Some(BlockType::Brick))
            .count();
        assert_eq!(bricks, 0);
    }

    #[test]
    fn test_invalid_dimensions_fail() {
        let mut doc = make_document(Vec::new());
        doc.size = IVec2::new(0, 10);
        let mut board = Board::new();
        let err = board.load(&mut MemorySupplier::new(doc)).unwrap_err();
        assert!(matches!(err, MapError::InvalidDimensions { width: 0, .. }));
    }

    #[test]
    fn test_area_properties_or_cells() {
        let board = load(make_document(vec![
            Placement {
                rect: Rect::new(5, 5, 1, 1),
                block: BlockType::Brick,
            },
            Placement {
                rect: Rect::new(6, 5, 1, 1),
                block: BlockType::Ice,
            },
        ]));
        let props = board.area_properties(&Rect::new(10, 10, 4, 2));
        assert!(props.contains(BlockProps::TANK_OBSTACLE | BlockProps::BREAKABLE));
        assert!(props.contains(BlockProps::BAD_MANOEUVRE));
        assert!(board.area_properties(&Rect::new(20, 20, 4, 4)).is_empty());
    }

    #[test]
    fn test_partially_outside_is_bare_obstacle() {
        let board = load(make_document(vec![Placement {
            rect: Rect::new(0, 0, 2, 2),
            block: BlockType::Brick,
        }]));
        let props = board.area_properties(&Rect::new(-1, 0, 4, 1));
        assert_eq!(props, BlockProps::TANK_OBSTACLE);
    }

    #[test]
    fn test_set_area_clips_and_noops() {
        let mut board = load(make_document(Vec::new()));
        let written = board.set_area(BlockType::Bush, &Rect::new(98, 98, 5, 5));
        assert_eq!(written, Rect::new(98, 98, 2, 2));
        assert_eq!(board.cell(IVec2::new(99, 99)), Some(BlockType::Bush));

        let before = board.to_ascii();
        let nothing = board.set_area(BlockType::Brick, &Rect::new(200, 200, 3, 3));
        assert!(nothing.is_empty());
        assert_eq!(board.to_ascii(), before);
    }

    #[test]
    fn test_ascii_dump_shape() {
        let board = load(make_document(Vec::new()));
        let ascii = board.to_ascii();
        assert_eq!(ascii.lines().count(), 100);
        assert!(ascii.lines().all(|l| l.chars().count() == 100));
    }

    proptest! {
        #[test]
        fn prop_outside_board_always_blocks_never_breaks(
            x in -400i32..400, y in -400i32..400, w in 1i32..20, h in 1i32..20
        ) {
            let board = load(make_document(vec![Placement {
                rect: Rect::new(0, 0, 50, 50),
                block: BlockType::Concrete,
            }]));
            let rect = Rect::new(x, y, w, h);
            prop_assume!(!board.bounds().contains_rect(&rect));
            let props = board.area_properties(&rect);
            prop_assert!(props.contains(BlockProps::TANK_OBSTACLE));
            prop_assert!(!props.contains(BlockProps::BREAKABLE));
        }

        #[test]
        fn prop_placement_cells_report_their_type(
            x in -10i32..50, y in -10i32..35, w in 1i32..15, h in 1i32..15, kind in 1usize..6
        ) {
            let block = BlockType::ALL[kind];
            let board = load(make_document(vec![Placement {
                rect: Rect::new(x, y, w, h),
                block,
            }]));
            let zone = objective_zone(&board);
            let covered = Rect::new(x, y, w, h).scaled(SUB_DIVISION).intersection(&board.bounds());
            for p in covered.cells().filter(|p| !zone.contains_point(*p)) {
                prop_assert_eq!(board.cell(p), Some(block));
            }
        }
    }
}
