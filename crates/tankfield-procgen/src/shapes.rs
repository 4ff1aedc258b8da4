//! Rasterization of terrain shapes into placements.

use glam::IVec2;

use tankfield_core::enums::BlockType;
use tankfield_core::types::Rect;
use tankfield_terrain::Placement;

/// Outline thickness for hollow ellipses.
const ELLIPSE_OUTLINE: f64 = 2.0;

/// Four one-cell walls around `rect`.
pub fn hollow_rect(rect: Rect, block: BlockType) -> Vec<Placement> {
    let (l, t, w, h) = (rect.left(), rect.top(), rect.width(), rect.height());
    [
        Rect::new(l, t, 1, h),
        Rect::new(l, t, w, 1),
        Rect::new(l + w - 1, t, 1, h),
        Rect::new(l, t + h - 1, w, 1),
    ]
    .into_iter()
    .map(|rect| Placement { rect, block })
    .collect()
}

/// Ellipse inscribed in `bounds`, one 1×1 placement per covered cell, row-major.
/// With `hollow` only a ring of [`ELLIPSE_OUTLINE`] cells is emitted.
pub fn ellipse(bounds: Rect, block: BlockType, hollow: bool) -> Vec<Placement> {
    let outer = (bounds.width() as f64 / 2.0, bounds.height() as f64 / 2.0);
    let inner = (outer.0 - ELLIPSE_OUTLINE, outer.1 - ELLIPSE_OUTLINE);

    (0..bounds.height())
        .flat_map(|y| (0..bounds.width()).map(move |x| IVec2::new(x, y)))
        .filter(|cell| {
            // Sample at the cell center, relative to the ellipse center.
            let dx = cell.x as f64 + 0.5 - outer.0;
            let dy = cell.y as f64 + 0.5 - outer.1;
            let in_outer = inside(dx, dy, outer);
            if !hollow {
                return in_outer;
            }
            in_outer && (inner.0 <= 0.0 || inner.1 <= 0.0 || !inside(dx, dy, inner))
        })
        .map(|cell| Placement {
            rect: Rect::from_origin_size(bounds.origin + cell, IVec2::ONE),
            block,
        })
        .collect()
}

fn inside(dx: f64, dy: f64, (rx, ry): (f64, f64)) -> bool {
    (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hollow_rect_walls() {
        let walls = hollow_rect(Rect::new(2, 3, 5, 4), BlockType::Brick);
        assert_eq!(walls.len(), 4);
        assert_eq!(walls[2].rect, Rect::new(6, 3, 1, 4));
        assert_eq!(walls[3].rect, Rect::new(2, 6, 5, 1));
    }

    #[test]
    fn test_filled_ellipse_stays_in_bounds() {
        let bounds = Rect::new(10, 10, 7, 5);
        let cells = ellipse(bounds, BlockType::Water, false);
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|p| bounds.contains_rect(&p.rect)));
        // Center cell is always covered; corners never are.
        assert!(cells.iter().any(|p| p.rect.origin == IVec2::new(13, 12)));
        assert!(!cells.iter().any(|p| p.rect.origin == IVec2::new(10, 10)));
    }

    #[test]
    fn test_hollow_ellipse_is_a_ring() {
        let bounds = Rect::new(0, 0, 12, 12);
        let filled = ellipse(bounds, BlockType::Brick, false);
        let ring = ellipse(bounds, BlockType::Brick, true);
        assert!(ring.len() < filled.len());
        assert!(!ring.iter().any(|p| p.rect.origin == IVec2::new(6, 6)));
        assert!(ring.iter().all(|p| filled.contains(p)));
    }

    #[test]
    fn test_small_hollow_ellipse_degenerates_to_filled() {
        let bounds = Rect::new(0, 0, 3, 3);
        assert_eq!(
            ellipse(bounds, BlockType::Brick, true),
            ellipse(bounds, BlockType::Brick, false)
        );
    }
}
