//! Random placement of loose wagons inside the free area.
//!
//! Coordinates here are relative to the free area's top-left corner, so a
//! stored position survives the area moving on screen.

use rand::Rng;
use ratatui::layout::{Position, Rect, Size};

pub const MAX_ATTEMPTS: usize = 14;

/// Minimum gap, in cells, kept between scattered wagons.
pub const MARGIN: u16 = 1;

/// Rectangle overlap test that treats boxes closer than `margin` as touching.
pub fn overlaps(a: Rect, b: Rect, margin: u16) -> bool {
    let (ax, ay, aw, ah) = (a.x as u32, a.y as u32, a.width as u32, a.height as u32);
    let (bx, by, bw, bh) = (b.x as u32, b.y as u32, b.width as u32, b.height as u32);
    let m = margin as u32;

    let horizontal_gap = ax + aw + m <= bx || bx + bw + m <= ax;
    let vertical_gap = ay + ah + m <= by || by + bh + m <= ay;
    !(horizontal_gap || vertical_gap)
}

/// Clamp a possibly negative top-left so the whole tile stays in the field.
pub fn clamp_to_field(x: i32, y: i32, tile: Size, field: Size) -> Position {
    let max_x = field.width.saturating_sub(tile.width) as i32;
    let max_y = field.height.saturating_sub(tile.height) as i32;
    Position::new(x.clamp(0, max_x) as u16, y.clamp(0, max_y) as u16)
}

/// Roll a spot for a tile that avoids `placed`. Returns `None` while the field
/// has no area yet; callers retry once layout settles. When every attempt
/// collides the last roll is kept.
pub fn scatter<R: Rng + ?Sized>(
    field: Size,
    tile: Size,
    placed: &[Rect],
    rng: &mut R,
) -> Option<Position> {
    if field.width == 0 || field.height == 0 {
        return None;
    }

    let max_x = field.width.saturating_sub(tile.width);
    let max_y = field.height.saturating_sub(tile.height);

    let mut attempt = 0;
    loop {
        let candidate = Position::new(rng.gen_range(0..=max_x), rng.gen_range(0..=max_y));
        attempt += 1;

        let rect = Rect::new(candidate.x, candidate.y, tile.width, tile.height);
        let collides = placed.iter().any(|other| overlaps(rect, *other, MARGIN));
        if !collides || attempt >= MAX_ATTEMPTS {
            return Some(candidate);
        }
    }
}
