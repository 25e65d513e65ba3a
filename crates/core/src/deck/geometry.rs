//! Presentation geometry in English Metric Units.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

pub const EMU_PER_INCH: i64 = 914_400;
pub const EMU_PER_CM: i64 = 360_000;
pub const EMU_PER_POINT: i64 = 12_700;

/// The native unit of deck geometry. 914,400 EMU to the inch.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Emu(pub i64);

impl Emu {
    pub fn from_inches(inches: f64) -> Self {
        Emu((inches * EMU_PER_INCH as f64).round() as i64)
    }

    pub fn from_cm(cm: f64) -> Self {
        Emu((cm * EMU_PER_CM as f64).round() as i64)
    }

    pub fn from_points(points: f64) -> Self {
        Emu((points * EMU_PER_POINT as f64).round() as i64)
    }

    pub fn to_inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }

    /// Scale by a dimensionless factor, rounding to the nearest unit.
    pub fn scaled(self, factor: f64) -> Self {
        Emu((self.0 as f64 * factor).round() as i64)
    }
}

impl Add for Emu {
    type Output = Emu;

    fn add(self, rhs: Emu) -> Emu {
        Emu(self.0 + rhs.0)
    }
}

impl Sub for Emu {
    type Output = Emu;

    fn sub(self, rhs: Emu) -> Emu {
        Emu(self.0 - rhs.0)
    }
}

/// A shape frame: offset from the slide's top-left corner plus extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: Emu,
    pub y: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Rect {
    pub fn new(x: Emu, y: Emu, width: Emu, height: Emu) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> Emu {
        self.x + self.width
    }

    pub fn bottom(&self) -> Emu {
        self.y + self.height
    }
}

/// Deck page dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: Emu,
    pub height: Emu,
}

impl SlideSize {
    pub fn new(width: Emu, height: Emu) -> Self {
        SlideSize { width, height }
    }

    pub fn from_inches(width: f64, height: f64) -> Self {
        SlideSize { width: Emu::from_inches(width), height: Emu::from_inches(height) }
    }

    pub fn is_positive(&self) -> bool {
        self.width.0 > 0 && self.height.0 > 0
    }

    /// True when `rect` lies entirely on the page.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x.0 >= 0
            && rect.y.0 >= 0
            && rect.width.0 > 0
            && rect.height.0 > 0
            && rect.right().0 <= self.width.0
            && rect.bottom().0 <= self.height.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Emu, Rect, SlideSize};

    #[test]
    fn converts_between_inches_and_emus() {
        assert_eq!(Emu::from_inches(1.0), Emu(914_400));
        assert_eq!(Emu::from_inches(13.333), Emu(12_191_695));
        assert_eq!(Emu::from_cm(2.54), Emu(914_400));
        assert!((Emu(914_400).to_inches() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scaling_rounds_to_the_nearest_unit() {
        assert_eq!(Emu(100).scaled(0.333), Emu(33));
        assert_eq!(Emu(100).scaled(0.335), Emu(34));
    }

    #[test]
    fn page_containment_checks_all_edges() {
        let page = SlideSize::from_inches(10.0, 5.0);
        let inside = Rect::new(Emu(0), Emu(0), Emu::from_inches(10.0), Emu::from_inches(5.0));
        let too_wide = Rect::new(Emu(0), Emu(0), Emu::from_inches(10.1), Emu(100));
        let degenerate = Rect::new(Emu(0), Emu(0), Emu(0), Emu(100));

        assert!(page.contains(&inside));
        assert!(!page.contains(&too_wide));
        assert!(!page.contains(&degenerate));
    }
}
