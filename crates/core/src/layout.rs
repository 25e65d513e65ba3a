//! Slide composition as a pure function of page size and option count.
//!
//! No presentation types beyond [`Rect`] and [`SlideSize`] appear here, so
//! every geometric property is testable with plain numbers. All bands are
//! fractions of the page, never absolute EMU constants, so any positive page
//! size yields a usable plan.

use crate::deck::{Rect, SlideSize};

/// Width share reserved for outer margins in the column formula: each column
/// is `page_width / (option_count + MARGIN_FACTOR)` wide.
pub const MARGIN_FACTOR: usize = 1;

const SIDE_MARGIN_FRAC: f64 = 0.0375;
const TITLE_TOP_FRAC: f64 = 0.025;
const TITLE_HEIGHT_FRAC: f64 = 0.085;
const HEADER_TOP_FRAC: f64 = 0.12;
const HEADER_HEIGHT_FRAC: f64 = 0.10;
const COLUMNS_TOP_FRAC: f64 = 0.24;
const COLUMNS_HEIGHT_FRAC: f64 = 0.54;
const TERMS_TOP_FRAC: f64 = 0.792;
const TERMS_HEIGHT_FRAC: f64 = 0.167;
const HEADER_IMAGE_WIDTH_FRAC: f64 = 0.16;

/// Canvas the type sizes were designed at: 20in x 12in.
const DESIGN_WIDTH_IN: f64 = 20.0;
const DESIGN_HEIGHT_IN: f64 = 12.0;

/// Every frame the proposal slide places, in EMU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlidePlan {
    pub header_image: Rect,
    pub title: Rect,
    pub header: Rect,
    pub columns: Vec<Rect>,
    pub terms: Rect,
}

/// Font scale factor for a page: 1.0 at the design canvas, proportionally
/// smaller or larger elsewhere. The tighter axis wins so text never
/// overflows a squat or narrow page.
pub fn type_scale(size: SlideSize) -> f64 {
    let width_ratio = size.width.to_inches() / DESIGN_WIDTH_IN;
    let height_ratio = size.height.to_inches() / DESIGN_HEIGHT_IN;
    width_ratio.min(height_ratio)
}

/// One frame per option, left to right in input order.
///
/// Column width is `page_width / (option_count + MARGIN_FACTOR)`; the
/// remaining share splits evenly into the two outer margins, so the block is
/// centred, columns sit flush against each other, and every frame stays on
/// the page no matter how many options arrive.
pub fn option_columns(size: SlideSize, option_count: usize) -> Vec<Rect> {
    if option_count == 0 {
        return Vec::new();
    }
    let column_width = size.width.0 / (option_count + MARGIN_FACTOR) as i64;
    let start = (size.width.0 - column_width * option_count as i64) / 2;
    let top = size.height.scaled(COLUMNS_TOP_FRAC);
    let height = size.height.scaled(COLUMNS_HEIGHT_FRAC);

    (0..option_count)
        .map(|i| {
            Rect::new(
                crate::deck::Emu(start + column_width * i as i64),
                top,
                crate::deck::Emu(column_width),
                height,
            )
        })
        .collect()
}

/// The full composition. `image_aspect` is the header image's width/height
/// ratio and must be positive; the image is anchored top-left and scaled to
/// a fixed share of the page width so its proportions are preserved.
pub fn plan(size: SlideSize, option_count: usize, image_aspect: f64) -> SlidePlan {
    let image_width = size.width.scaled(HEADER_IMAGE_WIDTH_FRAC);
    let image_height = image_width.scaled(1.0 / image_aspect);
    let header_image = Rect::new(
        size.width.scaled(SIDE_MARGIN_FRAC),
        size.height.scaled(TITLE_TOP_FRAC),
        image_width,
        image_height,
    );

    SlidePlan {
        header_image,
        title: band(size, TITLE_TOP_FRAC, TITLE_HEIGHT_FRAC),
        header: band(size, HEADER_TOP_FRAC, HEADER_HEIGHT_FRAC),
        columns: option_columns(size, option_count),
        terms: band(size, TERMS_TOP_FRAC, TERMS_HEIGHT_FRAC),
    }
}

/// A full-content-width horizontal band.
fn band(size: SlideSize, top_frac: f64, height_frac: f64) -> Rect {
    Rect::new(
        size.width.scaled(SIDE_MARGIN_FRAC),
        size.height.scaled(top_frac),
        size.width.scaled(1.0 - 2.0 * SIDE_MARGIN_FRAC),
        size.height.scaled(height_frac),
    )
}
