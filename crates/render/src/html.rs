//! Deck-to-HTML rendering.
//!
//! Takes the in-memory deck model and produces a self-contained HTML page,
//! one `<section>` per slide. Geometry comes out as percentages of the page
//! so the same markup prints at any size; all text is pre-formatted upstream,
//! so the template stays dumb.

use serde::Serialize;
use tera::{Context, Tera};

use deckhand_core::deck::{Align, Border, Deck, Rect, ShapeKind, SlideSize};

/// CSS pixel width of a rendered slide. Height follows the deck's aspect.
const PAGE_WIDTH_PX: u32 = 1280;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(String),
}

/// Renders decks with the embedded page template.
pub struct DeckRenderer {
    tera: Tera,
}

impl DeckRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html.tera"]);
        tera.add_raw_template(
            "deck.html.tera",
            include_str!("../../../templates/deck/deck.html.tera"),
        )
        .map_err(|e| RenderError::Template(e.to_string()))?;
        Ok(Self { tera })
    }

    pub fn render_html(&self, deck: &Deck, title: &str) -> Result<String, RenderError> {
        let view = DeckView::from_deck(deck, title);
        let context =
            Context::from_serialize(&view).map_err(|e| RenderError::Template(e.to_string()))?;
        self.tera
            .render("deck.html.tera", &context)
            .map_err(|e| RenderError::Template(e.to_string()))
    }
}

#[derive(Serialize)]
struct DeckView {
    title: String,
    page_width_px: u32,
    page_height_px: u32,
    slides: Vec<SlideView>,
}

impl DeckView {
    fn from_deck(deck: &Deck, title: &str) -> Self {
        let aspect = deck.size.height.0 as f64 / deck.size.width.0 as f64;
        let slides = deck
            .slides
            .iter()
            .map(|slide| SlideView {
                name: slide.name.clone().unwrap_or_default(),
                shapes: slide
                    .shapes
                    .iter()
                    .map(|shape| ShapeView::from_shape(&shape.frame, &shape.kind, deck.size))
                    .collect(),
            })
            .collect();

        DeckView {
            title: title.to_owned(),
            page_width_px: PAGE_WIDTH_PX,
            page_height_px: (PAGE_WIDTH_PX as f64 * aspect).round() as u32,
            slides,
        }
    }
}

#[derive(Serialize)]
struct SlideView {
    name: String,
    shapes: Vec<ShapeView>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ShapeView {
    Text {
        frame: FrameView,
        align: &'static str,
        // Always serialized, None as null: the template's `if` tests need the
        // keys present.
        fill: Option<String>,
        border: Option<String>,
        lines: Vec<LineView>,
    },
    Picture {
        frame: FrameView,
        asset: String,
    },
}

impl ShapeView {
    fn from_shape(frame: &Rect, kind: &ShapeKind, page: SlideSize) -> Self {
        let frame = FrameView::from_rect(frame, page);
        match kind {
            ShapeKind::TextBox { lines, align, fill, border } => ShapeView::Text {
                frame,
                align: align_keyword(*align),
                fill: fill.map(|color| color.to_hex()),
                border: border.map(border_css),
                lines: lines
                    .iter()
                    .map(|line| LineView {
                        text: line.text.clone(),
                        size_pt: line.style.size_pt,
                        bold: line.style.bold,
                        color: line.style.color.to_hex(),
                    })
                    .collect(),
            },
            ShapeKind::Picture { asset } => ShapeView::Picture { frame, asset: asset.clone() },
        }
    }
}

/// Frame edges as percentages of the page, fixed at four decimals.
#[derive(Serialize)]
struct FrameView {
    left: String,
    top: String,
    width: String,
    height: String,
}

impl FrameView {
    fn from_rect(rect: &Rect, page: SlideSize) -> Self {
        FrameView {
            left: percent_of(rect.x.0, page.width.0),
            top: percent_of(rect.y.0, page.height.0),
            width: percent_of(rect.width.0, page.width.0),
            height: percent_of(rect.height.0, page.height.0),
        }
    }
}

#[derive(Serialize)]
struct LineView {
    text: String,
    size_pt: u32,
    bold: bool,
    color: String,
}

fn percent_of(part: i64, whole: i64) -> String {
    format!("{:.4}", part as f64 / whole as f64 * 100.0)
}

fn align_keyword(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn border_css(border: Border) -> String {
    format!("{}pt solid {}", border.width_pt, border.color.to_hex())
}
