//! Turns a validated request plus a base deck into a finished proposal
//! slide, inserted just before the deck's closing slide.

use chrono::NaiveDate;

use crate::dates;
use crate::deck::{Align, Border, Color, Deck, Rect, Shape, ShapeKind, Slide, TextLine, TextStyle};
use crate::domain::proposal::{PricedOption, ProposalRequest};
use crate::errors::BuildError;
use crate::layout;
use crate::library::profile::{DisplayKind, LocationProfile};
use crate::money;

/// Authority fee quoted in the standard terms, per image/message.
pub const MUNICIPALITY_FEE_AED: u32 = 520;

/// Spots per option quoted when a request does not say otherwise.
const DEFAULT_SPOTS: u32 = 1;

const FILL_GREY: Color = Color::rgb(128, 128, 128);
const NET_RATE_RED: Color = Color::rgb(255, 0, 0);
const ANNOTATION_BLUE: Color = Color::rgb(35, 78, 173);

// Point sizes at the 20x12in design canvas; scaled per page.
const TITLE_PT: f64 = 36.0;
const BODY_PT: f64 = 20.0;
const CAPTION_PT: f64 = 14.0;
const TOTAL_PT: f64 = 28.0;
const TERMS_PT: f64 = 11.0;

/// Opaque reference to the branding image placed top-left, plus its
/// width/height ratio. The builder never decodes image bytes; the renderer
/// resolves the reference later.
#[derive(Clone, Debug)]
pub struct HeaderImage {
    pub asset: String,
    pub aspect: f64,
}

impl HeaderImage {
    pub fn new(asset: impl Into<String>, aspect: f64) -> Self {
        HeaderImage { asset: asset.into(), aspect }
    }
}

/// What [`ProposalSlideBuilder::build`] reports back besides mutating the
/// deck: where the slide landed, the derived figures, and the offer window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltProposal {
    pub slide_index: usize,
    pub options: Vec<PricedOption>,
    pub valid_until: NaiveDate,
}

/// The slide builder. Pure and synchronous: no file, network, or clock
/// access. Callers resolve deck bytes beforehand and deliver results
/// afterwards; `issued_on` is injected so the validity date is a fact of the
/// request, not of wall time.
#[derive(Clone, Debug)]
pub struct ProposalSlideBuilder {
    header_image: HeaderImage,
    issued_on: NaiveDate,
}

impl ProposalSlideBuilder {
    pub fn new(header_image: HeaderImage, issued_on: NaiveDate) -> Self {
        ProposalSlideBuilder { header_image, issued_on }
    }

    /// Validate, price, compose, insert.
    ///
    /// The deck is only mutated after every fallible step has passed; on any
    /// error it is exactly as it was. The new slide goes in at
    /// `slide_count - 1`, so it lands after all existing content but before
    /// the closing slide, and the previously-last slide stays last. A
    /// one-slide deck gets the proposal at index 0.
    pub fn build(
        &self,
        request: &ProposalRequest,
        profile: &LocationProfile,
        deck: &mut Deck,
    ) -> Result<BuiltProposal, BuildError> {
        request.validate()?;
        deck.validate()?;

        let options = request.priced_options();
        let valid_until = dates::validity_date(self.issued_on);
        let slide = self.compose(request, profile, &options, valid_until, deck);

        let slide_index = deck.slide_count() - 1;
        deck.insert_slide(slide_index, slide);

        Ok(BuiltProposal { slide_index, options, valid_until })
    }

    fn compose(
        &self,
        request: &ProposalRequest,
        profile: &LocationProfile,
        options: &[PricedOption],
        valid_until: NaiveDate,
        deck: &Deck,
    ) -> Slide {
        let plan = layout::plan(deck.size, options.len(), self.header_image.aspect);
        let scale = layout::type_scale(deck.size);
        let pt = |base: f64| ((base * scale).round() as u32).max(1);

        let mut shapes = vec![
            Shape {
                frame: plan.header_image,
                kind: ShapeKind::Picture { asset: self.header_image.asset.clone() },
            },
            text_box(
                plan.title,
                vec![TextLine::new(
                    "Financial Proposal",
                    TextStyle::bold(pt(TITLE_PT), Color::BLACK),
                )],
                Align::Center,
                None,
                None,
            ),
            text_box(
                plan.header,
                header_lines(request, profile, pt(BODY_PT), pt(CAPTION_PT)),
                Align::Center,
                None,
                None,
            ),
        ];

        for (frame, option) in plan.columns.iter().zip(options) {
            shapes.extend(option_column(*frame, option, &pt));
        }

        shapes.push(text_box(
            plan.terms,
            terms_lines(valid_until)
                .into_iter()
                .map(|line| TextLine::new(line, TextStyle::plain(pt(TERMS_PT))))
                .collect(),
            Align::Left,
            None,
            None,
        ));

        Slide { name: Some("Financial Proposal".to_owned()), shapes }
    }
}

fn header_lines(
    request: &ProposalRequest,
    profile: &LocationProfile,
    body_pt: u32,
    caption_pt: u32,
) -> Vec<TextLine> {
    let mut lines = vec![
        TextLine::new(
            profile.placement_line(DEFAULT_SPOTS),
            TextStyle::bold(body_pt, Color::BLACK),
        ),
        TextLine::new(
            format!("Start Date: {}", dates::long_ordinal(request.start_date)),
            TextStyle::plain(body_pt),
        ),
    ];
    if profile.display_kind == DisplayKind::Digital {
        lines.push(TextLine::new(
            format!(
                "Upload fee: {} per artwork",
                money::format_aed(profile.upload_fee_or_default())
            ),
            TextStyle::colored(caption_pt, ANNOTATION_BLUE),
        ));
    }
    lines
}

/// One bordered column: duration header, net rate, VAT, total, stacked as
/// four equal cells.
fn option_column(frame: Rect, option: &PricedOption, pt: &dyn Fn(f64) -> u32) -> Vec<Shape> {
    let cell_height = crate::deck::Emu(frame.height.0 / 4);
    let cell = |row: i64| {
        Rect::new(
            frame.x,
            crate::deck::Emu(frame.y.0 + cell_height.0 * row),
            frame.width,
            cell_height,
        )
    };

    vec![
        text_box(
            cell(0),
            vec![TextLine::new(option.duration_label(), TextStyle::bold(pt(BODY_PT), Color::WHITE))],
            Align::Center,
            Some(FILL_GREY),
            Some(Border::thin()),
        ),
        text_box(
            cell(1),
            vec![
                TextLine::new("Net Rate", TextStyle::plain(pt(CAPTION_PT))),
                TextLine::new(
                    money::format_aed(option.net_rate),
                    TextStyle::bold(pt(BODY_PT), NET_RATE_RED),
                ),
            ],
            Align::Center,
            None,
            Some(Border::thin()),
        ),
        text_box(
            cell(2),
            vec![
                TextLine::new("VAT 5%", TextStyle::plain(pt(CAPTION_PT))),
                TextLine::new(money::format_aed(option.vat), TextStyle::plain(pt(BODY_PT))),
            ],
            Align::Center,
            None,
            Some(Border::thin()),
        ),
        text_box(
            cell(3),
            vec![
                TextLine::new("Total", TextStyle::bold(pt(CAPTION_PT), Color::WHITE)),
                TextLine::new(
                    money::format_aed(option.total),
                    TextStyle::bold(pt(TOTAL_PT), Color::WHITE),
                ),
            ],
            Align::Center,
            Some(FILL_GREY),
            Some(Border::thin()),
        ),
    ]
}

fn terms_lines(valid_until: NaiveDate) -> Vec<String> {
    vec![
        format!(
            "\u{2022} A municipality fee of AED {MUNICIPALITY_FEE_AED} per image/message \
             applies. The final fee will be confirmed after the final artwork is received."
        ),
        "\u{2022} An official booking order is required to secure the location/spot.".to_owned(),
        "\u{2022} Once a booking is confirmed, cancellations are not allowed; if an artwork is \
         rejected by the authorities, a revised artwork must be submitted."
            .to_owned(),
        "\u{2022} All artworks are subject to approval by the media owner and the municipality."
            .to_owned(),
        "\u{2022} Location availability is subject to change.".to_owned(),
        "\u{2022} The artwork must comply with the municipality's content guidelines.".to_owned(),
        format!("\u{2022} This proposal is valid until the {}.", dates::long_ordinal(valid_until)),
    ]
}

fn text_box(
    frame: Rect,
    lines: Vec<TextLine>,
    align: Align,
    fill: Option<Color>,
    border: Option<Border>,
) -> Shape {
    Shape { frame, kind: ShapeKind::TextBox { lines, align, fill, border } }
}
