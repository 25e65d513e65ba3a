use chrono::NaiveDate;
use serde::Serialize;

use deckhand_core::dates::long_ordinal;
use deckhand_core::domain::PricedOption;
use deckhand_core::money::format_aed;

/// Slack caps a section's `fields` grid at ten entries.
const SECTION_FIELD_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    Plain { text: String },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        block_id: String,
        text: TextObject,
    },
    Section {
        block_id: String,
        text: TextObject,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fields: Vec<TextObject>,
    },
    Divider,
    Context {
        block_id: String,
        elements: Vec<TextObject>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageTemplate {
    pub fallback_text: String,
    pub blocks: Vec<Block>,
}

pub struct MessageBuilder {
    fallback_text: String,
    blocks: Vec<Block>,
}

impl MessageBuilder {
    pub fn new(fallback_text: impl Into<String>) -> Self {
        Self { fallback_text: fallback_text.into(), blocks: Vec::new() }
    }

    pub fn header(mut self, block_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.blocks
            .push(Block::Header { block_id: block_id.into(), text: TextObject::plain(text) });
        self
    }

    pub fn section<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut SectionBuilder),
    {
        let mut builder = SectionBuilder::default();
        build(&mut builder);
        let (text, fields) = builder.build();
        self.blocks.push(Block::Section { block_id: block_id.into(), text, fields });
        self
    }

    pub fn divider(mut self) -> Self {
        self.blocks.push(Block::Divider);
        self
    }

    pub fn context<F>(mut self, block_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut ContextBuilder),
    {
        let mut builder = ContextBuilder::default();
        build(&mut builder);
        self.blocks.push(Block::Context { block_id: block_id.into(), elements: builder.build() });
        self
    }

    pub fn build(self) -> MessageTemplate {
        MessageTemplate { fallback_text: self.fallback_text, blocks: self.blocks }
    }
}

#[derive(Default)]
pub struct SectionBuilder {
    text: Option<TextObject>,
    fields: Vec<TextObject>,
}

impl SectionBuilder {
    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::plain(text));
        self
    }

    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(TextObject::mrkdwn(text));
        self
    }

    pub fn field(&mut self, text: impl Into<String>) -> &mut Self {
        self.fields.push(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> (TextObject, Vec<TextObject>) {
        (self.text.unwrap_or_else(|| TextObject::plain("")), self.fields)
    }
}

#[derive(Default)]
pub struct ContextBuilder {
    elements: Vec<TextObject>,
}

impl ContextBuilder {
    pub fn plain(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::plain(text));
        self
    }

    pub fn mrkdwn(&mut self, text: impl Into<String>) -> &mut Self {
        self.elements.push(TextObject::mrkdwn(text));
        self
    }

    fn build(self) -> Vec<TextObject> {
        self.elements
    }
}

/// The message posted alongside a finished proposal deck.
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalCard {
    client_name: String,
    location_name: String,
    start_date: NaiveDate,
    valid_until: NaiveDate,
    options: Vec<PricedOption>,
    deck_path: Option<String>,
    pdf_path: Option<String>,
    correlation_id: Option<String>,
}

impl ProposalCard {
    pub fn new(
        client_name: impl Into<String>,
        location_name: impl Into<String>,
        start_date: NaiveDate,
        valid_until: NaiveDate,
        options: Vec<PricedOption>,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            location_name: location_name.into(),
            start_date,
            valid_until,
            options,
            deck_path: None,
            pdf_path: None,
            correlation_id: None,
        }
    }

    pub fn deck_path(mut self, path: impl Into<String>) -> Self {
        self.deck_path = Some(path.into());
        self
    }

    pub fn pdf_path(mut self, path: impl Into<String>) -> Self {
        self.pdf_path = Some(path.into());
        self
    }

    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn render(&self) -> MessageTemplate {
        let mut builder = MessageBuilder::new(format!(
            "Financial proposal for {} at {}",
            self.client_name, self.location_name
        ))
        .header("proposal.header.v1", format!("Financial Proposal: {}", self.location_name))
        .section("proposal.summary.v1", |section| {
            section.mrkdwn(format!(
                "*Client:* {}\n*Start date:* {}\n*Valid until:* {}",
                self.client_name,
                long_ordinal(self.start_date),
                long_ordinal(self.valid_until)
            ));
        });

        for (index, chunk) in self.options.chunks(SECTION_FIELD_LIMIT).enumerate() {
            builder = builder.section(format!("proposal.options.{}.v1", index + 1), |section| {
                section.mrkdwn("*Options*");
                for option in chunk {
                    section.field(format!(
                        "*{}*\nNet: {}\nVAT 5%: {}\n*Total: {}*",
                        option.duration_label(),
                        format_aed(option.net_rate),
                        format_aed(option.vat),
                        format_aed(option.total)
                    ));
                }
            });
        }

        if self.deck_path.is_some() || self.pdf_path.is_some() || self.correlation_id.is_some() {
            builder = builder.divider().context("proposal.footer.v1", |context| {
                if let Some(deck) = &self.deck_path {
                    context.mrkdwn(format!("Deck: `{deck}`"));
                }
                if let Some(pdf) = &self.pdf_path {
                    context.mrkdwn(format!("PDF: `{pdf}`"));
                }
                if let Some(id) = &self.correlation_id {
                    context.plain(format!("Correlation ID: {id}"));
                }
            });
        }

        builder.build()
    }
}

pub fn proposal_failed_message(summary: &str, correlation_id: &str) -> MessageTemplate {
    MessageBuilder::new(summary.to_owned())
        .section("proposal.error.summary.v1", |section| {
            section.mrkdwn(format!(":warning: {summary}"));
        })
        .context("proposal.error.context.v1", |context| {
            context.plain(format!("Correlation ID: {correlation_id}"));
        })
        .build()
}

pub fn usage_message() -> MessageTemplate {
    MessageBuilder::new("Proposal request help")
        .section("proposal.usage.v1", |section| {
            section.mrkdwn(
                "*To request a proposal, provide:*\n\
                 \u{2022} a location (see the roster for valid names)\n\
                 \u{2022} a campaign start date\n\
                 \u{2022} one or more durations, each with its net rate\n\
                 \u{2022} the client name",
            );
        })
        .build()
}

pub fn location_roster_message(display_names: &[String]) -> MessageTemplate {
    let listing = display_names
        .iter()
        .map(|name| format!("\u{2022} {name}"))
        .collect::<Vec<_>>()
        .join("\n");

    MessageBuilder::new("Available locations")
        .section("proposal.locations.v1", |section| {
            section.mrkdwn(format!("*Available locations*\n{listing}"));
        })
        .build()
}
