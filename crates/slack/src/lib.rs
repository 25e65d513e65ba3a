//! Block Kit payload construction for proposal announcements.
//!
//! This crate only builds message payloads; posting them (and everything
//! else protocol-shaped, like signature verification and event dispatch)
//! belongs to whatever delivers the message. The CLI embeds these
//! templates in its JSON output for an upstream poster to send verbatim.
//!
//! # Key Types
//!
//! - `MessageBuilder` - Constructs typed block structures
//! - `ProposalCard` - The message posted alongside a finished deck
//! - `proposal_failed_message` - Error reply carrying the correlation id

pub mod blocks;

pub use blocks::{
    location_roster_message, proposal_failed_message, usage_message, Block, MessageBuilder,
    MessageTemplate, ProposalCard, TextObject,
};
