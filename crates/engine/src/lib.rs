//! # Quotation engine
//!
//! Core of the quoting tool: clients, quotations, line items, the issuing
//! company profile, sequential quote numbering and totals aggregation.
//!
//! All access goes through [`Engine`], which wraps a
//! [`sea_orm::DatabaseConnection`]. Every multi-step write runs inside one
//! database transaction; totals are recomputed in the same transaction as the
//! item write that changed them, so stored totals are always consistent with
//! the stored items.
//!
//! Monetary values are integer cents ([`MoneyCents`]); tax is a fixed 19% of
//! the subtotal, rounded half-up to the cent.

pub use clients::Client;
pub use commands::{
    ClientDraft, CreateQuotationCmd, LineItemDraft, UpdateClientCmd, UpdateLineItemCmd,
};
pub use company::CompanyProfile;
pub use error::EngineError;
pub use line_items::LineItem;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, QuotationDocument, Statistics};
pub use quotations::Quotation;

mod clients;
mod commands;
mod company;
mod error;
mod line_items;
mod money;
mod ops;
mod quotations;

type ResultEngine<T> = Result<T, EngineError>;
