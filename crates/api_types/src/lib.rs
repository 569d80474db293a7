use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod client {
    use super::*;

    /// A customer as stored in the directory.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClientView {
        pub id: Uuid,
        pub contact_name: String,
        pub company_name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub address: Option<String>,
        /// RFC3339 timestamp (UTC).
        pub created_at: DateTime<Utc>,
    }

    /// Request body for updating a client. Absent fields stay untouched.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClientUpdate {
        pub contact_name: Option<String>,
        pub company_name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub address: Option<String>,
    }

    /// Response body for listing clients.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClientsResponse {
        pub clients: Vec<ClientView>,
    }
}

pub mod company {
    use super::*;

    /// The issuing business printed on quotation documents.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyView {
        pub name: String,
        pub tax_id: String,
        pub address: String,
        pub phone: String,
        pub email: String,
    }
}

pub mod quotation {
    use super::client::ClientView;
    use super::company::CompanyView;
    use super::*;

    /// Full intake for creating a quotation in one call: client fields,
    /// header fields, and the initial items in submission order.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct QuotationNew {
        pub contact_name: String,
        pub company_name: Option<String>,
        /// Dedup key: an existing client with this exact email is reused
        /// and its contact fields overwritten.
        pub email: Option<String>,
        pub phone: Option<String>,
        pub address: Option<String>,
        pub subject: Option<String>,
        pub notes: Option<String>,
        pub delivery_terms: Option<String>,
        pub items: Vec<LineItemNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LineItemNew {
        pub description: String,
        /// Must be > 0.
        pub quantity: i64,
        /// Decimal string, dot or comma separated ("1500.00").
        pub unit_price: String,
    }

    /// Request body for updating a line item. Absent fields stay untouched.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LineItemUpdate {
        pub description: Option<String>,
        pub quantity: Option<i64>,
        /// Decimal string, dot or comma separated ("1500.00").
        pub unit_price: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LineItemView {
        pub id: Uuid,
        /// 1-based position within the quotation.
        pub position: i32,
        pub description: String,
        pub quantity: i64,
        /// Two-decimal string ("1500.00").
        pub unit_price: String,
        /// Two-decimal string, `quantity × unit_price`.
        pub total: String,
    }

    /// The resolved aggregate: quotation, embedded client, ordered items.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct QuotationView {
        pub id: Uuid,
        pub number: i64,
        pub client: Option<ClientView>,
        pub issue_date: NaiveDate,
        pub subject: Option<String>,
        pub notes: Option<String>,
        pub delivery_terms: Option<String>,
        /// Two-decimal string, sum of item totals.
        pub subtotal: String,
        /// Two-decimal string, 19% of the subtotal.
        pub tax: String,
        /// Two-decimal string, subtotal plus tax.
        pub total: String,
        pub active: bool,
        /// RFC3339 timestamp (UTC).
        pub created_at: DateTime<Utc>,
        /// RFC3339 timestamp (UTC).
        pub updated_at: DateTime<Utc>,
        pub items: Vec<LineItemView>,
    }

    /// One row in the quotation list; items are not loaded here.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct QuotationSummary {
        pub id: Uuid,
        pub number: i64,
        pub client: Option<ClientView>,
        pub issue_date: NaiveDate,
        pub subject: Option<String>,
        pub subtotal: String,
        pub tax: String,
        pub total: String,
        pub active: bool,
        /// RFC3339 timestamp (UTC).
        pub created_at: DateTime<Utc>,
        /// RFC3339 timestamp (UTC).
        pub updated_at: DateTime<Utc>,
    }

    /// Query parameters for listing quotations.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct QuotationList {
        /// Include deactivated quotations as well.
        pub include_inactive: Option<bool>,
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        ///
        /// Pagination is newest → older by quotation number.
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct QuotationListResponse {
        pub quotations: Vec<QuotationSummary>,
        /// Opaque cursor for fetching the next page (lower numbers).
        pub next_cursor: Option<String>,
    }

    /// Render-ready aggregate for the external document renderer.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct QuotationDocumentView {
        pub quotation: QuotationView,
        /// Absent until the admin CLI stores a company profile.
        pub company: Option<CompanyView>,
    }

    /// Numbering preview; nothing is allocated by reading it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct NextNumber {
        pub next_number: i64,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Statistics {
        pub active_quotations: i64,
        /// Two-decimal string, sum of active quotation totals.
        pub quoted_total: String,
        pub clients: i64,
    }
}
