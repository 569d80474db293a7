//! Command structs for engine operations.
//!
//! These types group parameters for write operations (quotation creation,
//! item edits, client updates), keeping call sites readable and avoiding
//! long argument lists.

use uuid::Uuid;

/// Client block of a quotation intake.
///
/// Whether this draft creates a new client or lands on an existing row is
/// decided by the email upsert rule at execution time.
#[derive(Clone, Debug)]
pub struct ClientDraft {
    pub contact_name: String,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ClientDraft {
    #[must_use]
    pub fn new(contact_name: impl Into<String>) -> Self {
        Self {
            contact_name: contact_name.into(),
            company_name: None,
            email: None,
            phone: None,
            address: None,
        }
    }

    #[must_use]
    pub fn company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// One item row of a quotation intake.
///
/// `unit_price` is the raw decimal string as submitted; it is parsed (and
/// rejected) during validation, before anything is written.
#[derive(Clone, Debug)]
pub struct LineItemDraft {
    pub description: String,
    pub quantity: i64,
    pub unit_price: String,
}

impl LineItemDraft {
    #[must_use]
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price: unit_price.into(),
        }
    }
}

/// Create a quotation with its client and items in one shot.
#[derive(Clone, Debug)]
pub struct CreateQuotationCmd {
    pub client: ClientDraft,
    pub subject: Option<String>,
    pub notes: Option<String>,
    pub delivery_terms: Option<String>,
    pub items: Vec<LineItemDraft>,
}

impl CreateQuotationCmd {
    #[must_use]
    pub fn new(client: ClientDraft) -> Self {
        Self {
            client,
            subject: None,
            notes: None,
            delivery_terms: None,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn delivery_terms(mut self, delivery_terms: impl Into<String>) -> Self {
        self.delivery_terms = Some(delivery_terms.into());
        self
    }

    #[must_use]
    pub fn item(mut self, item: LineItemDraft) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn items(mut self, items: Vec<LineItemDraft>) -> Self {
        self.items = items;
        self
    }
}

/// Update a line item on an existing quotation.
///
/// `None` fields are left unchanged.
#[derive(Clone, Debug)]
pub struct UpdateLineItemCmd {
    pub quotation_id: Uuid,
    pub item_id: Uuid,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<String>,
}

impl UpdateLineItemCmd {
    #[must_use]
    pub fn new(quotation_id: Uuid, item_id: Uuid) -> Self {
        Self {
            quotation_id,
            item_id,
            description: None,
            quantity: None,
            unit_price: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn unit_price(mut self, unit_price: impl Into<String>) -> Self {
        self.unit_price = Some(unit_price.into());
        self
    }
}

/// Update an existing client.
///
/// `None` fields are left unchanged; optional text fields set to an empty
/// string are cleared.
#[derive(Clone, Debug)]
pub struct UpdateClientCmd {
    pub client_id: Uuid,
    pub contact_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateClientCmd {
    #[must_use]
    pub fn new(client_id: Uuid) -> Self {
        Self {
            client_id,
            contact_name: None,
            company_name: None,
            email: None,
            phone: None,
            address: None,
        }
    }

    #[must_use]
    pub fn contact_name(mut self, contact_name: impl Into<String>) -> Self {
        self.contact_name = Some(contact_name.into());
        self
    }

    #[must_use]
    pub fn company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
