//! Quotations API endpoints

use api_types::company::CompanyView;
use api_types::quotation::{
    LineItemNew, LineItemUpdate, LineItemView, NextNumber, QuotationDocumentView, QuotationList,
    QuotationListResponse, QuotationNew, QuotationSummary, QuotationView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, clients, server::ServerState, user};
use engine::{
    Client, ClientDraft, CompanyProfile, CreateQuotationCmd, LineItem, LineItemDraft, Quotation,
    UpdateLineItemCmd,
};

fn item_view(item: LineItem) -> LineItemView {
    LineItemView {
        id: item.id,
        position: item.position,
        description: item.description,
        quantity: item.quantity,
        unit_price: item.unit_price.to_string(),
        total: item.total.to_string(),
    }
}

fn quotation_view(quotation: Quotation, client: Option<Client>) -> QuotationView {
    QuotationView {
        id: quotation.id,
        number: quotation.number,
        client: client.map(clients::client_view),
        issue_date: quotation.issue_date,
        subject: quotation.subject,
        notes: quotation.notes,
        delivery_terms: quotation.delivery_terms,
        subtotal: quotation.subtotal.to_string(),
        tax: quotation.tax.to_string(),
        total: quotation.total.to_string(),
        active: quotation.active,
        created_at: quotation.created_at,
        updated_at: quotation.updated_at,
        items: quotation.items.into_iter().map(item_view).collect(),
    }
}

fn summary_view(quotation: Quotation, client: Option<Client>) -> QuotationSummary {
    QuotationSummary {
        id: quotation.id,
        number: quotation.number,
        client: client.map(clients::client_view),
        issue_date: quotation.issue_date,
        subject: quotation.subject,
        subtotal: quotation.subtotal.to_string(),
        tax: quotation.tax.to_string(),
        total: quotation.total.to_string(),
        active: quotation.active,
        created_at: quotation.created_at,
        updated_at: quotation.updated_at,
    }
}

fn company_view(company: CompanyProfile) -> CompanyView {
    CompanyView {
        name: company.name,
        tax_id: company.tax_id,
        address: company.address,
        phone: company.phone,
        email: company.email,
    }
}

pub async fn create(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<QuotationNew>,
) -> Result<(StatusCode, Json<QuotationView>), ServerError> {
    let items = payload
        .items
        .into_iter()
        .map(|item| LineItemDraft {
            description: item.description,
            quantity: item.quantity,
            unit_price: item.unit_price,
        })
        .collect();

    let cmd = CreateQuotationCmd {
        client: ClientDraft {
            contact_name: payload.contact_name,
            company_name: payload.company_name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
        },
        subject: payload.subject,
        notes: payload.notes,
        delivery_terms: payload.delivery_terms,
        items,
    };

    let (quotation, client) = state.engine.create_quotation(cmd).await?;
    Ok((StatusCode::CREATED, Json(quotation_view(quotation, client))))
}

pub async fn list(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Query(payload): Query<QuotationList>,
) -> Result<Json<QuotationListResponse>, ServerError> {
    let limit = payload.limit.unwrap_or(50);
    let include_inactive = payload.include_inactive.unwrap_or(false);

    let (rows, next_cursor) = state
        .engine
        .quotations_page(include_inactive, limit, payload.cursor.as_deref())
        .await?;

    let quotations = rows
        .into_iter()
        .map(|(quotation, client)| summary_view(quotation, client))
        .collect();

    Ok(Json(QuotationListResponse {
        quotations,
        next_cursor,
    }))
}

pub async fn get(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationView>, ServerError> {
    let (quotation, client) = state.engine.quotation(id).await?;
    Ok(Json(quotation_view(quotation, client)))
}

pub async fn document(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuotationDocumentView>, ServerError> {
    let document = state.engine.quotation_document(id).await?;
    Ok(Json(QuotationDocumentView {
        quotation: quotation_view(document.quotation, document.client),
        company: document.company.map(company_view),
    }))
}

pub async fn deactivate(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.deactivate_quotation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn next_number(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<NextNumber>, ServerError> {
    let next_number = state.engine.peek_next_number().await?;
    Ok(Json(NextNumber { next_number }))
}

pub async fn add_item(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LineItemNew>,
) -> Result<(StatusCode, Json<QuotationView>), ServerError> {
    let draft = LineItemDraft {
        description: payload.description,
        quantity: payload.quantity,
        unit_price: payload.unit_price,
    };

    let (quotation, client) = state.engine.add_line_item(id, draft).await?;
    Ok((StatusCode::CREATED, Json(quotation_view(quotation, client))))
}

pub async fn update_item(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<LineItemUpdate>,
) -> Result<Json<QuotationView>, ServerError> {
    let cmd = UpdateLineItemCmd {
        quotation_id: id,
        item_id,
        description: payload.description,
        quantity: payload.quantity,
        unit_price: payload.unit_price,
    };

    let (quotation, client) = state.engine.update_line_item(cmd).await?;
    Ok(Json(quotation_view(quotation, client)))
}

pub async fn remove_item(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<QuotationView>, ServerError> {
    let (quotation, client) = state.engine.remove_line_item(id, item_id).await?;
    Ok(Json(quotation_view(quotation, client)))
}
