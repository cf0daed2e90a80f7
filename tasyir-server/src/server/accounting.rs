use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tasyir_core::{
    account::{error::AccountError, AccountUpdate, NewAccount},
    journal_entry::{JournalEntryByEntryDateCursor, JournalEntryDraft},
    period::NewPeriod,
    query::PaginatedQueryArgs,
    Tasyir,
};
use tasyir_types::{
    account::AccountValues,
    journal_entry::JournalEntryValues,
    period::PeriodValues,
    primitives::{AccountCode, AccountId, JournalEntryId, PeriodId, Status},
};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct JournalEntryListQuery {
    pub period_id: Option<PeriodId>,
    pub first: Option<usize>,
    pub after_entry_date: Option<NaiveDate>,
    pub after_id: Option<JournalEntryId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryListResponse {
    pub entries: Vec<JournalEntryValues>,
    pub has_next_page: bool,
    pub end_cursor: Option<JournalEntryByEntryDateCursor>,
}

pub async fn list_journal_entries(
    State(app): State<Tasyir>,
    Query(query): Query<JournalEntryListQuery>,
) -> Result<Json<JournalEntryListResponse>, ApiError> {
    let after = match (query.after_entry_date, query.after_id) {
        (Some(entry_date), Some(id)) => Some(JournalEntryByEntryDateCursor { entry_date, id }),
        _ => None,
    };
    let args = match query.first {
        Some(first) => PaginatedQueryArgs { first, after },
        None => PaginatedQueryArgs {
            after,
            ..Default::default()
        },
    };
    let ret = app.journal_entries().list(args, query.period_id).await?;
    Ok(Json(JournalEntryListResponse {
        entries: ret.entities.into_iter().map(|e| e.into_values()).collect(),
        has_next_page: ret.has_next_page,
        end_cursor: ret.end_cursor,
    }))
}

pub async fn create_journal_entry(
    State(app): State<Tasyir>,
    Json(draft): Json<JournalEntryDraft>,
) -> Result<Json<JournalEntryValues>, ApiError> {
    let entry = app.create_journal_entry(draft).await?;
    Ok(Json(entry.into_values()))
}

pub async fn find_journal_entry(
    State(app): State<Tasyir>,
    Path(id): Path<JournalEntryId>,
) -> Result<Json<JournalEntryValues>, ApiError> {
    let entry = app.journal_entries().find_by_id(id).await?;
    Ok(Json(entry.into_values()))
}

pub async fn update_journal_entry(
    State(app): State<Tasyir>,
    Path(id): Path<JournalEntryId>,
    Json(draft): Json<JournalEntryDraft>,
) -> Result<Json<JournalEntryValues>, ApiError> {
    let entry = app.update_journal_entry(id, draft).await?;
    Ok(Json(entry.into_values()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePeriodRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub async fn list_periods(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<PeriodValues>>, ApiError> {
    let periods = app.periods().list().await?;
    Ok(Json(periods.into_iter().map(|p| p.into_values()).collect()))
}

pub async fn create_period(
    State(app): State<Tasyir>,
    Json(req): Json<CreatePeriodRequest>,
) -> Result<Json<PeriodValues>, ApiError> {
    let new_period = NewPeriod::builder()
        .id(PeriodId::new())
        .name(req.name)
        .start_date(req.start_date)
        .end_date(req.end_date)
        .build()
        .expect("all mandatory fields set");
    let period = app.periods().create(new_period).await?;
    Ok(Json(period.into_values()))
}

pub async fn find_period(
    State(app): State<Tasyir>,
    Path(id): Path<PeriodId>,
) -> Result<Json<PeriodValues>, ApiError> {
    let period = app.periods().find_by_id(id).await?;
    Ok(Json(period.into_values()))
}

pub async fn close_period(
    State(app): State<Tasyir>,
    Path(id): Path<PeriodId>,
) -> Result<Json<PeriodValues>, ApiError> {
    let period = app.periods().close(id).await?;
    Ok(Json(period.into_values()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<AccountId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
}

pub async fn list_accounts(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<AccountValues>>, ApiError> {
    let accounts = app.accounts().list().await?;
    Ok(Json(accounts.into_iter().map(|a| a.into_values()).collect()))
}

pub async fn create_account(
    State(app): State<Tasyir>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<AccountValues>, ApiError> {
    let code: AccountCode = req.code.parse().map_err(AccountError::from)?;
    let mut builder = NewAccount::builder();
    builder.id(AccountId::new()).code(code).name(req.name);
    if let Some(description) = req.description {
        builder.description(description);
    }
    if let Some(parent_id) = req.parent_id {
        builder.parent_id(parent_id);
    }
    let new_account = builder.build().expect("all mandatory fields set");
    let account = app.accounts().create(new_account).await?;
    Ok(Json(account.into_values()))
}

pub async fn find_account(
    State(app): State<Tasyir>,
    Path(id): Path<AccountId>,
) -> Result<Json<AccountValues>, ApiError> {
    let account = app.accounts().find_by_id(id).await?;
    Ok(Json(account.into_values()))
}

pub async fn update_account(
    State(app): State<Tasyir>,
    Path(id): Path<AccountId>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<AccountValues>, ApiError> {
    let mut update = AccountUpdate::default();
    if let Some(name) = req.name {
        update.name(name);
    }
    update.description(req.description);
    if let Some(status) = req.status {
        update.status(status);
    }
    let account = app.accounts().update(id, update).await?;
    Ok(Json(account.into_values()))
}
