use crate::calendar::{build_calendar, first_of_month};
use crate::edit::submit_edit;
use crate::errors::AppError;
use crate::models::{DailyRecord, EditRequest, MonthCalendar, MonthQuery, StatsResponse};
use crate::state::AppState;
use crate::stats::{build_stats, build_summary};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use chrono::{Datelike, Local};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, AppError> {
    let (year, month) = resolve_month(&query)?;
    let records = state.store.load().await?;
    let calendar = build_calendar(&records, year, month)?;
    let summary = build_summary(&records, year, month, state.config.target_days);
    Ok(Html(render_index(&calendar, &summary)))
}

pub async fn save_day_form(
    State(state): State<AppState>,
    Form(request): Form<EditRequest>,
) -> Result<Redirect, AppError> {
    let record = apply_edit(&state, request).await?;
    Ok(Redirect::to(&format!(
        "/?year={}&month={}",
        record.date.year(),
        record.date.month()
    )))
}

pub async fn list_records(State(state): State<AppState>) -> Result<Json<Vec<DailyRecord>>, AppError> {
    Ok(Json(state.store.load().await?))
}

pub async fn save_record(
    State(state): State<AppState>,
    Json(request): Json<EditRequest>,
) -> Result<Json<DailyRecord>, AppError> {
    let record = apply_edit(&state, request).await?;
    Ok(Json(record))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let (year, month) = resolve_month(&query)?;
    let records = state.store.load().await?;
    Ok(Json(build_stats(&records, year, month, state.config.target_days)))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthCalendar>, AppError> {
    let (year, month) = resolve_month(&query)?;
    let records = state.store.load().await?;
    Ok(Json(build_calendar(&records, year, month)?))
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.store.export().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"tips.csv\""),
        ],
        body,
    ))
}

async fn apply_edit(state: &AppState, request: EditRequest) -> Result<DailyRecord, AppError> {
    let _guard = state.edit_lock.lock().await;
    submit_edit(&state.store, state.weather.as_ref(), request).await
}

fn resolve_month(query: &MonthQuery) -> Result<(i32, u32), AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());
    first_of_month(year, month)?;
    Ok((year, month))
}
