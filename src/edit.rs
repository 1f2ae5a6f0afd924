use crate::errors::AppError;
use crate::models::{DailyRecord, EditRequest};
use crate::storage::RecordStore;
use crate::weather::{lookup_or_unknown, WeatherLookup};
use tracing::info;

/// Validates a day's edit, attaches that day's weather and stores it,
/// replacing whatever was recorded for the date before.
pub async fn submit_edit(
    store: &RecordStore,
    weather: &dyn WeatherLookup,
    request: EditRequest,
) -> Result<DailyRecord, AppError> {
    let (tip_total, delivery_count) = validate(&request)?;

    let reading = lookup_or_unknown(weather, request.date).await;
    let record = DailyRecord::new(request.date, tip_total, delivery_count, reading);

    store.upsert(record.clone()).await?;
    info!(
        "recorded {}: {tip_total:.2} over {delivery_count} deliveries (weather known: {})",
        record.date,
        reading.is_known()
    );
    Ok(record)
}

fn validate(request: &EditRequest) -> Result<(f64, u32), AppError> {
    if !request.tip_total.is_finite() || request.tip_total < 0.0 {
        return Err(AppError::bad_request("tip_total must be a non-negative amount"));
    }
    let delivery_count = u32::try_from(request.delivery_count)
        .ok()
        .filter(|count| *count >= 1)
        .ok_or_else(|| AppError::bad_request("delivery_count must be at least 1"))?;

    Ok((request.tip_total, delivery_count))
}
