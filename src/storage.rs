use crate::models::DailyRecord;
use chrono::NaiveDate;
use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::fs;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data file i/o: {0}")]
    Io(#[from] io::Error),
    #[error("data file format: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV-backed table of daily records, keyed by date.
///
/// Every call reads the file afresh; nothing is cached between calls. Writes
/// replace the whole file through a sibling temporary file and a rename, so a
/// failed write leaves the previous table in place.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory holding the data file.
    pub async fn prepare(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Rows in file order. A missing file is an empty table.
    pub async fn load(&self) -> Result<Vec<DailyRecord>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => parse_records(&bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => {
                error!("failed to read data file {}: {err}", self.path.display());
                Err(err.into())
            }
        }
    }

    pub async fn upsert(&self, record: DailyRecord) -> Result<(), StoreError> {
        let date = record.date;
        let mut records = self.load().await?;
        records.push(record);
        let records = keep_last_per_date(records);

        self.persist(&records).await?;
        info!("saved {date} ({} rows)", records.len());
        Ok(())
    }

    /// The whole table in the persisted format, for download.
    pub async fn export(&self) -> Result<Vec<u8>, StoreError> {
        let records = self.load().await?;
        write_records(&records)
    }

    async fn persist(&self, records: &[DailyRecord]) -> Result<(), StoreError> {
        let payload = write_records(records)?;
        let tmp = temp_path(&self.path);

        if let Err(err) = fs::write(&tmp, payload).await {
            discard_temp(&tmp).await;
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&tmp, &self.path).await {
            discard_temp(&tmp).await;
            return Err(err.into());
        }
        Ok(())
    }
}

async fn discard_temp(tmp: &Path) {
    match fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!("could not remove temporary file {}: {err}", tmp.display()),
    }
}

/// Drops every row whose date reappears later in the sequence. Survivors keep
/// their relative order.
pub fn keep_last_per_date(records: Vec<DailyRecord>) -> Vec<DailyRecord> {
    let mut seen: HashSet<NaiveDate> = HashSet::with_capacity(records.len());
    let mut kept: Vec<DailyRecord> = records
        .into_iter()
        .rev()
        .filter(|record| seen.insert(record.date))
        .collect();
    kept.reverse();
    kept
}

fn parse_records(bytes: &[u8]) -> Result<Vec<DailyRecord>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let mut records = Vec::new();
    for row in reader.deserialize::<DailyRecord>() {
        records.push(row?);
    }
    Ok(records)
}

fn write_records(records: &[DailyRecord]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    // Written by hand so an empty table still gets its header row.
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|err| StoreError::Io(err.into_error()))
}

pub const HEADER: [&str; 5] = [
    "date",
    "tip_total",
    "delivery_count",
    "temperature",
    "precipitation",
];

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherReading;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(d: NaiveDate, tips: f64, deliveries: u32) -> DailyRecord {
        DailyRecord::new(
            d,
            tips,
            deliveries,
            WeatherReading {
                temperature: Some(4.5),
                precipitation: Some(0.2),
            },
        )
    }

    fn store_in(dir: &tempfile::TempDir) -> RecordStore {
        RecordStore::new(dir.path().join("tips.csv"))
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn single_upsert_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let input = DailyRecord {
            date: date(2024, 3, 5),
            tip_total: 42.50,
            delivery_count: 10,
            temperature: Some(12.3),
            precipitation: Some(0.0),
        };

        store.upsert(input.clone()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), vec![input]);
    }

    #[tokio::test]
    async fn second_upsert_for_same_date_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let day = date(2024, 3, 5);

        store.upsert(record(day, 10.0, 3)).await.unwrap();
        store.upsert(record(date(2024, 3, 6), 7.0, 2)).await.unwrap();
        store.upsert(record(day, 55.0, 12)).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        let for_day: Vec<_> = loaded.iter().filter(|r| r.date == day).collect();
        assert_eq!(for_day, vec![&record(day, 55.0, 12)]);
        // Replaced row moves to the end, as a fresh append would.
        assert_eq!(loaded.last().unwrap().date, day);
    }

    #[tokio::test]
    async fn many_upserts_keep_last_value_per_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let days = [1, 2, 1, 3, 2, 1];

        for (i, d) in days.iter().enumerate() {
            store
                .upsert(record(date(2024, 5, *d), i as f64, i as u32 + 1))
                .await
                .unwrap();
        }

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 3);
        let tips_for = |d: u32| {
            loaded
                .iter()
                .find(|r| r.date == date(2024, 5, d))
                .map(|r| r.tip_total)
        };
        assert_eq!(tips_for(1), Some(5.0));
        assert_eq!(tips_for(2), Some(4.0));
        assert_eq!(tips_for(3), Some(3.0));
    }

    #[tokio::test]
    async fn unknown_weather_is_an_empty_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let input = DailyRecord::new(date(2024, 3, 6), 12.0, 4, WeatherReading::UNKNOWN);

        store.upsert(input.clone()).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            text,
            "date,tip_total,delivery_count,temperature,precipitation\n2024-03-06,12.0,4,,\n"
        );
        assert_eq!(store.load().await.unwrap(), vec![input]);
    }

    #[tokio::test]
    async fn export_of_fresh_store_is_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let bytes = store.export().await.unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "date,tip_total,delivery_count,temperature,precipitation\n"
        );
    }

    #[tokio::test]
    async fn export_matches_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.upsert(record(date(2024, 1, 2), 30.0, 8)).await.unwrap();

        let exported = store.export().await.unwrap();
        assert_eq!(exported, std::fs::read(store.path()).unwrap());
    }

    #[tokio::test]
    async fn hand_edited_file_with_spaces_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            "date, tip_total, delivery_count, temperature, precipitation\n2024-02-01, 15.5, 3, , 1.2\n",
        )
        .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded[0].tip_total, 15.5);
        assert_eq!(loaded[0].temperature, None);
        assert_eq!(loaded[0].precipitation, Some(1.2));
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            "date,tip_total,delivery_count,temperature,precipitation\nyesterday,abc,1,,\n",
        )
        .unwrap();

        assert!(matches!(store.load().await, Err(StoreError::Csv(_))));
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.upsert(record(date(2024, 1, 1), 10.0, 2)).await.unwrap();
        let before = std::fs::read(store.path()).unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(temp_path(store.path())).unwrap();
        let result = store.upsert(record(date(2024, 1, 2), 20.0, 4)).await;

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn discard_temp_removes_leftover_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("tips.csv.tmp");
        std::fs::write(&tmp, "partial").unwrap();

        discard_temp(&tmp).await;
        assert!(!tmp.exists());

        // Already gone: nothing to do, nothing to report.
        discard_temp(&tmp).await;
        assert!(!tmp.exists());
    }

    #[tokio::test]
    async fn prepare_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("nested/deeper/tips.csv"));
        store.prepare().await.unwrap();
        store.upsert(record(date(2024, 1, 1), 1.0, 1)).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[test]
    fn keep_last_per_date_preserves_order_of_survivors() {
        let rows = vec![
            record(date(2024, 1, 1), 1.0, 1),
            record(date(2024, 1, 2), 2.0, 1),
            record(date(2024, 1, 1), 3.0, 1),
            record(date(2024, 1, 3), 4.0, 1),
        ];
        let kept: Vec<f64> = keep_last_per_date(rows).iter().map(|r| r.tip_total).collect();
        assert_eq!(kept, vec![2.0, 3.0, 4.0]);
    }
}
