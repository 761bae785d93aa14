//! Polling of asynchronous upload and export jobs.
//!
//! Both jobs are started by one request that yields a serial number; their
//! progress is then read back by serial number until every record reaches a
//! terminal status.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use x1_client::{ApiError, DatasetApi, HttpClient};
use x1_core::dataset::{ExportFileRecord, ResponseUploadRecord, SerialNumbersParams};

/// Default delay between two status lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Consecutive lookups returning no record before the serial number is
/// treated as unknown.
pub const MAX_EMPTY_LOOKUPS: u32 = 5;

/// Errors that end a polling loop.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server kept returning no record for the serial number.
    #[error("No job record found for serial number {serial_number} after {lookups} lookups")]
    NotFound { serial_number: String, lookups: u32 },
}

/// Poll upload records until all of them are finished.
///
/// The signal is forwarded to every lookup and also interrupts the wait
/// between lookups.
pub async fn wait_for_upload<C: HttpClient>(
    api: &DatasetApi<C>,
    serial_number: &str,
    interval: Duration,
    signal: &CancellationToken,
) -> Result<Vec<ResponseUploadRecord>, PollError> {
    let mut empty_lookups = 0;
    loop {
        let records = api
            .upload_records(serial_number, Some(signal.clone()))
            .await?;
        if records.is_empty() {
            empty_lookups = count_empty(empty_lookups, serial_number)?;
        } else if records.iter().all(|r| r.status.is_finished()) {
            return Ok(records);
        } else {
            empty_lookups = 0;
        }
        for record in &records {
            tracing::info!(
                serial_number = %record.serial_number,
                status = ?record.status,
                parsed = record.parsed_data_num,
                total = record.total_data_num,
                "Upload in progress"
            );
        }
        pause(interval, signal).await?;
    }
}

/// Poll export records until all of them are finished.
///
/// The export lookup endpoint takes no cancellation signal, so a lookup
/// already in flight runs to completion; the signal is checked before each
/// lookup and interrupts the wait between lookups.
pub async fn wait_for_export<C: HttpClient>(
    api: &DatasetApi<C>,
    serial_number: &str,
    interval: Duration,
    signal: &CancellationToken,
) -> Result<Vec<ExportFileRecord>, PollError> {
    let params = SerialNumbersParams::join(&[serial_number]);
    let mut empty_lookups = 0;
    loop {
        if signal.is_cancelled() {
            return Err(ApiError::Cancelled.into());
        }
        let records = api.export_records(&params).await?;
        if records.is_empty() {
            empty_lookups = count_empty(empty_lookups, serial_number)?;
        } else if records.iter().all(|r| r.status.is_finished()) {
            return Ok(records);
        } else {
            empty_lookups = 0;
        }
        for record in &records {
            tracing::info!(
                serial_number = %record.serial_number,
                status = ?record.status,
                generated = record.generated_num,
                total = record.total_num,
                "Export in progress"
            );
        }
        pause(interval, signal).await?;
    }
}

fn count_empty(empty_lookups: u32, serial_number: &str) -> Result<u32, PollError> {
    let lookups = empty_lookups + 1;
    if lookups >= MAX_EMPTY_LOOKUPS {
        return Err(PollError::NotFound {
            serial_number: serial_number.to_string(),
            lookups,
        });
    }
    tracing::debug!(serial_number, lookups, "No job record yet");
    Ok(lookups)
}

async fn pause(interval: Duration, signal: &CancellationToken) -> Result<(), ApiError> {
    tokio::select! {
        biased;
        _ = signal.cancelled() => Err(ApiError::Cancelled),
        _ = tokio::time::sleep(interval) => Ok(()),
    }
}
