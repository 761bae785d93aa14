//! Command definitions and dispatch onto [`DatasetApi`].

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use x1_client::{DatasetApi, HttpClient};
use x1_core::dataset::{
    BasicIdParams, DatasetIdParams, DatasetParams, ExportParams, GetPresignedParams, ListParams,
    UploadParams,
};
use x1_core::types::DbId;

use crate::poll;

#[derive(Debug, Parser)]
#[command(name = "x1", version, about = "Dataset operations against an X1 backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List datasets.
    Datasets {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Filter by dataset name.
        #[arg(long)]
        name: Option<String>,
    },
    /// List the data items of a dataset.
    Data {
        dataset_id: DbId,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Show one data item.
    Info { id: DbId },
    /// Show annotation status counts of a dataset.
    Stats { dataset_id: DbId },
    /// Generate a presigned upload URL for a file.
    Presign { dataset_id: DbId, file_name: String },
    /// Submit an upload job and wait for it to finish.
    Upload {
        dataset_id: DbId,
        file_url: String,
        /// Seconds between status lookups, at least 1.
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
        poll_secs: u64,
    },
    /// Submit an export job and wait for it to finish.
    Export {
        dataset_id: DbId,
        /// Result set to export, e.g. `GROUND_TRUTH`.
        #[arg(long)]
        select: Option<String>,
        /// Seconds between status lookups, at least 1.
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
        poll_secs: u64,
    },
    /// Show object-storage credentials.
    Minio,
}

/// Execute one command and return its result as JSON for printing.
pub async fn run<C: HttpClient>(
    api: &DatasetApi<C>,
    command: Command,
    signal: &CancellationToken,
) -> anyhow::Result<serde_json::Value> {
    let output = match command {
        Command::Datasets { page, size, name } => {
            let params = ListParams {
                page_no: page,
                page_size: size,
                name,
                ..ListParams::default()
            };
            serde_json::to_value(api.dataset_list(&params).await?)?
        }
        Command::Data {
            dataset_id,
            page,
            size,
        } => {
            let params = DatasetParams {
                page_no: page,
                page_size: size,
                ..DatasetParams::for_dataset(dataset_id)
            };
            serde_json::to_value(api.data_list(&params).await?)?
        }
        Command::Info { id } => serde_json::to_value(api.data_detail(&BasicIdParams { id }).await?)?,
        Command::Stats { dataset_id } => serde_json::to_value(
            api.annotation_status_statistics(&DatasetIdParams { dataset_id })
                .await?,
        )?,
        Command::Presign {
            dataset_id,
            file_name,
        } => {
            let params = GetPresignedParams {
                dataset_id,
                file_name,
            };
            serde_json::to_value(api.generate_presigned_url(&params).await?)?
        }
        Command::Upload {
            dataset_id,
            file_url,
            poll_secs,
        } => {
            let params = UploadParams {
                dataset_id,
                file_url,
                source: None,
                data_format: None,
                result_type: None,
                content_type: None,
            };
            let serial_number = api.upload_dataset(&params, Some(signal.clone())).await?;
            tracing::info!(%serial_number, "Upload submitted");
            let records = poll::wait_for_upload(
                api,
                &serial_number,
                Duration::from_secs(poll_secs),
                signal,
            )
            .await?;
            serde_json::to_value(records)?
        }
        Command::Export {
            dataset_id,
            select,
            poll_secs,
        } => {
            let params = ExportParams {
                dataset_id,
                data_ids: None,
                select,
                select_model_run_ids: None,
                data_format: None,
            };
            let serial_number = api
                .export_data(&params)
                .await?
                .context("export did not return a serial number")?;
            tracing::info!(%serial_number, "Export submitted");
            let records = poll::wait_for_export(
                api,
                &serial_number,
                Duration::from_secs(poll_secs),
                signal,
            )
            .await?;
            serde_json::to_value(records)?
        }
        Command::Minio => serde_json::to_value(api.minio_info().await?)?,
    };
    Ok(output)
}
