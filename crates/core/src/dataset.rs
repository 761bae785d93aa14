//! Request and response models for the dataset and data endpoints.
//!
//! Every type here is a plain record mirroring the JSON exchanged with the
//! backend (`camelCase` on the wire). Optional fields are omitted from
//! serialized requests when `None` so the server applies its own defaults.

use serde::{Deserialize, Serialize};

use crate::ontology::DatasetType;
use crate::types::{DbId, Timestamp};

/// Default page number used by the paged listing endpoints.
pub const DEFAULT_PAGE_NO: u32 = 1;

/// Default page size used by the paged listing endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ---------------------------------------------------------------------------
// Shared parameter shapes
// ---------------------------------------------------------------------------

/// A single entity id, interpolated into `/{prefix}/{op}/{id}` paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicIdParams {
    pub id: DbId,
}

/// Scope a request to one dataset (`?datasetId=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetIdParams {
    pub dataset_id: DbId,
}

/// Sort direction accepted by the paged endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

// ---------------------------------------------------------------------------
// Dataset-level requests
// ---------------------------------------------------------------------------

/// Query for `GET /dataset/findByPage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page_no: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asc_or_desc: Option<SortOrder>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<DatasetType>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page_no: DEFAULT_PAGE_NO,
            page_size: DEFAULT_PAGE_SIZE,
            name: None,
            sort_field: None,
            asc_or_desc: None,
            dataset_type: None,
        }
    }
}

/// Body for `POST /dataset/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    pub name: String,
    #[serde(rename = "type")]
    pub dataset_type: DatasetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for `POST /dataset/update/{id}`. The id is also carried in the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDatasetParams {
    pub id: DbId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Data-level requests
// ---------------------------------------------------------------------------

/// Query for `GET /data/findByPage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetParams {
    pub page_no: u32,
    pub page_size: u32,
    pub dataset_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_status: Option<AnnotationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asc_or_desc: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_end_time: Option<String>,
}

impl DatasetParams {
    /// First page of a dataset's items with server-side defaults otherwise.
    pub fn for_dataset(dataset_id: DbId) -> Self {
        Self {
            page_no: DEFAULT_PAGE_NO,
            page_size: DEFAULT_PAGE_SIZE,
            dataset_id,
            name: None,
            annotation_status: None,
            sort_field: None,
            asc_or_desc: None,
            create_start_time: None,
            create_end_time: None,
        }
    }
}

/// Body for `POST /data/deleteBatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteBatchParams {
    pub ids: Vec<DbId>,
}

/// Body for `POST /data/upload` when registering an already-stored file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertUploadDataParams {
    pub file_url: String,
    pub dataset_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<DataFormat>,
}

/// Body for `POST /data/uploadCompressed` (zipped point-cloud scenes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPointCloudParams {
    pub file_url: String,
    pub dataset_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<DataFormat>,
}

/// Body for `POST /data/upload` when submitting an asynchronous upload job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadParams {
    pub dataset_id: DbId,
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<DataFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Archive layout of uploaded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataFormat {
    Xtreme1,
    Coco,
}

/// Body for `POST /data/frames/combine` and `POST /data/frames/remove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeFrameParams {
    pub dataset_id: DbId,
    pub data_ids: Vec<DbId>,
}

/// Body for `POST /data/frames/merge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeFrameParams {
    pub dataset_id: DbId,
    pub frame_ids: Vec<DbId>,
}

/// Query for `GET /data/frames/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFrameParams {
    pub dataset_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_series_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_no: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Unit of work claimed by an annotation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotateDataType {
    SingleData,
    Scenario,
}

/// Body for `POST /data/annotate` and `POST /data/annotateWithModel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeRecordParams {
    pub dataset_id: DbId,
    pub data_ids: Vec<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<AnnotateDataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<DbId>,
}

/// Body for `POST /data/unLock/{id}`; `id` is the lock record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockParams {
    pub id: DbId,
}

/// Query for `GET /data/export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    pub dataset_id: DbId,
    /// Comma-separated data ids; absent exports the whole dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ids: Option<String>,
    /// Which result sets to include (e.g. `GROUND_TRUTH`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    /// Comma-separated model run ids whose results are exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_model_run_ids: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<DataFormat>,
}

/// Query carrying comma-joined serial numbers of asynchronous jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialNumbersParams {
    pub serial_numbers: String,
}

impl SerialNumbersParams {
    /// Join several serial numbers the way the backend expects them.
    pub fn join<S: AsRef<str>>(serial_numbers: &[S]) -> Self {
        let joined = serial_numbers
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        Self {
            serial_numbers: joined,
        }
    }
}

/// Query for `GET /data/generatePresignedUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPresignedParams {
    pub dataset_id: DbId,
    pub file_name: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Paged result envelope returned by every `findByPage` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_no: u32,
    pub page_size: u32,
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

/// `GET /dataset/findByPage` result.
pub type DatasetListGetResultModel = Page<DatasetListItem>;

/// `GET /data/findByPage` result.
pub type DatasetGetResultModel = Page<DatasetItem>;

/// One dataset as listed on the dataset overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetListItem {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub dataset_type: DatasetType,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of data items in the dataset.
    #[serde(default)]
    pub item_count: u64,
    #[serde(default)]
    pub annotated_count: u64,
    #[serde(default)]
    pub not_annotated_count: u64,
    #[serde(default)]
    pub invalid_count: u64,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Annotation progress of a single data item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationStatus {
    Annotated,
    NotAnnotated,
    Invalid,
}

/// One data item (image, point cloud, or frame series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetItem {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub dataset_id: Option<DbId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub annotation_status: Option<AnnotationStatus>,
    #[serde(default)]
    pub locked_by: Option<DbId>,
    /// File references and per-sensor metadata; shape depends on dataset type.
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// `GET /data/frames/list` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameListResult {
    #[serde(default)]
    pub list: Vec<FrameItem>,
}

/// A frame series and the data items grouped under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameItem {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub data_ids: Vec<DbId>,
}

/// Object-storage credentials for direct uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinioInfo {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Presigned object-storage URLs for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePresignedParams {
    /// Permanent URL of the object once uploaded.
    pub access_url: String,
    /// Time-limited URL accepting a `PUT` of the object body.
    pub presigned_url: String,
}

/// Counts per annotation status for one dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationStatusStatistics {
    #[serde(default)]
    pub annotated_count: u64,
    #[serde(default)]
    pub not_annotated_count: u64,
    #[serde(default)]
    pub invalid_count: u64,
}

impl AnnotationStatusStatistics {
    pub fn total(&self) -> u64 {
        self.annotated_count
            .saturating_add(self.not_annotated_count)
            .saturating_add(self.invalid_count)
    }
}

// ---------------------------------------------------------------------------
// Asynchronous job records
// ---------------------------------------------------------------------------

/// Server-side progress of an upload job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadStatus {
    Unstarted,
    Downloading,
    Downloaded,
    Parsing,
    ParseCompleted,
    Failed,
    #[serde(other)]
    Unknown,
}

impl UploadStatus {
    /// Whether the job has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::ParseCompleted | Self::Failed)
    }
}

/// Upload job record, looked up by serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseUploadRecord {
    #[serde(default)]
    pub id: Option<DbId>,
    pub serial_number: String,
    #[serde(default)]
    pub file_name: Option<String>,
    pub status: UploadStatus,
    #[serde(default)]
    pub total_file_size: Option<u64>,
    #[serde(default)]
    pub downloaded_file_size: Option<u64>,
    #[serde(default)]
    pub total_data_num: Option<u64>,
    #[serde(default)]
    pub parsed_data_num: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Server-side progress of an export job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportStatus {
    Unstarted,
    Generating,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ExportStatus {
    /// Whether the job has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Export job record, looked up by serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFileRecord {
    pub serial_number: String,
    #[serde(default)]
    pub file_name: Option<String>,
    /// Download location once the export has completed.
    #[serde(default)]
    pub file_path: Option<String>,
    pub status: ExportStatus,
    #[serde(default)]
    pub generated_num: Option<u64>,
    #[serde(default)]
    pub total_num: Option<u64>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
