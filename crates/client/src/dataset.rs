//! Typed facade over the `/dataset` and `/data` endpoints.
//!
//! Each method builds exactly one request through the injected
//! [`HttpClient`] and returns its result unchanged. Parameters are forwarded
//! verbatim as the query string (`GET`) or JSON body (`POST`); path ids are
//! interpolated without escaping.

use serde::de::IgnoredAny;
use tokio_util::sync::CancellationToken;
use x1_core::dataset::{
    AnnotationStatusStatistics, BasicIdParams, CreateParams, DatasetGetResultModel,
    DatasetIdParams, DatasetItem, DatasetListGetResultModel, DatasetListItem, DatasetParams,
    DeleteBatchParams, ExportFileRecord, ExportParams, FrameListResult, GetFrameParams,
    GetPresignedParams, InsertPointCloudParams, InsertUploadDataParams, ListParams,
    MakeFrameParams, MergeFrameParams, MinioInfo, ResponsePresignedParams, ResponseUploadRecord,
    SerialNumbersParams, TakeRecordParams, UnlockParams, UpdateDatasetParams, UploadParams,
};
use x1_core::types::DbId;

use crate::error::ApiError;
use crate::http::HttpClient;
use crate::request::{RequestDescriptor, DATASET_PREFIX, DATA_PREFIX};

/// Dataset and data API bound to one [`HttpClient`].
pub struct DatasetApi<C> {
    client: C,
}

impl<C: HttpClient> DatasetApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// `POST` for endpoints whose payload carries nothing the caller uses.
    /// Any successful payload is accepted and dropped.
    async fn post_discarding(&self, request: RequestDescriptor) -> Result<(), ApiError> {
        self.client.post::<IgnoredAny>(request).await?;
        Ok(())
    }

    // ---- datasets ----

    /// `GET /dataset/findByPage`: one page of datasets.
    pub async fn dataset_list(
        &self,
        params: &ListParams,
    ) -> Result<DatasetListGetResultModel, ApiError> {
        let request =
            RequestDescriptor::get(format!("{DATASET_PREFIX}/findByPage")).with_params(params)?;
        self.client.get(request).await
    }

    /// `POST /dataset/create`.
    pub async fn create_dataset(&self, params: &CreateParams) -> Result<DatasetItem, ApiError> {
        let request =
            RequestDescriptor::post(format!("{DATASET_PREFIX}/create")).with_params(params)?;
        self.client.post(request).await
    }

    /// `POST /dataset/delete/{id}`. Only the path carries the id.
    pub async fn delete_dataset(&self, params: &BasicIdParams) -> Result<(), ApiError> {
        let request = RequestDescriptor::post(format!("{DATASET_PREFIX}/delete/{}", params.id));
        self.post_discarding(request).await
    }

    /// `POST /dataset/update/{id}`: rename a dataset.
    pub async fn update_dataset(&self, params: &UpdateDatasetParams) -> Result<(), ApiError> {
        let request = RequestDescriptor::post(format!("{DATASET_PREFIX}/update/{}", params.id))
            .with_params(params)?;
        self.post_discarding(request).await
    }

    /// `GET /dataset/info/{id}`: dataset-level detail.
    pub async fn dataset_detail(&self, params: &BasicIdParams) -> Result<DatasetListItem, ApiError> {
        let request = RequestDescriptor::get(format!("{DATASET_PREFIX}/info/{}", params.id))
            .with_params(params)?;
        self.client.get(request).await
    }

    /// `GET /dataset/getMinioUserInfo`: object-storage credentials.
    pub async fn minio_info(&self) -> Result<MinioInfo, ApiError> {
        let request = RequestDescriptor::get(format!("{DATASET_PREFIX}/getMinioUserInfo"));
        self.client.get(request).await
    }

    /// `GET /dataset/findOntologyIsExistByDatasetId`.
    pub async fn ontology_exists(&self, params: &DatasetIdParams) -> Result<bool, ApiError> {
        let request =
            RequestDescriptor::get(format!("{DATASET_PREFIX}/findOntologyIsExistByDatasetId"))
                .with_params(params)?;
        self.client.get(request).await
    }

    // ---- data items ----

    /// `GET /data/findByPage`: one page of a dataset's items.
    pub async fn data_list(&self, params: &DatasetParams) -> Result<DatasetGetResultModel, ApiError> {
        let request =
            RequestDescriptor::get(format!("{DATA_PREFIX}/findByPage")).with_params(params)?;
        self.client.get(request).await
    }

    /// `GET /data/info/{id}`.
    pub async fn data_detail(&self, params: &BasicIdParams) -> Result<DatasetItem, ApiError> {
        let request = RequestDescriptor::get(format!("{DATA_PREFIX}/info/{}", params.id))
            .with_params(params)?;
        self.client.get(request).await
    }

    /// `POST /data/upload`: register an already-stored file, yielding the
    /// upload serial number.
    pub async fn insert_upload_data(
        &self,
        params: &InsertUploadDataParams,
    ) -> Result<String, ApiError> {
        let request =
            RequestDescriptor::post(format!("{DATA_PREFIX}/upload")).with_params(params)?;
        self.client.post(request).await
    }

    /// `POST /data/uploadCompressed`: register a compressed point-cloud archive.
    pub async fn insert_upload_point_cloud(
        &self,
        params: &InsertPointCloudParams,
    ) -> Result<(), ApiError> {
        let request =
            RequestDescriptor::post(format!("{DATA_PREFIX}/uploadCompressed")).with_params(params)?;
        self.post_discarding(request).await
    }

    /// `POST /data/deleteBatch`.
    pub async fn delete_batch_data(&self, params: &DeleteBatchParams) -> Result<(), ApiError> {
        let request =
            RequestDescriptor::post(format!("{DATA_PREFIX}/deleteBatch")).with_params(params)?;
        self.post_discarding(request).await
    }

    /// `GET /data/selectMaxAnnotationCountByDatasetId`.
    pub async fn max_annotation_count(&self, params: &DatasetIdParams) -> Result<i64, ApiError> {
        let request =
            RequestDescriptor::get(format!("{DATA_PREFIX}/selectMaxAnnotationCountByDatasetId"))
                .with_params(params)?;
        self.client.get(request).await
    }

    /// `GET /data/getAnnotationStatusStatisticsByDatasetId`.
    pub async fn annotation_status_statistics(
        &self,
        params: &DatasetIdParams,
    ) -> Result<AnnotationStatusStatistics, ApiError> {
        let request = RequestDescriptor::get(format!(
            "{DATA_PREFIX}/getAnnotationStatusStatisticsByDatasetId"
        ))
        .with_params(params)?;
        self.client.get(request).await
    }

    // ---- frame series ----

    /// `POST /data/frames/combine`: group data items into a frame series.
    pub async fn make_frame_series(&self, params: &MakeFrameParams) -> Result<(), ApiError> {
        let request =
            RequestDescriptor::post(format!("{DATA_PREFIX}/frames/combine")).with_params(params)?;
        self.post_discarding(request).await
    }

    /// `POST /data/frames/remove`: ungroup a frame series.
    pub async fn ungroup_frame_series(&self, params: &MakeFrameParams) -> Result<(), ApiError> {
        let request =
            RequestDescriptor::post(format!("{DATA_PREFIX}/frames/remove")).with_params(params)?;
        self.post_discarding(request).await
    }

    /// `POST /data/frames/merge`.
    pub async fn merge_frame(&self, params: &MergeFrameParams) -> Result<(), ApiError> {
        let request =
            RequestDescriptor::post(format!("{DATA_PREFIX}/frames/merge")).with_params(params)?;
        self.post_discarding(request).await
    }

    /// `GET /data/frames/list`.
    pub async fn frame_list(&self, params: &GetFrameParams) -> Result<FrameListResult, ApiError> {
        let request =
            RequestDescriptor::get(format!("{DATA_PREFIX}/frames/list")).with_params(params)?;
        self.client.get(request).await
    }

    // ---- locks and annotation ----

    /// `GET /data/findLockRecordIdByDatasetId`: the caller's lock record, if any.
    pub async fn locked_by_dataset(
        &self,
        params: &DatasetIdParams,
    ) -> Result<Option<DbId>, ApiError> {
        let request = RequestDescriptor::get(format!("{DATA_PREFIX}/findLockRecordIdByDatasetId"))
            .with_params(params)?;
        self.client.get(request).await
    }

    /// `POST /data/unLock/{id}`.
    pub async fn unlock(&self, params: &UnlockParams) -> Result<(), ApiError> {
        let request = RequestDescriptor::post(format!("{DATA_PREFIX}/unLock/{}", params.id))
            .with_params(params)?;
        self.post_discarding(request).await
    }

    /// `POST /data/annotate`: claim data for manual annotation.
    pub async fn annotate(&self, params: &TakeRecordParams) -> Result<(), ApiError> {
        let request =
            RequestDescriptor::post(format!("{DATA_PREFIX}/annotate")).with_params(params)?;
        self.post_discarding(request).await
    }

    /// `POST /data/annotateWithModel`: claim data for model-assisted annotation.
    pub async fn annotate_with_model(&self, params: &TakeRecordParams) -> Result<(), ApiError> {
        let request = RequestDescriptor::post(format!("{DATA_PREFIX}/annotateWithModel"))
            .with_params(params)?;
        self.post_discarding(request).await
    }

    // ---- export ----

    /// `GET /data/export`: start an export job, yielding its serial number.
    pub async fn export_data(&self, params: &ExportParams) -> Result<Option<String>, ApiError> {
        let request =
            RequestDescriptor::get(format!("{DATA_PREFIX}/export")).with_params(params)?;
        self.client.get(request).await
    }

    /// `GET /data/findExportRecordBySerialNumbers`.
    pub async fn export_records(
        &self,
        params: &SerialNumbersParams,
    ) -> Result<Vec<ExportFileRecord>, ApiError> {
        let request =
            RequestDescriptor::get(format!("{DATA_PREFIX}/findExportRecordBySerialNumbers"))
                .with_params(params)?;
        self.client.get(request).await
    }

    // ---- upload ----

    /// `GET /data/generatePresignedUrl`.
    pub async fn generate_presigned_url(
        &self,
        params: &GetPresignedParams,
    ) -> Result<ResponsePresignedParams, ApiError> {
        let request = RequestDescriptor::get(format!("{DATA_PREFIX}/generatePresignedUrl"))
            .with_params(params)?;
        self.client.get(request).await
    }

    /// `POST /data/upload`: start an upload job, yielding its serial number.
    pub async fn upload_dataset(
        &self,
        params: &UploadParams,
        signal: Option<CancellationToken>,
    ) -> Result<String, ApiError> {
        let request = RequestDescriptor::post(format!("{DATA_PREFIX}/upload"))
            .with_params(params)?
            .with_signal(signal);
        self.client.post(request).await
    }

    /// `GET /data/findUploadRecordBySerialNumbers`.
    ///
    /// `serial_numbers` is appended to the URL as given; join several with
    /// commas.
    pub async fn upload_records(
        &self,
        serial_numbers: &str,
        signal: Option<CancellationToken>,
    ) -> Result<Vec<ResponseUploadRecord>, ApiError> {
        let request = RequestDescriptor::get(format!(
            "{DATA_PREFIX}/findUploadRecordBySerialNumbers?serialNumbers={serial_numbers}"
        ))
        .with_signal(signal);
        self.client.get(request).await
    }
}
