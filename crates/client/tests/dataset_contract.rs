//! Contract tests for the dataset/data API facade.
//!
//! A recording [`HttpClient`] captures every descriptor the facade builds so
//! each operation can be checked for verb, path, forwarded params, the
//! cancel-token exemption flag, and signal forwarding.

use std::collections::VecDeque;
use std::sync::Mutex;

use assert_matches::assert_matches;
use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use x1_client::{ApiError, DatasetApi, HttpClient, Method, RequestDescriptor};
use x1_core::dataset::{
    AnnotateDataType, BasicIdParams, CreateParams, DatasetIdParams, DatasetParams,
    DeleteBatchParams, ExportParams, ExportStatus, GetFrameParams, GetPresignedParams,
    InsertPointCloudParams, InsertUploadDataParams, ListParams, MakeFrameParams,
    MergeFrameParams, SerialNumbersParams, TakeRecordParams, UnlockParams, UpdateDatasetParams,
    UploadParams, UploadStatus,
};
use x1_core::ontology::DatasetType;

// ---------------------------------------------------------------------------
// Recording client
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingClient {
    requests: Mutex<Vec<RequestDescriptor>>,
    responses: Mutex<VecDeque<Result<serde_json::Value, ApiError>>>,
}

impl RecordingClient {
    fn respond_with(self, payload: serde_json::Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(payload));
        self
    }

    fn fail_with(self, err: ApiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn request(&self, request: RequestDescriptor) -> Result<serde_json::Value, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(serde_json::Value::Null))
    }
}

fn api_with(payload: serde_json::Value) -> DatasetApi<RecordingClient> {
    DatasetApi::new(RecordingClient::default().respond_with(payload))
}

/// The single request recorded by the facade.
fn only_request(api: &DatasetApi<RecordingClient>) -> RequestDescriptor {
    let requests = api.client().requests.lock().unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one outbound request");
    requests[0].clone()
}

fn assert_request(
    req: &RequestDescriptor,
    method: Method,
    url: &str,
    params: Option<serde_json::Value>,
) {
    assert_eq!(req.method, method, "method for {url}");
    assert_eq!(req.url, url);
    assert_eq!(req.params, params, "params for {url}");
    assert!(
        req.headers.ignore_cancel_token,
        "ignore_cancel_token must be set on {url}"
    );
}

// ---------------------------------------------------------------------------
// Test: dataset operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dataset_list_gets_find_by_page() {
    let api = api_with(json!({ "pageNo": 1, "pageSize": 10, "total": 0, "list": [] }));
    let params = ListParams {
        name: Some("street".to_string()),
        ..ListParams::default()
    };
    let page = api.dataset_list(&params).await.unwrap();
    assert_eq!(page.total, 0);
    assert_request(
        &only_request(&api),
        Method::Get,
        "/dataset/findByPage",
        Some(json!({ "pageNo": 1, "pageSize": 10, "name": "street" })),
    );
}

#[tokio::test]
async fn create_dataset_posts_body() {
    let api = api_with(json!({ "id": 9, "name": "lidar" }));
    let params = CreateParams {
        name: "lidar".to_string(),
        dataset_type: DatasetType::LidarFusion,
        description: None,
    };
    let item = api.create_dataset(&params).await.unwrap();
    assert_eq!(item.id, 9);
    assert_request(
        &only_request(&api),
        Method::Post,
        "/dataset/create",
        Some(json!({ "name": "lidar", "type": "LIDAR_FUSION" })),
    );
}

#[tokio::test]
async fn delete_dataset_interpolates_id_without_params() {
    let api = api_with(json!(true));
    api.delete_dataset(&BasicIdParams { id: 42 }).await.unwrap();
    assert_request(&only_request(&api), Method::Post, "/dataset/delete/42", None);
}

#[tokio::test]
async fn update_dataset_sends_id_in_path_and_body() {
    let api = api_with(json!({ "id": 5, "name": "renamed" }));
    let params = UpdateDatasetParams {
        id: 5,
        name: "renamed".to_string(),
    };
    api.update_dataset(&params).await.unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/dataset/update/5",
        Some(json!({ "id": 5, "name": "renamed" })),
    );
}

#[tokio::test]
async fn dataset_detail_gets_dataset_info() {
    let api = api_with(json!({ "id": 3, "name": "cams", "type": "IMAGE" }));
    let item = api.dataset_detail(&BasicIdParams { id: 3 }).await.unwrap();
    assert_eq!(item.dataset_type, DatasetType::Image);
    assert_request(
        &only_request(&api),
        Method::Get,
        "/dataset/info/3",
        Some(json!({ "id": 3 })),
    );
}

#[tokio::test]
async fn minio_info_sends_no_params() {
    let api = api_with(json!({
        "accessKeyId": "ak",
        "secretAccessKey": "sk",
        "bucketName": "x1"
    }));
    let info = api.minio_info().await.unwrap();
    assert_eq!(info.bucket_name, "x1");
    assert_request(&only_request(&api), Method::Get, "/dataset/getMinioUserInfo", None);
}

#[tokio::test]
async fn ontology_exists_gets_by_dataset_id() {
    let api = api_with(json!(true));
    assert!(api
        .ontology_exists(&DatasetIdParams { dataset_id: 8 })
        .await
        .unwrap());
    assert_request(
        &only_request(&api),
        Method::Get,
        "/dataset/findOntologyIsExistByDatasetId",
        Some(json!({ "datasetId": 8 })),
    );
}

// ---------------------------------------------------------------------------
// Test: data item operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn data_list_gets_data_find_by_page() {
    let api = api_with(json!({ "pageNo": 1, "pageSize": 10, "total": 1, "list": [
        { "id": 11, "name": "frame_000.pcd" }
    ]}));
    let page = api.data_list(&DatasetParams::for_dataset(4)).await.unwrap();
    assert_eq!(page.list[0].id, 11);
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/findByPage",
        Some(json!({ "pageNo": 1, "pageSize": 10, "datasetId": 4 })),
    );
}

#[tokio::test]
async fn data_detail_gets_data_info() {
    let api = api_with(json!({ "id": 42, "name": "img.jpg" }));
    api.data_detail(&BasicIdParams { id: 42 }).await.unwrap();
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/info/42",
        Some(json!({ "id": 42 })),
    );
}

#[tokio::test]
async fn insert_upload_data_posts_upload() {
    let api = api_with(json!("1591955956348891136"));
    let params = InsertUploadDataParams {
        file_url: "https://minio/x1/a.zip".to_string(),
        dataset_id: 2,
        source: None,
        data_format: None,
    };
    let serial = api.insert_upload_data(&params).await.unwrap();
    assert_eq!(serial, "1591955956348891136");
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/upload",
        Some(json!({ "fileUrl": "https://minio/x1/a.zip", "datasetId": 2 })),
    );
}

#[tokio::test]
async fn insert_upload_point_cloud_posts_upload_compressed() {
    let api = api_with(json!("1591955956348891137"));
    let params = InsertPointCloudParams {
        file_url: "https://minio/x1/scene.zip".to_string(),
        dataset_id: 2,
        source: Some("LOCAL".to_string()),
        data_format: None,
    };
    api.insert_upload_point_cloud(&params).await.unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/uploadCompressed",
        Some(json!({
            "fileUrl": "https://minio/x1/scene.zip",
            "datasetId": 2,
            "source": "LOCAL"
        })),
    );
}

#[tokio::test]
async fn delete_batch_data_posts_ids() {
    let api = api_with(json!(3));
    api.delete_batch_data(&DeleteBatchParams { ids: vec![1, 2, 3] })
        .await
        .unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/deleteBatch",
        Some(json!({ "ids": [1, 2, 3] })),
    );
}

#[tokio::test]
async fn max_annotation_count_decodes_number() {
    let api = api_with(json!(17));
    let count = api
        .max_annotation_count(&DatasetIdParams { dataset_id: 6 })
        .await
        .unwrap();
    assert_eq!(count, 17);
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/selectMaxAnnotationCountByDatasetId",
        Some(json!({ "datasetId": 6 })),
    );
}

#[tokio::test]
async fn annotation_status_statistics_gets_by_dataset_id() {
    let api = api_with(json!({ "annotatedCount": 3, "notAnnotatedCount": 7 }));
    let stats = api
        .annotation_status_statistics(&DatasetIdParams { dataset_id: 6 })
        .await
        .unwrap();
    assert_eq!(stats.total(), 10);
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/getAnnotationStatusStatisticsByDatasetId",
        Some(json!({ "datasetId": 6 })),
    );
}

// ---------------------------------------------------------------------------
// Test: frame series operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn frame_series_operations_post_to_frames_paths() {
    let make = MakeFrameParams {
        dataset_id: 1,
        data_ids: vec![10, 11],
    };
    let expected_make = json!({ "datasetId": 1, "dataIds": [10, 11] });

    let api = api_with(json!({ "id": 20, "name": "seq-1", "dataIds": [10, 11] }));
    api.make_frame_series(&make).await.unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/frames/combine",
        Some(expected_make.clone()),
    );

    let api = api_with(json!(true));
    api.ungroup_frame_series(&make).await.unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/frames/remove",
        Some(expected_make),
    );

    let api = api_with(json!([20]));
    api.merge_frame(&MergeFrameParams {
        dataset_id: 1,
        frame_ids: vec![20, 21],
    })
    .await
    .unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/frames/merge",
        Some(json!({ "datasetId": 1, "frameIds": [20, 21] })),
    );
}

#[tokio::test]
async fn frame_list_gets_frames() {
    let api = api_with(json!({ "list": [{ "id": 20, "name": "seq-1", "dataIds": [10, 11] }] }));
    let params = GetFrameParams {
        dataset_id: 1,
        frame_series_id: None,
        page_no: None,
        page_size: None,
    };
    let frames = api.frame_list(&params).await.unwrap();
    assert_eq!(frames.list[0].data_ids, vec![10, 11]);
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/frames/list",
        Some(json!({ "datasetId": 1 })),
    );
}

// ---------------------------------------------------------------------------
// Test: locks and annotation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn locked_by_dataset_decodes_null_as_none() {
    let api = api_with(serde_json::Value::Null);
    let lock = api
        .locked_by_dataset(&DatasetIdParams { dataset_id: 2 })
        .await
        .unwrap();
    assert!(lock.is_none());
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/findLockRecordIdByDatasetId",
        Some(json!({ "datasetId": 2 })),
    );
}

#[tokio::test]
async fn unlock_interpolates_record_id() {
    let api = api_with(json!(true));
    api.unlock(&UnlockParams { id: 77 }).await.unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/unLock/77",
        Some(json!({ "id": 77 })),
    );
}

#[tokio::test]
async fn annotate_variants_post_take_record_params() {
    let params = TakeRecordParams {
        dataset_id: 3,
        data_ids: vec![5],
        data_type: Some(AnnotateDataType::SingleData),
        model_id: None,
    };
    let expected = json!({ "datasetId": 3, "dataIds": [5], "dataType": "SINGLE_DATA" });

    let api = api_with(json!({ "datasetId": 3, "dataIds": [5] }));
    api.annotate(&params).await.unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/annotate",
        Some(expected.clone()),
    );

    let api = api_with(json!(77));
    api.annotate_with_model(&params).await.unwrap();
    assert_request(
        &only_request(&api),
        Method::Post,
        "/data/annotateWithModel",
        Some(expected),
    );
}

// ---------------------------------------------------------------------------
// Test: export and upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_data_returns_serial_number() {
    let api = api_with(json!("1591955956348891136"));
    let params = ExportParams {
        dataset_id: 3,
        data_ids: None,
        select: Some("GROUND_TRUTH".to_string()),
        select_model_run_ids: None,
        data_format: None,
    };
    let serial = api.export_data(&params).await.unwrap();
    assert_eq!(serial.as_deref(), Some("1591955956348891136"));
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/export",
        Some(json!({ "datasetId": 3, "select": "GROUND_TRUTH" })),
    );
}

#[tokio::test]
async fn export_records_gets_by_serial_numbers() {
    let api = api_with(json!([{ "serialNumber": "s1", "status": "COMPLETED", "filePath": "/x.zip" }]));
    let records = api
        .export_records(&SerialNumbersParams::join(&["s1", "s2"]))
        .await
        .unwrap();
    assert_eq!(records[0].status, ExportStatus::Completed);
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/findExportRecordBySerialNumbers",
        Some(json!({ "serialNumbers": "s1,s2" })),
    );
}

#[tokio::test]
async fn generate_presigned_url_gets_with_file_name() {
    let api = api_with(json!({ "accessUrl": "https://a", "presignedUrl": "https://p" }));
    let params = GetPresignedParams {
        dataset_id: 3,
        file_name: "scene.zip".to_string(),
    };
    let urls = api.generate_presigned_url(&params).await.unwrap();
    assert_eq!(urls.presigned_url, "https://p");
    assert_request(
        &only_request(&api),
        Method::Get,
        "/data/generatePresignedUrl",
        Some(json!({ "datasetId": 3, "fileName": "scene.zip" })),
    );
}

#[tokio::test]
async fn upload_dataset_forwards_signal() {
    let api = api_with(json!("serial-1"));
    let params = UploadParams {
        dataset_id: 3,
        file_url: "https://a".to_string(),
        source: None,
        data_format: None,
        result_type: None,
        content_type: None,
    };
    let token = CancellationToken::new();
    let serial = api
        .upload_dataset(&params, Some(token.clone()))
        .await
        .unwrap();
    assert_eq!(serial, "serial-1");

    let req = only_request(&api);
    assert_request(
        &req,
        Method::Post,
        "/data/upload",
        Some(json!({ "datasetId": 3, "fileUrl": "https://a" })),
    );
    token.cancel();
    assert!(req.signal.expect("signal forwarded").is_cancelled());
}

#[tokio::test]
async fn upload_records_inlines_serial_numbers_without_signal() {
    let api = api_with(json!([{ "serialNumber": "a b", "status": "PARSING" }]));
    let records = api.upload_records("a b", None).await.unwrap();
    assert_eq!(records[0].status, UploadStatus::Parsing);

    let req = only_request(&api);
    assert_request(
        &req,
        Method::Get,
        "/data/findUploadRecordBySerialNumbers?serialNumbers=a b",
        None,
    );
    assert!(req.signal.is_none());
}

// ---------------------------------------------------------------------------
// Test: payloads of operations without a typed result
// ---------------------------------------------------------------------------

/// Operations with no typed result accept whatever the server answers.
#[tokio::test]
async fn untyped_result_operations_accept_any_payload() {
    let payloads = [
        json!("1591955956348891136"),
        json!({ "id": 1 }),
        json!([1, 2]),
        json!(false),
        serde_json::Value::Null,
    ];
    let params = TakeRecordParams {
        dataset_id: 3,
        data_ids: vec![5],
        data_type: None,
        model_id: None,
    };
    for payload in payloads {
        let api = api_with(payload.clone());
        assert!(
            api.annotate(&params).await.is_ok(),
            "annotate rejected payload {payload}"
        );

        let api = api_with(payload.clone());
        assert!(
            api.unlock(&UnlockParams { id: 1 }).await.is_ok(),
            "unlock rejected payload {payload}"
        );
    }
}

/// A failure still surfaces from an operation without a typed result.
#[tokio::test]
async fn untyped_result_operations_propagate_errors() {
    let api = DatasetApi::new(RecordingClient::default().fail_with(ApiError::Business {
        code: "DATA_LOCKED".to_string(),
        message: "Data is locked".to_string(),
    }));
    let result = api.unlock(&UnlockParams { id: 1 }).await;
    assert_matches!(result, Err(ApiError::Business { code, .. }) if code == "DATA_LOCKED");
}

// ---------------------------------------------------------------------------
// Test: error pass-through
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_errors_propagate_unchanged() {
    let api = DatasetApi::new(RecordingClient::default().fail_with(ApiError::Status {
        status: 503,
        body: "maintenance".to_string(),
    }));
    let result = api.minio_info().await;
    assert_matches!(
        result,
        Err(ApiError::Status { status: 503, body }) if body == "maintenance"
    );
}

#[tokio::test]
async fn unexpected_payload_shape_is_decode_error() {
    let api = api_with(json!({ "unexpected": true }));
    let result = api.upload_records("s1", None).await;
    assert_matches!(result, Err(ApiError::Decode(_)));
}
