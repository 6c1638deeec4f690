mod helpers;

use std::sync::Arc;

use helpers::{
    cloud_router, glb_with_accessor_bounds, local_router, two_triangle_glb, FailingWrites,
};
use modshop_core::{AppError, AssetCategory, ModelFormat, StorageAddress, StorageBackend};
use modshop_processing::{
    delete_asset_files, AssetIngestor, IngestRequest, UploadLimits, UploadedFile,
};
use modshop_storage::{Storage, StorageRouter};

fn request(model: UploadedFile) -> IngestRequest {
    IngestRequest {
        name: "Nissan GTR".to_string(),
        description: Some("R35".to_string()),
        model: Some(model),
        thumbnail: Some(UploadedFile::new("gtr.png", "image/png", b"png-bytes".to_vec())),
        scale_override: None,
    }
}

fn ingestor(router: &StorageRouter) -> AssetIngestor {
    AssetIngestor::new(Arc::new(router.clone()), UploadLimits::default())
}

#[tokio::test]
async fn ingests_glb_end_to_end() {
    let (router, temp_dir) = local_router();
    let glb = two_triangle_glb();

    let asset = ingestor(&router)
        .ingest(request(UploadedFile::new("gtr.glb", "", glb.clone())))
        .await
        .unwrap();

    assert_eq!(asset.name, "Nissan GTR");
    assert_eq!(asset.description.as_deref(), Some("R35"));
    assert_eq!(asset.format, ModelFormat::Glb);
    assert!((asset.scale - 1.25).abs() < 1e-9);
    assert_eq!(asset.size_bytes, glb.len() as u64);
    assert!(asset.model_url.starts_with("/models/nissan-gtr-"));
    assert!(asset.model_url.ends_with(".glb"));
    assert!(asset.thumbnail_url.starts_with("/thumbnails/nissan-gtr-"));
    assert!(asset.thumbnail_url.ends_with(".png"));

    let StorageAddress::Local { category, filename } = &asset.model_address else {
        panic!("expected a local address, got {}", asset.model_address);
    };
    assert_eq!(*category, Some(AssetCategory::Models));
    assert!(temp_dir.path().join("models").join(filename).exists());
    assert_eq!(router.read(&asset.model_address).await.unwrap(), glb);
}

#[tokio::test]
async fn ingests_into_cloud_backend() {
    let (router, _temp_dir) = cloud_router();
    let glb = two_triangle_glb();

    let asset = ingestor(&router)
        .ingest(request(UploadedFile::new("gtr.glb", "", glb.clone())))
        .await
        .unwrap();

    assert_eq!(asset.model_address.backend(), StorageBackend::Gcs);
    assert!(asset.model_address.to_string().starts_with("mod-shop/models/nissan-gtr-"));
    assert!(asset
        .thumbnail_url
        .starts_with("https://car-assets.storage.googleapis.com/mod-shop/thumbnails/nissan-gtr-"));
    assert_eq!(router.read(&asset.model_address).await.unwrap(), glb);
}

#[tokio::test]
async fn scale_override_rules() {
    let (router, _temp_dir) = local_router();
    let ingestor = ingestor(&router);
    let huge = glb_with_accessor_bounds(&[([0.0; 3], [10000.0; 3])]);

    let mut req = request(UploadedFile::new("huge.glb", "", huge.clone()));
    req.scale_override = Some("50".to_string());
    assert_eq!(ingestor.ingest(req).await.unwrap().scale, 50.0);

    for ignored in ["0", "-5", "abc", "  "] {
        let mut req = request(UploadedFile::new("huge.glb", "", huge.clone()));
        req.scale_override = Some(ignored.to_string());
        assert_eq!(ingestor.ingest(req).await.unwrap().scale, 0.001);
    }
}

#[tokio::test]
async fn gltf_is_stored_without_scaling() {
    let (router, _temp_dir) = local_router();
    let gltf = br#"{"asset":{"version":"2.0"}}"#.to_vec();

    let asset = ingestor(&router)
        .ingest(request(UploadedFile::new("scene.GLTF", "", gltf.clone())))
        .await
        .unwrap();

    assert_eq!(asset.format, ModelFormat::Gltf);
    assert_eq!(asset.scale, 1.0);
    assert!(asset.model_url.ends_with(".gltf"));
    assert_eq!(asset.size_bytes, gltf.len() as u64);
}

#[tokio::test]
async fn unparseable_glb_falls_back_to_default_scale() {
    let (router, _temp_dir) = local_router();

    let asset = ingestor(&router)
        .ingest(request(UploadedFile::new("broken.glb", "", b"definitely not glb".to_vec())))
        .await
        .unwrap();

    assert_eq!(asset.scale, 1.0);
    assert_eq!(asset.size_bytes, 18);
}

#[tokio::test]
async fn validation_failure_has_no_side_effects() {
    let (router, temp_dir) = local_router();
    let ingestor = ingestor(&router);

    let result = ingestor
        .ingest(request(UploadedFile::new("car.obj", "", b"o".to_vec())))
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    let mut missing = request(UploadedFile::new("gtr.glb", "", two_triangle_glb()));
    missing.thumbnail = None;
    assert!(matches!(
        ingestor.ingest(missing).await,
        Err(AppError::InvalidInput(_))
    ));

    assert!(!temp_dir.path().join("models").exists());
    assert!(!temp_dir.path().join("thumbnails").exists());
}

#[tokio::test]
async fn thumbnail_extension_falls_back_to_content_type() {
    let (router, _temp_dir) = local_router();
    let mut req = request(UploadedFile::new("gtr.glb", "", two_triangle_glb()));
    req.thumbnail = Some(UploadedFile::new("blob", "image/webp", b"webp".to_vec()));
    req.name = "!!!".to_string();

    let asset = ingestor(&router).ingest(req).await.unwrap();
    assert!(asset.thumbnail_url.starts_with("/thumbnails/thumbnail-"));
    assert!(asset.thumbnail_url.ends_with(".webp"));
    assert!(asset.model_url.starts_with("/models/model-"));
}

#[tokio::test]
async fn delete_routes_by_address() {
    let (cloud, temp_dir) = cloud_router();
    let ingestor = ingestor(&cloud);

    // A file written while the local backend was active
    let legacy = cloud
        .backend(StorageBackend::Local)
        .unwrap()
        .store(AssetCategory::Thumbnails, "old.png", "image/png", b"img".to_vec().into())
        .await
        .unwrap();
    let asset = ingestor
        .ingest(request(UploadedFile::new("gtr.glb", "", two_triangle_glb())))
        .await
        .unwrap();

    let report = delete_asset_files(
        &cloud,
        &asset.model_address.to_string(),
        &legacy.address.to_string(),
    )
    .await;
    assert!(report.is_complete());
    assert!(!temp_dir.path().join("thumbnails/old.png").exists());

    // Deleting again is still reported as success
    let again = delete_asset_files(
        &cloud,
        &asset.model_address.to_string(),
        &legacy.address.to_string(),
    )
    .await;
    assert!(again.is_complete());
}

#[tokio::test]
async fn cleanup_reports_failures_without_erroring() {
    let (router, _temp_dir) = local_router();

    let report = delete_asset_files(&router, "mod-shop/models/a.glb", "").await;
    assert!(!report.model_deleted);
    assert!(!report.thumbnail_deleted);
}

fn stored_models(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(dir.join("models")) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[tokio::test]
async fn model_write_failure_aborts_before_thumbnail() {
    let (router, temp_dir) = local_router();
    let storage = FailingWrites {
        inner: router,
        fail_on: AssetCategory::Models,
    };
    let ingestor = AssetIngestor::new(Arc::new(storage), UploadLimits::default());

    let result = ingestor
        .ingest(request(UploadedFile::new("gtr.glb", "", two_triangle_glb())))
        .await;

    assert!(matches!(result, Err(AppError::Storage(_))));
    assert!(!temp_dir.path().join("thumbnails").exists());
    assert!(stored_models(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn thumbnail_write_failure_keeps_stored_model() {
    let (router, temp_dir) = local_router();
    let storage = FailingWrites {
        inner: router.clone(),
        fail_on: AssetCategory::Thumbnails,
    };
    let ingestor = AssetIngestor::new(Arc::new(storage), UploadLimits::default());
    let glb = two_triangle_glb();

    let result = ingestor
        .ingest(request(UploadedFile::new("gtr.glb", "", glb.clone())))
        .await;
    assert!(matches!(result, Err(AppError::Storage(_))));

    // No compensating delete: the model written before the failure is still there
    let models = stored_models(temp_dir.path());
    assert_eq!(models.len(), 1);
    let filename = models[0].file_name().unwrap().to_str().unwrap();
    let address = StorageAddress::local(AssetCategory::Models, filename);
    assert_eq!(router.read(&address).await.unwrap(), glb);
}
