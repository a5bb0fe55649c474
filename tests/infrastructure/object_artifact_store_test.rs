use webshot::application::ports::{ArtifactStore, ArtifactStoreError, Screenshot};
use webshot::domain::{ArtifactRef, ImageFormat, JobId};
use webshot::infrastructure::storage::ObjectArtifactStore;

fn screenshot(format: ImageFormat) -> Screenshot {
    Screenshot {
        data: vec![1, 2, 3, 4, 5],
        width: 2,
        height: 2,
        format,
    }
}

#[tokio::test]
async fn given_stored_screenshot_when_fetched_then_bytes_match() {
    let store = ObjectArtifactStore::in_memory();
    let job_id = JobId::new();

    let reference = store.put(job_id, &screenshot(ImageFormat::Png)).await.unwrap();

    assert_eq!(reference, ArtifactRef::new(&job_id, ImageFormat::Png));
    assert_eq!(store.get(&reference).await.unwrap(), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn given_missing_artifact_when_fetched_then_not_found() {
    let store = ObjectArtifactStore::in_memory();
    let reference = ArtifactRef::new(&JobId::new(), ImageFormat::Png);

    let result = store.get(&reference).await;

    assert!(matches!(result, Err(ArtifactStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_deleted_artifact_when_fetched_then_not_found() {
    let store = ObjectArtifactStore::in_memory();
    let reference = store
        .put(JobId::new(), &screenshot(ImageFormat::Jpeg))
        .await
        .unwrap();

    store.delete(&reference).await.unwrap();

    assert!(matches!(
        store.get(&reference).await,
        Err(ArtifactStoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn given_local_store_when_putting_then_file_written_under_base_path() {
    let dir = tempfile::tempdir().unwrap();
    let store = ObjectArtifactStore::local(dir.path().join("artifacts")).unwrap();
    let job_id = JobId::new();

    let reference = store.put(job_id, &screenshot(ImageFormat::Png)).await.unwrap();

    let on_disk = dir.path().join("artifacts").join(reference.as_str());
    assert_eq!(std::fs::read(on_disk).unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(store.get(&reference).await.unwrap().len(), 5);
}
