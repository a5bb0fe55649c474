use webshot::domain::{ArtifactRef, ImageFormat, JobId};

#[test]
fn given_job_id_and_png_when_creating_ref_then_format_is_uuid_slash_file() {
    let job_id = JobId::new();
    let reference = ArtifactRef::new(&job_id, ImageFormat::Png);

    let expected = format!("{}/screenshot.png", job_id.as_uuid());
    assert_eq!(reference.as_str(), expected);
}

#[test]
fn given_jpeg_format_when_creating_ref_then_uses_jpg_extension() {
    let reference = ArtifactRef::new(&JobId::new(), ImageFormat::Jpeg);

    assert!(reference.as_str().ends_with("/screenshot.jpg"));
}

#[test]
fn given_two_jobs_when_creating_refs_then_refs_differ() {
    let a = ArtifactRef::new(&JobId::new(), ImageFormat::Png);
    let b = ArtifactRef::new(&JobId::new(), ImageFormat::Png);

    assert_ne!(a, b);
}

#[test]
fn given_artifact_ref_when_displayed_then_matches_as_str() {
    let reference = ArtifactRef::new(&JobId::new(), ImageFormat::Png);

    assert_eq!(format!("{}", reference), reference.as_str());
}
