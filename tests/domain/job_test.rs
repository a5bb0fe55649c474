use chrono::Utc;

use webshot::domain::{
    ArtifactRef, CaptureResult, FailureKind, ImageFormat, Job, JobError, JobStatus, JobTransition,
    JobUrl,
};

fn new_job() -> Job {
    Job::new(JobUrl::parse("https://example.com").unwrap())
}

fn capture_result(job: &Job) -> CaptureResult {
    CaptureResult {
        artifact: ArtifactRef::new(&job.id, ImageFormat::Png),
        size_bytes: 42,
        width: 64,
        height: 48,
        format: ImageFormat::Png,
        duration_ms: 10,
    }
}

#[test]
fn given_new_job_when_created_then_is_queued_with_no_attempts() {
    let job = new_job();

    assert_eq!(job.status, JobStatus::Queued);
    assert_eq!(job.attempt, 0);
    assert!(job.started_at.is_none());
    assert!(job.finished_at.is_none());
    assert!(job.result.is_none());
    assert!(job.error.is_none());
}

#[test]
fn given_queued_job_when_started_then_running_and_attempt_incremented() {
    let mut job = new_job();

    job.apply(JobTransition::Start, Utc::now()).unwrap();

    assert_eq!(job.status, JobStatus::Running);
    assert_eq!(job.attempt, 1);
    assert!(job.started_at.is_some());
}

#[test]
fn given_retried_job_when_started_again_then_started_at_is_not_rewound() {
    let mut job = new_job();
    let first = Utc::now();
    job.apply(JobTransition::Start, first).unwrap();
    job.apply(JobTransition::Retry, Utc::now()).unwrap();

    job.apply(JobTransition::Start, Utc::now()).unwrap();

    assert_eq!(job.attempt, 2);
    assert_eq!(job.started_at, Some(first));
}

#[test]
fn given_running_job_when_completed_then_done_with_result_only() {
    let mut job = new_job();
    job.apply(JobTransition::Start, Utc::now()).unwrap();
    let result = capture_result(&job);

    job.apply(JobTransition::Complete(result.clone()), Utc::now())
        .unwrap();

    assert_eq!(job.status, JobStatus::Done);
    assert_eq!(job.result, Some(result));
    assert!(job.error.is_none());
    assert!(job.finished_at.is_some());
}

#[test]
fn given_queued_job_when_completed_then_transition_is_rejected() {
    let mut job = new_job();
    let result = capture_result(&job);

    let err = job
        .apply(JobTransition::Complete(result), Utc::now())
        .unwrap_err();

    assert_eq!(err.from, JobStatus::Queued);
    assert_eq!(err.transition, "complete");
    assert_eq!(job.status, JobStatus::Queued);
}

#[test]
fn given_failed_job_when_any_transition_then_rejected() {
    let mut job = new_job();
    job.apply(JobTransition::Start, Utc::now()).unwrap();
    job.apply(
        JobTransition::Fail(JobError::new(FailureKind::RenderError, "boom")),
        Utc::now(),
    )
    .unwrap();
    let finished_at = job.finished_at;

    assert!(job.apply(JobTransition::Start, Utc::now()).is_err());
    assert!(job.apply(JobTransition::Retry, Utc::now()).is_err());
    assert!(
        job.apply(
            JobTransition::Fail(JobError::new(FailureKind::Timeout, "again")),
            Utc::now()
        )
        .is_err()
    );
    assert_eq!(job.finished_at, finished_at);
    assert_eq!(job.error.as_ref().unwrap().message, "boom");
}

#[test]
fn given_queued_job_when_retried_then_rejected() {
    let mut job = new_job();

    assert!(job.apply(JobTransition::Retry, Utc::now()).is_err());
}

#[test]
fn given_done_job_when_checked_against_future_cutoff_then_is_older() {
    let mut job = new_job();
    job.apply(JobTransition::Start, Utc::now()).unwrap();
    let result = capture_result(&job);
    job.apply(JobTransition::Complete(result), Utc::now())
        .unwrap();

    assert!(job.is_older_than(Utc::now() + chrono::Duration::seconds(1)));
    assert!(!job.is_older_than(Utc::now() - chrono::Duration::seconds(60)));
}
