use std::sync::Arc;

use clearance::{ClearanceError, ProjectWriter};

use crate::helpers::{FailingWriter, RecordingWriter, angular_vue, id, open, scanned_project};

#[test]
fn save_hands_committed_state_to_writer() {
    let mut project = open(angular_vue());
    let draft = project.create(Default::default()).unwrap();
    let writer = RecordingWriter::default();

    tokio_test::block_on(project.save(&writer)).unwrap();

    let saved = tokio_test::block_on(writer.last()).unwrap();
    assert_eq!(saved, project.save_file_args());
    assert!(!saved.manual_attributions.contains_key(&draft));
    assert_eq!(saved.manual_attributions.len(), 2);
}

#[test]
fn signals_are_never_saved_but_resolution_is() {
    let project = open(scanned_project());
    let writer = RecordingWriter::default();
    tokio_test::block_on(project.save(&writer)).unwrap();

    let saved = tokio_test::block_on(writer.last()).unwrap();
    assert!(!saved.manual_attributions.contains_key(&id("sc-react")));
    assert_eq!(
        saved.resolved_external_attributions.into_iter().collect::<Vec<_>>(),
        vec![id("sc-left-pad")]
    );
}

#[test]
fn writer_errors_are_returned() {
    let project = open(angular_vue());
    let err = tokio_test::block_on(project.save(&FailingWriter::default())).unwrap_err();
    assert!(matches!(err, ClearanceError::InvalidArg(_)));
}

#[tokio::test]
async fn save_all_reports_failures_per_writer() {
    let project = open(angular_vue());
    let primary = Arc::new(RecordingWriter::new("primary"));
    let backup = Arc::new(RecordingWriter::new("backup"));
    let writers: Vec<Arc<dyn ProjectWriter>> = vec![
        primary.clone(),
        Arc::new(FailingWriter::new("broken")),
        backup.clone(),
    ];

    let failures = project.save_all(&writers).await;

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].writer, "broken");
    assert_eq!(primary.saved().await.len(), 1);
    assert_eq!(backup.saved().await.len(), 1);
}
