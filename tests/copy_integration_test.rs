mod common;

use httpmock::prelude::*;
use httpmock::Method::HEAD;
use repo_copy::{CopyError, CopyRequest, Settings};
use std::fs;

const HEAD_PATH: &str = "/pkgsite/+/refs/heads/master/internal/fetch";

fn settings(server: &MockServer, remotes: &std::path::Path, dest_root: &std::path::Path) -> Settings {
    Settings::new(dest_root)
        .with_git_base(remotes.to_str().unwrap())
        .unwrap()
        .with_browse_base(&server.base_url())
        .unwrap()
}

#[tokio::test]
async fn test_same_dir_copy_end_to_end() {
    let (remotes, head) = common::remotes();
    let dest = tempfile::tempdir().unwrap();

    let server = MockServer::start();
    let probe = server.mock(|when, then| {
        when.method(HEAD).path(HEAD_PATH);
        then.status(200);
    });

    let request = CopyRequest::same_dir("metrics", "pkgsite", "internal/fetch").unwrap();
    let report = repo_copy::run(&settings(&server, remotes.path(), dest.path()), &request)
        .await
        .unwrap();
    probe.assert();

    let short = &head[..8];
    assert_eq!(report.commit, short);

    let header = format!(
        "// DO NOT EDIT. This file was copied from\n// {}/pkgsite/+/{}/internal/fetch\n\n",
        server.base_url(),
        short
    );

    let fetch_go = fs::read_to_string(dest.path().join("internal/fetch/fetch.go")).unwrap();
    let expected = format!(
        "{}{}",
        header,
        common::FETCH_GO.replace("golang.org/x/pkgsite/internal", "golang.org/x/metrics/internal")
    );
    assert_eq!(fetch_go, expected);
    assert!(fetch_go.contains("mw \"golang.org/x/metrics/internal/middleware\""));

    // No internal reference: only the header is added
    let doc_go = fs::read_to_string(dest.path().join("internal/fetch/doc.go")).unwrap();
    assert_eq!(doc_go, format!("{}{}", header, common::DOC_GO));

    // Not a source file: copied as-is
    let notes = fs::read_to_string(dest.path().join("internal/fetch/testdata/notes.txt")).unwrap();
    assert_eq!(notes, common::NOTES_TXT);

    // Only the requested directory was copied
    assert!(!dest.path().join("go.mod").exists());

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.rewritten_lines(), 3);
    assert_eq!(
        report.internal_packages.iter().collect::<Vec<_>>(),
        vec![
            "golang.org/x/pkgsite/internal/derrors",
            "golang.org/x/pkgsite/internal/middleware",
        ]
    );
}

#[tokio::test]
async fn test_explicit_destination_uses_full_prefix() {
    let (remotes, head) = common::remotes();
    let dest = tempfile::tempdir().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path(HEAD_PATH);
        then.status(200);
    });

    let request =
        CopyRequest::explicit("metrics", "internal/pkgsite", "pkgsite", "internal/fetch").unwrap();
    let report = repo_copy::run(&settings(&server, remotes.path(), dest.path()), &request)
        .await
        .unwrap();

    assert_eq!(report.new_prefix, "golang.org/x/metrics/internal/pkgsite");
    let fetch_go = fs::read_to_string(dest.path().join("internal/pkgsite/fetch.go")).unwrap();
    assert!(fetch_go.contains(&format!("/pkgsite/+/{}/internal/fetch\n", &head[..8])));
    assert!(fetch_go.contains("mw \"golang.org/x/metrics/internal/pkgsite/middleware\""));
    assert!(!fetch_go.contains("golang.org/x/pkgsite/internal"));
}

#[tokio::test]
async fn test_not_found_aborts_before_cloning() {
    let (remotes, _) = common::remotes();
    let dest = tempfile::tempdir().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD);
        then.status(404);
    });

    let request = CopyRequest::same_dir("metrics", "pkgsite", "internal/fetch").unwrap();
    let err = repo_copy::run(&settings(&server, remotes.path(), dest.path()), &request)
        .await
        .unwrap_err();

    assert!(matches!(err, CopyError::NotFound { .. }));
    assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_existing_destination_is_left_alone() {
    let (remotes, _) = common::remotes();
    let dest = tempfile::tempdir().unwrap();
    let existing = dest.path().join("internal/fetch");
    fs::create_dir_all(&existing).unwrap();
    fs::write(existing.join("mine.go"), "package mine\n").unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path(HEAD_PATH);
        then.status(200);
    });

    let request = CopyRequest::same_dir("metrics", "pkgsite", "internal/fetch").unwrap();
    let err = repo_copy::run(&settings(&server, remotes.path(), dest.path()), &request)
        .await
        .unwrap_err();

    assert!(matches!(err, CopyError::DestinationExists(_)));
    assert_eq!(fs::read_to_string(existing.join("mine.go")).unwrap(), "package mine\n");
    assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
}

#[tokio::test]
async fn test_clone_failure_is_external_command_error() {
    let remotes = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path(HEAD_PATH);
        then.status(200);
    });

    let request = CopyRequest::same_dir("metrics", "pkgsite", "internal/fetch").unwrap();
    let err = repo_copy::run(&settings(&server, remotes.path(), dest.path()), &request)
        .await
        .unwrap_err();

    match err {
        CopyError::ExternalCommand { command, .. } => assert!(command.starts_with("git clone")),
        other => panic!("expected ExternalCommand, got {:?}", other),
    }
    assert!(!dest.path().join("internal/fetch").exists());
}

#[tokio::test]
async fn test_custom_extensions() {
    let (remotes, _) = common::remotes();
    let dest = tempfile::tempdir().unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path(HEAD_PATH);
        then.status(200);
    });

    let settings = settings(&server, remotes.path(), dest.path()).with_extensions(["txt"]);
    let request = CopyRequest::same_dir("metrics", "pkgsite", "internal/fetch").unwrap();
    let report = repo_copy::run(&settings, &request).await.unwrap();

    assert_eq!(report.files.len(), 1);
    let notes = fs::read_to_string(dest.path().join("internal/fetch/testdata/notes.txt")).unwrap();
    assert!(notes.starts_with("// DO NOT EDIT."));
    assert!(notes.ends_with("golang.org/x/metrics/internal/derrors is not Go code\n"));
    assert_eq!(
        fs::read_to_string(dest.path().join("internal/fetch/doc.go")).unwrap(),
        common::DOC_GO
    );
}
