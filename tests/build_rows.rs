//! End-to-end container builds over the per-row resolution path.

mod common;

use std::sync::Arc;

use url::Url;

use common::*;
use filedecrypt::prelude::*;

fn container_url() -> Url {
    Url::parse("https://filecrypt.co/Container/FIXTURE").unwrap()
}

fn service(
    fetcher: FakePageFetcher,
    resolver: FakeResolver,
    policy: ResolutionPolicy,
) -> ContainerService<FakePageFetcher, FakeKeyClient, FakeResolver> {
    ContainerService::new(
        Arc::new(fetcher),
        Arc::new(FakeKeyClient {
            key_material: String::new(),
        }),
        Arc::new(resolver),
        ServiceOptions {
            resolution_policy: policy,
            ..ServiceOptions::default()
        },
    )
}

fn three_row_page() -> String {
    let rows = table(&[
        row("pack.part1.rar", "online", "2 GB", Some("aa")),
        row("pack.part1.rar", "online", "n/a", Some("bb")),
        row("bonus.rar", "offline", "n/a", Some("cc")),
    ]);
    page("Row Fixture", "online", &rows)
}

#[tokio::test]
async fn test_rows_resolve_in_order_with_metadata() {
    let service = service(
        FakePageFetcher::new(three_row_page()),
        FakeResolver::new(),
        ResolutionPolicy::FailFast,
    );

    let container = service.build_container(&container_url()).await.unwrap();

    assert_eq!(container.title(), "Row Fixture");
    assert_eq!(container.status(), ContainerStatus::Online);
    assert!(container.last_checked().is_some());

    let urls: Vec<&str> = container.entries().iter().map(|e| e.url()).collect();
    assert_eq!(
        urls,
        vec![
            "https://host.example/f/aa",
            "https://host.example/f/bb",
            "https://host.example/f/cc",
        ]
    );

    let first = container.entries()[0].metadata().unwrap();
    assert_eq!(first.file_name(), Some("pack.part1.rar"));
    assert_eq!(first.status(), LinkStatus::Online);
    let last = container.entries()[2].metadata().unwrap();
    assert_eq!(last.status(), LinkStatus::Offline);
}

#[tokio::test]
async fn test_size_accounting_over_resolved_rows() {
    let service = service(
        FakePageFetcher::new(three_row_page()),
        FakeResolver::new(),
        ResolutionPolicy::FailFast,
    );

    let container = service.build_container(&container_url()).await.unwrap();

    // strict total counts only the one reported size; the estimate fills the
    // second pack.part1.rar row from its sibling
    assert_eq!(container.total_size(), 2.0);
    assert_eq!(container.estimated_total_size(), 4.0);
}

#[tokio::test]
async fn test_fail_fast_surfaces_row_error() {
    let service = service(
        FakePageFetcher::new(three_row_page()),
        FakeResolver {
            fail_ids: vec!["bb".to_string()],
        },
        ResolutionPolicy::FailFast,
    );

    let err = service.build_container(&container_url()).await.unwrap_err();
    assert!(matches!(err, AppError::Resolution { .. }));
    assert!(err.message().contains("row 1"));
}

#[tokio::test]
async fn test_skip_failed_drops_only_the_bad_row() {
    let service = service(
        FakePageFetcher::new(three_row_page()),
        FakeResolver {
            fail_ids: vec!["bb".to_string()],
        },
        ResolutionPolicy::SkipFailed,
    );

    let container = service.build_container(&container_url()).await.unwrap();

    let urls: Vec<&str> = container.entries().iter().map(|e| e.url()).collect();
    assert_eq!(
        urls,
        vec!["https://host.example/f/aa", "https://host.example/f/cc"]
    );
}

#[tokio::test]
async fn test_page_without_links_fails_resolution() {
    let service = service(
        FakePageFetcher::new(page("Empty", "offline", "")),
        FakeResolver::new(),
        ResolutionPolicy::FailFast,
    );

    let err = service.build_container(&container_url()).await.unwrap_err();
    assert!(matches!(err, AppError::Resolution { .. }));
}
