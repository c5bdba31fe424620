//! End-to-end container builds over the inline (CNL) payload path.

mod common;

use std::sync::Arc;

use url::Url;

use common::*;
use filedecrypt::prelude::*;

const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f";

fn container_url() -> Url {
    Url::parse("https://filecrypt.co/Container/FIXTURE").unwrap()
}

fn service(
    fetcher: FakePageFetcher,
) -> ContainerService<FakePageFetcher, FakeKeyClient, FakeResolver> {
    ContainerService::new(
        Arc::new(fetcher),
        Arc::new(FakeKeyClient {
            key_material: String::new(),
        }),
        Arc::new(FakeResolver::new()),
        ServiceOptions::default(),
    )
}

fn cnl_markup(blob: &str) -> String {
    format!(
        r#"<input type="hidden" name="hidden_cnl_id" value="CNL1" />
        <form action="/cnl" onsubmit="CNLPOP('pack', '{KEY_HEX}', '{blob}'); return false;">"#
    )
}

#[tokio::test]
async fn test_payload_only_build_without_rows() {
    let blob = cnl_blob(
        "header noise http://host.example/f/one\r\nhttp://host.example/f/two\n",
        KEY_HEX,
    );
    let body = page("CNL Fixture", "online", &cnl_markup(&blob));

    let container = service(FakePageFetcher::new(body))
        .build_container(&container_url())
        .await
        .unwrap();

    let urls: Vec<&str> = container.entries().iter().map(|e| e.url()).collect();
    assert_eq!(
        urls,
        vec!["https://host.example/f/one", "https://host.example/f/two"]
    );
    assert!(container.entries().iter().all(|e| e.metadata().is_none()));
    // no row metadata at all: the estimate must report 0, not a partial sum
    assert_eq!(container.estimated_total_size(), 0.0);
}

#[tokio::test]
async fn test_decrypted_links_zip_with_rows() {
    let blob = cnl_blob(
        "http://host.example/f/one\nhttp://host.example/f/two",
        KEY_HEX,
    );
    let rows = table(&[
        row("a.rar", "online", "1 GB", None),
        row("b.rar", "online", "500 MB", None),
    ]);
    let body = page(
        "CNL Fixture",
        "online",
        &format!("{}{rows}", cnl_markup(&blob)),
    );

    let container = service(FakePageFetcher::new(body))
        .build_container(&container_url())
        .await
        .unwrap();

    assert_eq!(container.entries().len(), 2);
    let first = container.entries()[0].metadata().unwrap();
    assert_eq!(first.file_name(), Some("a.rar"));
    assert_eq!(first.file_size().unwrap().unit(), SizeUnit::Gb);
    let second = container.entries()[1].metadata().unwrap();
    assert_eq!(second.file_name(), Some("b.rar"));
}

#[tokio::test]
async fn test_link_row_count_mismatch_fails_assembly() {
    let blob = cnl_blob("http://host.example/f/only-one", KEY_HEX);
    let rows = table(&[
        row("a.rar", "online", "1 GB", None),
        row("b.rar", "online", "1 GB", None),
    ]);
    let body = page(
        "CNL Fixture",
        "online",
        &format!("{}{rows}", cnl_markup(&blob)),
    );

    let err = service(FakePageFetcher::new(body))
        .build_container(&container_url())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Assembly { .. }));
}

#[tokio::test]
async fn test_unusable_inline_payload_falls_back_to_rows() {
    // valid base64, but three bytes is no cipher block
    let rows = table(&[row("a.rar", "online", "1 GB", Some("aa"))]);
    let body = page(
        "CNL Fixture",
        "online",
        &format!("{}{rows}", cnl_markup("AAAA")),
    );

    let container = service(FakePageFetcher::new(body))
        .build_container(&container_url())
        .await
        .unwrap();

    assert_eq!(container.entries().len(), 1);
    assert_eq!(container.entries()[0].url(), "https://host.example/f/aa");
}

#[tokio::test]
async fn test_unusable_inline_payload_without_rows_surfaces_error() {
    let body = page("CNL Fixture", "online", &cnl_markup("AAAA"));

    let err = service(FakePageFetcher::new(body))
        .build_container(&container_url())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Decryption { .. }));
}
