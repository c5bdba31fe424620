#![allow(dead_code)]

use std::collections::HashMap;

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use url::Url;

use filedecrypt::prelude::*;

// Fixed DLC format constants, restated here to fabricate packages the same
// way the site does.
pub const DLC_KEY: &[u8; 16] = b"cb99b5cbc24db398";
pub const DLC_IV: &[u8; 16] = b"9bc24cb995cb8db3";
pub const DLC_FRAGMENT: usize = 88;

/// AES-128-CBC encrypt with NUL padding up to the block size.
pub fn aes_encrypt(plain: &[u8], key: &[u8], iv: &[u8]) -> Vec<u8> {
    let mut buf = plain.to_vec();
    while buf.len() % 16 != 0 {
        buf.push(0);
    }
    let len = buf.len();
    cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
        .unwrap()
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .unwrap();
    buf
}

/// Builds an encrypted CNL blob (base64) for the given plaintext.
pub fn cnl_blob(plaintext: &str, key_hex: &str) -> String {
    let key = hex::decode(key_hex).unwrap();
    BASE64.encode(aes_encrypt(plaintext.as_bytes(), &key, &key))
}

/// Builds a complete DLC package body plus the key material the fake key
/// service must answer with.
pub fn dlc_package(urls: &[&str], real_iv: &[u8; 16]) -> (String, String) {
    let files: String = urls
        .iter()
        .map(|url| format!("<file><url>{}</url></file>", BASE64.encode(url)))
        .collect();
    let document = format!("<dlc><content>{files}</content></dlc>");
    let inner = BASE64.encode(document.as_bytes());
    let data = aes_encrypt(inner.as_bytes(), real_iv, real_iv);
    let content = format!("{}{}", BASE64.encode(&data), "K".repeat(DLC_FRAGMENT));

    let key_material = BASE64.encode(aes_encrypt(real_iv, DLC_KEY, DLC_IV));
    (content, key_material)
}

/// One link row of the container table.
pub fn row(name: &str, status: &str, size: &str, button_id: Option<&str>) -> String {
    let button = button_id
        .map(|id| format!(r#"<button class="dl" data-target-id="{id}">open</button>"#))
        .unwrap_or_default();
    format!(
        r#"<tr>
            <td title="{name}">{name}</td>
            <td class="status"><i class="{status}"></i></td>
            <td>{size}</td>
            <td>{button}</td>
        </tr>"#
    )
}

pub fn table(rows: &[String]) -> String {
    format!("<table>{}</table>", rows.concat())
}

/// A container page header plus whatever payload markers and rows follow.
pub fn page(title: &str, status_class: &str, rest: &str) -> String {
    format!(
        r#"<div id="page"><div class="container {status_class}">
            <h2>{title}</h2>
            <small>checked <strong>01.08.2026 - 12:00</strong></small>
        </div>{rest}</div>"#
    )
}

pub struct FakePageFetcher {
    pub body: String,
    pub session_cookie: String,
    /// Extra text resources by exact URL (the DLC package body).
    pub texts: HashMap<String, String>,
}

impl FakePageFetcher {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            session_cookie: "PHPSESSID=fixture-session; path=/".to_string(),
            texts: HashMap::new(),
        }
    }

    pub fn with_text(mut self, url: &str, body: &str) -> Self {
        self.texts.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for FakePageFetcher {
    async fn fetch_page(&self, _url: &Url) -> Result<FetchedPage, AppError> {
        Ok(FetchedPage {
            body: self.body.clone(),
            session: SessionHeader::from_set_cookie(&self.session_cookie)?,
        })
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, AppError> {
        self.texts
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| AppError::http(format!("no fixture for {url}")))
    }
}

pub struct FakeKeyClient {
    pub key_material: String,
}

#[async_trait]
impl KeyClient for FakeKeyClient {
    async fn resolve_key(&self, _fragment: &str) -> Result<String, AppError> {
        Ok(self.key_material.clone())
    }
}

/// Resolves `{base}/Link/{id}.html` to `https://host.example/f/{id}`,
/// failing for ids listed in `fail_ids`.
pub struct FakeResolver {
    pub fail_ids: Vec<String>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self {
            fail_ids: Vec::new(),
        }
    }
}

#[async_trait]
impl LinkResolver for FakeResolver {
    async fn resolve(&self, url: &str, session: &SessionHeader) -> Result<String, AppError> {
        assert!(
            session.value().starts_with("PHPSESSID="),
            "resolver must receive the page session"
        );
        let id = url
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .trim_end_matches(".html")
            .to_string();
        if self.fail_ids.contains(&id) {
            return Err(AppError::resolution(format!(
                "row link {id} redirect missing Location header"
            )));
        }
        Ok(format!("https://host.example/f/{id}"))
    }
}

/// A key client that always fails, for cascade tests.
pub struct UnreachableKeyClient;

#[async_trait]
impl KeyClient for UnreachableKeyClient {
    async fn resolve_key(&self, _fragment: &str) -> Result<String, AppError> {
        Err(AppError::key_service("connection refused"))
    }
}
