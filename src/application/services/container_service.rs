//! Container build orchestration.

use std::str::FromStr;
use std::sync::Arc;

use url::Url;

use crate::application::services::{CnlDecryptor, DlcDecryptor};
use crate::domain::entities::{Container, DlcPayload, LinkEntry, PayloadSource};
use crate::domain::gateways::{KeyClient, LinkResolver, PageFetcher};
use crate::domain::session::SessionHeader;
use crate::error::AppError;
use crate::extract::{self, ContainerMetadata, RowMetadata};

/// What to do when a single row's resolution fails.
///
/// Row failures are isolated either way; the policy only decides whether one
/// bad row fails the build or is dropped with a warning. There is exactly one
/// policy per service, never a per-row decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// The first failed row fails the whole build.
    #[default]
    FailFast,
    /// Failed rows are dropped; their siblings still resolve.
    SkipFailed,
}

impl FromStr for ResolutionPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail_fast" => Ok(Self::FailFast),
            "skip_failed" => Ok(Self::SkipFailed),
            other => Err(AppError::validation(format!(
                "unknown resolution policy '{other}', expected 'fail_fast' or 'skip_failed'"
            ))),
        }
    }
}

/// Knobs the orchestration needs from the surrounding application.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Site base URL used to build row links and the package download URL.
    pub base_url: String,
    /// Path segment of the per-row link endpoint.
    pub link_endpoint: String,
    pub resolution_policy: ResolutionPolicy,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            base_url: "https://filecrypt.co".to_string(),
            link_endpoint: "Link".to_string(),
            resolution_policy: ResolutionPolicy::default(),
        }
    }
}

/// Links recovered by one of the three paths, kept apart so assembly knows
/// whether row alignment is positional (payload) or index-based (resolution).
enum Recovered {
    /// Decrypted links, one per row when rows exist.
    Payload(Vec<String>),
    /// `(row index, final url)` pairs in row order; failed rows absent when
    /// the policy skips them.
    Rows(Vec<(usize, String)>),
}

/// Builds a fully assembled [`Container`] from a container URL.
///
/// Selects the payload class once from the page metadata and dispatches
/// through a single match: inline decrypt, package decrypt, or per-row
/// redirect resolution. An unusable payload class falls back to the next
/// available one before the build fails.
pub struct ContainerService<F, K, R>
where
    F: PageFetcher,
    K: KeyClient,
    R: LinkResolver,
{
    fetcher: Arc<F>,
    resolver: Arc<R>,
    cnl: CnlDecryptor,
    dlc: DlcDecryptor<K>,
    options: ServiceOptions,
}

impl<F, K, R> ContainerService<F, K, R>
where
    F: PageFetcher,
    K: KeyClient + 'static,
    R: LinkResolver + 'static,
{
    pub fn new(
        fetcher: Arc<F>,
        key_client: Arc<K>,
        resolver: Arc<R>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            fetcher,
            resolver,
            cnl: CnlDecryptor::new(),
            dlc: DlcDecryptor::new(key_client),
            options,
        }
    }

    /// Fetches, decrypts/resolves and assembles one container.
    ///
    /// # Errors
    ///
    /// Returns the classified error of the stage that failed; see
    /// [`AppError`] for the classes.
    pub async fn build_container(&self, url: &Url) -> Result<Container, AppError> {
        tracing::info!(%url, "fetching container page");
        let page = self.fetcher.fetch_page(url).await?;

        let metadata = extract::container_metadata(&page.body);
        let rows = extract::link_rows(
            &page.body,
            &self.options.base_url,
            &self.options.link_endpoint,
        );
        tracing::debug!(
            title = %metadata.title,
            rows = rows.len(),
            cnl = metadata.cnl_id.is_some(),
            dlc = metadata.dlc_id.is_some(),
            "container page parsed"
        );

        let recovered = match self.select_payload(&page.body, &metadata).await {
            PayloadSource::Inline(payload) => match self.cnl.decrypt(&payload) {
                Ok(links) => Recovered::Payload(links),
                Err(err) => {
                    self.fall_back(err, &metadata, &rows, &page.session, true)
                        .await?
                }
            },
            PayloadSource::Package(payload) => match self.dlc.decrypt(&payload).await {
                Ok(links) => Recovered::Payload(links),
                Err(err) => {
                    self.fall_back(err, &metadata, &rows, &page.session, false)
                        .await?
                }
            },
            PayloadSource::None => Recovered::Rows(self.resolve_rows(&rows, &page.session).await?),
        };

        let container = assemble(url.clone(), metadata, recovered, rows)?;
        tracing::info!(
            entries = container.entries().len(),
            total_size = container.total_size(),
            "container assembled"
        );
        Ok(container)
    }

    /// Decides which payload class drives the build, once per page.
    ///
    /// An advertised payload that cannot be extracted or downloaded is logged
    /// and demoted to absent rather than failing the fetch outright.
    async fn select_payload(&self, body: &str, metadata: &ContainerMetadata) -> PayloadSource {
        if metadata.cnl_id.is_some() {
            match extract::cnl_payload(body) {
                Ok(payload) => return PayloadSource::Inline(payload),
                Err(err) => {
                    tracing::warn!(error = %err, "CNL payload advertised but not extractable");
                }
            }
        }
        if let Some(id) = &metadata.dlc_id {
            match self.fetch_package(id).await {
                Ok(payload) => return PayloadSource::Package(payload),
                Err(err) => {
                    tracing::warn!(error = %err, "DLC payload advertised but not retrievable");
                }
            }
        }
        PayloadSource::None
    }

    /// Downloads the package body referenced by a DLC id.
    async fn fetch_package(&self, id: &str) -> Result<DlcPayload, AppError> {
        let url = Url::parse(&format!("{}/DLC/{id}.dlc", self.options.base_url))
            .map_err(|e| AppError::extraction(format!("invalid package url: {e}")))?;
        let content = self.fetcher.fetch_text(&url).await?;
        DlcPayload::new(content)
    }

    /// Explicit fallback chain for an unusable payload: the package class
    /// next (when the failed class was inline), then per-row resolution,
    /// then the original error. Skipping a class never invents links.
    async fn fall_back(
        &self,
        err: AppError,
        metadata: &ContainerMetadata,
        rows: &[RowMetadata],
        session: &SessionHeader,
        try_package: bool,
    ) -> Result<Recovered, AppError> {
        tracing::warn!(error = %err, "payload class unusable, falling back");

        if try_package {
            if let Some(id) = &metadata.dlc_id {
                let attempt = match self.fetch_package(id).await {
                    Ok(payload) => self.dlc.decrypt(&payload).await,
                    Err(fetch_err) => Err(fetch_err),
                };
                match attempt {
                    Ok(links) => return Ok(Recovered::Payload(links)),
                    Err(next_err) => {
                        tracing::warn!(error = %next_err, "package fallback unusable as well");
                    }
                }
            }
        }

        if rows.iter().any(|row| row.unresolved_url.is_some()) {
            return Ok(Recovered::Rows(self.resolve_rows(rows, session).await?));
        }

        Err(err)
    }

    /// Resolves each row's obfuscated link concurrently and joins the
    /// results back into row order. Every task owns its inputs; the session
    /// header is the only shared value and is read-only.
    async fn resolve_rows(
        &self,
        rows: &[RowMetadata],
        session: &SessionHeader,
    ) -> Result<Vec<(usize, String)>, AppError> {
        let mut tasks = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            let Some(url) = row.unresolved_url.clone() else {
                continue;
            };
            let resolver = Arc::clone(&self.resolver);
            let session = session.clone();
            tasks.push((
                index,
                tokio::spawn(async move { resolver.resolve(&url, &session).await }),
            ));
        }

        if tasks.is_empty() {
            return Err(AppError::resolution(
                "no row on the container page carries a resolvable link",
            ));
        }

        let mut resolved = Vec::with_capacity(tasks.len());
        for (index, handle) in tasks {
            let outcome = handle.await.map_err(|e| {
                AppError::resolution(format!("row {index} resolution task failed: {e}"))
            })?;
            match outcome {
                Ok(link) => resolved.push((index, link)),
                Err(err) => match self.options.resolution_policy {
                    ResolutionPolicy::FailFast => {
                        return Err(AppError::resolution(format!(
                            "row {index}: {}",
                            err.message()
                        )));
                    }
                    ResolutionPolicy::SkipFailed => {
                        tracing::warn!(row = index, error = %err, "row resolution failed, dropping row");
                    }
                },
            }
        }

        Ok(resolved)
    }
}

/// Merges recovered links with row metadata into the final container.
fn assemble(
    url: Url,
    metadata: ContainerMetadata,
    recovered: Recovered,
    rows: Vec<RowMetadata>,
) -> Result<Container, AppError> {
    let mut container = Container::new(url, metadata.title, metadata.status, metadata.last_checked);

    match recovered {
        Recovered::Payload(links) => {
            if rows.is_empty() {
                container.add_entries(links.into_iter().map(|link| LinkEntry::new(link, None)))?;
            } else {
                if links.len() != rows.len() {
                    return Err(AppError::assembly(format!(
                        "decrypted {} links but the page lists {} rows",
                        links.len(),
                        rows.len()
                    )));
                }
                container.add_entries(
                    links
                        .into_iter()
                        .zip(rows)
                        .map(|(link, row)| LinkEntry::new(link, Some(row.into_metadata()))),
                )?;
            }
        }
        Recovered::Rows(pairs) => {
            for (index, link) in pairs {
                let row = rows.get(index).cloned().ok_or_else(|| {
                    AppError::assembly(format!("resolved row {index} has no matching metadata"))
                })?;
                container.add_entry(LinkEntry::new(link, Some(row.into_metadata())))?;
            }
        }
    }

    Ok(container)
}
