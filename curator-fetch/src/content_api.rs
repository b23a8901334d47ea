//! Content-API fetch strategy.
//!
//! Lists a repository subtree via the contents endpoint (JSON array of
//! `{type, name, download_url}`) and downloads each `file` entry into the
//! mapping's local directory. Entries of any other type (subdirectory,
//! submodule, symlink) are skipped, never recursed — a known limitation of
//! this fallback path.
//!
//! Mapping-level success policy: at least one file written ⇒ success
//! (partial success allowed); zero files written ⇒ failure.
//!
//! All requests carry bounded timeouts; per-file downloads retry transient
//! failures (transport errors, HTTP 5xx/429) with exponential backoff.

use std::io::Read;
use std::time::Duration;

use backoff::ExponentialBackoff;
use serde::Deserialize;

use curator_core::types::{RepositoryRef, SyncMapping};

use crate::error::FetchError;
use crate::strategy::{FetchMethod, FetchStrategy};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_CEILING: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// Listing entries
// ---------------------------------------------------------------------------

/// One entry of the content-listing response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub name: String,
    pub download_url: Option<String>,
}

fn parse_listing(url: &str, value: serde_json::Value) -> Result<Vec<ContentEntry>, FetchError> {
    if !value.is_array() {
        return Err(FetchError::UnexpectedListing {
            url: url.to_string(),
        });
    }
    serde_json::from_value(value).map_err(|_| FetchError::UnexpectedListing {
        url: url.to_string(),
    })
}

// ---------------------------------------------------------------------------
// ContentApiFetcher
// ---------------------------------------------------------------------------

/// Fetches a mapping file-by-file through the remote content-listing API.
pub struct ContentApiFetcher {
    agent: ureq::Agent,
    /// Overrides the derived `https://api.<host>/...` root. Used for
    /// self-hosted forges whose API does not live on an `api.` subdomain.
    api_root: Option<String>,
    retry_ceiling: Duration,
}

impl ContentApiFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build();
        ContentApiFetcher {
            agent,
            api_root: None,
            retry_ceiling: DEFAULT_RETRY_CEILING,
        }
    }

    /// Use `root` as the content-listing base instead of the host derived
    /// from the repository's `base_url`.
    pub fn with_api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = Some(root.into());
        self
    }

    /// Cap the total time spent retrying one transient download.
    pub fn with_retry_ceiling(mut self, ceiling: Duration) -> Self {
        self.retry_ceiling = ceiling;
        self
    }

    fn listing_url(&self, repo: &RepositoryRef, mapping: &SyncMapping) -> String {
        match &self.api_root {
            Some(root) => format!("{}/{}", root.trim_end_matches('/'), mapping.remote_path),
            None => repo.contents_url(&mapping.remote_path),
        }
    }

    fn list_entries(&self, url: &str) -> Result<Vec<ContentEntry>, FetchError> {
        let response = self.agent.get(url).call().map_err(|e| http_err(url, e))?;
        let value: serde_json::Value = response.into_json().map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })?;
        parse_listing(url, value)
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let policy = ExponentialBackoff {
            max_elapsed_time: Some(self.retry_ceiling),
            ..ExponentialBackoff::default()
        };
        let op = || {
            let response = self.agent.get(url).call().map_err(|e| classify(url, e))?;
            let mut bytes = Vec::new();
            response
                .into_reader()
                .read_to_end(&mut bytes)
                .map_err(|e| {
                    backoff::Error::permanent(FetchError::Body {
                        url: url.to_string(),
                        source: e,
                    })
                })?;
            Ok(bytes)
        };
        backoff::retry(policy, op).map_err(|e| match e {
            backoff::Error::Permanent(err) => err,
            backoff::Error::Transient { err, .. } => err,
        })
    }
}

impl Default for ContentApiFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchStrategy for ContentApiFetcher {
    fn method(&self) -> FetchMethod {
        FetchMethod::ContentApi
    }

    fn attempt(&self, repo: &RepositoryRef, mapping: &SyncMapping) -> Result<(), FetchError> {
        let url = self.listing_url(repo, mapping);
        let entries = self.list_entries(&url)?;

        let mut attempted = 0usize;
        let mut written = 0usize;
        for entry in &entries {
            if entry.entry_type != "file" {
                log::debug!(
                    "skipping non-file entry '{}' (type: {})",
                    entry.name,
                    entry.entry_type
                );
                continue;
            }
            attempted += 1;
            let Some(download_url) = entry.download_url.as_deref() else {
                log::warn!("no download url for '{}'", entry.name);
                continue;
            };
            let target = mapping.local_path.join(&entry.name);
            match self.download(download_url) {
                Ok(bytes) => match std::fs::write(&target, bytes) {
                    Ok(()) => {
                        written += 1;
                        log::info!("downloaded: {}", entry.name);
                    }
                    // A single bad write must not abort sibling downloads.
                    Err(e) => log::warn!("write failed for {}: {e}", target.display()),
                },
                Err(e) => log::warn!("download failed for '{}': {e}", entry.name),
            }
        }

        log::info!(
            "content api fetch for '{}': {written}/{attempted} files",
            mapping.remote_path
        );
        if written > 0 {
            Ok(())
        } else {
            Err(FetchError::NoFilesFetched {
                remote_path: mapping.remote_path.clone(),
            })
        }
    }
}

/// Non-retried request error mapping (used for the listing call).
fn http_err(url: &str, err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::Status(status, _) => FetchError::Http {
            url: url.to_string(),
            status,
        },
        transport => FetchError::Transport {
            url: url.to_string(),
            source: Box::new(transport),
        },
    }
}

/// Retried request error mapping: 5xx and 429 are transient, other statuses
/// are permanent, transport failures are transient.
fn classify(url: &str, err: ureq::Error) -> backoff::Error<FetchError> {
    match err {
        ureq::Error::Status(status, _) if status >= 500 || status == 429 => {
            backoff::Error::transient(FetchError::Http {
                url: url.to_string(),
                status,
            })
        }
        ureq::Error::Status(status, _) => backoff::Error::permanent(FetchError::Http {
            url: url.to_string(),
            status,
        }),
        transport => backoff::Error::transient(FetchError::Transport {
            url: url.to_string(),
            source: Box::new(transport),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::path::Path;
    use std::thread::JoinHandle;

    use serde_json::json;
    use tempfile::TempDir;

    use curator_core::types::Priority;

    // -- pure parsing -------------------------------------------------------

    #[test]
    fn parse_listing_accepts_array() {
        let value = json!([
            {"type": "file", "name": "framework.md", "download_url": "https://x/raw"},
            {"type": "dir", "name": "nested", "download_url": null}
        ]);
        let entries = parse_listing("u", value).expect("parse");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_type, "file");
        assert!(entries[1].download_url.is_none());
    }

    #[test]
    fn parse_listing_rejects_object_body() {
        let value = json!({"message": "Not Found"});
        let err = parse_listing("u", value).unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedListing { .. }));
    }

    // -- scripted HTTP server -----------------------------------------------

    /// Serves each `(status, body)` response to one connection, in order.
    /// Responses carry `Connection: close` so the client opens a fresh
    /// connection per request.
    fn serve(listener: TcpListener, responses: Vec<(u16, String)>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut head = [0u8; 4096];
                let _ = stream.read(&mut head);
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        })
    }

    fn repo() -> RepositoryRef {
        RepositoryRef {
            owner: "example-org".to_string(),
            repo: "prompt-collection".to_string(),
            branch: "main".to_string(),
            base_url: "https://github.com".to_string(),
        }
    }

    fn mapping(local: &Path) -> SyncMapping {
        SyncMapping {
            remote_path: "prompt_sets/core".to_string(),
            local_path: local.to_path_buf(),
            priority: Priority::default(),
        }
    }

    fn fetcher(root: &str) -> ContentApiFetcher {
        ContentApiFetcher::new()
            .with_api_root(root)
            .with_retry_ceiling(Duration::from_millis(50))
    }

    #[test]
    fn downloads_file_entries_and_skips_directories() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let root = format!("http://{}", listener.local_addr().expect("addr"));
        let listing = json!([
            {"type": "file", "name": "framework.md", "download_url": format!("{root}/raw/framework.md")},
            {"type": "dir", "name": "nested", "download_url": null}
        ])
        .to_string();
        let handle = serve(
            listener,
            vec![(200, listing), (200, "# Framework".to_string())],
        );

        let dir = TempDir::new().expect("tempdir");
        let result = fetcher(&root).attempt(&repo(), &mapping(dir.path()));
        handle.join().expect("server thread");

        assert!(result.is_ok());
        let written =
            std::fs::read_to_string(dir.path().join("framework.md")).expect("downloaded file");
        assert_eq!(written, "# Framework");
        assert!(
            !dir.path().join("nested").exists(),
            "directory entries must not be recursed into"
        );
    }

    #[test]
    fn object_listing_fails_and_writes_nothing() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let root = format!("http://{}", listener.local_addr().expect("addr"));
        let handle = serve(
            listener,
            vec![(200, r#"{"message":"Not Found"}"#.to_string())],
        );

        let dir = TempDir::new().expect("tempdir");
        let result = fetcher(&root).attempt(&repo(), &mapping(dir.path()));
        handle.join().expect("server thread");

        assert!(matches!(result, Err(FetchError::UnexpectedListing { .. })));
        assert_eq!(
            std::fs::read_dir(dir.path()).expect("read dir").count(),
            0,
            "no files may be written on a malformed listing"
        );
    }

    #[test]
    fn non_200_listing_is_a_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let root = format!("http://{}", listener.local_addr().expect("addr"));
        let handle = serve(listener, vec![(404, r#"{"message":"missing"}"#.to_string())]);

        let dir = TempDir::new().expect("tempdir");
        let result = fetcher(&root).attempt(&repo(), &mapping(dir.path()));
        handle.join().expect("server thread");

        match result {
            Err(FetchError::Http { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected HTTP failure, got {other:?}"),
        }
    }

    #[test]
    fn listing_with_only_directories_yields_no_files_fetched() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let root = format!("http://{}", listener.local_addr().expect("addr"));
        let listing = json!([{"type": "dir", "name": "nested", "download_url": null}]).to_string();
        let handle = serve(listener, vec![(200, listing)]);

        let dir = TempDir::new().expect("tempdir");
        let result = fetcher(&root).attempt(&repo(), &mapping(dir.path()));
        handle.join().expect("server thread");

        assert!(matches!(result, Err(FetchError::NoFilesFetched { .. })));
    }

    #[test]
    fn failed_download_is_skipped_but_siblings_still_count() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let root = format!("http://{}", listener.local_addr().expect("addr"));
        let listing = json!([
            {"type": "file", "name": "gone.md", "download_url": format!("{root}/raw/gone.md")},
            {"type": "file", "name": "kept.md", "download_url": format!("{root}/raw/kept.md")}
        ])
        .to_string();
        // 404 is permanent: no retry, so exactly three requests are served.
        let handle = serve(
            listener,
            vec![
                (200, listing),
                (404, "missing".to_string()),
                (200, "kept".to_string()),
            ],
        );

        let dir = TempDir::new().expect("tempdir");
        let result = fetcher(&root).attempt(&repo(), &mapping(dir.path()));
        handle.join().expect("server thread");

        assert!(result.is_ok(), "one written file is a partial success");
        assert!(!dir.path().join("gone.md").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("kept.md")).expect("kept"),
            "kept"
        );
    }
}
