use std::sync::Arc;

use czml_model::{DocumentArray, DOCUMENT_ID};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result, SourceFailure};
use crate::examples::example_path;
use crate::result::LoadResult;
use crate::source::TextFile;

/// Source label used when loading from an in-memory string.
pub const STRING_SOURCE: &str = "string";

/// Parse CZML text. Fails on malformed JSON or a non-array top level.
pub fn load_from_string(text: &str) -> LoadResult {
    load_from_string_as(text, STRING_SOURCE)
}

pub fn load_from_string_as(text: &str, source: &str) -> LoadResult {
    match parse_document(text) {
        Ok(data) => LoadResult::success(source, data),
        Err(e) => LoadResult::failure(source, e),
    }
}

/// Read a whole file-like object as UTF-8 and parse it.
pub async fn load_from_file<F>(file: &F) -> LoadResult
where
    F: TextFile + ?Sized,
{
    let name = file.name().to_string();
    let bytes = match file.read_bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Failed to read {name}: {e}");
            return LoadResult::failure(name, LoadError::FileRead(e.to_string()));
        }
    };
    match String::from_utf8(bytes) {
        Ok(text) => load_from_string_as(&text, &name),
        Err(_) => LoadResult::failure(name, LoadError::NotText),
    }
}

fn parse_document(text: &str) -> Result<DocumentArray> {
    let value: Value = serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
    DocumentArray::try_from(value).map_err(|_| LoadError::NotAnArray)
}

/// Combine per-source results into one document.
///
/// The first document packet seen (in input order) is kept and placed first; later
/// document packets are dropped. Every other packet with an `id` follows, in input
/// order. Fails only when every source failed.
pub fn merge_results(results: Vec<LoadResult>, source: impl Into<String>) -> LoadResult {
    let source = source.into();
    let total = results.len();
    let mut failures = Vec::new();
    let mut document: Option<Value> = None;
    let mut entities = Vec::new();

    for result in results {
        let data = match result.outcome {
            Ok(data) => data,
            Err(error) => {
                failures.push(SourceFailure {
                    source: result.source,
                    error,
                });
                continue;
            }
        };

        for packet in data {
            let Some(id) = packet.as_object().and_then(|obj| obj.get("id")) else {
                continue;
            };
            if id == DOCUMENT_ID {
                if document.is_none() {
                    document = Some(packet);
                }
            } else {
                entities.push(packet);
            }
        }
    }

    if failures.len() == total {
        return LoadResult::failure(source, LoadError::AllSourcesFailed(failures));
    }
    for failure in &failures {
        log::warn!("Dropped source from merge: {failure}");
    }

    let mut merged = Vec::with_capacity(entities.len() + 1);
    merged.extend(document);
    merged.extend(entities);
    LoadResult::success(source, DocumentArray::new(merged))
}

/// Fetches CZML over HTTP. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CzmlLoader {
    client: Client,
    config: Arc<LoaderConfig>,
}

impl CzmlLoader {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LoadError::Client(e.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    #[must_use]
    pub fn with_client(client: Client, config: LoaderConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// GET `url` and parse the body. Relative URLs resolve against the configured base.
    pub async fn load_from_url(&self, url: &str) -> LoadResult {
        log::debug!("Loading CZML from {url}");
        match self.fetch(url).await {
            Ok(data) => {
                log::debug!("Loaded {} packets from {url}", data.len());
                LoadResult::success(url, data)
            }
            Err(e) => {
                log::warn!("Failed to load CZML from {url}: {e}");
                LoadResult::failure(url, e)
            }
        }
    }

    /// Load every URL concurrently and merge the successes (see [`merge_results`]).
    ///
    /// All loads are started before any is awaited, and all are awaited before merging,
    /// so one failure never cuts another load short. Output order follows `urls`.
    pub async fn load_and_merge<S: AsRef<str>>(&self, urls: &[S]) -> LoadResult {
        let urls: Vec<&str> = urls.iter().map(|url| url.as_ref()).collect();

        let tasks: Vec<_> = urls
            .iter()
            .map(|url| {
                let loader = self.clone();
                let url = (*url).to_string();
                tokio::spawn(async move { loader.load_from_url(&url).await })
            })
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        for (task, url) in tasks.into_iter().zip(&urls) {
            match task.await {
                Ok(result) => results.push(result),
                Err(e) => results.push(LoadResult::failure(*url, LoadError::Task(e.to_string()))),
            }
        }

        merge_results(results, urls.join(", "))
    }

    /// Load one of the built-in examples by name.
    pub async fn load_example(&self, name: &str) -> LoadResult {
        match example_path(name) {
            Some(path) => self.load_from_url(path).await,
            None => LoadResult::failure(name, LoadError::UnknownExample(name.to_string())),
        }
    }

    fn resolve_url(&self, raw: &str) -> Result<Url> {
        Url::parse(raw)
            .or_else(|_| Url::parse(&self.config.examples_base_url).and_then(|base| base.join(raw)))
            .map_err(|e| LoadError::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            })
    }

    async fn fetch(&self, raw_url: &str) -> Result<DocumentArray> {
        let url = self.resolve_url(raw_url)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        // No content-type at all is accepted.
        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = String::from_utf8_lossy(content_type.as_bytes());
            if !content_type.contains("application/json") && !content_type.contains("text/") {
                return Err(LoadError::UnexpectedContentType(content_type.into_owned()));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        parse_document(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryFile;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ok(source: &str, packets: Value) -> LoadResult {
        LoadResult::success(source, DocumentArray::try_from(packets).unwrap())
    }

    #[test]
    fn string_round_trip_preserves_packets() {
        let packets = json!([
            {"id": "document", "name": "Round trip", "version": "1.0"},
            {"id": "a", "position": {"cartographicDegrees": [1.5, 2.5, 3.0]}, "custom": {"x": [1, 2]}}
        ]);
        let result = load_from_string(&packets.to_string());
        assert_eq!(result.source, STRING_SOURCE);
        assert_eq!(Value::from(result.into_result().unwrap()), packets);
    }

    #[test]
    fn string_errors() {
        let not_array = load_from_string_as(r#"{"id": "document"}"#, "inline");
        assert_eq!(not_array.source, "inline");
        assert_eq!(not_array.error(), Some(&LoadError::NotAnArray));

        let broken = load_from_string("[{\"id\": ");
        assert!(matches!(broken.error(), Some(LoadError::Parse(_))));
    }

    #[tokio::test]
    async fn file_load_uses_file_name_as_source() {
        let file = InMemoryFile::new("scene.czml", r#"[{"id": "document"}]"#);
        let result = load_from_file(&file).await;
        assert_eq!(result.source, "scene.czml");
        assert_eq!(result.data().map(DocumentArray::len), Some(1));

        let binary = InMemoryFile::new("blob.bin", vec![0xff, 0xfe, 0x00]);
        let result = load_from_file(&binary).await;
        assert_eq!(result.error(), Some(&LoadError::NotText));
    }

    #[test]
    fn merge_keeps_first_document_and_input_order() {
        let merged = merge_results(
            vec![
                ok("one", json!([{"id": "document", "name": "first"}, {"id": "e1"}])),
                LoadResult::failure("two", LoadError::NotAnArray),
                ok("three", json!([{"id": "document", "name": "second"}, {"id": "e2"}])),
            ],
            "one, two, three",
        );

        assert_eq!(merged.source, "one, two, three");
        assert_eq!(
            Value::from(merged.into_result().unwrap()),
            json!([{"id": "document", "name": "first"}, {"id": "e1"}, {"id": "e2"}])
        );
    }

    #[test]
    fn merge_skips_packets_without_id() {
        let merged = merge_results(
            vec![ok("one", json!([{"name": "anon"}, 7, {"id": "e1"}, {"id": 5}]))],
            "one",
        );
        assert_eq!(
            Value::from(merged.into_result().unwrap()),
            json!([{"id": "e1"}, {"id": 5}])
        );
    }

    #[test]
    fn merge_places_later_document_first() {
        let merged = merge_results(
            vec![
                ok("one", json!([{"id": "e1"}])),
                ok("two", json!([{"id": "document"}, {"id": "e2"}])),
            ],
            "one, two",
        );
        assert_eq!(
            Value::from(merged.into_result().unwrap()),
            json!([{"id": "document"}, {"id": "e1"}, {"id": "e2"}])
        );
    }

    #[test]
    fn merge_fails_only_when_everything_failed() {
        let merged = merge_results(
            vec![
                LoadResult::failure("a", LoadError::NotAnArray),
                LoadResult::failure("b", LoadError::Parse("expected value".to_string())),
            ],
            "a, b",
        );
        assert_eq!(
            merged.error().map(ToString::to_string).as_deref(),
            Some("All sources failed: a: CZML data must be an array; b: expected value")
        );
        assert_eq!(merged.source, "a, b");
    }

    #[test]
    fn merge_of_nothing_is_a_failure() {
        let merged = merge_results(Vec::new(), "");
        assert_eq!(merged.error(), Some(&LoadError::AllSourcesFailed(Vec::new())));
        assert_eq!(
            merged.error().map(ToString::to_string).as_deref(),
            Some("All sources failed: ")
        );
    }

    #[test]
    fn resolves_relative_urls_against_base() {
        let loader = CzmlLoader::with_client(
            Client::new(),
            LoaderConfig::default().with_base_url("http://127.0.0.1:9000/app/"),
        );
        assert_eq!(
            loader.resolve_url("/czml-examples/a.czml").unwrap().as_str(),
            "http://127.0.0.1:9000/czml-examples/a.czml"
        );
        assert_eq!(
            loader.resolve_url("https://example.com/b.czml").unwrap().as_str(),
            "https://example.com/b.czml"
        );
    }

    #[tokio::test]
    async fn unknown_example_is_a_failure() {
        let loader = CzmlLoader::with_client(Client::new(), LoaderConfig::default());
        let result = loader.load_example("moon-base").await;
        assert_eq!(result.source, "moon-base");
        assert_eq!(
            result.error(),
            Some(&LoadError::UnknownExample("moon-base".to_string()))
        );
    }
}
