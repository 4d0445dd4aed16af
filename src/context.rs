//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use reqwest::Client;

use crate::adapters::live::fetcher::LiveFetcher;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::llm::AzureOpenAiClient;
use crate::adapters::live::queue::AzureQueueClient;
use crate::adapters::recording::{RecordingFetcher, RecordingLlmClient, RecordingQueue, SharedRecorder};
use crate::adapters::replaying::{ReplayingFetcher, ReplayingLlmClient, ReplayingQueue};
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::error::{ConfigError, Error};
use crate::ports::{FileSystem, LlmClient, MessageQueue, PageFetcher};

/// Bundles all port trait objects used by one pipeline run.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying). The filesystem is always live.
pub struct ServiceContext {
    /// Local disk for agenda and snapshot files.
    pub fs: Box<dyn FileSystem>,
    /// HTTP GET for document pages.
    pub fetcher: Box<dyn PageFetcher>,
    /// Completion service used by the classifier.
    pub llm: Box<dyn LlmClient>,
    /// Queue that receives verdicts.
    pub queue: Box<dyn MessageQueue>,
    recorder: Option<SharedRecorder>,
}

impl ServiceContext {
    /// Creates a live context. One HTTP client is shared by all network adapters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the queue
    /// connection string is invalid.
    pub fn live(config: &Config) -> Result<Self, ConfigError> {
        let client = Client::builder().build()?;
        Ok(Self {
            fs: Box::new(LiveFileSystem),
            fetcher: Box::new(LiveFetcher::new(client.clone())),
            llm: Box::new(AzureOpenAiClient::new(client.clone(), config.completion.clone())),
            queue: Box::new(AzureQueueClient::new(client, &config.queue)?),
            recorder: None,
        })
    }

    /// Creates a live context whose network ports are recorded into a cassette
    /// at `path`. Call [`ServiceContext::finish`] to write the file.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceContext::live`].
    pub fn recording(config: &Config, path: &Path, command: &str) -> Result<Self, ConfigError> {
        let live = Self::live(config)?;
        let name = path
            .file_stem()
            .map_or_else(|| "agenda-watch".to_string(), |s| s.to_string_lossy().into_owned());
        let recorder: SharedRecorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, command)));

        Ok(Self {
            fs: live.fs,
            fetcher: Box::new(RecordingFetcher::new(live.fetcher, Arc::clone(&recorder))),
            llm: Box::new(RecordingLlmClient::new(live.llm, Arc::clone(&recorder))),
            queue: Box::new(RecordingQueue::new(live.queue, Arc::clone(&recorder))),
            recorder: Some(recorder),
        })
    }

    /// Creates a context whose network ports are served from a cassette file.
    ///
    /// Each port keeps its own cursor inside the shared replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, Error> {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::load(path)?));
        Ok(Self {
            fs: Box::new(LiveFileSystem),
            fetcher: Box::new(ReplayingFetcher::new(Arc::clone(&replayer))),
            llm: Box::new(ReplayingLlmClient::new(Arc::clone(&replayer))),
            queue: Box::new(ReplayingQueue::new(replayer)),
            recorder: None,
        })
    }

    /// Assembles a context from arbitrary port implementations.
    #[must_use]
    pub fn from_parts(
        fs: Box<dyn FileSystem>,
        fetcher: Box<dyn PageFetcher>,
        llm: Box<dyn LlmClient>,
        queue: Box<dyn MessageQueue>,
    ) -> Self {
        Self { fs, fetcher, llm, queue, recorder: None }
    }

    /// Writes the cassette if this context is recording.
    ///
    /// Returns the cassette path, or `None` for non-recording contexts.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, Error> {
        let Some(recorder) = self.recorder else {
            return Ok(None);
        };
        let guard = recorder.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(Some(guard.save()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::config::{CompletionConfig, QueueConfig};
    use serde_json::json;

    fn config(endpoint: &str) -> Config {
        Config {
            completion: CompletionConfig {
                endpoint: endpoint.to_string(),
                deployment: "gpt-4o-mini".into(),
                api_key: "secret".into(),
                api_version: "2024-03-01-preview".into(),
            },
            queue: QueueConfig {
                connection_string: format!("QueueEndpoint={endpoint};SharedAccessSignature=sig=abc"),
                queue_name: "changes".into(),
            },
        }
    }

    #[test]
    fn live_context_rejects_bad_connection_string() {
        let mut config = config("http://127.0.0.1:9");
        config.queue.connection_string = "AccountName=acct".into();
        assert!(matches!(
            ServiceContext::live(&config),
            Err(ConfigError::ConnectionString { .. })
        ));
    }

    #[tokio::test]
    async fn replaying_context_serves_every_network_port() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "run", "compare");
        recorder.record("fetch", "get", json!({}), json!({"ok": {"status": 200, "body": "page"}}));
        recorder.record(
            "llm",
            "complete",
            json!({}),
            json!({"ok": {"text": "{}", "prompt_tokens": 1, "completion_tokens": 1}}),
        );
        recorder.record("queue", "send", json!({}), json!({"ok": null}));
        recorder.finish().unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let page = ctx.fetcher.get("http://x/a").await.unwrap();
        assert_eq!(page.body, "page");
        assert!(ctx.queue.send("m").await.is_ok());
        assert!(ctx.finish().unwrap().is_none());
    }

    #[tokio::test]
    async fn recording_context_writes_cassette_on_finish() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<div class=\"content\">x</div>"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec.cassette.yaml");
        let ctx = ServiceContext::recording(&config(&server.uri()), &path, "init").unwrap();
        ctx.fetcher.get(&format!("{}/a", server.uri())).await.unwrap();

        let written = ctx.finish().unwrap().unwrap();
        assert_eq!(written, path);

        let cassette: Cassette = serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cassette.name, "rec.cassette");
        assert_eq!(cassette.command, "init");
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].port, "fetch");
        assert_eq!(cassette.interactions[0].output["ok"]["status"], 200);
    }
}
