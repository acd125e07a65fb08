//! Cancellable description request management.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{DescriptionBackend, DescriptionRequest, DescriptionTarget};
use crate::config::NarrativeConfig;

/// A finished description, tagged with the request it answers.
#[derive(Debug, Clone, Serialize)]
pub struct Description {
    pub request_id: Uuid,
    pub target: DescriptionTarget,
    pub text: String,
}

struct Shared {
    /// Monotonic id of the newest request. Publishing requires holding
    /// this lock and matching the current value, so a superseded task
    /// can never deliver its result.
    generation: Mutex<u64>,
    tx: watch::Sender<Option<Description>>,
}

/// Single-slot manager for the background text-generation request.
///
/// At most one request is in flight. Issuing a new one aborts the
/// previous task and bumps the generation, so whichever of the two is
/// still running, only the newest can publish. Backend failure or
/// timeout degrades to the configured fallback text; nothing here ever
/// propagates into the synchronous analytics.
pub struct DescriptionService {
    backend: Arc<dyn DescriptionBackend>,
    config: NarrativeConfig,
    shared: Arc<Shared>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    rx: watch::Receiver<Option<Description>>,
}

impl DescriptionService {
    pub fn new(backend: Arc<dyn DescriptionBackend>, config: NarrativeConfig) -> Self {
        let (tx, rx) = watch::channel(None);
        Self {
            backend,
            config,
            shared: Arc::new(Shared {
                generation: Mutex::new(0),
                tx,
            }),
            in_flight: Mutex::new(None),
            rx,
        }
    }

    /// Receiver for finished descriptions. The latest value is `None`
    /// until the first request completes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Description>> {
        self.rx.clone()
    }

    /// Issue a request, superseding any in-flight one.
    pub fn request(&self, request: DescriptionRequest) {
        let my_generation = {
            let mut generation = self
                .shared
                .generation
                .lock()
                .expect("generation lock poisoned");
            *generation += 1;
            *generation
        };

        if let Some(previous) = self
            .in_flight
            .lock()
            .expect("in-flight lock poisoned")
            .take()
        {
            previous.abort();
        }

        let backend = Arc::clone(&self.backend);
        let shared = Arc::clone(&self.shared);
        let request_timeout = Duration::from_secs(self.config.timeout_seconds);
        let fallback = self.config.fallback.clone();

        let handle = tokio::spawn(async move {
            debug!(
                request = %request.id,
                backend = backend.name(),
                "generating description"
            );

            let text = match timeout(request_timeout, backend.describe(&request)).await {
                Ok(Ok(text)) => text,
                Ok(Err(error)) => {
                    warn!(%error, "description backend failed, using fallback");
                    fallback
                }
                Err(_) => {
                    warn!(
                        seconds = request_timeout.as_secs(),
                        "description generation timed out, using fallback"
                    );
                    fallback
                }
            };

            let generation = shared.generation.lock().expect("generation lock poisoned");
            if *generation == my_generation {
                let _ = shared.tx.send(Some(Description {
                    request_id: request.id,
                    target: request.target.clone(),
                    text,
                }));
            }
        });

        *self.in_flight.lock().expect("in-flight lock poisoned") = Some(handle);
    }

    /// Cancel the in-flight request, if any, without issuing a new one.
    pub fn cancel(&self) {
        let mut generation = self
            .shared
            .generation
            .lock()
            .expect("generation lock poisoned");
        *generation += 1;
        drop(generation);

        if let Some(previous) = self
            .in_flight
            .lock()
            .expect("in-flight lock poisoned")
            .take()
        {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerRecord, Position};
    use crate::narrative::{NarrativeError, TemplateBackend};
    use async_trait::async_trait;

    /// Backend that answers each call in turn after a per-call delay.
    struct MockBackend {
        responses: Mutex<Vec<(Duration, Result<String, String>)>>,
    }

    impl MockBackend {
        fn answering(delay_ms: u64, text: &str) -> Arc<Self> {
            Self::sequenced(vec![(delay_ms, Ok(text.to_string()))])
        }

        fn failing() -> Arc<Self> {
            Self::sequenced(vec![(0, Err("backend offline".to_string()))])
        }

        fn sequenced(responses: Vec<(u64, Result<String, String>)>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .rev()
                        .map(|(ms, r)| (Duration::from_millis(ms), r))
                        .collect(),
                ),
            })
        }
    }

    #[async_trait]
    impl DescriptionBackend for MockBackend {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn describe(
            &self,
            _request: &DescriptionRequest,
        ) -> Result<String, NarrativeError> {
            let (delay, response) = self
                .responses
                .lock()
                .unwrap()
                .pop()
                .expect("more describe calls than scripted responses");
            tokio::time::sleep(delay).await;
            response.map_err(NarrativeError::BackendUnavailable)
        }
    }

    fn population_request() -> DescriptionRequest {
        let players = vec![PlayerRecord::new("A", "T", Position::Wr)];
        DescriptionRequest::for_population(Position::Wr, &players)
    }

    #[tokio::test]
    async fn test_result_is_published() {
        let service = DescriptionService::new(
            MockBackend::answering(5, "scouting report"),
            NarrativeConfig::default(),
        );
        let mut rx = service.subscribe();

        service.request(population_request());

        rx.changed().await.unwrap();
        let description = rx.borrow().clone().unwrap();
        assert_eq!(description.text, "scouting report");
        assert_eq!(description.target, DescriptionTarget::PopulationSummary);
    }

    #[tokio::test]
    async fn test_new_request_supersedes_in_flight_one() {
        let backend = MockBackend::sequenced(vec![
            (300, Ok("stale".to_string())),
            (5, Ok("fresh".to_string())),
        ]);
        let service = DescriptionService::new(backend, NarrativeConfig::default());
        let mut rx = service.subscribe();

        let first = population_request();
        let second = population_request();
        let second_id = second.id;

        service.request(first);
        // Let the first task claim its scripted (slow) response...
        tokio::time::sleep(Duration::from_millis(20)).await;
        // ...then supersede it before it can answer.
        service.request(second);

        rx.changed().await.unwrap();
        let description = rx.borrow().clone().unwrap();
        assert_eq!(description.text, "fresh");
        assert_eq!(description.request_id, second_id);

        // Give the superseded task's deadline time to pass; the newest
        // result must still stand.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(rx.borrow().clone().unwrap().request_id, second_id);
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_fallback() {
        let config = NarrativeConfig::default();
        let fallback = config.fallback.clone();
        let service = DescriptionService::new(MockBackend::failing(), config);
        let mut rx = service.subscribe();

        service.request(population_request());

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().clone().unwrap().text, fallback);
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_fallback() {
        let config = NarrativeConfig {
            timeout_seconds: 1,
            ..NarrativeConfig::default()
        };
        let fallback = config.fallback.clone();
        let service = DescriptionService::new(MockBackend::answering(1500, "too late"), config);
        let mut rx = service.subscribe();

        service.request(population_request());

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().clone().unwrap().text, fallback);
    }

    #[tokio::test]
    async fn test_cancel_drops_in_flight_result() {
        let service = DescriptionService::new(
            MockBackend::answering(50, "cancelled"),
            NarrativeConfig::default(),
        );
        let rx = service.subscribe();

        service.request(population_request());
        service.cancel();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn test_template_backend_through_service() {
        let service = DescriptionService::new(
            Arc::new(TemplateBackend::new()),
            NarrativeConfig::default(),
        );
        let mut rx = service.subscribe();

        let players = vec![PlayerRecord::new("Solo Sam", "FA", Position::Wr)];
        service.request(DescriptionRequest::for_population(Position::Wr, &players));

        rx.changed().await.unwrap();
        let text = rx.borrow().clone().unwrap().text;
        assert!(text.contains("This group of 1 players"));
    }
}
