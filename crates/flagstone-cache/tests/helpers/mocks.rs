//! In-process remote clients.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use flagstone_core::{
    FeaturesRequest, FeaturesResponse, FlagError, FlagMap, IdentityFlags, IdentityTraits, Result,
};
use flagstone_remote::{RemoteFeatureClient, RemoteFlagClient};

/// Respuesta programada de un mock.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respuesta verificada con este mapping.
    Mapping(FlagMap),
    /// Respuesta verificada sin `data`.
    NoData,
    /// El remoto no responde.
    Unavailable,
    /// La firma de la respuesta no verifica.
    BadSignature,
}

impl Reply {
    fn into_result<T>(self, on_mapping: impl FnOnce(Option<FlagMap>) -> T) -> Result<T> {
        match self {
            Reply::Mapping(mapping) => Ok(on_mapping(Some(mapping))),
            Reply::NoData => Ok(on_mapping(None)),
            Reply::Unavailable => Err(FlagError::remote_unavailable("connection refused")),
            Reply::BadSignature => Err(FlagError::invalid_signature("/mock")),
        }
    }
}

/// Flag client que responde lo mismo para cada subject pedido.
pub struct MockFlagClient {
    reply: Mutex<Reply>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_traits: Mutex<Option<IdentityTraits>>,
}

impl MockFlagClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            delay: None,
            calls: AtomicUsize::new(0),
            last_traits: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_traits(&self) -> Option<IdentityTraits> {
        self.last_traits.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteFlagClient for MockFlagClient {
    async fn evaluate_flags(&self, traits: &IdentityTraits) -> Result<IdentityFlags> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_traits.lock().unwrap() = Some(traits.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.reply.lock().unwrap().clone();
        reply.into_result(|mapping| match mapping {
            Some(flags) => traits
                .subject_ids
                .iter()
                .map(|id| (id.clone(), flags.clone()))
                .collect(),
            None => IdentityFlags::new(),
        })
    }

    fn name(&self) -> &str {
        "mock-flags"
    }
}

/// Feature client con respuesta programable.
pub struct MockFeatureClient {
    reply: Mutex<Reply>,
    calls: AtomicUsize,
    last_request: Mutex<Option<FeaturesRequest>>,
}

impl MockFeatureClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<FeaturesRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteFeatureClient for MockFeatureClient {
    async fn evaluate_features(&self, request: &FeaturesRequest) -> Result<FeaturesResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let reply = self.reply.lock().unwrap().clone();
        reply.into_result(|features| FeaturesResponse {
            features,
            license: None,
        })
    }

    fn name(&self) -> &str {
        "mock-features"
    }
}
