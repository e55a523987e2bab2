use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use bytes::Bytes;
use tokio::sync::Notify;

use crate::{
    domain::{
        analysis::{ports::LLMClient, prompts::PromptCatalog},
        capture::entities::ImageUpload,
        common::{entities::app_errors::CoreError, services::Service},
        storage::ports::ObjectStoragePort,
    },
    infrastructure::history::InMemoryHistoryRepository,
};

pub(crate) type TestService = Service<FakeLLM, FakeObjectStorage, InMemoryHistoryRepository>;

pub(crate) fn service_with(
    llm: FakeLLM,
    storage: Option<FakeObjectStorage>,
    capacity: usize,
) -> TestService {
    Service::new(
        llm,
        storage,
        InMemoryHistoryRepository::new(capacity),
        PromptCatalog::default(),
    )
}

pub(crate) fn jpeg_upload(filename: &str) -> ImageUpload {
    ImageUpload::new(
        vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46],
        "image/jpeg",
        filename,
    )
}

#[derive(Debug, Clone)]
pub(crate) struct LLMRequest {
    pub prompt: String,
    pub mime_type: String,
}

#[derive(Clone)]
pub(crate) struct FakeLLM {
    response: Result<String, CoreError>,
    requests: Arc<Mutex<Vec<LLMRequest>>>,
    gate: Option<Arc<Notify>>,
}

impl FakeLLM {
    pub fn replying(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            requests: Arc::default(),
            gate: None,
        }
    }

    pub fn failing(error: CoreError) -> Self {
        Self {
            response: Err(error),
            requests: Arc::default(),
            gate: None,
        }
    }

    /// Holds every call until `gate` is notified.
    pub fn gated(text: &str, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::replying(text)
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<LLMRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl LLMClient for FakeLLM {
    async fn generate_with_image(
        &self,
        prompt: String,
        _image_data: Bytes,
        mime_type: String,
    ) -> Result<String, CoreError> {
        self.requests
            .lock()
            .unwrap()
            .push(LLMRequest { prompt, mime_type });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.response.clone()
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeObjectStorage {
    objects: Arc<Mutex<HashSet<String>>>,
    fail_puts: bool,
    fail_deletes: bool,
}

impl FakeObjectStorage {
    pub fn failing_puts() -> Self {
        Self {
            fail_puts: true,
            ..Default::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Default::default()
        }
    }

    pub fn contains(&self, object_key: &str) -> bool {
        self.objects.lock().unwrap().contains(object_key)
    }
}

impl ObjectStoragePort for FakeObjectStorage {
    async fn put_object(
        &self,
        object_key: &str,
        _payload: Bytes,
        _content_type: &str,
    ) -> Result<String, CoreError> {
        if self.fail_puts {
            return Err(CoreError::ObjectStorageError(
                "bucket unreachable".to_string(),
            ));
        }

        self.objects.lock().unwrap().insert(object_key.to_string());
        Ok(format!("https://objects.test/{object_key}"))
    }

    async fn delete_object(&self, object_key: &str) -> Result<(), CoreError> {
        if self.fail_deletes {
            return Err(CoreError::ObjectStorageError("access denied".to_string()));
        }

        self.objects.lock().unwrap().remove(object_key);
        Ok(())
    }
}
