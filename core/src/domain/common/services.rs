use crate::domain::{
    analysis::{ports::LLMClient, prompts::PromptCatalog},
    history::ports::HistoryRepository,
    storage::{entities::StorageMode, ports::ObjectStoragePort},
};

#[derive(Clone)]
pub struct Service<LLM, OS, HR>
where
    LLM: LLMClient,
    OS: ObjectStoragePort,
    HR: HistoryRepository,
{
    pub(crate) llm_client: LLM,
    /// `None` when no storage credential is configured.
    pub(crate) object_storage: Option<OS>,
    pub(crate) history_repository: HR,
    pub(crate) prompts: PromptCatalog,
}

impl<LLM, OS, HR> Service<LLM, OS, HR>
where
    LLM: LLMClient,
    OS: ObjectStoragePort,
    HR: HistoryRepository,
{
    pub fn new(
        llm_client: LLM,
        object_storage: Option<OS>,
        history_repository: HR,
        prompts: PromptCatalog,
    ) -> Self {
        Self {
            llm_client,
            object_storage,
            history_repository,
            prompts,
        }
    }

    pub fn storage_mode(&self) -> StorageMode {
        if self.object_storage.is_some() {
            StorageMode::Remote
        } else {
            StorageMode::Local
        }
    }

    pub fn history_capacity(&self) -> usize {
        self.history_repository.capacity()
    }
}
