use crate::{
    domain::{
        analysis::prompts::PromptCatalog,
        common::{BiteByteConfig, entities::app_errors::CoreError, services::Service},
    },
    infrastructure::{
        history::InMemoryHistoryRepository, llm::LLMProviderClient,
        object_storage::MinioObjectStorage,
    },
};

pub mod session;

pub type BiteByteService =
    Service<LLMProviderClient, MinioObjectStorage, InMemoryHistoryRepository>;

pub async fn create_service(config: BiteByteConfig) -> Result<BiteByteService, CoreError> {
    let llm_client = LLMProviderClient::from_config(&config.llm);

    let object_storage = if config.object_storage.is_configured() {
        Some(MinioObjectStorage::new(config.object_storage).await?)
    } else {
        tracing::warn!(
            warning = "storage_degraded",
            "Object storage credentials missing, images will be kept as local references"
        );
        None
    };

    let history_repository = InMemoryHistoryRepository::new(config.history_capacity);
    let prompts = PromptCatalog::new(config.llm.food_prompt_template);

    Ok(Service::new(
        llm_client,
        object_storage,
        history_repository,
        prompts,
    ))
}
