use bitebyte_core::domain::common::{
    BiteByteConfig, DEFAULT_HISTORY_CAPACITY, LLMConfig, LLMProvider, MAX_HISTORY_CAPACITY,
    ObjectStorageConfig,
};
use clap::{Args as ClapArgs, Parser, builder::RangedU64ValueParser};

#[derive(Debug, Clone, Parser)]
#[command(name = "bitebyte", version, about = "Food image calorie analyzer")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub object_storage: ObjectStorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    /// Number of records kept in memory.
    #[arg(
        long,
        env = "HISTORY_CAPACITY",
        default_value_t = DEFAULT_HISTORY_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_HISTORY_CAPACITY as u64)
    )]
    pub history_capacity: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LLMArgs {
    #[arg(long = "llm-provider", env = "LLM_PROVIDER", default_value = "openai")]
    pub provider: LLMProvider,

    /// Defaults to the provider's vision model.
    #[arg(long = "llm-model", env = "LLM_MODEL")]
    pub model: Option<String>,

    #[arg(long = "llm-api-key", env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long = "llm-base-url", env = "LLM_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "FOOD_PROMPT_TEMPLATE")]
    pub food_prompt_template: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ObjectStorageArgs {
    #[arg(
        long = "object-storage-endpoint",
        env = "OBJECT_STORAGE_ENDPOINT",
        default_value = "http://localhost:9000"
    )]
    pub endpoint: String,

    #[arg(
        long = "object-storage-region",
        env = "OBJECT_STORAGE_REGION",
        default_value = "us-east-1"
    )]
    pub region: String,

    #[arg(long = "object-storage-access-key", env = "OBJECT_STORAGE_ACCESS_KEY")]
    pub access_key: Option<String>,

    #[arg(
        long = "object-storage-secret-key",
        env = "OBJECT_STORAGE_SECRET_KEY",
        hide_env_values = true
    )]
    pub secret_key: Option<String>,

    #[arg(
        long = "object-storage-bucket",
        env = "OBJECT_STORAGE_BUCKET",
        default_value = "bitebyte"
    )]
    pub bucket: String,

    #[arg(long = "object-storage-public-url", env = "OBJECT_STORAGE_PUBLIC_URL")]
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for BiteByteConfig {
    fn from(args: Args) -> Self {
        BiteByteConfig {
            llm: LLMConfig {
                provider: args.llm.provider,
                model: args.llm.model,
                api_key: args.llm.api_key,
                base_url: args.llm.base_url,
                food_prompt_template: args.llm.food_prompt_template,
            },
            object_storage: ObjectStorageConfig {
                endpoint: args.object_storage.endpoint,
                region: args.object_storage.region,
                access_key: args.object_storage.access_key,
                secret_key: args.object_storage.secret_key,
                bucket: args.object_storage.bucket,
                public_url: args.object_storage.public_url,
            },
            history_capacity: args.server.history_capacity,
        }
    }
}
