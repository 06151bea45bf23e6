//! Per-invocation collaborator bundles.
//!
//! A bundle is built at the start of every invocation and handed to each
//! stage; nothing is kept between invocations.

use std::sync::Arc;

use salesq_core::config::AppConfig;
use salesq_core::PipelineError;

use crate::functions::{FunctionInvoker, HttpFunctionInvoker};
use crate::llm::{BedrockClient, LlmClient};
use crate::odata::{ODataClient, SapODataClient};
use crate::retrieval::{KnowledgeBase, KnowledgeBaseClient};
use crate::secrets::{store_from_config, SecretStore};

#[derive(Clone)]
pub struct UrlGeneratorCollaborators {
    pub secrets: Arc<dyn SecretStore>,
    pub knowledge_base: Arc<dyn KnowledgeBase>,
    pub llm: Arc<dyn LlmClient>,
}

impl UrlGeneratorCollaborators {
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            secrets: store_from_config(&config.secrets),
            knowledge_base: Arc::new(KnowledgeBaseClient::from_config(&config.knowledge_base)?),
            llm: Arc::new(BedrockClient::from_config(&config.llm)?),
        })
    }
}

#[derive(Clone)]
pub struct SalesQueryCollaborators {
    pub secrets: Arc<dyn SecretStore>,
    pub functions: Arc<dyn FunctionInvoker>,
    pub odata: Arc<dyn ODataClient>,
    pub llm: Arc<dyn LlmClient>,
}

impl SalesQueryCollaborators {
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            secrets: store_from_config(&config.secrets),
            functions: Arc::new(HttpFunctionInvoker::from_config(&config.functions)?),
            odata: Arc::new(SapODataClient::from_config(config)?),
            llm: Arc::new(BedrockClient::from_config(&config.llm)?),
        })
    }
}
