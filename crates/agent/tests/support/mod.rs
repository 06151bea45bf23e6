#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use salesq_agent::functions::FunctionInvoker;
use salesq_agent::llm::{GenerationRequest, LlmClient};
use salesq_agent::odata::ODataClient;
use salesq_agent::retrieval::KnowledgeBase;
use salesq_agent::secrets::{SecretStore, StaticSecretStore};
use salesq_agent::{SalesQueryCollaborators, UrlGeneratorCollaborators};
use salesq_core::{PipelineError, SapCredentials};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

pub const HOST: &str = "https://s4.example:44300";
pub const SECRET_ID: &str = "S4_System_Details";

pub fn full_secret() -> String {
    format!(
        r#"{{"S4_host_details":"{HOST}","S4_username":"SALES_BOT","S4_password":"s3cr3t-pw"}}"#
    )
}

#[derive(Default)]
pub struct CountingSecrets {
    inner: StaticSecretStore,
    pub calls: AtomicUsize,
}

impl CountingSecrets {
    pub fn with_secret(raw: &str) -> Self {
        Self {
            inner: StaticSecretStore::default().with_secret(SECRET_ID, raw),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for CountingSecrets {
    async fn secret_string(&self, secret_id: &str) -> Result<SecretString, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.secret_string(secret_id).await
    }
}

pub struct FakeKnowledgeBase {
    result: Result<Vec<String>, PipelineError>,
    pub requests: Mutex<Vec<(String, String, u32)>>,
}

impl FakeKnowledgeBase {
    pub fn returning(snippets: &[&str]) -> Self {
        Self {
            result: Ok(snippets.iter().map(|snippet| snippet.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: PipelineError) -> Self {
        Self { result: Err(error), requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<(String, String, u32)> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl KnowledgeBase for FakeKnowledgeBase {
    async fn retrieve(
        &self,
        knowledge_base_id: &str,
        query: &str,
        number_of_results: u32,
    ) -> Result<Vec<String>, PipelineError> {
        self.requests.lock().expect("lock").push((
            knowledge_base_id.to_string(),
            query.to_string(),
            number_of_results,
        ));
        self.result.clone()
    }
}

/// Replies with scripted outputs in order and records every request.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, PipelineError>>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedLlm {
    pub fn replying(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|reply| Ok(reply.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: PipelineError) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(error)])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, PipelineError> {
        self.requests.lock().expect("lock").push(request.clone());
        self.replies
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(PipelineError::generation("no scripted reply left")))
    }
}

pub struct FakeFunctions {
    result: Result<Value, PipelineError>,
    pub calls: Mutex<Vec<(String, Value)>>,
}

impl FakeFunctions {
    pub fn returning(payload: Value) -> Self {
        Self { result: Ok(payload), calls: Mutex::new(Vec::new()) }
    }

    pub fn failing(error: PipelineError) -> Self {
        Self { result: Err(error), calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl FunctionInvoker for FakeFunctions {
    async fn invoke(&self, function_name: &str, payload: &Value) -> Result<Value, PipelineError> {
        self.calls.lock().expect("lock").push((function_name.to_string(), payload.clone()));
        self.result.clone()
    }
}

pub struct FakeOData {
    result: Result<Value, PipelineError>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeOData {
    pub fn returning(payload: Value) -> Self {
        Self { result: Ok(payload), calls: Mutex::new(Vec::new()) }
    }

    pub fn failing(error: PipelineError) -> Self {
        Self { result: Err(error), calls: Mutex::new(Vec::new()) }
    }

    /// `(url, username, password)` per call.
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ODataClient for FakeOData {
    async fn get_json(
        &self,
        url: &str,
        credentials: &SapCredentials,
    ) -> Result<Value, PipelineError> {
        self.calls.lock().expect("lock").push((
            url.to_string(),
            credentials.username.clone(),
            credentials.password.expose_secret().to_string(),
        ));
        self.result.clone()
    }
}

pub struct UrlGeneratorFixture {
    pub secrets: Arc<CountingSecrets>,
    pub knowledge_base: Arc<FakeKnowledgeBase>,
    pub llm: Arc<ScriptedLlm>,
}

impl UrlGeneratorFixture {
    pub fn new(
        secrets: CountingSecrets,
        knowledge_base: FakeKnowledgeBase,
        llm: ScriptedLlm,
    ) -> Self {
        Self {
            secrets: Arc::new(secrets),
            knowledge_base: Arc::new(knowledge_base),
            llm: Arc::new(llm),
        }
    }

    pub fn collaborators(&self) -> UrlGeneratorCollaborators {
        UrlGeneratorCollaborators {
            secrets: self.secrets.clone(),
            knowledge_base: self.knowledge_base.clone(),
            llm: self.llm.clone(),
        }
    }
}

pub struct SalesQueryFixture {
    pub secrets: Arc<CountingSecrets>,
    pub functions: Arc<FakeFunctions>,
    pub odata: Arc<FakeOData>,
    pub llm: Arc<ScriptedLlm>,
}

impl SalesQueryFixture {
    pub fn new(
        secrets: CountingSecrets,
        functions: FakeFunctions,
        odata: FakeOData,
        llm: ScriptedLlm,
    ) -> Self {
        Self {
            secrets: Arc::new(secrets),
            functions: Arc::new(functions),
            odata: Arc::new(odata),
            llm: Arc::new(llm),
        }
    }

    pub fn collaborators(&self) -> SalesQueryCollaborators {
        SalesQueryCollaborators {
            secrets: self.secrets.clone(),
            functions: self.functions.clone(),
            odata: self.odata.clone(),
            llm: self.llm.clone(),
        }
    }
}
