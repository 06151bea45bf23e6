//! Function runtime - the two request pipelines and their collaborators
//!
//! This crate implements the two functions that turn a sales question into an
//! answer:
//! - `url_generator` - question → schema context → model → OData URL
//! - `sales_query` - question → URL generator → SAP GET → model → action response
//!
//! # Collaborators
//!
//! Every external system sits behind a trait so pipelines can be exercised
//! without a network:
//!
//! - `SecretStore` (`secrets`) - SAP host and credentials
//! - `KnowledgeBase` (`retrieval`) - schema snippets by vector search
//! - `LlmClient` (`llm`) - hosted model invocation
//! - `FunctionInvoker` (`functions`) - sales query → URL generator hop
//! - `ODataClient` (`odata`) - authenticated GET against the SAP gateway
//!
//! Bundles of these are built per invocation (`collaborators`).
//!
//! # Failure model
//!
//! Each stage returns `PipelineError` tagged with its category; the first
//! failure aborts the invocation and is rendered once at the boundary.

pub mod collaborators;
pub mod functions;
pub mod llm;
pub mod odata;
pub mod prompts;
pub mod retrieval;
pub mod sales_query;
pub mod secrets;
mod transport;
pub mod url_generator;

pub use collaborators::{SalesQueryCollaborators, UrlGeneratorCollaborators};
pub use sales_query::SalesQueryHandler;
pub use url_generator::UrlGenerator;
