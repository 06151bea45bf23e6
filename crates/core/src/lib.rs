pub mod config;
pub mod errors;
pub mod invocation;
pub mod prompt;
pub mod secret;

pub use errors::PipelineError;
pub use invocation::{
    ActionEvent, ActionResponse, FunctionKind, InvocationResponse, UrlGenerationEvent,
};
pub use prompt::{PromptError, PromptTemplate};
pub use secret::{SapCredentials, SystemDetails};
