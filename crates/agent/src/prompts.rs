use salesq_core::PromptTemplate;

/// System prompt for turning a question plus schema snippets into one OData
/// URL path under `/sap/opu/odata/sap/`.
pub const ODATA_URL: PromptTemplate = PromptTemplate::new(
    "odata_url",
    include_str!("../../../templates/prompts/odata_url.txt.tera"),
    &["context"],
);

/// System prompt for answering from an OData JSON payload only.
pub const SALES_ANSWER: PromptTemplate = PromptTemplate::new(
    "sales_answer",
    include_str!("../../../templates/prompts/sales_answer.txt.tera"),
    &["context"],
);
