//! Remote API contract: documents and code execution.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{COMPILE_ERROR, CodepadError, Result};
use crate::session::CodeId;

/// A saved (language, code, input, file name, title) tuple.
///
/// Sent to `POST /code` (without `id` for new documents) and returned by
/// `GET /code/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CodeId>,
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub custom_input: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub title: String,
}

/// Server confirmation of a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCode {
    pub id: CodeId,
    /// Code as stored by the server.
    pub code: String,
}

/// Body of `POST /run/run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Execution code of the language.
    pub lang: String,
    /// Base64 of the source.
    pub source: String,
    /// Base64 of each stdin payload.
    pub input: Vec<String>,
}

impl RunRequest {
    /// Builds a request, base64-encoding the source and the single input.
    pub fn new(lang: impl Into<String>, source: &str, input: &str) -> Self {
        Self {
            lang: lang.into(),
            source: encode_payload(source),
            input: vec![encode_payload(input)],
        }
    }
}

/// One executed test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TestCaseResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Base64 of the program output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunData {
    #[serde(default)]
    pub testcases: Vec<TestCaseResult>,
}

/// Response of the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RunData>,
}

impl RunResponse {
    /// Successful run with one passing test case and no output payload.
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
            error: None,
            data: Some(RunData {
                testcases: vec![TestCaseResult {
                    result: Some("success".to_string()),
                    output: None,
                }],
            }),
        }
    }

    pub fn is_compile_error(&self) -> bool {
        self.result == COMPILE_ERROR
    }

    /// The base64 payload to show: the error text for compile errors,
    /// otherwise the first test case's output.
    pub fn encoded_output(&self) -> Result<&str> {
        if self.is_compile_error() {
            return self
                .error
                .as_deref()
                .ok_or_else(|| CodepadError::decode("compile_error response without error field"));
        }

        self.data
            .as_ref()
            .and_then(|data| data.testcases.first())
            .and_then(|case| case.output.as_deref())
            .ok_or_else(|| CodepadError::decode("run response has no test case output"))
    }

    /// Decoded output text.
    pub fn decoded_output(&self) -> Result<String> {
        decode_payload(self.encoded_output()?)
    }
}

/// Base64 (standard alphabet, padded) of the UTF-8 bytes of `text`.
pub fn encode_payload(text: &str) -> String {
    BASE64_STANDARD.encode(text.as_bytes())
}

/// Inverse of [`encode_payload`]; fails on bad base64 or non UTF-8 bytes.
pub fn decode_payload(encoded: &str) -> Result<String> {
    let bytes = BASE64_STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8(bytes)?)
}

/// Client for the document store and the execution service.
#[async_trait]
pub trait CodeApi: Send + Sync {
    /// `GET /code/{id}`
    async fn fetch_code(&self, id: &str) -> Result<CodeDocument>;

    /// `POST /code`
    async fn save_code(&self, document: &CodeDocument) -> Result<SavedCode>;

    /// `POST /run/run`
    async fn run(&self, request: &RunRequest) -> Result<RunResponse>;
}
