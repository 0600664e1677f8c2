//! Invocation responses

use crate::error::PipelineError;
use crate::pipeline::PipelineOutcome;
use serde::Serialize;
use serde_json::{json, Value};

/// Status code and JSON body returned to the invoker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP-style status code
    pub status_code: u16,

    /// Response document
    pub body: Value,
}

impl Response {
    /// Whether the invocation failed
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}

impl From<&PipelineOutcome> for Response {
    fn from(outcome: &PipelineOutcome) -> Self {
        match outcome {
            PipelineOutcome::Persisted(persisted) => Response {
                status_code: 200,
                body: json!({
                    "id": persisted.row.json_data_id,
                    "partitionNumber": persisted.row.partition_number,
                }),
            },
            PipelineOutcome::Imported(ticket) => Response {
                status_code: 202,
                body: json!({
                    "importId": ticket.import_id,
                    "bucket": ticket.bucket,
                    "key": ticket.key,
                }),
            },
        }
    }
}

impl From<&PipelineError> for Response {
    fn from(error: &PipelineError) -> Self {
        let body = match error {
            PipelineError::Validation(e) => json!({
                "message": e.message,
                "fieldName": e.field_name,
                "expected": e.expected,
                "actual": e.actual,
            }),
            PipelineError::MalformedInput(detail) | PipelineError::Storage(detail) => json!({
                "message": detail,
            }),
        };

        Response {
            status_code: error.status_code(),
            body,
        }
    }
}
