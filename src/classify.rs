//! Response classification
//!
//! Turns one transport outcome into the `(data, status)` pair handed back to
//! callers. Classification is a pure function of that single response.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

use crate::parse;
use crate::property::{DataFormat, PropertyRequest};

/// What the transport saw, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    /// 2xx with the response body
    Ok(String),
    /// 5xx (or anything not otherwise classified) with the response body
    ServerError(String),
    /// 4xx with the response body
    ClientError(String),
}

/// Outcome code delivered with every result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    ServerFailure,
    InvalidIdentifier,
    NotFound,
    InvalidProperties,
    UnknownClientError,
}

impl Status {
    /// Stable integer code
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 1,
            Status::ServerFailure => 2,
            Status::InvalidIdentifier => 3,
            Status::NotFound => 4,
            Status::InvalidProperties => 5,
            Status::UnknownClientError => 6,
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

static XML_FAULT_MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<Message>\s*(.*?)\s*</Message>").expect("fault message pattern is valid")
});

static ASNT_FAULT_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"message\s+"([^"]*)""#).expect("fault message pattern is valid"));

/// Message used for status 2
pub const SERVICE_UNAVAILABLE: &str = "service unavailable";

/// A client-side fault reported by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientFault {
    /// "Missing CID list"
    MissingIdentifierList,
    /// "No CID found"
    CompoundNotFound,
    /// "Expected a property list"
    ExpectedPropertyList,
    /// Any other fault message, kept verbatim
    Unknown(String),
}

impl ClientFault {
    /// Map a server fault message onto a known fault
    pub fn from_message(message: &str) -> Self {
        match message {
            "Missing CID list" => ClientFault::MissingIdentifierList,
            "No CID found" => ClientFault::CompoundNotFound,
            "Expected a property list" => ClientFault::ExpectedPropertyList,
            other => ClientFault::Unknown(other.to_string()),
        }
    }

    /// Read the fault message from a client-error body.
    ///
    /// The service answers faults in the requested format: a `Fault.Message`
    /// field for JSON, a `<Message>` element for XML, a `Message: ` line for
    /// the text formats and a `message "..."` field for ASN.1 text. A JSON
    /// fault is accepted whatever the format. A body with no readable message
    /// is an unknown fault.
    pub fn from_body(body: &str, format: DataFormat) -> Self {
        let message = match format {
            DataFormat::Json => None,
            DataFormat::Xml => capture(&XML_FAULT_MESSAGE, body),
            DataFormat::Asnt => capture(&ASNT_FAULT_MESSAGE, body),
            DataFormat::Txt | DataFormat::Csv | DataFormat::Sdf => text_message(body),
        }
        .or_else(|| json_message(body));

        match message {
            Some(message) => Self::from_message(&message),
            None => ClientFault::Unknown(body.trim().to_string()),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            ClientFault::MissingIdentifierList => Status::InvalidIdentifier,
            ClientFault::CompoundNotFound => Status::NotFound,
            ClientFault::ExpectedPropertyList => Status::InvalidProperties,
            ClientFault::Unknown(_) => Status::UnknownClientError,
        }
    }

    /// Human-readable message delivered as data
    pub fn describe(&self) -> String {
        match self {
            ClientFault::MissingIdentifierList => "wrong identifier number".to_string(),
            ClientFault::CompoundNotFound => "compound not found".to_string(),
            ClientFault::ExpectedPropertyList => "invalid properties".to_string(),
            ClientFault::Unknown(message) => format!("unknown client error: {}", message),
        }
    }
}

fn json_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .pointer("/Fault/Message")
        .and_then(Value::as_str)
        .map(String::from)
}

fn capture(pattern: &Regex, body: &str) -> Option<String> {
    pattern
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

// Status: 404 / Code: PUGREST.NotFound / Message: No CID found
fn text_message(body: &str) -> Option<String> {
    body.lines()
        .find_map(|line| line.trim().strip_prefix("Message:"))
        .map(|message| message.trim().trim_matches('"').to_string())
}

/// Payload of an execution
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    /// Parsed JSON value (bare value, property map or synonym array)
    Parsed(Value),
    /// Unparsed body, for non-JSON formats or raw mode
    Raw(String),
    /// Error description accompanying a non-success status
    Message(String),
}

impl QueryData {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            QueryData::Parsed(value) => Some(value),
            _ => None,
        }
    }

    /// Text payload: the raw body, the message, or a parsed JSON string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryData::Parsed(value) => value.as_str(),
            QueryData::Raw(text) | QueryData::Message(text) => Some(text),
        }
    }
}

impl fmt::Display for QueryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryData::Parsed(Value::String(s)) => f.write_str(s),
            QueryData::Parsed(value) => write!(f, "{}", value),
            QueryData::Raw(text) | QueryData::Message(text) => f.write_str(text),
        }
    }
}

/// The `(data, status)` pair produced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub data: QueryData,
    pub status: Status,
}

impl ExecutionResult {
    pub fn new(data: QueryData, status: Status) -> Self {
        Self { data, status }
    }

    pub fn service_unavailable() -> Self {
        Self::new(QueryData::Message(SERVICE_UNAVAILABLE.to_string()), Status::ServerFailure)
    }

    fn malformed(error: impl fmt::Display) -> Self {
        Self::new(
            QueryData::Message(format!("malformed response: {}", error)),
            Status::ServerFailure,
        )
    }
}

/// Classify a transport outcome for the given request.
pub fn classify(
    outcome: TransportOutcome,
    request: &PropertyRequest,
    format: DataFormat,
    raw: bool,
) -> ExecutionResult {
    match outcome {
        TransportOutcome::Ok(body) => {
            if !format.is_json() || raw {
                return ExecutionResult::new(QueryData::Raw(body), Status::Success);
            }
            let parsed: Value = match serde_json::from_str(&body) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(error = %e, "successful response is not valid JSON");
                    return ExecutionResult::malformed(e);
                }
            };
            match parse::extract(&parsed, request) {
                Ok(value) => ExecutionResult::new(QueryData::Parsed(value), Status::Success),
                Err(e) => {
                    tracing::warn!(error = %e, "successful response has an unexpected shape");
                    ExecutionResult::malformed(e)
                }
            }
        }
        TransportOutcome::ServerError(_) => ExecutionResult::service_unavailable(),
        TransportOutcome::ClientError(body) => {
            let fault = ClientFault::from_body(&body, format);
            if let ClientFault::Unknown(message) = &fault {
                tracing::warn!(fault = %message, "unrecognized client fault");
            }
            ExecutionResult::new(QueryData::Message(fault.describe()), fault.status())
        }
    }
}
