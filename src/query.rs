//! Property selection and execution, the second and third stages of a query chain

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::checksum::RegistryNumber;
use crate::classify::{classify, ExecutionResult, QueryData, Status};
use crate::error::{QueryError, Result};
use crate::property::{DataFormat, Property, PropertyRequest};
use crate::transport::Transport;
use crate::url_path::UrlPath;

/// Per-execution options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Response encoding; anything but JSON is returned unparsed
    pub format: DataFormat,
    /// Return the JSON body unparsed
    pub raw: bool,
}

impl ExecuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }
}

/// Queries available once a compound has been selected
#[derive(Clone)]
pub struct PropertyQuery {
    url: UrlPath,
    transport: Arc<dyn Transport>,
}

impl PropertyQuery {
    pub(crate) fn new(url: UrlPath, transport: Arc<dyn Transport>) -> Self {
        Self { url, transport }
    }

    /// The compound prefix, `<base>/compound/<selector>/<value>`
    pub fn url(&self) -> &UrlPath {
        &self.url
    }

    fn bind(&self, request: PropertyRequest) -> ExecutableQuery {
        let url = self
            .url
            .append_all(request.path_segments().iter().map(String::as_str));
        ExecutableQuery {
            url,
            request,
            transport: Arc::clone(&self.transport),
        }
    }

    /// Fetch a single descriptor
    pub fn fetch_property(&self, property: Property) -> ExecutableQuery {
        self.bind(PropertyRequest::Single(property))
    }

    /// Fetch several descriptors in one request.
    ///
    /// Names outside the known descriptor set are dropped without error. The
    /// result is a map keyed by descriptor name.
    pub fn get_properties<S: AsRef<str>>(&self, names: &[S]) -> ExecutableQuery {
        let known: Vec<Property> = names
            .iter()
            .filter_map(|name| {
                let property = Property::from_name(name.as_ref());
                if property.is_none() {
                    tracing::debug!(name = name.as_ref(), "dropping unknown property");
                }
                property
            })
            .collect();
        self.bind(PropertyRequest::Batch(known))
    }

    /// [`get_properties`](Self::get_properties) for untyped input.
    ///
    /// Fails before any request is made when `names` is not a JSON array.
    /// Entries that are not strings are dropped like unknown names.
    pub fn get_properties_json(&self, names: &Value) -> Result<ExecutableQuery> {
        let entries = names
            .as_array()
            .ok_or_else(|| QueryError::InvalidArgument("only an array is accepted".to_string()))?;
        let names: Vec<&str> = entries.iter().filter_map(Value::as_str).collect();
        Ok(self.get_properties(&names))
    }

    /// Fetch the synonym list, keeping at most `limit` entries
    pub fn get_names(&self, limit: Option<usize>) -> ExecutableQuery {
        self.bind(PropertyRequest::Synonyms { limit })
    }

    /// Find the compound's registry number among its synonyms
    pub fn get_cas(&self) -> RegistryNumberQuery {
        RegistryNumberQuery {
            names: self.get_names(None),
        }
    }
}

impl fmt::Debug for PropertyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyQuery")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// A fully bound request, missing only its data-format segment
#[derive(Clone)]
pub struct ExecutableQuery {
    url: UrlPath,
    request: PropertyRequest,
    transport: Arc<dyn Transport>,
}

impl ExecutableQuery {
    /// Complete request URL for `format`
    pub fn url(&self, format: DataFormat) -> UrlPath {
        self.url.append(format.segment())
    }

    pub fn request(&self) -> &PropertyRequest {
        &self.request
    }

    /// Perform the request and classify the response.
    ///
    /// Never fails: a transport that produced no response at all is reported
    /// as a server failure.
    pub async fn execute(&self, options: &ExecuteOptions) -> ExecutionResult {
        let url = self.url(options.format);

        let outcome = match self.transport.get(url.as_str()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "transport failure");
                return ExecutionResult::service_unavailable();
            }
        };

        let result = classify(outcome, &self.request, options.format, options.raw);
        tracing::debug!(url = %url, status = result.status.code(), "query executed");
        result
    }

    /// Perform the request and hand `(data, status)` to `callback` exactly once
    pub async fn execute_with<F>(&self, callback: F, options: &ExecuteOptions)
    where
        F: FnOnce(QueryData, Status),
    {
        let ExecutionResult { data, status } = self.execute(options).await;
        callback(data, status);
    }
}

impl fmt::Debug for ExecutableQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutableQuery")
            .field("url", &self.url)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// Outcome of a registry number search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryLookup {
    Found(RegistryNumber),
    NotFound,
}

impl RegistryLookup {
    pub fn found(&self) -> Option<&RegistryNumber> {
        match self {
            RegistryLookup::Found(number) => Some(number),
            RegistryLookup::NotFound => None,
        }
    }
}

/// Registry number discovery over the synonym list
#[derive(Debug, Clone)]
pub struct RegistryNumberQuery {
    names: ExecutableQuery,
}

impl RegistryNumberQuery {
    /// Fetch every synonym and return the first with a valid check digit.
    ///
    /// When the synonym fetch fails its status is passed through; when it
    /// succeeds but nothing validates the status is [`Status::NotFound`].
    pub async fn find(&self) -> (RegistryLookup, Status) {
        let result = self.names.execute(&ExecuteOptions::default()).await;
        if !result.status.is_success() {
            return (RegistryLookup::NotFound, result.status);
        }

        let found = result
            .data
            .as_value()
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .find_map(RegistryNumber::parse);

        match found {
            Some(number) => (RegistryLookup::Found(number), Status::Success),
            None => {
                tracing::debug!(url = %self.names.url, "no synonym is a valid registry number");
                (RegistryLookup::NotFound, Status::NotFound)
            }
        }
    }

    /// Run [`find`](Self::find) and always hand the outcome to `callback`
    pub async fn find_with<F>(&self, callback: F)
    where
        F: FnOnce(RegistryLookup, Status),
    {
        let (lookup, status) = self.find().await;
        callback(lookup, status);
    }
}
