//! Shape-specific extraction from successful JSON bodies
//!
//! Property answers come as `{"PropertyTable": {"Properties": [{...}]}}`,
//! synonym answers as `{"InformationList": {"Information": [{"Synonym": [...]}]}}`.
//! Only the first entry of either list is ever used.

use serde_json::Value;
use thiserror::Error;

use crate::property::PropertyRequest;

/// The body did not have the shape the request implies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("{0} is not {1}")]
    WrongType(&'static str, &'static str),
}

/// Pull the requested value out of a successful response body.
///
/// - `Single`: the named field of the first property row, or `Value::Null`
///   when the service left it out.
/// - `Batch`: the whole first property row; names the service did not know
///   are simply absent from it.
/// - `Synonyms`: the first synonym list, truncated to `limit` entries when a
///   limit is given (a limit past the end keeps everything).
pub fn extract(body: &Value, request: &PropertyRequest) -> Result<Value, ShapeError> {
    match request {
        PropertyRequest::Synonyms { limit } => {
            let synonyms = first_synonym_list(body)?;
            let kept = match limit {
                Some(limit) => synonyms.iter().take(*limit).cloned().collect(),
                None => synonyms.clone(),
            };
            Ok(Value::Array(kept))
        }
        PropertyRequest::Batch(_) => Ok(first_property_row(body)?.clone()),
        PropertyRequest::Single(property) => Ok(first_property_row(body)?
            .get(property.name())
            .cloned()
            .unwrap_or(Value::Null)),
    }
}

fn first_property_row(body: &Value) -> Result<&Value, ShapeError> {
    let row = body
        .get("PropertyTable")
        .ok_or(ShapeError::Missing("PropertyTable"))?
        .get("Properties")
        .ok_or(ShapeError::Missing("PropertyTable.Properties"))?
        .as_array()
        .ok_or(ShapeError::WrongType("PropertyTable.Properties", "an array"))?
        .first()
        .ok_or(ShapeError::Missing("PropertyTable.Properties[0]"))?;

    if row.is_object() {
        Ok(row)
    } else {
        Err(ShapeError::WrongType("PropertyTable.Properties[0]", "an object"))
    }
}

fn first_synonym_list(body: &Value) -> Result<&Vec<Value>, ShapeError> {
    body.get("InformationList")
        .ok_or(ShapeError::Missing("InformationList"))?
        .get("Information")
        .ok_or(ShapeError::Missing("InformationList.Information"))?
        .as_array()
        .ok_or(ShapeError::WrongType("InformationList.Information", "an array"))?
        .first()
        .ok_or(ShapeError::Missing("InformationList.Information[0]"))?
        .get("Synonym")
        .ok_or(ShapeError::Missing("InformationList.Information[0].Synonym"))?
        .as_array()
        .ok_or(ShapeError::WrongType("InformationList.Information[0].Synonym", "an array"))
}
