//! Service entry point

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{QueryError, Result};
use crate::selector::CompoundSelector;
use crate::transport::{HttpTransport, Transport};
use crate::url_path::UrlPath;

/// Record namespaces of the service. Only compounds are queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Compound,
}

impl Domain {
    pub fn path_segment(self) -> &'static str {
        match self {
            Domain::Compound => "compound",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for Domain {
    type Err = QueryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "compound" => Ok(Domain::Compound),
            other => Err(QueryError::UnknownDomain(other.to_string())),
        }
    }
}

/// Handle on the remote service
///
/// ```no_run
/// # async fn demo() -> pubchem_query::Result<()> {
/// use pubchem_query::{ExecuteOptions, Property, PubChem};
///
/// let pubchem = PubChem::from_config(&Default::default())?;
/// let result = pubchem
///     .compound()
///     .set_smiles("CCCCC=O")
///     .fetch_property(Property::IUPACName)
///     .execute(&ExecuteOptions::default())
///     .await;
/// println!("{} (status {})", result.data, result.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PubChem {
    base: UrlPath,
    transport: Arc<dyn Transport>,
}

impl PubChem {
    /// Use an explicit transport, e.g. a test double
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base: UrlPath::new(base_url.trim_end_matches('/')),
            transport,
        }
    }

    /// Talk to the configured service over HTTP
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.http)?;
        Ok(Self::with_transport(config.base_url(), Arc::new(transport)))
    }

    /// Talk to the public service with default HTTP settings
    pub fn new() -> Result<Self> {
        Self::from_config(&ClientConfig::default())
    }

    pub fn base_url(&self) -> &UrlPath {
        &self.base
    }

    /// Select a domain by name; anything but `compound` is rejected
    pub fn domain(&self, name: &str) -> Result<CompoundSelector> {
        match name.parse::<Domain>()? {
            Domain::Compound => Ok(self.compound()),
        }
    }

    /// The compound domain
    pub fn compound(&self) -> CompoundSelector {
        CompoundSelector::new(
            self.base.append(Domain::Compound.path_segment()),
            Arc::clone(&self.transport),
        )
    }
}

impl fmt::Debug for PubChem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PubChem")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
