//! Compound selection, the first stage of a query chain

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::QueryError;
use crate::query::PropertyQuery;
use crate::transport::Transport;
use crate::url_path::UrlPath;

/// How a compound is identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Name,
    RegistryNumber,
    Smiles,
    CompoundId,
    Inchi,
    InchiKey,
}

impl Selector {
    pub const ALL: &'static [Selector] = &[
        Selector::Name,
        Selector::RegistryNumber,
        Selector::Smiles,
        Selector::CompoundId,
        Selector::Inchi,
        Selector::InchiKey,
    ];

    /// Path segment naming the identifier namespace.
    ///
    /// Registry numbers are looked up as names.
    pub fn path_segment(self) -> &'static str {
        match self {
            Selector::Name | Selector::RegistryNumber => "name",
            Selector::Smiles => "smiles",
            Selector::CompoundId => "cid",
            Selector::Inchi => "inchi",
            Selector::InchiKey => "inchikey",
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Selector::Name => "name",
            Selector::RegistryNumber => "cas",
            Selector::Smiles => "smiles",
            Selector::CompoundId => "cid",
            Selector::Inchi => "inchi",
            Selector::InchiKey => "inchikey",
        };
        f.write_str(label)
    }
}

impl FromStr for Selector {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::ALL
            .iter()
            .copied()
            .find(|selector| selector.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| QueryError::UnknownSelector(s.to_string()))
    }
}

/// Entry point of the compound domain: picks which compound a query is about
#[derive(Clone)]
pub struct CompoundSelector {
    prefix: UrlPath,
    transport: Arc<dyn Transport>,
}

impl CompoundSelector {
    /// `prefix` is the domain URL, e.g. `<base>/compound`
    pub fn new(prefix: UrlPath, transport: Arc<dyn Transport>) -> Self {
        Self { prefix, transport }
    }

    pub fn prefix(&self) -> &UrlPath {
        &self.prefix
    }

    /// Bind a query to `<prefix>/<selector segment>/<value>`.
    ///
    /// The value is not validated or escaped.
    pub fn select(&self, selector: Selector, value: &str) -> PropertyQuery {
        let url = self.prefix.append(selector.path_segment()).append(value);
        tracing::debug!(%selector, url = %url, "compound selected");
        PropertyQuery::new(url, Arc::clone(&self.transport))
    }

    pub fn set_name(&self, name: &str) -> PropertyQuery {
        self.select(Selector::Name, name)
    }

    pub fn set_cas(&self, registry_number: &str) -> PropertyQuery {
        self.select(Selector::RegistryNumber, registry_number)
    }

    pub fn set_smiles(&self, smiles: &str) -> PropertyQuery {
        self.select(Selector::Smiles, smiles)
    }

    pub fn set_cid(&self, cid: &str) -> PropertyQuery {
        self.select(Selector::CompoundId, cid)
    }

    pub fn set_inchi(&self, inchi: &str) -> PropertyQuery {
        self.select(Selector::Inchi, inchi)
    }

    pub fn set_inchikey(&self, inchikey: &str) -> PropertyQuery {
        self.select(Selector::InchiKey, inchikey)
    }
}

impl fmt::Debug for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundSelector")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
