//! PubChem Compound Queries
//!
//! A fluent query builder and response normalizer for the PubChem PUG REST
//! compound service.
//!
//! ## Pipeline
//!
//! ```text
//! PubChem::compound()            <base>/compound
//!   .set_name("ethanol")         <base>/compound/name/ethanol
//!   .fetch_property(IUPACName)   .../property/IUPACName
//!   .execute(&options)           .../JSON  ->  GET  ->  classify  ->  extract
//! ```
//!
//! Every execution yields a `(data, status)` pair:
//!
//! | status | meaning                                   |
//! |--------|-------------------------------------------|
//! | 1      | success                                   |
//! | 2      | server failure or unusable response       |
//! | 3      | invalid identifier list                   |
//! | 4      | compound (or registry number) not found   |
//! | 5      | invalid property list                     |
//! | 6      | client error with an unrecognized message |

pub mod checksum;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod property;
pub mod query;
pub mod selector;
pub mod transport;
pub mod url_path;

pub use checksum::{is_valid_registry_number, RegistryNumber};
pub use classify::{classify, ClientFault, ExecutionResult, QueryData, Status, TransportOutcome};
pub use client::{Domain, PubChem};
pub use config::ClientConfig;
pub use error::{QueryError, Result};
pub use property::{DataFormat, Property, PropertyRequest};
pub use query::{ExecutableQuery, ExecuteOptions, PropertyQuery, RegistryLookup, RegistryNumberQuery};
pub use selector::{CompoundSelector, Selector};
pub use transport::{HttpTransport, Transport};
pub use url_path::UrlPath;
