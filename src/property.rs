//! Compound descriptors, request kinds and response formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

macro_rules! properties {
    ($($variant:ident),+ $(,)?) => {
        /// A compound descriptor the service can compute
        ///
        /// Variant names are the service's own property names.
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Property {
            $($variant),+
        }

        impl Property {
            /// Every known descriptor, in the service's documented order
            pub const ALL: &'static [Property] = &[$(Property::$variant),+];

            /// The name used in request paths and response tables
            pub fn name(self) -> &'static str {
                match self {
                    $(Property::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

properties! {
    IUPACName,
    MolecularFormula,
    MolecularWeight,
    CanonicalSMILES,
    IsomericSMILES,
    InChI,
    InChIKey,
    XLogP,
    ExactMass,
    MonoisotopicMass,
    TPSA,
    Complexity,
    Charge,
    HBondDonorCount,
    HBondAcceptorCount,
    RotatableBondCount,
    HeavyAtomCount,
    IsotopeAtomCount,
    AtomStereoCount,
    DefinedAtomStereoCount,
    UndefinedAtomStereoCount,
    BondStereoCount,
    DefinedBondStereoCount,
    UndefinedBondStereoCount,
    CovalentUnitCount,
    Volume3D,
    XStericQuadrupole3D,
    YStericQuadrupole3D,
    ZStericQuadrupole3D,
    FeatureCount3D,
    FeatureAcceptorCount3D,
    FeatureDonorCount3D,
    FeatureAnionCount3D,
    FeatureCationCount3D,
    FeatureRingCount3D,
    FeatureHydrophobeCount3D,
    ConformerModelRMSD3D,
    EffectiveRotorCount3D,
    ConformerCount3D,
    Fingerprint2D,
}

impl Property {
    /// Look up a descriptor by its exact (case-sensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| QueryError::UnknownProperty(s.to_string()))
    }
}

/// What a query asks the service for
///
/// Drives both the tail of the request path and how a JSON body is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyRequest {
    /// One descriptor, answered as a bare value
    Single(Property),
    /// Several descriptors, answered as a name-to-value map
    Batch(Vec<Property>),
    /// The synonym list, optionally truncated to `limit` entries
    Synonyms { limit: Option<usize> },
}

impl PropertyRequest {
    /// Path segments appended after the compound prefix
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            PropertyRequest::Single(property) => {
                vec!["property".to_string(), property.name().to_string()]
            }
            PropertyRequest::Batch(properties) => {
                let joined = properties
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(",");
                vec!["property".to_string(), joined]
            }
            PropertyRequest::Synonyms { .. } => vec!["synonyms".to_string()],
        }
    }
}

/// Response encoding requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Json,
    Xml,
    Sdf,
    Csv,
    Txt,
    Asnt,
}

impl DataFormat {
    /// The trailing path segment for this format
    pub fn segment(self) -> &'static str {
        match self {
            DataFormat::Json => "JSON",
            DataFormat::Xml => "XML",
            DataFormat::Sdf => "SDF",
            DataFormat::Csv => "CSV",
            DataFormat::Txt => "TXT",
            DataFormat::Asnt => "ASNT",
        }
    }

    pub fn is_json(self) -> bool {
        self == DataFormat::Json
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for DataFormat {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "xml" => Ok(DataFormat::Xml),
            "sdf" => Ok(DataFormat::Sdf),
            "csv" => Ok(DataFormat::Csv),
            "txt" => Ok(DataFormat::Txt),
            "asnt" => Ok(DataFormat::Asnt),
            _ => Err(QueryError::UnknownFormat(s.to_string())),
        }
    }
}
