//! End-to-end tests for the query pipeline
//!
//! Drives the full selector -> property -> execute chain against an in-memory
//! transport serving canned bodies keyed by URL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use pubchem_query::{
    DataFormat, ExecuteOptions, Property, PubChem, QueryData, RegistryLookup, Status, Transport,
    TransportOutcome,
};

const BASE: &str = "https://pubchem.test/rest/pug";

/// Serves canned outcomes; unknown URLs get a "No CID found" fault
#[derive(Default)]
struct FakeService {
    routes: HashMap<String, TransportOutcome>,
    requests: Mutex<Vec<String>>,
}

impl FakeService {
    fn route(mut self, path: &str, outcome: TransportOutcome) -> Self {
        self.routes.insert(format!("{}/{}", BASE, path), outcome);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeService {
    async fn get(&self, url: &str) -> pubchem_query::Result<TransportOutcome> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self
            .routes
            .get(url)
            .cloned()
            .unwrap_or_else(|| TransportOutcome::ClientError(fault("No CID found"))))
    }
}

fn fault(message: &str) -> String {
    json!({ "Fault": { "Code": "PUGREST.NotFound", "Message": message } }).to_string()
}

fn synonyms(names: &[&str]) -> TransportOutcome {
    TransportOutcome::Ok(
        json!({ "InformationList": { "Information": [{ "CID": 1, "Synonym": names }] } }).to_string(),
    )
}

fn pubchem(service: FakeService) -> (PubChem, Arc<FakeService>) {
    let service = Arc::new(service);
    (PubChem::with_transport(BASE, service.clone()), service)
}

// =============================================================================
// Single properties
// =============================================================================

#[tokio::test]
async fn test_ethanol_iupac_name() {
    let (pubchem, service) = pubchem(FakeService::default().route(
        "compound/name/ethanol/property/IUPACName/JSON",
        TransportOutcome::Ok(r#"{"PropertyTable":{"Properties":[{"IUPACName":"ethanol"}]}}"#.to_string()),
    ));

    let result = pubchem
        .compound()
        .set_name("ethanol")
        .fetch_property(Property::IUPACName)
        .execute(&ExecuteOptions::default())
        .await;

    assert_eq!(result.status, Status::Success);
    assert_eq!(result.status.code(), 1);
    assert_eq!(result.data.as_str(), Some("ethanol"));
    assert_eq!(
        service.requests(),
        vec!["https://pubchem.test/rest/pug/compound/name/ethanol/property/IUPACName/JSON"]
    );
}

#[tokio::test]
async fn test_unknown_compound_is_status_4() {
    let (pubchem, _) = pubchem(FakeService::default());

    let result = pubchem
        .compound()
        .set_name("blablabla")
        .fetch_property(Property::ExactMass)
        .execute(&ExecuteOptions::default())
        .await;

    assert_eq!(result.status.code(), 4);
    assert_eq!(result.data, QueryData::Message("compound not found".to_string()));
}

#[tokio::test]
async fn test_unknown_compound_as_xml_is_status_4() {
    let (pubchem, _) = pubchem(FakeService::default().route(
        "compound/name/blablabla/property/ExactMass/XML",
        TransportOutcome::ClientError(
            "<?xml version=\"1.0\"?>\n<Fault>\n  <Code>PUGREST.NotFound</Code>\n  <Message>No CID found</Message>\n</Fault>\n"
                .to_string(),
        ),
    ));

    let result = pubchem
        .compound()
        .set_name("blablabla")
        .fetch_property(Property::ExactMass)
        .execute(&ExecuteOptions::new().with_format(DataFormat::Xml))
        .await;

    assert_eq!(result.status, Status::NotFound);
    assert_eq!(result.data.as_str(), Some("compound not found"));
}

#[tokio::test]
async fn test_unrecognized_fault_is_status_6() {
    let (pubchem, _) = pubchem(FakeService::default().route(
        "compound/smiles/C(C/property/Charge/JSON",
        TransportOutcome::ClientError(fault("Unable to standardize the given structure")),
    ));

    let result = pubchem
        .compound()
        .set_smiles("C(C")
        .fetch_property(Property::Charge)
        .execute(&ExecuteOptions::default())
        .await;

    assert_eq!(result.status, Status::UnknownClientError);
    assert_eq!(
        result.data.as_str(),
        Some("unknown client error: Unable to standardize the given structure")
    );
}

#[tokio::test]
async fn test_server_error_is_status_2() {
    let (pubchem, _) = pubchem(FakeService::default().route(
        "compound/cid/702/property/XLogP/JSON",
        TransportOutcome::ServerError("<html>503</html>".to_string()),
    ));

    let result = pubchem
        .compound()
        .set_cid("702")
        .fetch_property(Property::XLogP)
        .execute(&ExecuteOptions::default())
        .await;

    assert_eq!(result.status, Status::ServerFailure);
    assert_eq!(result.data.as_str(), Some("service unavailable"));
}

#[tokio::test]
async fn test_non_json_format_returns_body_verbatim() {
    let csv = "\"CID\",\"MolecularFormula\"\n702,\"C2H6O\"\n";
    let (pubchem, _) = pubchem(FakeService::default().route(
        "compound/cid/702/property/MolecularFormula/CSV",
        TransportOutcome::Ok(csv.to_string()),
    ));

    let result = pubchem
        .compound()
        .set_cid("702")
        .fetch_property(Property::MolecularFormula)
        .execute(&ExecuteOptions::new().with_format(DataFormat::Csv))
        .await;

    assert_eq!(result.status, Status::Success);
    assert_eq!(result.data, QueryData::Raw(csv.to_string()));
}

// =============================================================================
// Batch properties
// =============================================================================

#[tokio::test]
async fn test_batch_drops_unknown_names() {
    let (pubchem, service) = pubchem(FakeService::default().route(
        "compound/name/50-78-2/property/IUPACName/JSON",
        TransportOutcome::Ok(
            r#"{"PropertyTable":{"Properties":[{"CID":2244,"IUPACName":"2-acetyloxybenzoic acid"}]}}"#
                .to_string(),
        ),
    ));

    let result = pubchem
        .compound()
        .set_cas("50-78-2")
        .get_properties(&["IUPACName", "Bogus"])
        .execute(&ExecuteOptions::default())
        .await;

    assert_eq!(result.status, Status::Success);
    let map = result.data.as_value().unwrap();
    assert_eq!(map["IUPACName"], json!("2-acetyloxybenzoic acid"));
    assert!(map.get("Bogus").is_none());
    assert_eq!(
        service.requests(),
        vec!["https://pubchem.test/rest/pug/compound/name/50-78-2/property/IUPACName/JSON"]
    );
}

#[tokio::test]
async fn test_batch_with_no_known_names_is_status_5() {
    let (pubchem, _) = pubchem(FakeService::default().route(
        "compound/name/aspirin/property//JSON",
        TransportOutcome::ClientError(fault("Expected a property list")),
    ));

    let result = pubchem
        .compound()
        .set_name("aspirin")
        .get_properties(&["Bogus", "AlsoBogus"])
        .execute(&ExecuteOptions::default())
        .await;

    assert_eq!(result.status, Status::InvalidProperties);
    assert_eq!(result.data.as_str(), Some("invalid properties"));
}

#[tokio::test]
async fn test_batch_from_non_array_fails_before_dispatch() {
    let (pubchem, service) = pubchem(FakeService::default());

    let err = pubchem
        .compound()
        .set_name("aspirin")
        .get_properties_json(&json!({ "IUPACName": true }))
        .unwrap_err();

    assert!(matches!(err, pubchem_query::QueryError::InvalidArgument(_)));
    assert!(service.requests().is_empty());
}

// =============================================================================
// Synonyms and registry numbers
// =============================================================================

#[tokio::test]
async fn test_names_limit_keeps_order() {
    let names = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
    let (pubchem, _) = pubchem(
        FakeService::default().route("compound/name/123-75-1/synonyms/JSON", synonyms(&names)),
    );

    let result = pubchem
        .compound()
        .set_cas("123-75-1")
        .get_names(Some(3))
        .execute(&ExecuteOptions::default())
        .await;

    assert_eq!(result.status, Status::Success);
    assert_eq!(result.data, QueryData::Parsed(json!(["a", "b", "c"])));
}

#[tokio::test]
async fn test_cas_is_first_valid_synonym() {
    let (pubchem, service) = pubchem(FakeService::default().route(
        "compound/name/ethanol/synonyms/JSON",
        synonyms(&["ethanol", "64-17-5", "alcohol", "7732-18-5"]),
    ));

    let (lookup, status) = pubchem.compound().set_name("ethanol").get_cas().find().await;

    assert_eq!(status, Status::Success);
    assert_eq!(lookup.found().map(|n| n.as_str()), Some("64-17-5"));
    assert_eq!(service.requests().len(), 1);
}

#[tokio::test]
async fn test_cas_miss_still_fires_callback() {
    let (pubchem, _) = pubchem(FakeService::default().route(
        "compound/name/mystery/synonyms/JSON",
        synonyms(&["mystery", "64-17-4", "MFCD00000000"]),
    ));

    let mut delivered = Vec::new();
    pubchem
        .compound()
        .set_name("mystery")
        .get_cas()
        .find_with(|lookup, status| delivered.push((lookup, status)))
        .await;

    assert_eq!(delivered, vec![(RegistryLookup::NotFound, Status::NotFound)]);
}

#[tokio::test]
async fn test_independent_chains_share_prefix() {
    let (pubchem, service) = pubchem(
        FakeService::default()
            .route(
                "compound/cid/2244/property/MolecularWeight/JSON",
                TransportOutcome::Ok(r#"{"PropertyTable":{"Properties":[{"MolecularWeight":"180.16"}]}}"#.into()),
            )
            .route("compound/cid/2244/synonyms/JSON", synonyms(&["aspirin", "50-78-2"])),
    );

    let compound = pubchem.compound().set_cid("2244");
    let cas = compound.get_cas();
    let (weight, names) = tokio::join!(
        async {
            compound
                .fetch_property(Property::MolecularWeight)
                .execute(&ExecuteOptions::default())
                .await
        },
        cas.find(),
    );

    assert_eq!(weight.data.as_str(), Some("180.16"));
    assert_eq!(names.0.found().map(|n| n.as_str()), Some("50-78-2"));
    assert_eq!(service.requests().len(), 2);
}
