use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::{DoctorOps, DoctorQuery, DoctorService, DoctorsState};
use shared_api::ApiClient;
use shared_store::Store;
use shared_utils::storage::TokenStore;
use shared_utils::test_utils::TestConfig;
use shared_utils::{keys, LocalStore};

fn service_for(uri: &str, dir: &tempfile::TempDir) -> DoctorService {
    let store = LocalStore::open(dir.path().join("local_store.json"));
    store.set(keys::AUTH_TOKEN, &"test-token");
    let config = TestConfig::with_api_base(uri).to_app_config();
    DoctorService::new(ApiClient::new(&config, TokenStore::new(store)))
}

fn doctor_json(id: Uuid) -> serde_json::Value {
    json!({
        "id": id,
        "email": "sharma@clinic.example",
        "name": "Dr. Sharma",
        "role": "doctor",
        "createdAt": "2023-11-02T08:00:00Z",
        "specialization": "Panchakarma",
        "licenseNumber": "AYU-2291",
        "experience": 12,
        "patients": [Uuid::new_v4()],
        "qualifications": ["BAMS", "MD (Ayurveda)"],
        "consultationFee": 500.0,
        "schedule": {
            "monday": [ { "start": "09:00", "end": "12:00", "available": true } ]
        }
    })
}

#[tokio::test]
async fn list_flattens_the_profile_into_the_doctor() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .and(query_param("specialization", "Panchakarma"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "doctors": [doctor_json(id)] }
        })))
        .mount(&server)
        .await;

    let service = service_for(&server.uri(), &dir);
    let query = DoctorQuery {
        specialization: Some("Panchakarma".to_string()),
        ..Default::default()
    };

    let page = service.list(&query).await.expect("list should succeed");
    assert_eq!(page.doctors.len(), 1);
    assert_eq!(page.doctors[0].id(), id);
    assert_eq!(page.doctors[0].profile.name, "Dr. Sharma");
    assert_eq!(page.doctors[0].patients.len(), 1);

    let schedule = page.doctors[0].schedule.as_ref().expect("schedule");
    assert_eq!(schedule.monday[0].start, "09:00");
    assert!(schedule.tuesday.is_empty());
}

#[tokio::test]
async fn fetch_op_fills_the_slice() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "doctors": [doctor_json(Uuid::new_v4())] }
        })))
        .mount(&server)
        .await;

    let store = Store::spawn(DoctorsState::default());
    let ops = DoctorOps::new(service_for(&server.uri(), &dir));

    ops.fetch(&store, DoctorQuery::default()).await;
    store.flush().await;

    let state = store.state();
    assert_eq!(state.doctors.len(), 1);
    assert!(!state.is_loading);
}
