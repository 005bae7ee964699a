use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use osteoscan_bedrock::tokens::TokenCount;
use osteoscan_bedrock::{AnalysisModel, AnalysisPrompt, BedrockError, ModelOutput};
use osteoscan_intake::{IntakePolicy, IntakeService};
use osteoscan_lambda::router;
use osteoscan_lambda::state::AppState;
use osteoscan_storage::{MemoryStore, StoreBackend};

const PNG: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Replies with a fixed text, or fails when none is set.
struct FixedModel(Option<String>);

impl AnalysisModel for FixedModel {
    async fn analyze(&self, _prompt: &AnalysisPrompt) -> Result<ModelOutput, BedrockError> {
        match &self.0 {
            Some(text) => Ok(ModelOutput {
                text: text.clone(),
                usage: TokenCount::default(),
            }),
            None => Err(BedrockError::Invocation("service unavailable".to_string())),
        }
    }
}

fn app(reply: Option<Value>) -> Router {
    let model = FixedModel(reply.map(|v| v.to_string()));
    let store = StoreBackend::Memory(MemoryStore::new());
    router(AppState::new(IntakeService::new(model, store, IntakePolicy::default())))
}

fn clavicle_reply(t_score: f64, category: &str) -> Value {
    json!({
        "singh_index": null,
        "jhamaria_index": null,
        "cortical_thickness_mm": 3.1,
        "texture_contrast": 0.9,
        "texture_homogeneity": 0.55,
        "texture_energy": 0.35,
        "texture_entropy": 6.0,
        "fractal_dimension": 1.38,
        "predicted_bmd_gm_cm2": 0.78,
        "predicted_t_score": t_score,
        "predicted_z_score": -0.8,
        "osteoporosis_risk_category": category,
        "confidence_score": 80
    })
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn upload(app: &Router) -> String {
    let req = Request::post("/uploads?filename=clavicle.png")
        .header("content-type", "image/png")
        .body(Body::from(PNG.to_vec()))
        .unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
    body["image_url"].as_str().unwrap().to_string()
}

fn submission(image_url: &str) -> Value {
    json!({
        "patient_name": "Elin Sand",
        "patient_age": 69,
        "patient_gender": "female",
        "anatomical_region": "clavicle",
        "image_url": image_url,
    })
}

#[tokio::test]
async fn health() {
    let (status, body) = send(&app(None), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn submission_flows_to_reports_and_dashboard() {
    let app = app(Some(clavicle_reply(-1.6, "osteopenia")));
    let image_url = upload(&app).await;

    let (status, record) = send(&app, post_json("/analyses", submission(&image_url))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["analysis_status"], "completed");
    assert_eq!(record["dxa_recommendation"], "follow_up_6_months");
    assert_eq!(record["singh_index"], Value::Null);
    let id = record["id"].as_str().unwrap();

    let (status, reports) = send(&app, get("/reports?risk_category=osteopenia")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reports.as_array().unwrap().len(), 1);
    let (_, reports) = send(&app, get("/reports?risk_category=normal")).await;
    assert!(reports.as_array().unwrap().is_empty());

    let resp = app
        .clone()
        .oneshot(get(&format!("/reports/{id}/render")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let text = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&text).contains("Elin Sand"));

    let (status, stats) = send(&app, get("/dashboard")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_analyses"], 1);
    assert_eq!(stats["classification"]["osteopenia"], 100);
}

#[tokio::test]
async fn review_then_approve() {
    let app = app(Some(clavicle_reply(-0.5, "osteopenia")));
    let image_url = upload(&app).await;
    let (_, record) = send(&app, post_json("/analyses", submission(&image_url))).await;
    assert_eq!(record["analysis_status"], "requires_review");
    let id = record["id"].as_str().unwrap();

    let (status, _) = send(&app, get("/reports")).await;
    assert_eq!(status, StatusCode::OK);

    let approve = format!("/analyses/{id}/approve");
    let reviewer = json!({ "reviewer": "dr.ek" });
    let (status, approved) = send(&app, post_json(&approve, reviewer.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["analysis_status"], "completed");

    let (status, body) = send(&app, post_json(&approve, reviewer)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("cannot move"));

    let revalidate = format!("/analyses/{id}/revalidate");
    let (status, body) = send(&app, post_json(&revalidate, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], false);
    assert_eq!(body["derived_status"], "requires_review");
    assert_eq!(body["analysis"]["analysis_status"], "completed");
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway_with_record_id() {
    let app = app(None);
    let image_url = upload(&app).await;
    let (status, body) = send(&app, post_json("/analyses", submission(&image_url))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let id = body["record_id"].as_str().unwrap();

    let (status, record) = send(&app, get(&format!("/analyses/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["analysis_status"], "failed");
}

#[tokio::test]
async fn hard_validation_failure_is_unprocessable() {
    let mut reply = clavicle_reply(-1.6, "osteopenia");
    reply["jhamaria_index"] = json!(5);
    let app = app(Some(reply));
    let image_url = upload(&app).await;
    let (status, body) = send(&app, post_json("/analyses", submission(&image_url))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("jhamaria_index"));
    assert!(body["record_id"].is_string());
}

#[tokio::test]
async fn bad_input_and_missing_records() {
    let app = app(None);
    let mut bad = submission("images/x.png");
    bad["patient_age"] = json!(0);
    let (status, _) = send(&app, post_json("/analyses", bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = Request::post("/uploads")
        .header("content-type", "image/png")
        .body(Body::from("plain text"))
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get(&format!("/analyses/{}", uuid::Uuid::new_v4()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn patients_crud_and_mrn_clash() {
    let app = app(None);
    let patient = json!({
        "full_name": "Elin Sand",
        "date_of_birth": "1956-04-11",
        "gender": "female",
        "medical_record_number": "H-100",
    });
    let (status, created) = send(&app, post_json("/patients", patient.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(&app, post_json("/patients", patient.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let mut edit = patient;
    edit["height_cm"] = json!(165);
    let req = Request::put(format!("/patients/{id}"))
        .header("content-type", "application/json")
        .body(Body::from(edit.to_string()))
        .unwrap();
    let (status, updated) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["height_cm"], 165.0);

    let (status, listed) = send(&app, get("/patients?search=h-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
