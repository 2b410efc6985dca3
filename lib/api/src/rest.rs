use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use casex_core::{Attribute, Error, QueryCase, RecordView, ValueOptions};
use casex_similarity::{RankingResponse, WeightVector};
use casex_storage::CaseSession;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// The one session served over HTTP; the mutex keeps ranking and ingestion
/// strictly one at a time
pub type SharedSession = Arc<Mutex<CaseSession>>;

#[derive(Deserialize)]
struct SearchRequest {
    case: HashMap<String, serde_json::Value>,
    #[serde(default)]
    weights: Option<HashMap<String, f64>>,
}

#[derive(Deserialize)]
struct IngestRequest {
    case: HashMap<String, serde_json::Value>,
    diagnosis: String,
}

#[derive(Serialize)]
struct CatalogResponse<'a> {
    id_column: &'a str,
    outcome_column: &'a str,
    attributes: &'a [Attribute],
    default_weights: WeightVector,
    options: &'a ValueOptions,
}

#[derive(Serialize)]
struct CasesResponse {
    result: Vec<RecordView>,
}

#[derive(Serialize)]
struct IngestResponse {
    result: RecordView,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(session: SharedSession, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(session.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register every route; shared by the server and tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalog", web::get().to(get_catalog))
        .route("/cases", web::get().to(list_cases))
        .route("/cases", web::post().to(ingest_case))
        .route("/cases/search", web::post().to(search_cases))
        .route("/cases/refresh", web::post().to(refresh_cases));
}

/// Raw attribute values may arrive as JSON strings or numbers
fn query_from_json(case: &HashMap<String, serde_json::Value>) -> QueryCase {
    case.iter()
        .map(|(name, value)| {
            let raw = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (name.clone(), raw)
        })
        .collect()
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::DelimiterInValue { .. } | Error::InvalidWeight { .. } => {
            HttpResponse::BadRequest().json(body)
        }
        _ => HttpResponse::InternalServerError().json(body),
    }
}

async fn get_catalog(session: web::Data<SharedSession>) -> ActixResult<HttpResponse> {
    let session = session.lock();
    let catalog = session.catalog();

    Ok(HttpResponse::Ok().json(CatalogResponse {
        id_column: &catalog.id_column,
        outcome_column: &catalog.outcome_column,
        attributes: catalog.attributes(),
        default_weights: WeightVector::uniform(catalog),
        options: session.options(),
    }))
}

async fn list_cases(session: web::Data<SharedSession>) -> ActixResult<HttpResponse> {
    let session = session.lock();
    let catalog = session.catalog();
    Ok(HttpResponse::Ok().json(CasesResponse {
        result: session.base().iter().map(|record| record.view(catalog)).collect(),
    }))
}

async fn search_cases(
    session: web::Data<SharedSession>,
    req: web::Json<SearchRequest>,
) -> ActixResult<HttpResponse> {
    let mut session = session.lock();
    let query = query_from_json(&req.case);

    let weights = match &req.weights {
        Some(overrides) => WeightVector::uniform_with_overrides(session.catalog(), overrides),
        None => WeightVector::uniform(session.catalog()),
    };
    if let Err(e) = weights.validate() {
        warn!("Rejected search: {}", e);
        return Ok(error_response(&e));
    }

    match session.rank(&query, &weights) {
        Ok(ranking) => Ok(HttpResponse::Ok().json(RankingResponse::from_ranking(
            session.catalog(),
            ranking,
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn ingest_case(
    session: web::Data<SharedSession>,
    req: web::Json<IngestRequest>,
) -> ActixResult<HttpResponse> {
    let mut session = session.lock();
    let query = query_from_json(&req.case);

    match session.ingest(&query, &req.diagnosis) {
        Ok(record) => {
            info!("Case {} stored via API", record.id);
            Ok(HttpResponse::Ok().json(IngestResponse {
                result: record.view(session.catalog()),
            }))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn refresh_cases(session: web::Data<SharedSession>) -> ActixResult<HttpResponse> {
    let mut session = session.lock();
    match session.refresh() {
        Ok(count) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": { "count": count }
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use casex_core::Catalog;
    use casex_storage::{CaseStore, MemoryCaseStore, RefreshPolicy, SessionOptions};

    const R1: &str = "1;sim;não;sim;limitado;não;moderado;leve;importante;sim;não;não;não;sim;não;não;0,8;não;Espondilite anquilosante";
    const R2: &str = "2;não;não;não;normal;sim;não;não;leve;não;não;sim;não;não;não;sim;0,1;sim;Lombalgia mecânica";

    fn shared(store: Arc<MemoryCaseStore>) -> SharedSession {
        let session = CaseSession::load_with(
            store,
            Arc::new(Catalog::spondyloarthritis()),
            SessionOptions {
                refresh: RefreshPolicy::BeforeEachQuery,
                ..SessionOptions::default()
            },
        )
        .unwrap();
        Arc::new(Mutex::new(session))
    }

    #[actix_web::test]
    async fn test_catalog_endpoint() {
        let store = Arc::new(MemoryCaseStore::with_lines([R1, R2]));
        let app = test::init_service(
            App::new().app_data(web::Data::new(shared(store))).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/catalog").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["id_column"], "Caso");
        assert_eq!(body["attributes"].as_array().unwrap().len(), 17);
        assert_eq!(body["default_weights"]["HLA-B27"], 1.0);
        assert_eq!(body["options"][3]["attribute"], "Mob");
    }

    #[actix_web::test]
    async fn test_search_endpoint() {
        let store = Arc::new(MemoryCaseStore::with_lines([R2, R1]));
        let app = test::init_service(
            App::new().app_data(web::Data::new(shared(store))).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/cases/search")
            .set_json(serde_json::json!({
                "case": { "Mob": "limitado", "TCSE": "importante", "HLA-B27": 0.8 },
                "weights": { "Mob": 1.0, "TCSE": 1.0, "HLA-B27": 1.0, "DL": 0.0 }
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["suggestion"], "Espondilite anquilosante");
        assert_eq!(body["result"][0]["id"], 1);
        assert_eq!(body["result"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_list_cases_in_column_order() {
        let store = Arc::new(MemoryCaseStore::with_lines([R1, R2]));
        let app = test::init_service(
            App::new().app_data(web::Data::new(shared(store))).configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/cases").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();

        assert!(text.starts_with(
            r#"{"result":[{"id":1,"values":{"DL":"sim","RC":"não","DC":"sim","Mob":"limitado","#
        ));
        let json: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(json["result"][1]["outcome"], "Lombalgia mecânica");
    }

    #[actix_web::test]
    async fn test_search_rejects_out_of_range_weight() {
        let store = Arc::new(MemoryCaseStore::with_lines([R1]));
        let app = test::init_service(
            App::new().app_data(web::Data::new(shared(store))).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/cases/search")
            .set_json(serde_json::json!({ "case": {}, "weights": { "DL": 2.0 } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_ingest_endpoint() {
        let store = Arc::new(MemoryCaseStore::with_lines([R1, R2]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shared(store.clone())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/cases")
            .set_json(serde_json::json!({
                "case": { "DL": "sim", "HLA-B27": "0,6" },
                "diagnosis": "Espondilite anquilosante"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["result"]["id"], 3);
        assert_eq!(store.read_all().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_ingest_storage_failure() {
        let store = Arc::new(MemoryCaseStore::with_lines([R1]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shared(store.clone())))
                .configure(configure),
        )
        .await;
        store.set_fail_appends(true);

        let req = test::TestRequest::post()
            .uri("/cases")
            .set_json(serde_json::json!({ "case": {}, "diagnosis": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.lines().len(), 1);
    }
}
