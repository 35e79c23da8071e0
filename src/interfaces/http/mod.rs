use crate::application::{ModificationUseCase, RuleRecommendationUseCase, SuggestionUseCase};
use crate::application::use_cases::{search, validation};
use crate::domain::dataset::{DataRow, DatasetKind};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv as csv_codec;
use crate::infrastructure::llm_clients::{GroqClient, LlmClient};
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{dev::Server, post, web, App, HttpResponse, HttpServer, Responder};
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Uploads above this size are rejected by the multipart reader.
const UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub config: AppConfig,
    pub suggestion_use_case: SuggestionUseCase,
    pub modification_use_case: ModificationUseCase,
    pub rule_recommendation_use_case: RuleRecommendationUseCase,
}

impl AppState {
    pub fn new(config: AppConfig, llm_client: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self {
            config,
            suggestion_use_case: SuggestionUseCase::new(llm_client.clone()),
            modification_use_case: ModificationUseCase::new(llm_client.clone()),
            rule_recommendation_use_case: RuleRecommendationUseCase::new(llm_client),
        }
    }
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

fn server_error(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({ "error": message }))
}

// ---------- upload ----------

/// Pull the `file` part out of the multipart stream and return its
/// decoded content. `None` when no file part was sent at all.
async fn read_csv_upload(mut payload: Multipart) -> Result<Option<String>> {
    let mut saw_field = false;
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            // A stream that errors before yielding any part is an empty
            // form, not a parse failure worth surfacing.
            Err(_) if !saw_field => return Ok(None),
            Err(e) => {
                return Err(AppError::ParseError(format!(
                    "Malformed multipart body: {}",
                    e
                )))
            }
        };
        saw_field = true;

        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let is_csv_mime = field
            .content_type()
            .map(|mime| mime.essence_str() == "text/csv")
            .unwrap_or(false);

        if !is_csv_mime && !filename.ends_with(".csv") {
            return Err(AppError::BadRequest(
                "Unsupported file type. Please upload a CSV.".to_string(),
            ));
        }

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::IoError(format!("Failed to read upload: {}", e)))?;
            if bytes.len() + chunk.len() > UPLOAD_LIMIT {
                return Err(AppError::BadRequest("Uploaded file is too large.".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some(String::from_utf8_lossy(&bytes).to_string()));
    }

    Ok(None)
}

#[post("/upload")]
async fn upload(payload: Multipart) -> impl Responder {
    let content = match read_csv_upload(payload).await {
        Ok(Some(content)) => content,
        Ok(None) => return bad_request("No file uploaded."),
        Err(AppError::BadRequest(msg)) => return bad_request(&msg),
        Err(err) => {
            error!(error = %err, "Upload failed");
            return server_error("Error processing file upload.");
        }
    };

    match csv_codec::parse_content(&content) {
        Ok(rows) => {
            info!(rows = rows.len(), "Parsed uploaded CSV");
            HttpResponse::Ok().json(json!({ "data": rows }))
        }
        Err(err) => {
            error!(error = %err, "Failed to parse uploaded CSV");
            server_error("Error processing file upload.")
        }
    }
}

// ---------- search ----------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    data_type: Option<DatasetKind>,
    search_query: Option<String>,
    data: Option<Vec<DataRow>>,
}

#[post("/search")]
async fn search_rows(req: web::Json<SearchRequest>) -> impl Responder {
    let query = req.search_query.as_deref().unwrap_or("");
    let (Some(_kind), Some(rows)) = (req.data_type, req.data.as_ref()) else {
        return bad_request("Missing required search parameters.");
    };
    if query.is_empty() {
        return bad_request("Missing required search parameters.");
    }

    let filtered = search::filter_rows(rows, query);
    HttpResponse::Ok().json(json!({ "data": filtered }))
}

// ---------- validate ----------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest {
    data_type: Option<DatasetKind>,
    data: Option<Vec<DataRow>>,
}

#[post("/validate")]
async fn validate_rows(req: web::Json<ValidateRequest>) -> impl Responder {
    let (Some(kind), Some(rows)) = (req.data_type, req.data.as_ref()) else {
        return bad_request("Missing data or dataType for validation.");
    };

    let errors = validation::validate(kind, rows);
    info!(
        data_type = kind.as_str(),
        rows = rows.len(),
        errors = errors.len(),
        "Validated dataset"
    );
    HttpResponse::Ok().json(json!({ "errors": errors }))
}

// ---------- export ----------

#[derive(Deserialize)]
struct ExportRequest {
    data: Option<Vec<DataRow>>,
}

#[post("/export-csv")]
async fn export_csv(req: web::Json<ExportRequest>) -> impl Responder {
    let rows = match req.data.as_ref() {
        Some(rows) if !rows.is_empty() => rows,
        _ => return bad_request("No data provided for export."),
    };

    match csv_codec::unparse(rows) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=exported_data.csv",
            ))
            .body(csv),
        Err(err) => {
            error!(error = %err, "Failed to generate CSV");
            server_error("Failed to generate CSV.")
        }
    }
}

// ---------- AI endpoints ----------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionRequest {
    column: Option<String>,
    error: Option<String>,
    current_value: Option<String>,
}

#[post("/get-suggestion")]
async fn get_suggestion(
    state: web::Data<AppState>,
    req: web::Json<SuggestionRequest>,
) -> impl Responder {
    let (Some(column), Some(error_text), Some(current_value)) =
        (req.column.as_deref(), req.error.as_deref(), req.current_value.as_deref())
    else {
        return bad_request("Missing parameters for AI suggestion.");
    };
    if column.is_empty() || error_text.is_empty() {
        return bad_request("Missing parameters for AI suggestion.");
    }

    match state
        .suggestion_use_case
        .execute(&state.config.llm, column, error_text, current_value)
        .await
    {
        Ok(suggestion) => HttpResponse::Ok().json(json!({ "suggestion": suggestion })),
        Err(err) => {
            error!(error = %err, column, "Suggestion call failed");
            server_error("Failed to contact AI service.")
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModificationRequest {
    command: Option<String>,
    data: Option<Vec<DataRow>>,
    data_type: Option<DatasetKind>,
}

#[post("/propose-modification")]
async fn propose_modification(
    state: web::Data<AppState>,
    req: web::Json<ModificationRequest>,
) -> impl Responder {
    let (Some(command), Some(rows), Some(kind)) =
        (req.command.as_deref(), req.data.as_ref(), req.data_type)
    else {
        return bad_request("Missing command, data, or dataType.");
    };
    if command.is_empty() {
        return bad_request("Missing command, data, or dataType.");
    }

    match state
        .modification_use_case
        .execute(&state.config.llm, command, rows, kind)
        .await
    {
        Ok(proposal) => HttpResponse::Ok().json(proposal),
        Err(err) => {
            error!(error = %err, data_type = kind.as_str(), "Modification call failed");
            server_error("Failed to get AI modification proposal.")
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendRulesRequest {
    data: Option<Vec<DataRow>>,
    data_type: Option<DatasetKind>,
}

#[post("/recommend-rules")]
async fn recommend_rules(
    state: web::Data<AppState>,
    req: web::Json<RecommendRulesRequest>,
) -> impl Responder {
    let (Some(rows), Some(kind)) = (req.data.as_ref(), req.data_type) else {
        return bad_request("Missing data or dataType for recommendations.");
    };

    match state
        .rule_recommendation_use_case
        .execute(&state.config.llm, rows, kind)
        .await
    {
        Ok(recommendations) => {
            HttpResponse::Ok().json(json!({ "recommendations": recommendations }))
        }
        Err(err) => {
            error!(error = %err, data_type = kind.as_str(), "Rule recommendation call failed");
            server_error("Failed to get AI recommendations.")
        }
    }
}

// ---------- wiring ----------

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(UPLOAD_LIMIT)
        .error_handler(|err, _req| {
            actix_web::error::InternalError::from_response(
                err,
                bad_request("Invalid JSON body."),
            )
            .into()
        })
}

pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(upload)
        .service(search_rows)
        .service(validate_rows)
        .service(export_csv)
        .service(get_suggestion)
        .service(propose_modification)
        .service(recommend_rules)
}

pub fn start_server(config: AppConfig) -> std::io::Result<Server> {
    let bind_addr = (config.host.clone(), config.port);
    let llm_client: Arc<dyn LlmClient + Send + Sync> = Arc::new(GroqClient::new());
    let state = web::Data::new(AppState::new(config, llm_client));

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // local tool, browser UI on another port

        App::new()
            .wrap(cors)
            .app_data(json_config())
            .app_data(state.clone())
            .service(api_scope())
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
