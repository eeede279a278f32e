//! Tutor resource HTTP handlers.
//!
//! ```text
//! GET    /api/tutors
//! POST   /api/tutors
//! GET    /api/tutors/{id}
//! PUT    /api/tutors/{id}
//! DELETE /api/tutors/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::Tutor;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, NewTutorSchema, TutorChangesSchema, TutorSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_error_handler, parse_tutor_id};

/// Message returned after a successful delete.
pub const TUTOR_DELETED_MESSAGE: &str = "Tutor deleted successfully";

/// Response payload for the tutor collection.
#[derive(Debug, Serialize, ToSchema)]
pub struct TutorsResponse {
    #[schema(value_type = Vec<TutorSchema>)]
    pub tutors: Vec<Tutor>,
}

/// Response payload wrapping a single tutor.
#[derive(Debug, Serialize, ToSchema)]
pub struct TutorResponse {
    #[schema(value_type = TutorSchema)]
    pub tutor: Tutor,
}

/// Response payload for delete confirmations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Tutor deleted successfully")]
    pub message: String,
}

/// List every tutor, newest first.
#[utoipa::path(
    get,
    path = "/api/tutors",
    responses(
        (status = 200, description = "All tutors", body = TutorsResponse),
        (status = 404, description = "Tutors table missing", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tutors"],
    operation_id = "listTutors"
)]
#[get("/tutors")]
pub async fn list_tutors(state: web::Data<HttpState>) -> ApiResult<web::Json<TutorsResponse>> {
    let tutors = state.tutors_query.list_tutors().await?;
    Ok(web::Json(TutorsResponse { tutors }))
}

/// Validate and store a new tutor.
#[utoipa::path(
    post,
    path = "/api/tutors",
    request_body = NewTutorSchema,
    responses(
        (status = 201, description = "Tutor created", body = TutorResponse),
        (status = 400, description = "Validation error", body = ErrorSchema),
        (status = 404, description = "Tutors table missing", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tutors"],
    operation_id = "createTutor"
)]
#[post("/tutors")]
pub async fn create_tutor(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let tutor = state
        .tutors_command
        .create_tutor(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(TutorResponse { tutor }))
}

/// Fetch one tutor.
#[utoipa::path(
    get,
    path = "/api/tutors/{id}",
    params(("id" = String, Path, description = "Tutor identifier")),
    responses(
        (status = 200, description = "Tutor", body = TutorResponse),
        (status = 404, description = "Tutor or table not found", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tutors"],
    operation_id = "getTutor"
)]
#[get("/tutors/{id}")]
pub async fn get_tutor(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TutorResponse>> {
    let id = parse_tutor_id(path.into_inner())?;
    let tutor = state.tutors_query.get_tutor(&id).await?;
    Ok(web::Json(TutorResponse { tutor }))
}

/// Apply a partial update.
#[utoipa::path(
    put,
    path = "/api/tutors/{id}",
    params(("id" = String, Path, description = "Tutor identifier")),
    request_body = TutorChangesSchema,
    responses(
        (status = 200, description = "Updated tutor", body = TutorResponse),
        (status = 400, description = "Validation error", body = ErrorSchema),
        (status = 404, description = "Tutor not found", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["tutors"],
    operation_id = "updateTutor"
)]
#[put("/tutors/{id}")]
pub async fn update_tutor(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<TutorResponse>> {
    let id = parse_tutor_id(path.into_inner())?;
    let tutor = state
        .tutors_command
        .update_tutor(&id, payload.into_inner())
        .await?;
    Ok(web::Json(TutorResponse { tutor }))
}

/// Delete a tutor permanently.
#[utoipa::path(
    delete,
    path = "/api/tutors/{id}",
    params(("id" = String, Path, description = "Tutor identifier")),
    responses(
        (status = 200, description = "Tutor deleted", body = MessageResponse),
        (status = 500, description = "Storage failure, including unknown ids", body = ErrorSchema)
    ),
    tags = ["tutors"],
    operation_id = "deleteTutor"
)]
#[delete("/tutors/{id}")]
pub async fn delete_tutor(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_tutor_id(path.into_inner())?;
    state.tutors_command.delete_tutor(&id).await?;
    Ok(web::Json(MessageResponse {
        message: TUTOR_DELETED_MESSAGE.to_owned(),
    }))
}

/// Register the tutor handlers and the JSON body error handler.
///
/// Mounted under `/api` by the server:
///
/// ```
/// use actix_web::{App, web};
///
/// let app = App::new().service(web::scope("/api").configure(eduista::inbound::http::tutors::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(list_tutors)
        .service(create_tutor)
        .service(get_tutor)
        .service(update_tutor)
        .service(delete_tutor);
}
