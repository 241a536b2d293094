use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_macros::{FromRequest, debug_handler};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, GreetingResponse, NoteResponse, UpdateNoteRequest},
    error::{ApiError, ApiResult, ValidationIssue},
    service::{DeleteOutcome, NoteService},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        create_note,
        get_all_notes,
        get_one_note,
        update_note,
        delete_note
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        GreetingResponse,
        ValidationIssue
    )),
    tags(
        (name = "greeting", description = "Liveness check"),
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

/// JSON body extractor whose rejections are answered with 422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidatedJson<T>(pub T);

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notes", get(get_all_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_one_note).put(update_note).delete(delete_note),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = GreetingResponse)
    ),
    tag = "greeting"
)]
pub async fn root() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "Welcome:)".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created successfully", body = NoteResponse),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    ValidatedJson(payload): ValidatedJson<CreateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let note = payload.validate()?;
    let created = service.create_note(note).await?;
    Ok(Json(created.into()))
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(service): State<Arc<NoteService>>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = service.get_all_notes().await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<NoteResponse>> {
    match service.get_one_note(&id).await? {
        Some(note) => Ok(Json(note.into())),
        None => Err(ApiError::NotFound(id)),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let changes = payload.validate()?;
    match service.update_note(&id, changes).await? {
        Some(note) => Ok(Json(note.into())),
        None => Err(ApiError::NotFound(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted successfully"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    match service.delete_note(&id).await? {
        DeleteOutcome::Deleted(1) => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::Deleted(_) | DeleteOutcome::NotFound => Err(ApiError::NotFound(id)),
    }
}
