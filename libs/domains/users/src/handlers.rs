use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{Role, User, UserRequest};
use crate::repository::UserRepository;
use crate::service::UserDirectory;

pub const USERS_TAG: &str = "Users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(User, UserRequest, Role),
        responses(
            BadRequestResponse,
            BadRequestIdResponse,
            UnprocessableEntityResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = USERS_TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(directory: UserDirectory<R>) -> Router {
    let shared_directory = Arc::new(directory);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_directory)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = USERS_TAG,
    responses(
        (status = 200, description = "All users ordered by id", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(directory): State<Arc<UserDirectory<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = directory.list().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = USERS_TAG,
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(directory): State<Arc<UserDirectory<R>>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> UserResult<impl IntoResponse> {
    let user = directory.create(request).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), user.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(directory): State<Arc<UserDirectory<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<User>> {
    let user = directory.get(id).await?;
    Ok(Json(user))
}

/// Replace a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(directory): State<Arc<UserDirectory<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> UserResult<Json<User>> {
    let user = directory.update(id, request).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(directory): State<Arc<UserDirectory<R>>>,
    IdPath(id): IdPath,
) -> UserResult<impl IntoResponse> {
    directory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
