use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::game::{
        CreateGameRequest, GameResponse, StatusChangeRequest, UpdateGameRequest, WordRequest,
    },
    error::AppError,
    routes::extract::ValidJson,
    services::game_service,
    state::SharedState,
};

/// Routes managing game records, their word pools, and their lifecycle.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game", get(list_games).post(create_game))
        .route("/game/add-word", post(add_word))
        .route("/game/delete-word", post(delete_word))
        .route(
            "/game/{id}",
            get(get_game_by_id).put(update_game).delete(delete_game),
        )
        .route("/game/{id}/status", post(change_status))
}

/// List every stored game.
#[utoipa::path(
    get,
    path = "/game",
    tag = "game",
    responses(
        (status = 200, description = "All games", body = [GameResponse]),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    Ok(Json(game_service::list_games(&state).await?))
}

/// Retrieve a game by its identifier.
#[utoipa::path(
    get,
    path = "/game/{id}",
    tag = "game",
    params(("id" = String, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game", body = GameResponse),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn get_game_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(game_service::get_game_by_id(&state, &id).await?))
}

/// Create a new game record.
#[utoipa::path(
    post,
    path = "/game",
    tag = "game",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameResponse),
        (status = 400, description = "Invalid payload or duplicate words")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), AppError> {
    let game = game_service::create_game(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// Add a word to a game that has not started yet.
#[utoipa::path(
    post,
    path = "/game/add-word",
    tag = "game",
    request_body = WordRequest,
    responses(
        (status = 200, description = "Word added", body = GameResponse),
        (status = 400, description = "Game locked or word already present"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn add_word(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<WordRequest>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(game_service::add_word(&state, payload).await?))
}

/// Remove a word from a game that has not started yet.
#[utoipa::path(
    post,
    path = "/game/delete-word",
    tag = "game",
    request_body = WordRequest,
    responses(
        (status = 200, description = "Word deleted", body = GameResponse),
        (status = 400, description = "Game locked or word absent"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn delete_word(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<WordRequest>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(game_service::delete_word(&state, payload).await?))
}

/// Apply a partial update to a game.
#[utoipa::path(
    put,
    path = "/game/{id}",
    tag = "game",
    params(("id" = String, Path, description = "Identifier of the game")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = GameResponse),
        (status = 400, description = "Invalid payload or lifecycle violation"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateGameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(
        game_service::update_game_by_id(&state, &id, payload).await?,
    ))
}

/// Move a game forward in its lifecycle.
#[utoipa::path(
    post,
    path = "/game/{id}/status",
    tag = "game",
    params(("id" = String, Path, description = "Identifier of the game")),
    request_body = StatusChangeRequest,
    responses(
        (status = 200, description = "Status changed", body = GameResponse),
        (status = 400, description = "Backward transition"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn change_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<StatusChangeRequest>,
) -> Result<Json<GameResponse>, AppError> {
    Ok(Json(
        game_service::change_status(&state, &id, payload.status).await?,
    ))
}

/// Delete a game; answers `null` when nothing matched.
#[utoipa::path(
    delete,
    path = "/game/{id}",
    tag = "game",
    params(("id" = String, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Deleted game, or null when nothing matched", body = GameResponse),
        (status = 400, description = "Malformed identifier")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Option<GameResponse>>, AppError> {
    Ok(Json(game_service::delete_game(&state, &id).await?))
}
