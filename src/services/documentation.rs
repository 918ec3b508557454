use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the word game backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::list_games,
        crate::routes::game::get_game_by_id,
        crate::routes::game::create_game,
        crate::routes::game::add_word,
        crate::routes::game::delete_word,
        crate::routes::game::update_game,
        crate::routes::game::change_status,
        crate::routes::game::delete_game,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::UpdateGameRequest,
            crate::dto::game::WordRequest,
            crate::dto::game::StatusChangeRequest,
            crate::dto::game::TeamInput,
            crate::dto::game::TeamResponse,
            crate::dto::game::GameResponse,
            crate::state::lifecycle::GameStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Game records, word pools, and lifecycle"),
    )
)]
pub struct ApiDoc;
