/// OpenAPI documentation generation.
pub mod documentation;
/// Game record management: CRUD, word pool edits, and status changes.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Background connection supervisor for the storage backend.
pub mod storage_supervisor;
