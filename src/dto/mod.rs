/// Game request and response payloads.
pub mod game;
/// Healthcheck payloads.
pub mod health;
/// Custom validators shared by the payloads.
pub mod validation;
