/*
 * Responsibility
 * - v1 の公開ポイント (routes() の re-export など)
 */
pub mod dto;
pub mod handlers;
mod routes;
pub mod views;

pub use routes::routes;
