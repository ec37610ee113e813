/*
 * Responsibility
 * - 起動時 (config / client / template / listener) のエラー定義
 * - request 単位の失敗はエラーにせず status message として表示する (services::render)
 */
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build blog api client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to parse template: {0}")]
    Template(#[from] ramhorns::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
