mod error_response;
mod health;
mod index;
mod sessions;
pub mod views;

pub use error_response::{ErrorResponse, status_for};
pub use health::health_handler;
pub use index::index_handler;
pub use sessions::{
    CreateSessionResponse, GenerateRequest, create_session_handler, download_handler,
    generate_handler, get_session_handler, regenerate_handler, upload_document_handler,
};
