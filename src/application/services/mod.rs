mod generation_service;
mod prompt_builder;
mod result_writer;
mod session_controller;
mod session_error;
mod session_sweeper;
mod token_counter;

pub use generation_service::GenerationService;
pub use prompt_builder::{PromptBuilder, build_mcq_prompt, build_notes_prompt};
pub use result_writer::{ResultWriter, ResultWriterError};
pub use session_controller::{Download, DownloadFormat, GenerationOutcome, SessionController};
pub use session_error::SessionError;
pub use session_sweeper::SessionSweeper;
pub use token_counter::{count_tokens, truncate_to_tokens};
