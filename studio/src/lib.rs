pub mod config;
pub mod error;
pub mod gemini_service;
pub mod models;
pub mod pdf_extractor;
pub mod session;
pub mod view;

pub use config::StudioConfig;
pub use error::{StudioError, StudioResult};
pub use gemini_service::{ContentGenerator, GeminiService, GenerationClient, GenerationResult};
pub use models::*;
pub use pdf_extractor::{build_pdf_prompt, truncate_chars, PdfTextExtractor, MAX_PDF_CONTEXT_CHARS};
pub use session::{Session, SessionHandle, SessionId, SessionStore};
pub use view::{Action, Notice, Phase, View, ViewRenderer};
