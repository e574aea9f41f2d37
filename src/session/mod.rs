pub mod cleanup_task;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use handlers::routes;
pub use models::HandSession;
pub use repository::{InMemorySessionRepository, SessionRepository};
pub use service::SessionService;
