pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod modes;
pub mod presets;
pub mod routes;
pub mod selection;
pub mod settings;
pub mod ws;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
