//! API layer - HTTP endpoints and middleware

pub mod comments;
pub mod health;
pub mod middleware;
pub mod photos;
pub mod public;
pub mod router;
pub mod social_medias;
pub mod state;
pub mod types;
pub mod users;

pub use middleware::RequireUser;
pub use router::create_router_with_state;
pub use state::AppState;
