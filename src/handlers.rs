pub mod auth;
pub mod health;
pub mod recovery;
pub mod users;
