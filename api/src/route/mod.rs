pub mod auth;
pub mod facility;
pub mod health;
pub mod reservation;
pub mod v1;
