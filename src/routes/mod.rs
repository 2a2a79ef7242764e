pub mod almuerzos;
pub mod auth;
pub mod galeria;
pub mod health;
pub mod historia;
pub mod menu;
pub mod reservas;
