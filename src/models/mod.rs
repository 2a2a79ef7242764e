pub mod admin;
pub mod almuerzo;
pub mod auth;
pub mod galeria;
pub mod historia;
pub mod menu;
pub mod reservas;
