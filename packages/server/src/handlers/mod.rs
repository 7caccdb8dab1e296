pub mod auth;
pub mod events;
pub mod footer;
pub mod media;
pub mod menus;
pub mod overview;
pub mod pages;
pub mod public;
pub mod settings;
pub mod slider;
