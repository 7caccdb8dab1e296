pub mod event;
pub mod footer;
pub mod media;
pub mod menu;
pub mod page;
pub mod setting;
pub mod slide;
pub mod user;
