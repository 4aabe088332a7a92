mod banner;
mod colors;
mod content;
mod footer;
mod header;
mod menu;
mod modal;
mod popup;
mod render;
pub mod utils;

pub use render::render;
