use wasm_bindgen::prelude::*;

pub mod contact;
pub mod enemy;
pub mod game;
pub mod item;
pub mod level;
pub mod player;
pub mod render;
pub mod session;
pub mod tuning;

pub use game::Platformer;

plat_web::export_game!(Platformer, "platformer");
