pub mod camera;
pub mod draw;

pub use camera::Camera2D;
pub use draw::{palette, DrawCommand, DrawList};
