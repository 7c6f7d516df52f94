pub mod body;
pub mod collision;
pub mod time;
