pub mod profile;
pub mod shape;
