pub mod post;
pub mod settings;
