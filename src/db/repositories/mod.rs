pub mod admin;
pub mod comment;
pub mod image;
pub mod post;
