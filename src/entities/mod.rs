pub mod prelude;

pub mod admins;
pub mod comments;
pub mod images;
pub mod posts;
