pub use super::admins::Entity as Admins;
pub use super::comments::Entity as Comments;
pub use super::images::Entity as Images;
pub use super::posts::Entity as Posts;
