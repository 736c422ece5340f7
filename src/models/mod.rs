pub mod user;

pub use user::{NewUser, PublicUser, User};
