// handlers/public/auth/mod.rs - Session acquisition and release

pub mod login;
pub mod logout;
pub mod register;

pub use login::{login, login_page};
pub use logout::logout;
pub use register::{register, register_page};
