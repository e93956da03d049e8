pub mod health;
pub mod list;
pub mod serve;
