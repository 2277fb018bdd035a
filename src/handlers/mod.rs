pub mod health;

pub use health::configure;
