pub mod account;
pub mod attempt;
pub mod session;
pub mod settings;
pub mod store;
