pub mod account;
pub mod algorithm;
pub mod attempt;
pub mod session;
pub mod settings;
