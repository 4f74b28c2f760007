pub mod attempts;
pub mod chat;
pub mod finalize;
pub mod grade;
pub mod health;
pub mod scenarios;
pub mod viva;
