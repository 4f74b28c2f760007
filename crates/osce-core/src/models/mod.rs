pub mod attempt;
pub mod dialogue;
pub mod scenario;
pub mod usage;
