pub mod health;
pub mod narrate;
pub mod usage;
