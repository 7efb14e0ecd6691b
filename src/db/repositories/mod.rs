pub mod gadget;
pub mod user;
