pub use super::gadgets::Entity as Gadgets;
