pub mod prelude;

pub mod gadgets;
