// Domain layer - Core business logic

pub mod confirmation;
pub mod errors;
pub mod model;
pub mod rules;
