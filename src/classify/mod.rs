pub mod classifier;
pub mod classify_model;
pub mod registry;
pub mod rules;
