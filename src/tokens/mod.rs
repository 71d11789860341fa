mod definition;

pub use definition::TokenDefinition;
