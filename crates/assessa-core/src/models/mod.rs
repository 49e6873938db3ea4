pub mod document;
pub mod profile;
pub mod result;
pub mod settings;
