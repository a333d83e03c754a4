pub mod catalog;
pub mod library;
pub mod personalize;
pub mod placeholder;
pub mod reader;
pub mod store;
