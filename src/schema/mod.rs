pub mod participant;
pub mod story;
pub mod user_data;
