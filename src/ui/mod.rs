pub mod dashboard;
pub mod editor;
pub mod lights;
pub mod menu;
pub mod service;
pub mod text_input;
