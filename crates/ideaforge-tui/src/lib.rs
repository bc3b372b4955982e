pub mod app;
pub mod components;
pub mod controller;
pub mod form;
