mod app;
mod cli;
mod config;
mod effects;
mod navigation;
mod render;

pub use app::run_app;
