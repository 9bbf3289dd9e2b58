// Library for tests to access modules

pub mod app;
pub mod config;
pub mod daemon;
pub mod docker_repo;
pub mod models;
pub mod ui;
pub mod version;
