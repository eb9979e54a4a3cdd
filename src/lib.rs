// Library exports for lekhak

pub mod app;
pub mod autosave;
pub mod config;
pub mod content;
pub mod draft;
pub mod editor;
pub mod export;
pub mod history;
pub mod menu;
pub mod refine;
pub mod region;
pub mod requests;
pub mod service;
pub mod sidebar;
pub mod statusbar;
pub mod story;
