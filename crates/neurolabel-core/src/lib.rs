pub mod backend;
pub mod canvas;
pub mod config;
pub mod consts;
pub mod detection;
pub mod detector;
pub mod dispatcher;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod hit;
pub mod imaging;
pub mod library;
pub mod protocol;
pub mod scene;
pub mod selection;
pub mod store;
pub mod viewport;
