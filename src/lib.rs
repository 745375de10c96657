//! Client for an AI ad and image generation backend.
//!
//! The [`gateway`] talks HTTP, the [`studio`] reducers hold the
//! interaction state of the ad and image apps, and [`studio::Driver`]
//! connects the two on a tokio runtime.

pub mod config;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod models;
pub mod state;
pub mod studio;

pub use config::StudioConfig;
pub use error::{ErrorKind, Result, StudioError};
pub use gateway::{Backend, HttpGateway};
pub use models::*;
pub use studio::{
    AdAction, AdEffect, AdStudio, Driver, ImageAction, ImageEffect, ImageStudio, StudioModel,
    Transition,
};
