mod controller;
mod error;
mod frame_loop;
mod gl;

pub mod camera;
pub mod config;
pub mod input;
pub mod js;
pub mod matrix_stack;
pub mod particle;
pub mod scene;
pub mod unproject;
#[cfg(feature = "js-api")]
pub mod wasm;

pub use controller::*;

pub use crate::{
    camera::{Camera, Viewport},
    config::{SceneConfig, ShaderSource},
    error::Error,
    gl::Renderer,
    matrix_stack::{MatrixScope, MatrixStack},
    particle::Particle,
    scene::{FrameScheduler, FrameTarget, SceneState},
    unproject::{project, unproject},
};
