//! Rendering module
//!
//! `shapes` turns a read-only frame snapshot into draw primitives; a
//! backend (Canvas 2D in the browser) draws them without touching state.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{PathCmd, Shape, build_scene, icon_color};

use std::cell::RefCell;
use std::rc::Rc;

use crate::sim::{GameState, Obstacle, Runner};

/// Background animation inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub tick: u64,
    pub speed: f32,
}

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub runner: &'a Runner,
    pub obstacles: &'a [Obstacle],
    pub background: Background,
}

impl<'a> Frame<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            runner: &state.runner,
            obstacles: &state.obstacles,
            background: Background {
                tick: state.tick,
                speed: state.speed,
            },
        }
    }
}

/// Draws a frame; must not mutate game state
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

impl<R: Renderer> Renderer for Rc<RefCell<R>> {
    fn render(&mut self, frame: &Frame<'_>) {
        self.borrow_mut().render(frame);
    }
}
