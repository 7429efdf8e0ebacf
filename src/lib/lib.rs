//!
//! lgtm  -- LGTM stamps on demand
//!

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
#[macro_use] extern crate maplit;


#[cfg(test)] #[macro_use] extern crate spectral;


pub mod actions;
pub mod editor;
mod model;
mod render;
mod resources;
pub mod share;
pub mod storage;
pub mod validation;


pub use crate::model::*;
pub use crate::render::*;
pub use crate::resources::*;
