#![allow(clippy::style)]
#![allow(clippy::useless_format)]

pub mod arena;
pub mod cells;
pub mod context;

pub mod prelude {
    /// Data structures.
    pub use crate::{
        arena::*,
        cells::SingCell,
        context::CoContext,
    };
}
