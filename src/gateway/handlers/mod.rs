//! HTTP handlers, one module per resource

pub mod cliente;
pub mod health;
pub mod orden;
pub mod producto;

pub use cliente::*;
pub use health::*;
pub use orden::*;
pub use producto::*;
