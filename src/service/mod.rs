//! Business services
//!
//! Stateless: each service owns `Arc` handles to the repositories it reads
//! and writes, and is itself shared through `Arc` in the gateway state.

pub mod cliente;
pub mod orden;
pub mod producto;

pub use cliente::ClienteService;
pub use orden::OrdenService;
pub use producto::ProductoService;
