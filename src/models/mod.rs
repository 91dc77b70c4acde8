//! Entity types persisted by the store
//!
//! - [`Cliente`]: customer record
//! - [`Producto`]: sellable item with price and [`Estado`]
//! - [`Orden`]: purchase linking one cliente and one producto
//!
//! Each entity has a `New*` counterpart for rows that have not been
//! assigned an id yet.

pub mod cliente;
pub mod orden;
pub mod producto;

pub use cliente::{Cliente, NewCliente};
pub use orden::{NewOrden, Orden, OrdenRecord};
pub use producto::{Estado, EstadoError, NewProducto, Producto};

use rust_decimal::{Decimal, RoundingStrategy};

/// Whether `value` fits a `NUMERIC(19, 2)` column (`precio`, `total`)
/// once rounded to cents the way PostgreSQL rounds it.
pub fn fits_amount_column(value: Decimal) -> bool {
    let limit = Decimal::from(100_000_000_000_000_000_i64);
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        < limit
}
