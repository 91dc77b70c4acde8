//! PostgreSQL store (sqlx, runtime-checked queries)

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{ClienteRepository, OrdenRepository, ProductoRepository, StoreHealth};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Cliente, Estado, NewCliente, NewOrden, NewProducto, Orden, OrdenRecord, Producto,
};

const ORDEN_SELECT: &str = r#"
    SELECT o.id, o.cantidad, o.fecha_orden, o.total, o.cliente_id, o.producto_id,
           c.nombre AS c_nombre, c.email AS c_email, c.telefono AS c_telefono,
           p.nombre AS p_nombre, p.descripcion AS p_descripcion, p.precio AS p_precio,
           p.fecha_creacion AS p_fecha_creacion, p.estado AS p_estado
    FROM ordenes o
    JOIN clientes c ON c.id = o.cliente_id
    JOIN productos p ON p.id = o.producto_id
"#;

/// Repositories backed by a shared `PgPool`
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE 23503 becomes a referential conflict on `table`
fn restrict(table: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
    move |e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            StoreError::ReferentialConflict { table }
        }
        _ => StoreError::Database(e),
    }
}

fn parse_estado(raw: String) -> Result<Estado, sqlx::Error> {
    raw.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "estado".to_string(),
        source: Box::new(e),
    })
}

fn cliente_from_row(r: &PgRow) -> Result<Cliente, sqlx::Error> {
    Ok(Cliente {
        id: r.try_get("id")?,
        nombre: r.try_get("nombre")?,
        email: r.try_get("email")?,
        telefono: r.try_get("telefono")?,
    })
}

fn producto_from_row(r: &PgRow) -> Result<Producto, sqlx::Error> {
    Ok(Producto {
        id: r.try_get("id")?,
        nombre: r.try_get("nombre")?,
        descripcion: r.try_get("descripcion")?,
        precio: r.try_get("precio")?,
        fecha_creacion: r.try_get("fecha_creacion")?,
        estado: parse_estado(r.try_get("estado")?)?,
    })
}

fn record_from_row(r: &PgRow) -> Result<OrdenRecord, sqlx::Error> {
    Ok(OrdenRecord {
        id: r.try_get("id")?,
        cantidad: r.try_get("cantidad")?,
        fecha_orden: r.try_get("fecha_orden")?,
        total: r.try_get("total")?,
        cliente_id: r.try_get("cliente_id")?,
        producto_id: r.try_get("producto_id")?,
    })
}

/// Row of [`ORDEN_SELECT`]
fn orden_from_row(r: &PgRow) -> Result<Orden, sqlx::Error> {
    let record = record_from_row(r)?;
    let cliente = Cliente {
        id: record.cliente_id,
        nombre: r.try_get("c_nombre")?,
        email: r.try_get("c_email")?,
        telefono: r.try_get("c_telefono")?,
    };
    let producto = Producto {
        id: record.producto_id,
        nombre: r.try_get("p_nombre")?,
        descripcion: r.try_get("p_descripcion")?,
        precio: r.try_get("p_precio")?,
        fecha_creacion: r.try_get("p_fecha_creacion")?,
        estado: parse_estado(r.try_get("p_estado")?)?,
    };
    Ok(record.into_orden(cliente, producto))
}

#[async_trait]
impl ClienteRepository for PgStore {
    async fn find_all(&self) -> StoreResult<Vec<Cliente>> {
        let rows = sqlx::query("SELECT id, nombre, email, telefono FROM clientes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(cliente_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Cliente>> {
        let row = sqlx::query("SELECT id, nombre, email, telefono FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(cliente_from_row).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Cliente>> {
        let row = sqlx::query(
            "SELECT id, nombre, email, telefono FROM clientes WHERE email = $1 ORDER BY id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(cliente_from_row).transpose()?)
    }

    async fn insert(&self, cliente: NewCliente) -> StoreResult<Cliente> {
        let row = sqlx::query(
            r#"INSERT INTO clientes (nombre, email, telefono) VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(&cliente.nombre)
        .bind(&cliente.email)
        .bind(&cliente.telefono)
        .fetch_one(&self.pool)
        .await?;
        Ok(cliente.with_id(row.try_get("id")?))
    }

    async fn update(&self, cliente: &Cliente) -> StoreResult<()> {
        sqlx::query("UPDATE clientes SET nombre = $2, email = $3, telefono = $4 WHERE id = $1")
            .bind(cliente.id)
            .bind(&cliente.nombre)
            .bind(&cliente.email)
            .bind(&cliente.telefono)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(restrict("clientes"))?;
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM clientes")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

#[async_trait]
impl ProductoRepository for PgStore {
    async fn find_all(&self) -> StoreResult<Vec<Producto>> {
        let rows = sqlx::query(
            r#"SELECT id, nombre, descripcion, precio, fecha_creacion, estado
               FROM productos ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(producto_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Producto>> {
        let row = sqlx::query(
            r#"SELECT id, nombre, descripcion, precio, fecha_creacion, estado
               FROM productos WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(producto_from_row).transpose()?)
    }

    async fn insert(&self, producto: NewProducto) -> StoreResult<Producto> {
        let row = sqlx::query(
            r#"INSERT INTO productos (nombre, descripcion, precio, fecha_creacion, estado)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(&producto.nombre)
        .bind(&producto.descripcion)
        .bind(producto.precio)
        .bind(producto.fecha_creacion)
        .bind(producto.estado.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(producto.with_id(row.try_get("id")?))
    }

    async fn update(&self, producto: &Producto) -> StoreResult<()> {
        sqlx::query(
            r#"UPDATE productos
               SET nombre = $2, descripcion = $3, precio = $4, fecha_creacion = $5, estado = $6
               WHERE id = $1"#,
        )
        .bind(producto.id)
        .bind(&producto.nombre)
        .bind(&producto.descripcion)
        .bind(producto.precio)
        .bind(producto.fecha_creacion)
        .bind(producto.estado.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM productos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(restrict("productos"))?;
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM productos")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

#[async_trait]
impl OrdenRepository for PgStore {
    async fn find_all(&self) -> StoreResult<Vec<Orden>> {
        let sql = format!("{ORDEN_SELECT} ORDER BY o.id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(orden_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Orden>> {
        let sql = format!("{ORDEN_SELECT} WHERE o.id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(orden_from_row).transpose()?)
    }

    async fn find_by_cliente_id(&self, cliente_id: i64) -> StoreResult<Vec<Orden>> {
        let sql = format!("{ORDEN_SELECT} WHERE o.cliente_id = $1 ORDER BY o.id");
        let rows = sqlx::query(&sql)
            .bind(cliente_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(orden_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn insert(&self, orden: NewOrden) -> StoreResult<OrdenRecord> {
        let row = sqlx::query(
            r#"INSERT INTO ordenes (cantidad, fecha_orden, total, cliente_id, producto_id)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(orden.cantidad)
        .bind(orden.fecha_orden)
        .bind(orden.total)
        .bind(orden.cliente_id)
        .bind(orden.producto_id)
        .fetch_one(&self.pool)
        .await
        .map_err(restrict("ordenes"))?;
        Ok(orden.with_id(row.try_get("id")?))
    }

    async fn update(&self, orden: &OrdenRecord) -> StoreResult<()> {
        sqlx::query(
            r#"UPDATE ordenes
               SET cantidad = $2, fecha_orden = $3, total = $4, cliente_id = $5, producto_id = $6
               WHERE id = $1"#,
        )
        .bind(orden.id)
        .bind(orden.cantidad)
        .bind(orden.fecha_orden)
        .bind(orden.total)
        .bind(orden.cliente_id)
        .bind(orden.producto_id)
        .execute(&self.pool)
        .await
        .map_err(restrict("ordenes"))?;
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM ordenes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM ordenes")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
