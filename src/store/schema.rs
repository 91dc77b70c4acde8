use sqlx::PgPool;

const CREATE_CLIENTES: &str = r#"
    CREATE TABLE IF NOT EXISTS clientes (
        id BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL,
        email TEXT NOT NULL,
        telefono TEXT
    )
"#;

const CREATE_PRODUCTOS: &str = r#"
    CREATE TABLE IF NOT EXISTS productos (
        id BIGSERIAL PRIMARY KEY,
        nombre VARCHAR(100) NOT NULL,
        descripcion VARCHAR(500),
        precio NUMERIC(19, 2) NOT NULL,
        fecha_creacion TIMESTAMPTZ NOT NULL,
        estado TEXT NOT NULL CHECK (estado IN ('ACTIVO', 'INACTIVO'))
    )
"#;

// No ON DELETE action: deleting a referenced cliente/producto fails with 23503
const CREATE_ORDENES: &str = r#"
    CREATE TABLE IF NOT EXISTS ordenes (
        id BIGSERIAL PRIMARY KEY,
        cantidad INT NOT NULL,
        fecha_orden TIMESTAMPTZ NOT NULL,
        total NUMERIC(19, 2) NOT NULL,
        cliente_id BIGINT NOT NULL REFERENCES clientes(id),
        producto_id BIGINT NOT NULL REFERENCES productos(id)
    )
"#;

const CREATE_ORDENES_CLIENTE_IDX: &str =
    "CREATE INDEX IF NOT EXISTS idx_ordenes_cliente_id ON ordenes (cliente_id)";

/// Create the three tables if they do not exist yet
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Initializing PostgreSQL schema...");

    for ddl in [
        CREATE_CLIENTES,
        CREATE_PRODUCTOS,
        CREATE_ORDENES,
        CREATE_ORDENES_CLIENTE_IDX,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("✅ Schema ready");
    Ok(())
}
