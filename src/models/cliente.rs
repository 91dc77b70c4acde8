use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Cliente {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ana Torres")]
    pub nombre: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "+51 999 888 777")]
    pub telefono: Option<String>,
}

/// Cliente fields before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCliente {
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
}

impl NewCliente {
    pub fn with_id(self, id: i64) -> Cliente {
        Cliente {
            id,
            nombre: self.nombre,
            email: self.email,
            telefono: self.telefono,
        }
    }
}
