use serde::{Deserialize, Serialize};

use crate::kernel::{Entity, EntityMeta, FieldDef, FieldKind};

/// A worker employed at a factory. Same shape as `Machine`, with `role`
/// in place of `type`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub factory_id: i64,
}

impl Entity for Worker {
    const META: EntityMeta = EntityMeta {
        name: "Worker",
        table: "workers",
        fields: &[
            FieldDef {
                name: "name",
                kind: FieldKind::Text,
            },
            FieldDef {
                name: "role",
                kind: FieldKind::Text,
            },
            FieldDef {
                name: "factory_id",
                kind: FieldKind::FactoryRef,
            },
        ],
        children: &[],
    };
}
