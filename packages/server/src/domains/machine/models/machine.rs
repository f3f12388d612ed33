use serde::{Deserialize, Serialize};

use crate::kernel::{Entity, EntityMeta, FieldDef, FieldKind};

/// A machine installed at a factory. `factory_id` must resolve to an
/// existing factory whenever it is written.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    // "type" is a keyword, so the field carries renames for both the wire
    // format and the column.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub machine_type: String,
    pub factory_id: i64,
}

impl Entity for Machine {
    const META: EntityMeta = EntityMeta {
        name: "Machine",
        table: "machines",
        fields: &[
            FieldDef {
                name: "name",
                kind: FieldKind::Text,
            },
            FieldDef {
                name: "type",
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
