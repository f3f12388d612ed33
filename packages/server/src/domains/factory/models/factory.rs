use serde::{Deserialize, Serialize};

use crate::kernel::{Entity, EntityMeta, FieldDef, FieldKind};

/// A factory site. Owns zero or more machines and workers; deleting a
/// factory cascades to both.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Factory {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl Entity for Factory {
    const META: EntityMeta = EntityMeta {
        name: "Factory",
        table: "factories",
        fields: &[
            FieldDef {
                name: "name",
                kind: FieldKind::Text,
            },
            FieldDef {
                name: "location",
                kind: FieldKind::Text,
            },
        ],
        children: &["machines", "workers"],
    };
}
