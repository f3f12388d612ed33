use sqlx::sqlite::Sqlite;
use sqlx::{QueryBuilder, SqliteConnection, SqlitePool};

use crate::common::ApiError;
use crate::kernel::resource::{Entity, EntityMeta, FieldKind, FieldValue};

/// Fetch all rows of an entity.
pub async fn list<E: Entity>(pool: &SqlitePool) -> Result<Vec<E>, ApiError> {
    let sql = format!("SELECT * FROM {} ORDER BY id", E::META.table);
    let rows = sqlx::query_as::<_, E>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Fetch one row by id.
pub async fn get<E: Entity>(id: i64, pool: &SqlitePool) -> Result<E, ApiError> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", E::META.table);
    sqlx::query_as::<_, E>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound {
            entity: E::META.name,
            id,
        })
}

/// Insert a new row from validated field values and return it with its
/// store-assigned id. The factory reference (if any) is resolved inside the
/// same transaction, before the insert.
pub async fn insert<E: Entity>(
    values: &[(&'static str, FieldValue)],
    pool: &SqlitePool,
) -> Result<E, ApiError> {
    let meta = &E::META;
    let mut tx = pool.begin().await?;

    resolve_factory_ref(meta, values, &mut *tx).await?;

    let mut query = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (", meta.table));
    let mut columns = query.separated(", ");
    for (name, _) in values {
        columns.push(*name);
    }
    query.push(") VALUES (");
    let mut binds = query.separated(", ");
    for (_, value) in values {
        match value {
            FieldValue::Text(text) => binds.push_bind(text.clone()),
            FieldValue::Id(id) => binds.push_bind(*id),
        };
    }
    query.push(") RETURNING *");

    let row = query.build_query_as::<E>().fetch_one(&mut *tx).await?;
    tx.commit().await?;
    Ok(row)
}

/// Apply a partial update to an existing row and return the updated row.
/// Fails with `NotFound` if the row does not exist; the factory reference
/// (if repointed) is resolved before the update, all inside one transaction.
pub async fn update<E: Entity>(
    id: i64,
    values: &[(&'static str, FieldValue)],
    pool: &SqlitePool,
) -> Result<E, ApiError> {
    let meta = &E::META;
    let mut tx = pool.begin().await?;

    if !row_exists(meta.table, id, &mut *tx).await? {
        return Err(ApiError::NotFound {
            entity: meta.name,
            id,
        });
    }
    resolve_factory_ref(meta, values, &mut *tx).await?;

    let mut query = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", meta.table));
    for (i, (name, value)) in values.iter().enumerate() {
        if i > 0 {
            query.push(", ");
        }
        query.push(*name).push(" = ");
        match value {
            FieldValue::Text(text) => query.push_bind(text.clone()),
            FieldValue::Id(ref_id) => query.push_bind(*ref_id),
        };
    }
    query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

    let row = query.build_query_as::<E>().fetch_one(&mut *tx).await?;
    tx.commit().await?;
    Ok(row)
}

/// Delete a row by id, cascading to the entity's child tables within the
/// same transaction. Fails with `NotFound` if the row does not exist.
pub async fn delete<E: Entity>(id: i64, pool: &SqlitePool) -> Result<(), ApiError> {
    let meta = &E::META;
    let mut tx = pool.begin().await?;

    if !row_exists(meta.table, id, &mut *tx).await? {
        return Err(ApiError::NotFound {
            entity: meta.name,
            id,
        });
    }

    // Dependents go first so the foreign key constraint never trips.
    for child in meta.children {
        let sql = format!("DELETE FROM {} WHERE factory_id = ?", child);
        sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
    }
    let sql = format!("DELETE FROM {} WHERE id = ?", meta.table);
    sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

    tx.commit().await?;
    Ok(())
}

async fn row_exists(table: &str, id: i64, conn: &mut SqliteConnection) -> Result<bool, ApiError> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", table);
    let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(conn).await?;
    Ok(count > 0)
}

/// If the submitted values repoint or set a factory reference, the
/// referenced Factory must exist. Runs before any mutation is applied.
async fn resolve_factory_ref(
    meta: &EntityMeta,
    values: &[(&'static str, FieldValue)],
    conn: &mut SqliteConnection,
) -> Result<(), ApiError> {
    for (name, value) in values {
        let is_ref = meta
            .fields
            .iter()
            .any(|field| field.name == *name && field.kind == FieldKind::FactoryRef);
        if let (true, FieldValue::Id(factory_id)) = (is_ref, value) {
            if !row_exists("factories", *factory_id, &mut *conn).await? {
                return Err(ApiError::NotFound {
                    entity: "Factory",
                    id: *factory_id,
                });
            }
        }
    }
    Ok(())
}
