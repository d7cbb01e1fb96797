use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Which collection a tombstone restores into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "location")]
    Location,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Student => "student",
            EntryKind::Location => "location",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recycle_bin")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Full prior state of the deleted record, as it was serialized.
    #[sea_orm(column_type = "JsonBinary")]
    pub data: Json,
    pub deleted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation { fn def(&self) -> RelationDef { panic!("no relations") } }

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, kind: EntryKind, data: Json) -> Result<Model, ModelError> {
    let am = ActiveModel {
        record_id: Set(Uuid::new_v4()),
        kind: Set(kind),
        data: Set(data),
        deleted_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::db)
}

/// Newest tombstone first.
pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_desc(Column::DeletedAt)
        .all(db)
        .await
        .map_err(ModelError::db)
}

pub async fn find(db: &DatabaseConnection, record_id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(record_id).one(db).await.map_err(ModelError::db)
}

pub async fn delete(db: &DatabaseConnection, record_id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(record_id).exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected > 0)
}
