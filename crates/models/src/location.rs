use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "location")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    /// External id chosen by the client; the upsert key.
    pub id: Option<String>,
    pub name: Option<String>,
    pub fee: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation { fn def(&self) -> RelationDef { panic!("no relations") } }

impl ActiveModelBehavior for ActiveModel {}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(ModelError::db)
}

pub async fn find(db: &DatabaseConnection, record_id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(record_id).one(db).await.map_err(ModelError::db)
}

pub async fn find_by_external_id(db: &DatabaseConnection, id: &str) -> Result<Option<Model>, ModelError> {
    Entity::find().filter(Column::Id.eq(id)).one(db).await.map_err(ModelError::db)
}

pub async fn insert(db: &DatabaseConnection, model: Model) -> Result<Model, ModelError> {
    model.into_active_model().reset_all().insert(db).await.map_err(ModelError::db)
}

pub async fn save(db: &DatabaseConnection, model: Model) -> Result<Model, ModelError> {
    model.into_active_model().reset_all().update(db).await.map_err(ModelError::db)
}

pub async fn delete(db: &DatabaseConnection, record_id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(record_id).exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected > 0)
}

pub async fn delete_all(db: &DatabaseConnection) -> Result<u64, ModelError> {
    let res = Entity::delete_many().exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected)
}
