use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Billing snapshot of one student at generation time. Never updated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    pub student_id: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub roll_no: Option<String>,
    pub student_class: Option<String>,
    pub parent_name: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub total_due: Option<f64>,
    pub amount_paid: Option<f64>,
    pub status: Option<String>,
    pub dob: Option<String>,
    pub generated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation { fn def(&self) -> RelationDef { panic!("no relations") } }

impl ActiveModelBehavior for ActiveModel {}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(ModelError::db)
}

pub async fn insert(db: &DatabaseConnection, model: Model) -> Result<Model, ModelError> {
    model.into_active_model().reset_all().insert(db).await.map_err(ModelError::db)
}

pub async fn delete(db: &DatabaseConnection, record_id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(record_id).exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected > 0)
}
