use chrono::NaiveDate;
use sea_orm::{
    entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, FromJsonQueryResult,
    IntoActiveModel, Set,
};
use serde::{Deserialize, Serialize};

use crate::{dates, errors::ModelError};

/// Ordered, append-only log of free-form events (payments, location changes).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct EventLog(pub Vec<serde_json::Value>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    pub id: Option<String>,
    pub name: Option<String>,
    pub roll_no: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub student_class: Option<String>,
    #[serde(default, deserialize_with = "dates::deserialize_opt_dob")]
    pub dob: Option<Date>,
    pub location: Option<String>,
    pub amount_paid: Option<f64>,
    pub total_due: Option<f64>,
    pub status: Option<String>,
    pub last_updated: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "JsonBinary")]
    #[serde(default)]
    pub payments: EventLog,
    #[sea_orm(column_type = "JsonBinary")]
    #[serde(default)]
    pub location_history: EventLog,
    #[serde(default)]
    pub report_generated: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Empty record with a fresh surrogate id.
    pub fn blank() -> Self {
        Self {
            record_id: Uuid::new_v4(),
            id: None,
            name: None,
            roll_no: None,
            address: None,
            email: None,
            phone: None,
            parent_name: None,
            student_class: None,
            dob: None,
            location: None,
            amount_paid: None,
            total_due: None,
            status: None,
            last_updated: None,
            payments: EventLog::default(),
            location_history: EventLog::default(),
            report_generated: None,
        }
    }
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(ModelError::db)
}

pub async fn find(db: &DatabaseConnection, record_id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(record_id).one(db).await.map_err(ModelError::db)
}

pub async fn find_by_natural_key(
    db: &DatabaseConnection,
    phone: &str,
    dob: NaiveDate,
) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Phone.eq(phone))
        .filter(Column::Dob.eq(dob))
        .one(db)
        .await
        .map_err(ModelError::db)
}

pub async fn find_by_phone(db: &DatabaseConnection, phone: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Phone.eq(phone))
        .one(db)
        .await
        .map_err(ModelError::db)
}

pub async fn insert(db: &DatabaseConnection, model: Model) -> Result<Model, ModelError> {
    model.into_active_model().reset_all().insert(db).await.map_err(ModelError::db)
}

/// Overwrite every column of an existing row.
pub async fn save(db: &DatabaseConnection, model: Model) -> Result<Model, ModelError> {
    model.into_active_model().reset_all().update(db).await.map_err(ModelError::db)
}

/// Stamp `report_generated` on the first student with this phone.
/// Returns whether a row was touched.
pub async fn set_report_generated(
    db: &DatabaseConnection,
    phone: &str,
    at: DateTimeWithTimeZone,
) -> Result<bool, ModelError> {
    let Some(found) = find_by_phone(db, phone).await? else {
        return Ok(false);
    };
    let mut am: ActiveModel = found.into();
    am.report_generated = Set(Some(at));
    am.update(db).await.map_err(ModelError::db)?;
    Ok(true)
}

pub async fn delete(db: &DatabaseConnection, record_id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(record_id).exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected > 0)
}

pub async fn delete_all(db: &DatabaseConnection) -> Result<u64, ModelError> {
    let res = Entity::delete_many().exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected)
}
