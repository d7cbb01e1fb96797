//! OpenAPI document. The `*Doc` structs mirror the wire shape of the
//! entities (camelCase, `_id` surrogate key) without tying the models crate
//! to utoipa.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDoc {
    #[serde(rename = "_id")]
    pub record_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub roll_no: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub student_class: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub dob: Option<String>,
    pub location: Option<String>,
    pub amount_paid: Option<f64>,
    pub total_due: Option<f64>,
    pub status: Option<String>,
    pub last_updated: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub payments: Option<Vec<serde_json::Value>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub location_history: Option<Vec<serde_json::Value>>,
    pub report_generated: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LocationDoc {
    #[serde(rename = "_id")]
    pub record_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub fee: Option<f64>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDoc {
    #[serde(rename = "_id")]
    pub record_id: Option<String>,
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
    pub generated_at: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDoc {
    #[serde(rename = "_id")]
    pub record_id: Option<String>,
    pub payment_id: Option<String>,
    pub order_id: Option<String>,
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecycleBinEntryDoc {
    #[serde(rename = "_id")]
    pub record_id: String,
    /// `student` or `location`
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub deleted_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAckDoc { pub acknowledged: bool, pub inserted_id: String }

#[derive(ToSchema)]
pub struct DeleteAckDoc { pub success: bool }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::upsert,
        crate::routes::students::update_by_phone,
        crate::routes::locations::list,
        crate::routes::locations::upsert,
        crate::routes::locations::delete,
        crate::routes::locations::delete_all,
        crate::routes::recycle_bin::list,
        crate::routes::recycle_bin::restore,
        crate::routes::recycle_bin::purge,
        crate::routes::reports::generate,
        crate::routes::reports::list,
        crate::routes::transactions::list,
        crate::routes::transactions::record,
        crate::routes::ledger::list,
        crate::routes::ledger::insert,
        crate::routes::ledger::delete,
    ),
    components(
        schemas(
            HealthResponse,
            StudentDoc,
            LocationDoc,
            ReportDoc,
            TransactionDoc,
            RecycleBinEntryDoc,
            InsertAckDoc,
            DeleteAckDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students"),
        (name = "locations"),
        (name = "recyclebin"),
        (name = "reports"),
        (name = "transactions"),
        (name = "ledger")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_both_profiles() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/students"));
        assert!(paths.contains_key("/api/recyclebin/restore/{id}"));
        assert!(paths.contains_key("/{collection}/{id}"));
    }
}
