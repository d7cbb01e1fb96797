use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use models::student::EventLog;
use models::{dates, lenient, location, report, student, transaction};

/// Mergeable student fields as sent by clients.
///
/// Scalars are cast like every input here: numeric phones and ids become
/// strings, numeric strings become amounts. Audit fields (`_id`,
/// `lastUpdated`, `reportGenerated`) are not part of the patch and are
/// silently dropped on input. `null` and absent fields both leave the
/// target untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub roll_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub parent_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub student_class: Option<String>,
    #[serde(default, deserialize_with = "dates::deserialize_opt_dob")]
    pub dob: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_f64")]
    pub amount_paid: Option<f64>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_f64")]
    pub total_due: Option<f64>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub status: Option<String>,
    pub payments: Option<EventLog>,
    pub location_history: Option<EventLog>,
}

macro_rules! merge_present {
    ($src:ident, $dst:ident, $($field:ident),+ $(,)?) => {
        $( if let Some(v) = $src.$field { $dst.$field = Some(v); } )+
    };
}

impl StudentPatch {
    /// `(phone, dob)` when both are present.
    pub fn natural_key(&self) -> Option<(&str, NaiveDate)> {
        match (self.phone.as_deref(), self.dob) {
            (Some(phone), Some(dob)) => Some((phone, dob)),
            _ => None,
        }
    }

    /// Shallow overwrite of every present field.
    pub fn apply_to(self, target: &mut student::Model) {
        let src = self;
        merge_present!(
            src, target, id, name, roll_no, address, email, phone, parent_name, student_class, dob, location,
            amount_paid, total_due, status,
        );
        if let Some(log) = src.payments {
            target.payments = log;
        }
        if let Some(log) = src.location_history {
            target.location_history = log;
        }
    }

    pub fn into_new_record(self) -> student::Model {
        let mut record = student::Model::blank();
        self.apply_to(&mut record);
        record
    }
}

/// Location fields as sent by clients; `id` is the upsert key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInput {
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_f64")]
    pub fee: Option<f64>,
}

/// The only fields an upsert may change on an existing location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub fee: Option<f64>,
}

impl LocationPatch {
    pub fn apply_to(self, target: &mut location::Model) {
        target.name = self.name;
        target.fee = self.fee;
    }
}

impl LocationInput {
    pub fn patch(&self) -> LocationPatch {
        LocationPatch { name: self.name.clone(), fee: self.fee }
    }

    pub fn into_new_record(self) -> location::Model {
        location::Model { record_id: uuid::Uuid::new_v4(), id: self.id, name: self.name, fee: self.fee }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub roll_no: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub student_class: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub parent_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_f64")]
    pub total_due: Option<f64>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_f64")]
    pub amount_paid: Option<f64>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub dob: Option<String>,
}

impl ReportInput {
    pub fn into_record(self, generated_at: DateTime<FixedOffset>) -> report::Model {
        report::Model {
            record_id: uuid::Uuid::new_v4(),
            student_id: self.student_id,
            phone: self.phone,
            name: self.name,
            roll_no: self.roll_no,
            student_class: self.student_class,
            parent_name: self.parent_name,
            address: self.address,
            location: self.location,
            total_due: self.total_due,
            amount_paid: self.amount_paid,
            status: self.status,
            dob: self.dob,
            generated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub payment_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::deserialize_opt_string")]
    pub status: Option<String>,
}

impl TransactionInput {
    pub fn into_record(self, created_at: DateTime<FixedOffset>) -> transaction::Model {
        transaction::Model {
            record_id: uuid::Uuid::new_v4(),
            payment_id: self.payment_id,
            order_id: self.order_id,
            student_id: self.student_id,
            student_name: self.student_name,
            amount: self.amount,
            status: self.status,
            created_at,
        }
    }
}

/// Whether an upsert inserted a new record or merged into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertOutcome::Created => "created",
            UpsertOutcome::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Upserted<T> {
    pub record: T,
    pub outcome: UpsertOutcome,
}

pub(crate) fn now() -> DateTime<FixedOffset> {
    Utc::now().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_ignores_audit_and_unknown_fields() {
        let patch: StudentPatch = serde_json::from_value(serde_json::json!({
            "_id": "not-a-uuid",
            "name": "Asha",
            "lastUpdated": "2020-01-01T00:00:00Z",
            "reportGenerated": "2020-01-01T00:00:00Z",
            "favouriteColour": "teal"
        }))
        .unwrap();
        assert_eq!(patch, StudentPatch { name: Some("Asha".into()), ..Default::default() });
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let mut record = StudentPatch {
            name: Some("Asha".into()),
            phone: Some("9000000001".into()),
            total_due: Some(1200.0),
            ..Default::default()
        }
        .into_new_record();
        StudentPatch { total_due: Some(600.0), ..Default::default() }.apply_to(&mut record);
        assert_eq!(record.name.as_deref(), Some("Asha"));
        assert_eq!(record.phone.as_deref(), Some("9000000001"));
        assert_eq!(record.total_due, Some(600.0));
    }

    #[test]
    fn natural_key_needs_both_parts() {
        let dob = NaiveDate::from_ymd_opt(2011, 5, 4);
        let only_phone = StudentPatch { phone: Some("1".into()), ..Default::default() };
        assert!(only_phone.natural_key().is_none());
        let both = StudentPatch { phone: Some("1".into()), dob, ..Default::default() };
        assert_eq!(both.natural_key(), Some(("1", dob.unwrap())));
    }

    #[test]
    fn inputs_cast_loose_scalars() {
        let patch: StudentPatch = serde_json::from_value(serde_json::json!({
            "phone": 9000000001u64,
            "dob": "2012-03-09",
            "amountPaid": "300",
            "totalDue": ""
        }))
        .unwrap();
        assert_eq!(patch.phone.as_deref(), Some("9000000001"));
        assert_eq!(patch.amount_paid, Some(300.0));
        assert_eq!(patch.total_due, None);

        let loc: LocationInput = serde_json::from_value(serde_json::json!({"id": 1, "fee": "500"})).unwrap();
        assert_eq!(loc.id.as_deref(), Some("1"));
        assert_eq!(loc.fee, Some(500.0));

        let report: ReportInput = serde_json::from_value(serde_json::json!({"totalDue": "1200", "phone": 42})).unwrap();
        assert_eq!(report.total_due, Some(1200.0));
        assert_eq!(report.phone.as_deref(), Some("42"));

        let tx: TransactionInput = serde_json::from_value(serde_json::json!({"amount": "250.5", "orderId": 7})).unwrap();
        assert_eq!(tx.amount, Some(250.5));
        assert_eq!(tx.order_id.as_deref(), Some("7"));
    }

    #[test]
    fn location_patch_overwrites_name_and_fee_only() {
        let mut loc = LocationInput { id: Some("L1".into()), name: Some("Zone A".into()), fee: Some(500.0) }
            .into_new_record();
        let before = loc.record_id;
        LocationPatch { name: Some("Zone B".into()), fee: Some(650.0) }.apply_to(&mut loc);
        assert_eq!(loc.record_id, before);
        assert_eq!(loc.id.as_deref(), Some("L1"));
        assert_eq!(loc.name.as_deref(), Some("Zone B"));
        assert_eq!(loc.fee, Some(650.0));
    }
}
