use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use super::memory_db;
use crate::db::ping;
use crate::recycle_bin::EntryKind;
use crate::student::EventLog;
use crate::{location, recycle_bin, report, student, transaction};

fn sample_student(phone: &str) -> student::Model {
    student::Model {
        name: Some("Asha".into()),
        phone: Some(phone.into()),
        dob: NaiveDate::from_ymd_opt(2011, 6, 1),
        total_due: Some(1200.0),
        payments: EventLog(vec![json!({"amount": 200, "mode": "cash"})]),
        ..student::Model::blank()
    }
}

#[tokio::test]
async fn test_memory_db_is_usable() -> Result<()> {
    let db = memory_db().await?;
    ping(&db).await?;
    assert!(student::list(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_student_insert_find_and_save() -> Result<()> {
    let db = memory_db().await?;
    let created = student::insert(&db, sample_student("9000000001")).await?;

    let by_key = student::find_by_natural_key(&db, "9000000001", NaiveDate::from_ymd_opt(2011, 6, 1).unwrap()).await?;
    assert_eq!(by_key.as_ref().map(|s| s.record_id), Some(created.record_id));
    assert_eq!(by_key.unwrap().payments.0.len(), 1);

    let other_day = student::find_by_natural_key(&db, "9000000001", NaiveDate::from_ymd_opt(2011, 6, 2).unwrap()).await?;
    assert!(other_day.is_none());

    let mut changed = created.clone();
    changed.status = Some("paid".into());
    let saved = student::save(&db, changed).await?;
    assert_eq!(saved.status.as_deref(), Some("paid"));
    assert_eq!(student::list(&db).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_student_report_stamp_and_delete() -> Result<()> {
    let db = memory_db().await?;
    let created = student::insert(&db, sample_student("9000000002")).await?;

    let now = Utc::now().into();
    assert!(student::set_report_generated(&db, "9000000002", now).await?);
    assert!(!student::set_report_generated(&db, "0000000000", now).await?);
    let found = student::find(&db, created.record_id).await?.unwrap();
    assert!(found.report_generated.is_some());

    assert!(student::delete(&db, created.record_id).await?);
    assert!(!student::delete(&db, created.record_id).await?);
    Ok(())
}

#[tokio::test]
async fn test_location_lookup_and_bulk_delete() -> Result<()> {
    let db = memory_db().await?;
    for (ext, fee) in [("L1", 500.0), ("L2", 650.0)] {
        location::insert(&db, location::Model { record_id: Uuid::new_v4(), id: Some(ext.into()), name: Some(format!("Zone {ext}")), fee: Some(fee) }).await?;
    }
    let l2 = location::find_by_external_id(&db, "L2").await?.unwrap();
    assert_eq!(l2.fee, Some(650.0));
    assert!(location::find_by_external_id(&db, "L3").await?.is_none());

    assert_eq!(location::delete_all(&db).await?, 2);
    assert!(location::list(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_recycle_bin_newest_first() -> Result<()> {
    let db = memory_db().await?;
    let first = recycle_bin::create(&db, EntryKind::Location, json!({"id": "L1"})).await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = recycle_bin::create(&db, EntryKind::Student, json!({"phone": "1"})).await?;

    let listed = recycle_bin::list_newest_first(&db).await?;
    assert_eq!(listed.iter().map(|e| e.record_id).collect::<Vec<_>>(), vec![second.record_id, first.record_id]);
    assert_eq!(listed[1].kind, EntryKind::Location);
    assert_eq!(listed[1].data, json!({"id": "L1"}));

    assert!(recycle_bin::delete(&db, first.record_id).await?);
    assert!(recycle_bin::find(&db, first.record_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_report_and_transaction_append() -> Result<()> {
    let db = memory_db().await?;
    let r = report::insert(&db, report::Model {
        record_id: Uuid::new_v4(),
        student_id: Some("S1".into()),
        phone: Some("9".into()),
        name: None,
        roll_no: None,
        student_class: None,
        parent_name: None,
        address: None,
        location: Some("L1".into()),
        total_due: Some(100.0),
        amount_paid: Some(50.0),
        status: Some("partial".into()),
        dob: Some("2011-06-01".into()),
        generated_at: Utc::now().into(),
    }).await?;
    let listed = report::list(&db).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].record_id, r.record_id);
    assert_eq!(listed[0].dob.as_deref(), Some("2011-06-01"));

    let bad = transaction::Model {
        record_id: Uuid::new_v4(),
        payment_id: None,
        order_id: None,
        student_id: None,
        student_name: None,
        amount: Some(f64::NAN),
        status: None,
        created_at: Utc::now().into(),
    };
    assert!(transaction::insert(&db, bad.clone()).await.is_err());
    transaction::insert(&db, transaction::Model { amount: Some(300.0), ..bad }).await?;
    assert_eq!(transaction::list(&db).await?.len(), 1);
    Ok(())
}

#[test]
fn test_student_json_shape() {
    let s = sample_student("1");
    let v = serde_json::to_value(&s).unwrap();
    assert!(v.get("_id").is_some());
    assert_eq!(v["dob"], "2011-06-01");
    assert_eq!(v["totalDue"], 1200.0);
    assert!(v["payments"].is_array());
    assert!(v.get("reportGenerated").is_some());

    let back: student::Model = serde_json::from_value(v).unwrap();
    assert_eq!(back, s);
}
