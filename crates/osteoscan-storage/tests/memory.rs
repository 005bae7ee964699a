use jiff::civil::date;
use jiff::{Timestamp, ToSpan};

use osteoscan_core::image::ImageFormat;
use osteoscan_core::models::analysis::{
    AnalysisStatus, AnalysisSubmission, AnatomicalRegion, RiskCategory, XRayAnalysis,
};
use osteoscan_core::models::patient::{Gender, Patient, PatientInput};
use osteoscan_core::query::{AnalysisQuery, PatientQuery};
use osteoscan_storage::{ImageStore, MemoryStore, RecordStore, StorageError};

fn at(offset_secs: i64) -> Timestamp {
    Timestamp::from_second(1_760_000_000).unwrap() + offset_secs.seconds()
}

fn patient(name: &str, mrn: Option<&str>, created: i64) -> Patient {
    Patient::create(
        PatientInput {
            full_name: name.to_string(),
            date_of_birth: date(1952, 3, 14),
            gender: Gender::Female,
            medical_record_number: mrn.map(str::to_string),
            height_cm: None,
            weight_kg: None,
            medical_history: None,
            referring_physician: None,
            contact_email: None,
            contact_phone: None,
        },
        at(created),
    )
    .unwrap()
}

fn analysis(created: i64, status: AnalysisStatus, category: Option<RiskCategory>) -> XRayAnalysis {
    let mut record = XRayAnalysis::processing(
        AnalysisSubmission {
            patient_id: None,
            patient_name: "Ruth Olsen".to_string(),
            patient_age: 74,
            patient_gender: Gender::Female,
            anatomical_region: AnatomicalRegion::Clavicle,
            image_url: "images/x.png".to_string(),
            analysis_notes: None,
        },
        at(created),
    );
    record.analysis_status = status;
    record.findings.osteoporosis_risk_category = category;
    record
}

#[tokio::test]
async fn patients_round_trip_and_list_newest_first() {
    let store = MemoryStore::new();
    let older = patient("Ruth Olsen", Some("MRN-1"), 0);
    let newer = patient("Karl Lund", None, 60);
    store.create_patient(&older).await.unwrap();
    store.create_patient(&newer).await.unwrap();

    assert_eq!(store.get_patient(older.id).await.unwrap(), older);

    let listed = store.list_patients(&PatientQuery::default()).await.unwrap();
    let names: Vec<_> = listed.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, ["Karl Lund", "Ruth Olsen"]);

    let searched = store
        .list_patients(&PatientQuery {
            search: Some("mrn-1".to_string()),
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].id, older.id);
}

#[tokio::test]
async fn duplicate_mrn_is_rejected() {
    let store = MemoryStore::new();
    let first = patient("Ruth Olsen", Some("MRN-7"), 0);
    store.create_patient(&first).await.unwrap();

    let clash = patient("Karl Lund", Some(" mrn-7 "), 10);
    let err = store.create_patient(&clash).await.unwrap_err();
    assert!(matches!(err, StorageError::DuplicateMrn { existing, .. } if existing == first.id));

    // Re-saving a patient with its own MRN is not a clash.
    let mut edited = first.clone();
    edited.full_name = "Ruth M. Olsen".to_string();
    store.update_patient(&edited).await.unwrap();
    assert_eq!(store.get_patient(first.id).await.unwrap().full_name, "Ruth M. Olsen");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_one_mrn_admit_exactly_one() {
    let store = MemoryStore::new();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            let candidate = patient(&format!("Patient {i}"), Some("MRN-42"), i);
            tokio::spawn(async move { store.create_patient(&candidate).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => created += 1,
            Err(err) => assert!(matches!(err, StorageError::DuplicateMrn { .. })),
        }
    }
    assert_eq!(created, 1);
    let listed = store.list_patients(&PatientQuery::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn updating_unknown_patient_is_not_found() {
    let store = MemoryStore::new();
    let err = store
        .update_patient(&patient("Nobody", None, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn analyses_filter_by_status_and_category() {
    let store = MemoryStore::new();
    let normal = analysis(0, AnalysisStatus::Completed, Some(RiskCategory::Normal));
    let porotic = analysis(30, AnalysisStatus::Completed, Some(RiskCategory::Osteoporosis));
    let review = analysis(60, AnalysisStatus::RequiresReview, Some(RiskCategory::Normal));
    let pending = analysis(90, AnalysisStatus::Processing, None);
    for record in [&normal, &porotic, &review, &pending] {
        store.create_analysis(record).await.unwrap();
    }

    let reports = store.list_analyses(&AnalysisQuery::reports(None)).await.unwrap();
    let ids: Vec<_> = reports.iter().map(|a| a.id).collect();
    assert_eq!(ids, [porotic.id, normal.id]);

    let normals = store
        .list_analyses(&AnalysisQuery::reports(Some(RiskCategory::Normal)))
        .await
        .unwrap();
    assert_eq!(normals.len(), 1);
    assert_eq!(normals[0].id, normal.id);

    let latest = store
        .list_analyses(&AnalysisQuery {
            limit: Some(2),
            ..AnalysisQuery::default()
        })
        .await
        .unwrap();
    let ids: Vec<_> = latest.iter().map(|a| a.id).collect();
    assert_eq!(ids, [pending.id, review.id]);
}

#[tokio::test]
async fn analysis_update_overwrites() {
    let store = MemoryStore::new();
    let mut record = analysis(0, AnalysisStatus::Processing, None);
    store.create_analysis(&record).await.unwrap();
    assert!(matches!(
        store.create_analysis(&record).await,
        Err(StorageError::AlreadyExists { .. })
    ));

    record.analysis_status = AnalysisStatus::Failed;
    record.failure_reason = Some("model timed out".to_string());
    store.update_analysis(&record).await.unwrap();
    assert_eq!(store.get_analysis(record.id).await.unwrap(), record);
}

#[tokio::test]
async fn images_are_keyed_by_format() {
    let store = MemoryStore::new();
    let url = store
        .put_image(vec![0xFF, 0xD8, 0xFF, 0xE0], ImageFormat::Jpeg)
        .await
        .unwrap();
    assert!(url.starts_with("images/"));
    assert!(url.ends_with(".jpg"));
    assert_eq!(store.get_image(&url).await.unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    assert!(matches!(
        store.get_image("images/missing.png").await,
        Err(StorageError::NotFound { .. })
    ));
}
