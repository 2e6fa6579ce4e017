//! End-to-end checks of the practice record services against a real libSQL
//! database: client lifecycle, cascade behaviour, partial updates, and
//! reports over empty ranges.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;

use cn_core::enums::StatusFilter;
use cn_core::filters::NoteFilter;
use cn_core::payloads::{
    NewAssessmentNote, NewClient, NewSessionNote, NewSupervisionNote,
};
use cn_core::reports::DateRange;
use cn_db::error::DatabaseError;
use cn_db::service::PracticeService;
use cn_db::updates::client::ClientUpdateBuilder;
use cn_db::updates::session_note::SessionNoteUpdateBuilder;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn service() -> PracticeService {
    PracticeService::new_local(":memory:").await.unwrap()
}

#[tokio::test]
async fn created_client_reads_back_identically() {
    let svc = service().await;
    let new = NewClient {
        client_code: Some("CL-100".into()),
        email: Some("grace@example.com".into()),
        date_of_birth: Some(date("1970-12-09")),
        emergency_contact_name: Some("Vincent".into()),
        emergency_contact_relationship: Some("Spouse".into()),
        gp_practice: Some("Harbour Surgery".into()),
        ..NewClient::new("Grace", "Hopper")
    };

    let created = svc.create_client(new.clone()).await.unwrap();
    let fetched = svc.get_client(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.first_name, new.first_name);
    assert_eq!(fetched.last_name, new.last_name);
    assert_eq!(fetched.client_code, new.client_code);
    assert_eq!(fetched.email, new.email);
    assert_eq!(fetched.date_of_birth, new.date_of_birth);
    assert_eq!(fetched.emergency_contact_relationship, new.emergency_contact_relationship);
    assert_eq!(fetched.gp_practice, new.gp_practice);
}

#[rstest]
#[case(true, StatusFilter::Archived, StatusFilter::Active)]
#[case(false, StatusFilter::Active, StatusFilter::Archived)]
#[tokio::test]
async fn archive_flag_moves_client_between_listings(
    #[case] archive: bool,
    #[case] lands_in: StatusFilter,
    #[case] absent_from: StatusFilter,
) {
    let svc = service().await;
    let client = svc.create_client(NewClient::new("Ada", "Byron")).await.unwrap();
    // Start from the opposite state so every case is a real transition.
    svc.set_client_archived(client.id, !archive).await.unwrap();

    svc.set_client_archived(client.id, archive).await.unwrap();

    let present = svc.list_clients(lands_in).await.unwrap();
    assert_eq!(present.len(), 1);
    assert_eq!(present[0].id, client.id);
    assert!(svc.list_clients(absent_from).await.unwrap().is_empty());
    assert_eq!(svc.list_clients(StatusFilter::All).await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_client_cascades_to_owned_notes() {
    let svc = service().await;
    let client = svc.create_client(NewClient::new("Ada", "Byron")).await.unwrap();
    let session = svc
        .create_session_note(NewSessionNote::new(client.id, date("2024-03-04"), 50))
        .await
        .unwrap();
    let assessment = svc
        .create_assessment_note(NewAssessmentNote::new(client.id, date("2024-03-01")))
        .await
        .unwrap();
    let mut supervision = NewSupervisionNote::new(date("2024-03-08"));
    supervision.client_id = Some(client.id);
    let supervision = svc.create_supervision_note(supervision).await.unwrap();

    let deleted = svc.delete_client(client.id).await.unwrap();
    assert_eq!(deleted.id, client.id);

    assert!(matches!(
        svc.get_session_note(session.id).await,
        Err(DatabaseError::NotFound { .. })
    ));
    assert!(matches!(
        svc.get_assessment_note(assessment.id).await,
        Err(DatabaseError::NotFound { .. })
    ));
    let kept = svc.get_supervision_note(supervision.id).await.unwrap();
    assert_eq!(kept.client_id, None);
}

#[tokio::test]
async fn partial_update_touches_only_given_fields() {
    let svc = service().await;
    let client = svc
        .create_client(NewClient {
            phone: Some("0113 000 0000".into()),
            city: Some("Leeds".into()),
            ..NewClient::new("Ada", "Byron")
        })
        .await
        .unwrap();

    let updated = svc
        .update_client(client.id, ClientUpdateBuilder::new().last_name("Lovelace").build())
        .await
        .unwrap();
    assert_eq!(updated.last_name, "Lovelace");
    assert_eq!(updated.first_name, client.first_name);
    assert_eq!(updated.phone, client.phone);
    assert_eq!(updated.city, client.city);
    assert!(updated.updated_at.is_some());

    let mut new = NewSessionNote::new(client.id, date("2024-03-04"), 50);
    new.session_type = "Online".into();
    let note = svc.create_session_note(new).await.unwrap();
    let note = svc
        .update_session_note(note.id, SessionNoteUpdateBuilder::new().duration_minutes(60).build())
        .await
        .unwrap();
    assert_eq!(note.duration_minutes, 60);
    assert_eq!(note.session_type, "Online");
}

#[tokio::test]
async fn reports_over_empty_range_are_empty_and_zero() {
    let svc = service().await;
    let quiet_month = DateRange::new(date("2024-06-01"), date("2024-06-30"));

    assert!(
        svc.client_time_report(quiet_month, StatusFilter::All)
            .await
            .unwrap()
            .is_empty()
    );

    let supervision = svc.supervision_time_report(quiet_month).await.unwrap();
    assert_eq!(supervision.total_minutes, 0);
    assert_eq!(supervision.total_sessions, 0);
    assert_eq!(supervision.total_days, 0);
    assert!(supervision.notes.is_empty());
    assert_eq!(supervision.months.len(), 1);
    assert_eq!(supervision.months[0].total_minutes, 0);

    let totals = svc.totals_report(quiet_month, StatusFilter::Active).await.unwrap();
    assert_eq!(totals.session_total.count, 0);
    assert_eq!(totals.supervision_total.minutes, 0);
    assert_eq!(totals.cpd_total.count, 0);
}

#[tokio::test]
async fn client_with_notes_lists_both_note_kinds() {
    let svc = service().await;
    let client = svc
        .create_client(NewClient {
            date_of_birth: Some(date("1990-06-15")),
            ..NewClient::new("Ada", "Byron")
        })
        .await
        .unwrap();
    for day in ["2024-01-10", "2024-02-10"] {
        svc.create_session_note(NewSessionNote::new(client.id, date(day), 50))
            .await
            .unwrap();
    }
    svc.create_assessment_note(NewAssessmentNote::new(client.id, date("2024-01-03")))
        .await
        .unwrap();

    let view = svc
        .get_client_with_notes(client.id, date("2024-06-14"))
        .await
        .unwrap();
    assert_eq!(view.profile.full_name, "Ada Byron");
    assert_eq!(view.profile.age, Some(33));
    assert_eq!(view.session_notes.len(), 2);
    assert_eq!(view.session_notes[0].session_date, date("2024-02-10"));
    assert_eq!(view.assessment_notes.len(), 1);

    let filtered = svc
        .list_session_notes(NoteFilter::for_client(client.id).between(date("2024-02-01"), date("2024-02-29")))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
}

#[tokio::test]
async fn file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casenote.db");
    let path = path.to_str().unwrap();

    let id = {
        let svc = PracticeService::new_local(path).await.unwrap();
        svc.create_client(NewClient::new("Ada", "Byron")).await.unwrap().id
    };

    let svc = PracticeService::new_local(path).await.unwrap();
    assert_eq!(svc.get_client(id).await.unwrap().full_name(), "Ada Byron");
}
