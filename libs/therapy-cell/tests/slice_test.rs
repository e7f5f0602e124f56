use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use shared_store::Reducer;
use therapy_cell::{
    SessionFeedback, SessionFilters, SessionStatus, TherapyAction, TherapySession, TherapyState,
    TherapyType,
};

fn therapy_type() -> TherapyType {
    TherapyType {
        id: "vamana".to_string(),
        name: "Vamana".to_string(),
        description: "Cleansing therapy".to_string(),
        duration: 120,
        preparation: Vec::new(),
        post_care: Vec::new(),
        contraindications: Vec::new(),
        benefits: Vec::new(),
    }
}

fn session(status: SessionStatus) -> TherapySession {
    TherapySession {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        doctor_id: Uuid::new_v4(),
        therapy_type: therapy_type(),
        scheduled_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        status,
        notes: None,
        precautions: Vec::new(),
        feedback: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[test]
fn cancel_marks_only_the_target_session() {
    let mut state = TherapyState::default();
    let target = session(SessionStatus::Scheduled);
    let other = session(SessionStatus::Scheduled);
    state.reduce(TherapyAction::FetchFulfilled {
        seq: 1,
        sessions: vec![target.clone(), other.clone()],
    });

    state.reduce(TherapyAction::CancelFulfilled { id: target.id });

    let cancelled = state.sessions.iter().find(|s| s.id == target.id).unwrap();
    let untouched = state.sessions.iter().find(|s| s.id == other.id).unwrap();
    assert_eq!(cancelled.status, SessionStatus::Cancelled);
    assert_eq!(untouched.status, SessionStatus::Scheduled);
}

#[test]
fn cancel_for_an_unknown_session_is_a_no_op() {
    let mut state = TherapyState::default();
    state.reduce(TherapyAction::FetchFulfilled {
        seq: 1,
        sessions: vec![session(SessionStatus::Scheduled)],
    });
    let snapshot = state.sessions.clone();

    state.reduce(TherapyAction::CancelFulfilled { id: Uuid::new_v4() });
    assert_eq!(state.sessions, snapshot);
}

#[test]
fn feedback_attaches_to_its_session() {
    let mut state = TherapyState::default();
    let target = session(SessionStatus::Completed);
    state.reduce(TherapyAction::FetchFulfilled {
        seq: 1,
        sessions: vec![target.clone()],
    });

    let feedback = SessionFeedback {
        session_id: target.id,
        rating: 4,
        symptoms: vec!["fatigue".to_string()],
        improvements: vec!["better sleep".to_string()],
        side_effects: Vec::new(),
        comments: "Felt lighter afterwards".to_string(),
        submitted_at: Utc::now(),
    };
    state.reduce(TherapyAction::FeedbackFulfilled(Box::new(feedback.clone())));

    assert_eq!(
        state.sessions[0].feedback.as_ref().map(|f| f.rating),
        Some(4)
    );

    // Feedback for a session that fell out of the visible set is
    // dropped, never a panic.
    let mut orphan = feedback;
    orphan.session_id = Uuid::new_v4();
    state.reduce(TherapyAction::FeedbackFulfilled(Box::new(orphan)));
}

#[test]
fn filters_are_set_and_cleared_locally() {
    let mut state = TherapyState::default();
    let filters = SessionFilters {
        status: Some(SessionStatus::Scheduled),
        therapy_type: Some("vamana".to_string()),
        ..Default::default()
    };

    state.reduce(TherapyAction::SetFilters(filters.clone()));
    assert_eq!(state.filters, filters);

    state.reduce(TherapyAction::ClearFilters);
    assert_eq!(state.filters, SessionFilters::default());
}

#[test]
fn booking_goes_through_the_three_phases() {
    let mut state = TherapyState::default();

    state.reduce(TherapyAction::BookPending);
    assert!(state.is_loading);

    let booked = session(SessionStatus::Scheduled);
    state.reduce(TherapyAction::BookFulfilled(Box::new(booked.clone())));
    assert!(!state.is_loading);
    assert_eq!(state.sessions[0].id, booked.id);

    state.reduce(TherapyAction::BookPending);
    state.reduce(TherapyAction::BookRejected {
        message: "No slots available".to_string(),
    });
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("No slots available"));
    assert_eq!(state.sessions.len(), 1);
}
