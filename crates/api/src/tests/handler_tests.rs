// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{Fixture, create_fixture, create_test_state, date};
use crate::{
    ApiError, AssignRequest, CandidatesQuery, ClearPastRequest, PersonRequest,
    SaveSettingsRequest, ScheduleQuery, add_roster_person, assign, clear_past_assignments,
    export_document, get_schedule, import_document, list_candidates, load_document,
    reload_document, remove_roster_person, save_settings, schedule_csv,
};
use meeting_roster::{MutationPhase, NotificationKind, RosterState};
use meeting_roster_domain::{Period, RecencyWindow, Role, ScheduleFormat};

fn assign_request(date: &str, role: &str, person: &str) -> AssignRequest {
    AssignRequest {
        date: date.to_string(),
        role: role.to_string(),
        person: person.to_string(),
        note: None,
    }
}

fn assign_in(
    fixture: &mut Fixture,
    request: AssignRequest,
) -> Result<crate::MutationResponse, ApiError> {
    assign(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        request,
    )
}

#[test]
fn test_load_document_returns_state_and_version() {
    let fixture: Fixture = create_fixture();

    let response = load_document(&fixture.session, &fixture.gateway);

    assert_eq!(response.document, create_test_state());
    assert_eq!(response.version, Some(1));

    let json: serde_json::Value = serde_json::to_value(&response).unwrap();
    assert!(json["assignments"].is_object());
    assert_eq!(json["settings"]["meetingDays"], serde_json::json!([3, 6]));
    assert_eq!(json["version"], 1);
}

#[test]
fn test_list_candidates_filters_and_annotates() {
    let fixture: Fixture = create_fixture();
    let query: CandidatesQuery = CandidatesQuery {
        date: String::from("2024-01-06"),
        role: String::from("Leitura"),
    };

    let response = list_candidates(&fixture.session, &query, RecencyWindow::default()).unwrap();

    let names: Vec<&str> = response
        .candidates
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana!", "Bruno", "Diego"]);
    assert_eq!(response.recency_window_days, 14);
    assert_eq!(response.current, None);

    let ana = &response.candidates[0];
    assert_eq!(ana.last_assigned, Some(date("2024-01-03")));
    assert_eq!(ana.days_since_last, Some(3));
    assert!(ana.recently_assigned);
    assert!(!ana.assigned_elsewhere);

    assert!(response.candidates[1].assigned_elsewhere);
    assert_eq!(response.candidates[2].last_assigned, None);
}

#[test]
fn test_list_candidates_reports_current_holder() {
    let fixture: Fixture = create_fixture();
    let query: CandidatesQuery = CandidatesQuery {
        date: String::from("2024-01-06"),
        role: String::from("Presidência"),
    };

    let response = list_candidates(&fixture.session, &query, RecencyWindow::default()).unwrap();

    assert_eq!(response.current.as_deref(), Some("Bruno"));
    let bruno = response
        .candidates
        .iter()
        .find(|c| c.name == "Bruno")
        .unwrap();
    assert!(!bruno.assigned_elsewhere);
}

#[test]
fn test_list_candidates_rejects_unknown_role() {
    let fixture: Fixture = create_fixture();
    let query: CandidatesQuery = CandidatesQuery {
        date: String::from("2024-01-06"),
        role: String::from("Zelador"),
    };

    let result = list_candidates(&fixture.session, &query, RecencyWindow::default());

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role"
    ));
}

#[test]
fn test_assign_commits_and_notifies() {
    let mut fixture: Fixture = create_fixture();

    let response = assign_in(&mut fixture, assign_request("2024-01-06", "Palco", "Diego")).unwrap();

    assert_eq!(response.mutation, "Assign");
    assert_eq!(response.message, "Designação salva com sucesso!");
    assert_eq!(response.kind, NotificationKind::Success);
    assert_eq!(response.version, Some(2));
    assert_eq!(
        response
            .document
            .assignments
            .role(&date("2024-01-06"), Role::Palco)
            .map(|v| v.person.as_str()),
        Some("Diego")
    );
    assert_eq!(
        fixture.sink.kinds(),
        vec![NotificationKind::Loading, NotificationKind::Success]
    );
    assert_eq!(fixture.session.phase(), MutationPhase::Committed);

    let stored: &str = &fixture.gateway.store().document().unwrap().body;
    assert!(stored.contains("Diego"));
}

#[test]
fn test_assign_with_note() {
    let mut fixture: Fixture = create_fixture();
    let request: AssignRequest = AssignRequest {
        note: Some(String::from("Primeira vez")),
        ..assign_request("2024-01-10", "Oração Final", "Carla\"")
    };

    let response = assign_in(&mut fixture, request).unwrap();

    let value = response
        .document
        .assignments
        .role(&date("2024-01-10"), Role::OracaoFinal)
        .unwrap();
    assert_eq!(value.person, "Carla\"");
    assert_eq!(value.note.as_deref(), Some("Primeira vez"));
}

#[test]
fn test_assign_empty_person_clears_role() {
    let mut fixture: Fixture = create_fixture();

    let response = assign_in(&mut fixture, assign_request("2024-01-03", "Leitura", "")).unwrap();

    assert!(response.document.assignments.day(&date("2024-01-03")).is_none());
}

#[test]
fn test_assign_rejects_ineligible_person_without_notifying() {
    let mut fixture: Fixture = create_fixture();

    let result = assign_in(&mut fixture, assign_request("2024-01-10", "Leitura", "Carla\""));

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "role_restriction"
    ));
    assert!(fixture.sink.kinds().is_empty());
    assert_eq!(fixture.session.state(), &create_test_state());
    assert_eq!(fixture.gateway.version(), Some(1));
}

#[test]
fn test_assign_rejects_second_role_on_same_day() {
    let mut fixture: Fixture = create_fixture();

    let result = assign_in(&mut fixture, assign_request("2024-01-06", "Leitura", "Bruno"));

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "one_role_per_day"
    ));
}

#[test]
fn test_assign_rejects_unknown_person() {
    let mut fixture: Fixture = create_fixture();

    let result = assign_in(&mut fixture, assign_request("2024-01-06", "Palco", "Zé"));

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "person_in_roster"
    ));
}

#[test]
fn test_assign_rejects_invalid_date() {
    let mut fixture: Fixture = create_fixture();

    let result = assign_in(&mut fixture, assign_request("2024-02-30", "Palco", "Diego"));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}

#[test]
fn test_assign_rolls_back_when_write_fails() {
    let mut fixture: Fixture = create_fixture();
    fixture.gateway.store_mut().set_fail_writes(true);

    let result = assign_in(&mut fixture, assign_request("2024-01-06", "Palco", "Diego"));

    assert!(matches!(result, Err(ApiError::PersistenceFailed { .. })));
    assert_eq!(fixture.session.state(), &create_test_state());
    assert_eq!(fixture.session.phase(), MutationPhase::RolledBack);
    assert_eq!(
        fixture.sink.kinds(),
        vec![NotificationKind::Loading, NotificationKind::Error]
    );
    let messages: Vec<String> = fixture
        .sink
        .received
        .borrow()
        .iter()
        .map(|n| n.message.clone())
        .collect();
    assert_eq!(messages[1], "Falha ao salvar. Verifique sua conexão.");
}

#[test]
fn test_version_conflict_then_reload() {
    let mut fixture: Fixture = create_fixture();
    let mut other: RosterState = create_test_state();
    other.settings.people.push(String::from("Eva"));
    fixture
        .gateway
        .store_mut()
        .overwrite(serde_json::to_string(&other).unwrap());

    let result = assign_in(&mut fixture, assign_request("2024-01-06", "Palco", "Diego"));
    assert!(matches!(result, Err(ApiError::PersistenceFailed { .. })));

    let reloaded = reload_document(&mut fixture.session, &mut fixture.gateway).unwrap();
    assert_eq!(reloaded.document, other);
    assert_eq!(reloaded.version, Some(2));
    assert_eq!(fixture.session.phase(), MutationPhase::Idle);

    assign_in(&mut fixture, assign_request("2024-01-06", "Palco", "Eva")).unwrap();
    assert_eq!(fixture.gateway.version(), Some(3));
}

#[test]
fn test_reload_failure_keeps_visible_and_stored_document() {
    let mut fixture: Fixture = create_fixture();
    fixture.gateway.store_mut().set_fail_reads(true);

    let result = reload_document(&mut fixture.session, &mut fixture.gateway);

    assert!(matches!(result, Err(ApiError::PersistenceFailed { .. })));
    assert_eq!(fixture.session.state(), &create_test_state());
    assert_eq!(fixture.gateway.version(), Some(1));

    fixture.gateway.store_mut().set_fail_reads(false);
    assign_in(&mut fixture, assign_request("2024-01-06", "Palco", "")).unwrap();

    let stored: RosterState =
        serde_json::from_str(&fixture.gateway.store().document().unwrap().body).unwrap();
    assert_eq!(stored.settings, create_test_state().settings);
    assert!(stored.assignments.day(&date("2024-01-03")).is_some());
    assert_eq!(fixture.gateway.version(), Some(2));
}

#[test]
fn test_save_settings_prunes_removed_people() {
    let mut fixture: Fixture = create_fixture();
    let request: SaveSettingsRequest = SaveSettingsRequest {
        meeting_days: vec![0, 3],
        people: vec![String::from("Bruno"), String::from("Diego")],
    };

    let response = save_settings(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        request,
    )
    .unwrap();

    assert_eq!(response.message, "Configurações salvas com sucesso!");
    assert_eq!(response.document.settings.meeting_days, vec![0, 3]);
    assert!(response.document.assignments.day(&date("2024-01-03")).is_none());
    assert!(response.document.assignments.day(&date("2024-01-06")).is_some());
}

#[test]
fn test_save_settings_rejects_invalid_meeting_day() {
    let mut fixture: Fixture = create_fixture();
    let request: SaveSettingsRequest = SaveSettingsRequest {
        meeting_days: vec![3, 7],
        people: vec![String::from("Bruno")],
    };

    let result = save_settings(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        request,
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "meetingDays"
    ));
    assert!(fixture.sink.kinds().is_empty());
}

#[test]
fn test_add_roster_person_trims_and_sorts() {
    let mut fixture: Fixture = create_fixture();
    let request: PersonRequest = PersonRequest {
        name: String::from("  bia "),
    };

    let response = add_roster_person(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        &request,
    )
    .unwrap();

    assert_eq!(
        response.document.settings.people,
        vec!["Ana!", "bia", "Bruno", "Carla\"", "Diego"]
    );
}

#[test]
fn test_add_roster_person_rejects_duplicate_ignoring_case() {
    let mut fixture: Fixture = create_fixture();
    let request: PersonRequest = PersonRequest {
        name: String::from("DIEGO"),
    };

    let result = add_roster_person(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        &request,
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_person"
    ));
}

#[test]
fn test_add_roster_person_rejects_blank_name() {
    let mut fixture: Fixture = create_fixture();
    let request: PersonRequest = PersonRequest {
        name: String::from("   "),
    };

    let result = add_roster_person(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        &request,
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_remove_roster_person_drops_their_assignments() {
    let mut fixture: Fixture = create_fixture();
    let request: PersonRequest = PersonRequest {
        name: String::from("Bruno"),
    };

    let response = remove_roster_person(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        &request,
    )
    .unwrap();

    assert!(!response.document.settings.has_person("Bruno"));
    assert!(response.document.assignments.day(&date("2024-01-06")).is_none());
    assert!(response.document.assignments.day(&date("2024-01-03")).is_some());
}

#[test]
fn test_remove_roster_person_unknown_name() {
    let mut fixture: Fixture = create_fixture();
    let request: PersonRequest = PersonRequest {
        name: String::from("bruno"),
    };

    let result = remove_roster_person(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        &request,
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "person_in_roster"
    ));
}

#[test]
fn test_clear_past_uses_server_date() {
    let mut fixture: Fixture = create_fixture();

    let response = clear_past_assignments(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        &ClearPastRequest::default(),
        date("2024-02-10"),
    )
    .unwrap();

    assert!(response.document.assignments.is_empty());
    assert_eq!(response.message, "Designações antigas limpas!");
}

#[test]
fn test_clear_past_keeps_current_month() {
    let mut fixture: Fixture = create_fixture();
    let request: ClearPastRequest = ClearPastRequest {
        today: Some(String::from("2024-01-31")),
    };

    let response = clear_past_assignments(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        &request,
        date("2024-06-01"),
    )
    .unwrap();

    assert_eq!(response.document.assignments.len(), 2);
}

#[test]
fn test_import_replaces_document() {
    let mut fixture: Fixture = create_fixture();
    let body: &str = r#"{
        "assignments": {"2024-03-02": {"Palco": {"person": "Eva"}}},
        "settings": {"meetingDays": [6], "people": ["Eva"]}
    }"#;

    let response = import_document(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        body,
    )
    .unwrap();

    assert_eq!(response.message, "Dados importados com sucesso!");
    assert_eq!(response.document.settings.people, vec!["Eva"]);
    assert_eq!(response.document.assignments.len(), 1);
    assert_eq!(fixture.session.state(), &response.document);
}

#[test]
fn test_import_rejects_bad_structure_without_notifying() {
    let mut fixture: Fixture = create_fixture();
    let body: &str = r#"{"assignments": {}, "settings": {"people": "Ana"}}"#;

    let result = import_document(
        &mut fixture.session,
        &mut fixture.gateway,
        &fixture.sink,
        body,
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "document"
    ));
    assert!(fixture.sink.kinds().is_empty());
    assert_eq!(fixture.session.state(), &create_test_state());
}

#[test]
fn test_export_document() {
    let fixture: Fixture = create_fixture();

    let export = export_document(&fixture.session, date("2024-01-10")).unwrap();

    assert_eq!(export.file_name, "backup_designacoes_2024-01-10.json");
    assert_eq!(export.message, "Dados exportados com sucesso!");
    assert!(export.body.contains("\n  \"assignments\""));
    let parsed: RosterState = serde_json::from_str(&export.body).unwrap();
    assert_eq!(parsed, create_test_state());
}

#[test]
fn test_get_schedule_defaults_to_week_list() {
    let fixture: Fixture = create_fixture();

    let schedule = get_schedule(
        &fixture.session,
        &ScheduleQuery::default(),
        date("2024-01-04"),
    )
    .unwrap();

    assert_eq!(schedule.period, Period::Week);
    assert_eq!(schedule.format, ScheduleFormat::List);
    assert_eq!(schedule.title, "Designações da Semana");
    let dates: Vec<String> = schedule.days.iter().map(|d| d.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-01-03", "2024-01-06"]);
}

#[test]
fn test_get_schedule_month_table_keeps_empty_dates() {
    let fixture: Fixture = create_fixture();
    let query: ScheduleQuery = ScheduleQuery {
        period: Some(String::from("month")),
        date: Some(String::from("2024-01-20")),
        format: Some(String::from("table")),
    };

    let schedule = get_schedule(&fixture.session, &query, date("2030-01-01")).unwrap();

    assert_eq!(schedule.title, "Designações de Janeiro de 2024");
    assert_eq!(schedule.days.len(), 9);
    assert!(schedule.days[2].lines.is_empty());
}

#[test]
fn test_get_schedule_rejects_unknown_period() {
    let fixture: Fixture = create_fixture();
    let query: ScheduleQuery = ScheduleQuery {
        period: Some(String::from("year")),
        ..ScheduleQuery::default()
    };

    let result = get_schedule(&fixture.session, &query, date("2024-01-04"));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "period"
    ));
}

#[test]
fn test_schedule_csv_has_row_per_meeting_date() {
    let fixture: Fixture = create_fixture();
    let query: ScheduleQuery = ScheduleQuery {
        date: Some(String::from("2024-01-08")),
        ..ScheduleQuery::default()
    };

    let export = schedule_csv(&fixture.session, &query, date("2030-01-01")).unwrap();

    assert_eq!(export.file_name, "designacoes_semana_2024-01-08.csv");
    let lines: Vec<&str> = export.body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2024-01-10,Quarta-feira,"));
    assert!(lines[2].starts_with("2024-01-13,Sábado,"));
}
