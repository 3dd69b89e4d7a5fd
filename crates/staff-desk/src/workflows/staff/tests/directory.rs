use super::common::*;
use crate::workflows::staff::directory::StaffDirectory;
use crate::workflows::staff::domain::{StaffId, VacancyId};

fn loaded() -> StaffDirectory {
    let mut directory = StaffDirectory::new();
    let ticket = directory.begin_load();
    assert!(directory.complete_load(
        ticket,
        vec![staff_record(1, "EMP-001"), staff_record(2, "EMP-002")],
        vec![
            vacancy(10, "Backend Engineer", 82.6, Some(1)),
            vacancy(11, "Recruiter", 70.0, Some(2)),
            vacancy(12, "Data Analyst", 64.5, Some(1)),
            vacancy(13, "Orphaned", 50.0, None),
        ],
    ));
    directory
}

#[test]
fn vacancies_are_filtered_by_creator_in_source_order() {
    let directory = loaded();
    let ids: Vec<VacancyId> = directory
        .vacancies_for(StaffId(1))
        .into_iter()
        .map(|vacancy| vacancy.id)
        .collect();
    assert_eq!(ids, vec![VacancyId(10), VacancyId(12)]);
    assert!(directory.vacancies_for(StaffId(99)).is_empty());
}

#[test]
fn toggling_switches_and_collapses_the_single_expanded_row() {
    let mut directory = loaded();
    assert_eq!(directory.toggle_expand(StaffId(1)), Some(StaffId(1)));
    assert_eq!(directory.toggle_expand(StaffId(2)), Some(StaffId(2)));
    assert_eq!(directory.expanded_vacancies().len(), 1);
    assert_eq!(directory.toggle_expand(StaffId(2)), None);
    assert!(directory.expanded_record().is_none());
    assert!(directory.expanded_vacancies().is_empty());
}

#[test]
fn stale_load_results_are_discarded() {
    let mut directory = loaded();
    let first = directory.begin_load();
    let second = directory.begin_load();

    assert!(!directory.complete_load(first, Vec::new(), Vec::new()));
    assert_eq!(directory.staff().len(), 2);
    assert!(directory.is_loading());

    assert!(directory.complete_load(second, vec![staff_record(5, "EMP-005")], Vec::new()));
    assert_eq!(directory.staff().len(), 1);
    assert!(!directory.is_loading());
}

#[test]
fn failed_load_keeps_previous_lists() {
    let mut directory = loaded();
    let ticket = directory.begin_load();
    assert!(directory.fail_load(ticket));
    assert_eq!(directory.staff().len(), 2);
    assert_eq!(directory.vacancies().len(), 4);
    assert!(!directory.is_loading());
}

#[test]
fn expanded_row_survives_reload_when_staff_is_still_present() {
    let mut directory = loaded();
    directory.toggle_expand(StaffId(1));
    let ticket = directory.begin_load();
    directory.complete_load(ticket, vec![staff_record(1, "EMP-001")], Vec::new());

    assert_eq!(directory.expanded(), Some(StaffId(1)));
    assert!(directory.expanded_record().is_some());
    assert!(directory.expanded_vacancies().is_empty());
}
