use staff_desk::workflows::staff::export::{DOCUMENT_HEADERS, SHEET_NAME};
use staff_desk::workflows::staff::{
    EmploymentType, ExportFormat, StaffId, StaffRecord, StaffStatus, VacancyExport, VacancyId,
    VacancyRecord,
};

fn owner() -> StaffRecord {
    StaffRecord {
        id: StaffId(7),
        first_name: Some("Tomas".to_string()),
        last_name: Some("Lindqvist".to_string()),
        email: Some("tomas@example.com".to_string()),
        phone: None,
        alternate_phone: None,
        gender: None,
        date_of_birth: None,
        employee_code: Some("ENG-007".to_string()),
        department: Some("Engineering".to_string()),
        designation: Some("Engineering Manager".to_string()),
        employment_type: Some(EmploymentType::FullTime),
        date_of_joining: Some("2021-02-01".to_string()),
        experience_years: Some(12.0),
        salary: None,
        address_line1: None,
        address_line2: None,
        city: None,
        state: None,
        postal_code: None,
        country: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        status: Some(StaffStatus::Active),
        notes: None,
        created_at: None,
    }
}

fn vacancies(count: usize) -> Vec<VacancyRecord> {
    (0..count)
        .map(|index| VacancyRecord {
            id: VacancyId(index as i64 + 1),
            job_title: format!("Platform Engineer {index}"),
            department: "Engineering".to_string(),
            employment_type: "contract".to_string(),
            openings: 1,
            match_threshold: 82.6,
            mcq_question_count: 25,
            mcq_pass_threshold: 72.5,
            status: "open".to_string(),
            created_by_staff_id: Some(StaffId(7)),
            created_by_name: Some("Tomas Lindqvist".to_string()),
        })
        .collect()
}

#[test]
fn export_naming_follows_employee_code_and_name() {
    let staff = owner();
    let rows = vacancies(1);
    let export = VacancyExport::new(&staff, rows.iter().collect());

    assert_eq!(export.file_stem(), "ENG-007-vacancies");
    assert_eq!(export.title(), "Tomas Lindqvist - Vacancies");
    assert_eq!(SHEET_NAME, "Vacancies");
}

#[test]
fn document_rounds_percentages_while_spreadsheet_keeps_raw_values() {
    let staff = owner();
    let rows = vacancies(1);
    let export = VacancyExport::new(&staff, rows.iter().collect());

    let table = export.document_table();
    assert_eq!(table.headers, DOCUMENT_HEADERS.map(str::to_string).to_vec());
    assert_eq!(table.body[0][4], "83%");
    assert_eq!(table.body[0][6], "73%");

    let sheet = export.spreadsheet_rows();
    assert_eq!(sheet[0].match_threshold, 82.6);
    assert_eq!(sheet[0].mcq_pass_threshold, 72.5);
}

#[test]
fn every_format_writes_a_file() {
    let staff = owner();
    let rows = vacancies(40);
    let export = VacancyExport::new(&staff, rows.iter().collect());
    let dir = tempfile::tempdir().expect("temp dir");

    for format in [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Pdf] {
        let path = export.write(format, dir.path()).expect("export written");
        assert!(path.ends_with(format!("ENG-007-vacancies.{}", format.extension())));
        let size = std::fs::metadata(&path).expect("file exists").len();
        assert!(size > 0, "{format} export should not be empty");
    }
}

#[test]
fn empty_subset_is_refused() {
    let staff = owner();
    let export = VacancyExport::new(&staff, Vec::new());
    let dir = tempfile::tempdir().expect("temp dir");

    assert!(export.write(ExportFormat::Csv, dir.path()).is_err());
    assert_eq!(std::fs::read_dir(dir.path()).expect("readable").count(), 0);
}

#[test]
fn format_names_parse_case_insensitively() {
    assert_eq!("XLSX".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
    assert_eq!("excel".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
    assert_eq!("pdf".parse::<ExportFormat>(), Ok(ExportFormat::Pdf));
    assert!("docx".parse::<ExportFormat>().is_err());
}
