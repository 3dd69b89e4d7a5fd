use staff_desk::error::AppError;
use staff_desk::workflows::staff::api::ApiError;
use staff_desk::workflows::staff::{
    EmploymentType, ExportFormat, LoginPassword, SandboxBackend, StaffFormPayload, StaffId,
    StaffStatus, VacancyId, VacancyRecord,
};

pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

pub(crate) fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse()
}

struct DemoStaff {
    first_name: &'static str,
    last_name: &'static str,
    code: &'static str,
    department: &'static str,
    designation: &'static str,
    employment_type: EmploymentType,
    status: StaffStatus,
}

const DEMO_STAFF: [DemoStaff; 3] = [
    DemoStaff {
        first_name: "Asha",
        last_name: "Verma",
        code: "HR-001",
        department: "People",
        designation: "Talent Partner",
        employment_type: EmploymentType::FullTime,
        status: StaffStatus::Active,
    },
    DemoStaff {
        first_name: "Daniel",
        last_name: "Okafor",
        code: "ENG-014",
        department: "Engineering",
        designation: "Engineering Manager",
        employment_type: EmploymentType::FullTime,
        status: StaffStatus::Active,
    },
    DemoStaff {
        first_name: "Mei",
        last_name: "Tanaka",
        code: "OPS-203",
        department: "Operations",
        designation: "Recruiting Coordinator",
        employment_type: EmploymentType::Contract,
        status: StaffStatus::OnLeave,
    },
];

fn demo_payload(staff: &DemoStaff) -> StaffFormPayload {
    let handle = staff.first_name.to_ascii_lowercase();
    StaffFormPayload {
        first_name: staff.first_name.to_string(),
        last_name: staff.last_name.to_string(),
        email: format!("{handle}@example.com"),
        phone: "+1 555 0100".to_string(),
        employee_code: staff.code.to_string(),
        department: staff.department.to_string(),
        designation: staff.designation.to_string(),
        employment_type: staff.employment_type,
        date_of_joining: "2023-06-01".to_string(),
        experience_years: 5.0,
        salary: 85_000.0,
        address_line1: "100 Market Street".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        country: "USA".to_string(),
        emergency_contact_name: format!("{} Family", staff.last_name),
        emergency_contact_phone: "+1 555 0199".to_string(),
        status: staff.status,
        login_password: LoginPassword::new(format!("{handle}-demo")),
        ..StaffFormPayload::default()
    }
}

fn demo_vacancy(
    id: i64,
    title: &str,
    department: &str,
    owner: (StaffId, &str),
    match_threshold: f64,
    mcq: (u32, f64),
) -> VacancyRecord {
    VacancyRecord {
        id: VacancyId(id),
        job_title: title.to_string(),
        department: department.to_string(),
        employment_type: EmploymentType::FullTime.as_str().to_string(),
        openings: 2,
        match_threshold,
        mcq_question_count: mcq.0,
        mcq_pass_threshold: mcq.1,
        status: "open".to_string(),
        created_by_staff_id: Some(owner.0),
        created_by_name: Some(owner.1.to_string()),
    }
}

/// Populate the sandbox with a few staff members and the vacancies they own.
pub(crate) fn seed_demo(backend: &SandboxBackend) -> Result<(), AppError> {
    let mut created = Vec::with_capacity(DEMO_STAFF.len());
    for staff in &DEMO_STAFF {
        let record = backend
            .create(&demo_payload(staff))
            .map_err(ApiError::from)?;
        created.push((record.id, record.full_name()));
    }

    let [(hr, hr_name), (eng, eng_name), _] = &created[..] else {
        return Ok(());
    };
    for vacancy in [
        demo_vacancy(
            1,
            "Senior Backend Engineer",
            "Engineering",
            (*eng, eng_name.as_str()),
            82.6,
            (20, 70.0),
        ),
        demo_vacancy(
            2,
            "Site Reliability Engineer",
            "Engineering",
            (*eng, eng_name.as_str()),
            75.0,
            (15, 65.5),
        ),
        demo_vacancy(
            3,
            "People Operations Lead",
            "People",
            (*hr, hr_name.as_str()),
            68.4,
            (10, 60.0),
        ),
    ] {
        backend.add_vacancy(vacancy);
    }
    Ok(())
}
