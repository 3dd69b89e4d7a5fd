use serde::Serialize;
use staff_desk::workflows::staff::{StaffDetailView, StaffRowView, VacancyListingView};

pub(crate) fn json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("unable to render json: {err}"),
    }
}

pub(crate) fn staff_table(rows: &[(StaffRowView, usize)]) {
    if rows.is_empty() {
        println!("No staff found.");
        return;
    }

    println!(
        "{:<6} {:<28} {:<12} {:<18} {:<24} {:<10} {:>9}",
        "ID", "Name", "Code", "Department", "Designation", "Status", "Vacancies"
    );
    for (row, vacancies) in rows {
        println!(
            "{:<6} {:<28} {:<12} {:<18} {:<24} {:<10} {:>9}",
            row.id.to_string(),
            row.name,
            row.code,
            row.department,
            row.designation,
            row.status,
            vacancies
        );
    }
    println!("\n{} staff", rows.len());
}

pub(crate) fn staff_detail(detail: &StaffDetailView, vacancies: &[VacancyListingView]) {
    println!("{}", detail.name);
    for (label, value) in &detail.details {
        println!("  {label:<20} {value}");
    }
    println!("  {:<20} {}", "Address", detail.address);
    println!("  {:<20} {}", "Notes", detail.notes);

    println!("\nVacancies created ({})", vacancies.len());
    if vacancies.is_empty() {
        println!("  No vacancies created by this staff member.");
        return;
    }
    for vacancy in vacancies {
        println!(
            "  - {} [{}] {} | openings {} | match {} | MCQ {} | {}",
            vacancy.job_title,
            vacancy.department,
            vacancy.employment_type,
            vacancy.openings,
            vacancy.match_threshold,
            vacancy.mcq_config,
            vacancy.status
        );
    }
}

pub(crate) fn vacancy_table(listings: &[VacancyListingView]) {
    if listings.is_empty() {
        println!("No vacancies found.");
        return;
    }

    println!(
        "{:<28} {:<16} {:<12} {:>8} {:>7} {:<14} {:<22} {:<8}",
        "Job Title", "Department", "Type", "Openings", "Match", "MCQ", "Created By", "Status"
    );
    for listing in listings {
        println!(
            "{:<28} {:<16} {:<12} {:>8} {:>7} {:<14} {:<22} {:<8}",
            listing.job_title,
            listing.department,
            listing.employment_type,
            listing.openings,
            listing.match_threshold,
            listing.mcq_config,
            listing.created_by,
            listing.status
        );
    }
}
