use serde::Serialize;

use super::super::domain::VacancyRecord;

/// Column keys of the spreadsheet export, in order.
pub const SPREADSHEET_COLUMNS: [&str; 8] = [
    "JobTitle",
    "Department",
    "Type",
    "Openings",
    "MatchThreshold",
    "McqQuestions",
    "McqPassThreshold",
    "Status",
];

/// Column headers of the document export, in order.
pub const DOCUMENT_HEADERS: [&str; 8] = [
    "Job Title",
    "Department",
    "Type",
    "Openings",
    "Match %",
    "MCQ Qs",
    "MCQ Pass %",
    "Status",
];

/// One spreadsheet row. Numbers stay numbers and are not rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VacancyExportRow {
    pub job_title: String,
    pub department: String,
    #[serde(rename = "Type")]
    pub employment_type: String,
    pub openings: u32,
    pub match_threshold: f64,
    pub mcq_questions: u32,
    pub mcq_pass_threshold: f64,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportCell<'a> {
    Text(&'a str),
    Number(f64),
}

impl VacancyExportRow {
    /// Cells paired with their [`SPREADSHEET_COLUMNS`] key.
    pub fn cells(&self) -> [(&'static str, ExportCell<'_>); 8] {
        let [job_title, department, kind, openings, match_threshold, mcq_questions, mcq_pass, status] =
            SPREADSHEET_COLUMNS;
        [
            (job_title, ExportCell::Text(&self.job_title)),
            (department, ExportCell::Text(&self.department)),
            (kind, ExportCell::Text(&self.employment_type)),
            (openings, ExportCell::Number(f64::from(self.openings))),
            (match_threshold, ExportCell::Number(self.match_threshold)),
            (mcq_questions, ExportCell::Number(f64::from(self.mcq_questions))),
            (mcq_pass, ExportCell::Number(self.mcq_pass_threshold)),
            (status, ExportCell::Text(&self.status)),
        ]
    }
}

impl From<&VacancyRecord> for VacancyExportRow {
    fn from(vacancy: &VacancyRecord) -> Self {
        Self {
            job_title: vacancy.job_title.clone(),
            department: vacancy.department.clone(),
            employment_type: vacancy.employment_type.clone(),
            openings: vacancy.openings,
            match_threshold: vacancy.match_threshold,
            mcq_questions: vacancy.mcq_question_count,
            mcq_pass_threshold: vacancy.mcq_pass_threshold,
            status: vacancy.status.clone(),
        }
    }
}

pub fn to_spreadsheet_rows<'a, I>(records: I) -> Vec<VacancyExportRow>
where
    I: IntoIterator<Item = &'a VacancyRecord>,
{
    records.into_iter().map(VacancyExportRow::from).collect()
}

/// Header row plus formatted body cells for the paginated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTable {
    pub headers: Vec<String>,
    pub body: Vec<Vec<String>>,
}

pub fn to_document_table<'a, I>(records: I) -> DocumentTable
where
    I: IntoIterator<Item = &'a VacancyRecord>,
{
    let body = records
        .into_iter()
        .map(|vacancy| {
            vec![
                vacancy.job_title.clone(),
                vacancy.department.clone(),
                vacancy.employment_type.clone(),
                vacancy.openings.to_string(),
                format_percentage(vacancy.match_threshold),
                vacancy.mcq_question_count.to_string(),
                format_percentage(vacancy.mcq_pass_threshold),
                vacancy.status.clone(),
            ]
        })
        .collect();

    DocumentTable {
        headers: DOCUMENT_HEADERS.iter().map(|header| header.to_string()).collect(),
        body,
    }
}

/// Whole-number percentage for display, halves rounded away from zero.
pub fn format_percentage(value: f64) -> String {
    format!("{:.0}%", value.round())
}
