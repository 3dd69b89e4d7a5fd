use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use staff_desk::config::AppConfig;
use staff_desk::error::AppError;
use staff_desk::telemetry;
use staff_desk::workflows::staff::{
    ConsoleError, ExportFormat, HttpStaffApi, StaffConsole, StaffDetailView, StaffId,
    StaffRowView, VacancyListingView,
};
use tracing::debug;

use crate::render;

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Staff id as reported by `staff list`
    pub(crate) id: i64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FormArgs {
    /// Field assignment, repeatable (e.g. `--set first_name=Asha`)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = crate::infra::parse_assignment)]
    pub(crate) assignments: Vec<(String, String)>,
    /// Login password; required on create, optional on update
    #[arg(long)]
    pub(crate) password: Option<String>,
    /// Must repeat --password exactly
    #[arg(long)]
    pub(crate) confirm_password: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct UpdateArgs {
    /// Staff id to edit
    pub(crate) id: i64,
    #[command(flatten)]
    pub(crate) form: FormArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Staff id whose vacancies are exported
    pub(crate) id: i64,
    /// Output format: xlsx, csv, or pdf
    #[arg(long, default_value = "xlsx", value_parser = crate::infra::parse_format)]
    pub(crate) format: ExportFormat,
    /// Directory for the export file. Defaults to STAFF_EXPORT_DIR.
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
}

struct Session {
    console: StaffConsole<HttpStaffApi>,
    export_dir: PathBuf,
}

async fn open_session() -> Result<Session, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let api = HttpStaffApi::new(&config.api)?;
    debug!(base_url = api.base_url(), "connecting to staff backend");
    let console = StaffConsole::new(Arc::new(api));
    console.load().await?;

    Ok(Session {
        console,
        export_dir: config.export.output_dir,
    })
}

pub(crate) async fn list_staff(args: ListArgs) -> Result<(), AppError> {
    let session = open_session().await?;
    let state = session.console.snapshot();
    let directory = &state.directory;

    let rows: Vec<(StaffRowView, usize)> = directory
        .staff()
        .iter()
        .map(|record| {
            (
                StaffRowView::from(record),
                directory.vacancies_for(record.id).len(),
            )
        })
        .collect();

    if args.json {
        let views: Vec<&StaffRowView> = rows.iter().map(|(row, _)| row).collect();
        render::json(&views);
    } else {
        render::staff_table(&rows);
    }
    Ok(())
}

pub(crate) async fn show_staff(args: ShowArgs) -> Result<(), AppError> {
    let session = open_session().await?;
    let id = StaffId(args.id);
    session.console.toggle_expand(id);

    let state = session.console.snapshot();
    let record = state
        .directory
        .expanded_record()
        .ok_or(ConsoleError::UnknownStaff(id))?;
    let listings: Vec<VacancyListingView> = state
        .directory
        .expanded_vacancies()
        .into_iter()
        .map(VacancyListingView::from)
        .collect();

    render::staff_detail(&StaffDetailView::from(record), &listings);
    Ok(())
}

pub(crate) async fn create_staff(args: FormArgs) -> Result<(), AppError> {
    let session = open_session().await?;
    apply_form(&session.console, args)?;
    submit(&session.console).await
}

pub(crate) async fn update_staff(args: UpdateArgs) -> Result<(), AppError> {
    let session = open_session().await?;
    session.console.start_edit(StaffId(args.id))?;
    apply_form(&session.console, args.form)?;
    submit(&session.console).await
}

pub(crate) async fn export_vacancies(args: ExportArgs) -> Result<(), AppError> {
    let session = open_session().await?;
    let id = StaffId(args.id);
    if session.console.snapshot().directory.record(id).is_none() {
        return Err(ConsoleError::UnknownStaff(id).into());
    }
    session.console.toggle_expand(id);

    let dir = args.out_dir.unwrap_or(session.export_dir);
    std::fs::create_dir_all(&dir)?;
    let path = session.console.export_expanded(args.format, &dir)?;
    println!("Exported vacancies to {}", path.display());
    Ok(())
}

pub(crate) async fn list_vacancies(args: ListArgs) -> Result<(), AppError> {
    let session = open_session().await?;
    let state = session.console.snapshot();
    let listings: Vec<VacancyListingView> = state
        .directory
        .vacancies()
        .iter()
        .map(VacancyListingView::from)
        .collect();

    if args.json {
        render::json(&listings);
    } else {
        render::vacancy_table(&listings);
    }
    Ok(())
}

fn apply_form(console: &StaffConsole<HttpStaffApi>, args: FormArgs) -> Result<(), AppError> {
    for (field, value) in &args.assignments {
        console.set_field(field, value)?;
    }
    if let Some(password) = &args.password {
        console.set_field("login_password", password)?;
    }
    if let Some(confirmation) = args.confirm_password {
        console.set_confirmation(confirmation)?;
    }
    Ok(())
}

async fn submit(console: &StaffConsole<HttpStaffApi>) -> Result<(), AppError> {
    let record = console.submit().await?;
    if let Some(notice) = console.notice() {
        println!("{}", notice.message());
    }
    println!(
        "  id: {}  code: {}  name: {}",
        record.id,
        record.employee_code(),
        record.full_name()
    );
    Ok(())
}
