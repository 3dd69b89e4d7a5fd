use crate::commands::{self, ExportArgs, FormArgs, ListArgs, ShowArgs, UpdateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use staff_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Staff Desk",
    about = "Manage company staff accounts and export the vacancies they own",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the in-memory sandbox backend (default command)
    Serve(ServeArgs),
    /// List, inspect, create, update, and export staff members
    Staff {
        #[command(subcommand)]
        command: StaffCommand,
    },
    /// Inspect the company-wide vacancy listing
    Vacancies {
        #[command(subcommand)]
        command: VacancyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum StaffCommand {
    /// Print the staff directory
    List(ListArgs),
    /// Print one staff member with the vacancies they created
    Show(ShowArgs),
    /// Create a staff account
    Create(FormArgs),
    /// Update an existing staff account
    Update(UpdateArgs),
    /// Export a staff member's vacancies as xlsx, csv, or pdf
    Export(ExportArgs),
}

#[derive(Subcommand, Debug)]
enum VacancyCommand {
    /// Print every vacancy with its match and MCQ configuration
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the sandbox backend
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the sandbox backend
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the sandbox with demo staff and vacancies
    #[arg(long)]
    pub(crate) seed_demo: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Staff { command } => match command {
            StaffCommand::List(args) => commands::list_staff(args).await,
            StaffCommand::Show(args) => commands::show_staff(args).await,
            StaffCommand::Create(args) => commands::create_staff(args).await,
            StaffCommand::Update(args) => commands::update_staff(args).await,
            StaffCommand::Export(args) => commands::export_vacancies(args).await,
        },
        Command::Vacancies {
            command: VacancyCommand::List(args),
        } => commands::list_vacancies(args).await,
    }
}
