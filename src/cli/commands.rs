use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::PathBuf;
use anyhow::{Context, Result};
use crate::api::{ApiError, PortalClient, ViewScope};
use crate::config::{Config, Session};
use crate::cli::abbrev;
use crate::cli::commands_auth::{handle_login, handle_logout, handle_register, handle_resend_otp, handle_verify};
use crate::cli::commands_status::{handle_card, handle_preview, handle_status};
use crate::cli::error::{user_error, validate_id};
use crate::cli::output::{format_applications_table, format_job_detail, format_jobs_table, format_profile, get_terminal_width, is_tty};
use crate::cli::parser::{parse_profile_fields, parse_profile_step};
use crate::utils::date::today;

#[derive(Parser)]
#[command(name = "rekrut")]
#[command(about = "Recruitment portal client - job listings, applications, and stage tracking")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and save the session
    Login {
        /// Account email
        email: String,
        /// Password (prompted when omitted; the prompt echoes what you type)
        #[arg(long)]
        password: Option<String>,
    },
    /// Remove the saved session
    Logout,
    /// Create an account; a verification code is sent by email
    Register {
        /// Account email
        email: String,
        /// Full name
        #[arg(long)]
        name: String,
        /// Password (prompted when omitted; the prompt echoes what you type)
        #[arg(long)]
        password: Option<String>,
    },
    /// Verify an account with the emailed one-time code
    Verify {
        /// Account email
        email: String,
        /// One-time code
        otp: String,
    },
    /// Send a new one-time code
    ResendOtp {
        /// Account email
        email: String,
    },
    /// Job postings
    Jobs {
        #[command(subcommand)]
        subcommand: JobsCommands,
    },
    /// Apply for a job posting
    Apply {
        /// Job posting ID
        job_id: String,
        /// Document to upload (repeatable)
        #[arg(short = 'd', long = "document", required = true)]
        documents: Vec<PathBuf>,
    },
    /// Application history
    Applications {
        #[command(subcommand)]
        subcommand: ApplicationsCommands,
    },
    /// Show the selection stages of an application
    Status {
        /// Application ID
        application_id: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Download the participant card as PDF
    Card {
        /// Application ID
        application_id: String,
        /// Output file (default: kartu-peserta-<id>.pdf)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Applicant profile
    Profile {
        #[command(subcommand)]
        subcommand: ProfileCommands,
    },
    /// Show how a stage list from a JSON file would be displayed
    Preview {
        /// File containing the stages payload
        file: PathBuf,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum JobsCommands {
    /// List open job postings
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show one job posting
    Show {
        /// Job posting ID
        id: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ApplicationsCommands {
    /// List submitted applications
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Update one profile step (personal, address, education, experience)
    Update {
        /// Profile step
        step: String,
        /// Fields as field=value (field= clears a value)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        fields: Vec<String>,
    },
}

/// One command invocation's connection to the portal
///
/// Requests run on a single-threaded runtime owned by the view and are
/// cancelled when the view is dropped or the user presses Ctrl-C.
pub struct View {
    pub client: PortalClient,
    pub session: Option<Session>,
    scope: ViewScope,
    runtime: tokio::runtime::Runtime,
}

impl View {
    pub fn open() -> Result<Self> {
        let config = Config::load()?;
        let session = Session::load()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        let scope = ViewScope::new();
        {
            let _guard = runtime.enter();
            scope.cancel_on_interrupt();
        }
        let client = PortalClient::new(&config, session.as_ref(), scope.token())?;
        Ok(View { client, session, scope, runtime })
    }

    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    pub fn session_name(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.display_name.as_deref())
    }

    pub fn is_cancelled(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Exit with a user error when no session is saved
    pub fn require_session(&self) {
        if self.session.is_none() {
            user_error("Not logged in. Run 'rekrut login <email>' first.");
        }
    }
}

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    // `rekrut 42` is short for `rekrut status 42`
    if args.len() == 1 && args[0].chars().all(|c| c.is_ascii_digit()) {
        args.insert(0, "status".to_string());
    }

    let clap_args = std::iter::once("rekrut".to_string())
        .chain(args)
        .collect::<Vec<_>>();
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                e.print()?;
                return Ok(());
            }
            _ => e.exit(),
        },
    };

    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => handle_login(email, password),
        Commands::Logout => handle_logout(),
        Commands::Register { email, name, password } => handle_register(email, name, password),
        Commands::Verify { email, otp } => handle_verify(email, otp),
        Commands::ResendOtp { email } => handle_resend_otp(email),
        Commands::Jobs { subcommand } => match subcommand {
            JobsCommands::List { json } => handle_jobs_list(json),
            JobsCommands::Show { id, json } => handle_jobs_show(id, json),
        },
        Commands::Apply { job_id, documents } => handle_apply(job_id, documents),
        Commands::Applications { subcommand } => match subcommand {
            ApplicationsCommands::List { json } => handle_applications_list(json),
        },
        Commands::Status { application_id, json } => handle_status(application_id, json),
        Commands::Card { application_id, out } => handle_card(application_id, out),
        Commands::Profile { subcommand } => match subcommand {
            ProfileCommands::Show { json } => handle_profile_show(json),
            ProfileCommands::Update { step, fields } => handle_profile_update(step, fields),
        },
        Commands::Preview { file, json } => handle_preview(file, json),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_jobs_list(json: bool) -> Result<()> {
    let view = View::open()?;
    let jobs = view.block_on(view.client.jobs())?;
    if json {
        return print_json(&jobs);
    }
    print!("{}", format_jobs_table(&jobs, &today(), get_terminal_width()));
    Ok(())
}

fn handle_jobs_show(id: String, json: bool) -> Result<()> {
    if let Err(e) = validate_id(&id, "Job") {
        user_error(&e);
    }
    let view = View::open()?;
    let job = match view.block_on(view.client.job(&id)) {
        Ok(job) => job,
        Err(ApiError::NotFound) => user_error(&format!("Job posting {} not found", id)),
        Err(e) => return Err(e.into()),
    };
    if json {
        return print_json(&job);
    }
    print!("{}", format_job_detail(&job, &today(), is_tty()));
    Ok(())
}

fn handle_apply(job_id: String, documents: Vec<PathBuf>) -> Result<()> {
    if let Err(e) = validate_id(&job_id, "Job") {
        user_error(&e);
    }
    for doc in &documents {
        if !doc.is_file() {
            user_error(&format!("Document not found: {}", doc.display()));
        }
    }

    let view = View::open()?;
    view.require_session();
    let paths: Vec<&std::path::Path> = documents.iter().map(PathBuf::as_path).collect();
    let submitted = match view.block_on(view.client.apply(&job_id, &paths)) {
        Ok(s) => s,
        Err(ApiError::NotFound) => user_error(&format!("Job posting {} not found", job_id)),
        Err(e) => return Err(e.into()),
    };
    log::info!("Uploaded {} document(s) for job {}", paths.len(), job_id);
    println!("Submitted application {} for job {}", submitted.id, job_id);
    if let Some(message) = submitted.message {
        println!("{}", message);
    }
    Ok(())
}

fn handle_applications_list(json: bool) -> Result<()> {
    let view = View::open()?;
    view.require_session();
    let apps = view.block_on(view.client.applications())?;
    if json {
        return print_json(&apps);
    }
    print!("{}", format_applications_table(&apps, get_terminal_width()));
    Ok(())
}

fn handle_profile_show(json: bool) -> Result<()> {
    let view = View::open()?;
    view.require_session();
    let profile = view.block_on(view.client.profile())?;
    if json {
        return print_json(&profile);
    }
    print!("{}", format_profile(&profile, is_tty()));
    Ok(())
}

fn handle_profile_update(step: String, fields: Vec<String>) -> Result<()> {
    let step = parse_profile_step(&step).unwrap_or_else(|e| user_error(&e.to_string()));
    let fields = parse_profile_fields(step, &fields).unwrap_or_else(|e| user_error(&e.to_string()));

    let view = View::open()?;
    view.require_session();
    let message = view.block_on(view.client.update_profile(step, &fields))?;
    println!(
        "Updated {} ({} field{})",
        step.as_str(),
        fields.len(),
        if fields.len() == 1 { "" } else { "s" }
    );
    if let Some(message) = message {
        println!("{}", message);
    }
    Ok(())
}
