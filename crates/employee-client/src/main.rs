//! Terminal front end for the employee records API.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use employee_client::{
    ClientSettings, EmployeeDirectory, EmployeeManagementView, HttpEmployeeGateway, format_salary,
};

type View = EmployeeManagementView<HttpEmployeeGateway>;

#[derive(Debug, Parser)]
#[command(name = "employee-cli", about = "Manage employee records")]
struct Cli {
    /// Employee collection URL; overrides `EMPLOYEES_CLIENT_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show employees as a table followed by the summary.
    List {
        /// Case-insensitive filter on name or department.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show only the summary statistics.
    Summary,
    /// Add an employee.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        salary: String,
    },
    /// Replace an employee's fields; omitted flags keep the current value.
    Edit {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        salary: Option<String>,
    },
    /// Delete an employee after confirmation.
    Delete {
        id: i32,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn emit(message: &str) -> Result<()> {
    writeln!(io::stdout().lock(), "{message}")?;
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn run(view: &mut View, command: Command) -> Result<()> {
    match command {
        Command::List { search } => {
            if let Some(query) = search {
                view.set_search(query);
            }
            emit(&view.render())?;
        }
        Command::Summary => {
            let summary = view.summary();
            emit(&format!("Total employees: {}", summary.total_employees))?;
            emit(&format!("Total salary: {}", format_salary(summary.total_salary)))?;
            emit(&format!("Departments: {}", summary.departments))?;
        }
        Command::Add {
            name,
            department,
            salary,
        } => {
            view.open_add();
            if let Some(form) = view.form_mut() {
                form.name = name;
                form.department = department;
                form.salary = salary;
            }
            let created = view.submit().await?;
            emit(&format!("Added employee {} ({})", created.id, created.name))?;
        }
        Command::Edit {
            id,
            name,
            department,
            salary,
        } => {
            view.open_edit(id)?;
            if let Some(form) = view.form_mut() {
                if let Some(new_name) = name {
                    form.name = new_name;
                }
                if let Some(new_department) = department {
                    form.department = new_department;
                }
                if let Some(new_salary) = salary {
                    form.salary = new_salary;
                }
            }
            let updated = view.submit().await?;
            emit(&format!("Updated employee {} ({})", updated.id, updated.name))?;
        }
        Command::Delete { id, yes } => {
            view.request_delete(id)?;
            let prompt = view
                .confirmation_prompt()
                .ok_or_else(|| eyre!("delete confirmation did not open"))?;
            if !yes && !confirm(&prompt)? {
                view.cancel();
                emit("Cancelled")?;
                return Ok(());
            }
            view.confirm_delete().await?;
            emit(&format!("Deleted employee {id}"))?;
        }
    }
    if view.is_stale() {
        warn!("change saved but the employee list could not be reloaded");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([std::ffi::OsString::from("employee-cli")])
        .map_err(|err| eyre!("load client settings: {err}"))?;
    let api_url = cli
        .api_url
        .unwrap_or_else(|| settings.api_url().to_owned());

    let gateway = HttpEmployeeGateway::new(api_url.as_str());
    let mut view = EmployeeManagementView::new(EmployeeDirectory::new(gateway));
    if let Err(err) = view.load().await {
        bail!("could not load employees from {api_url}: {err}");
    }
    run(&mut view, cli.command)
        .await
        .wrap_err("employee command failed")
}
