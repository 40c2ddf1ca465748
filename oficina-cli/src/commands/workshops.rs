//! `oficina workshops list|show|create|update|delete`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use oficina_client::WorkshopApi;
use oficina_core::types::{Workshop, WorkshopId};
use oficina_core::validation::{self, WorkshopForm};

use super::super::EventTypeArg;
use super::{confirm, connect, print_json};

/// Manage workshops on the service.
#[derive(Subcommand, Debug)]
pub enum WorkshopsCommand {
    /// List every workshop with its enrollment.
    List(ListArgs),

    /// Show one workshop and its roster.
    Show(ShowArgs),

    /// Create a workshop with an empty roster.
    Create(CreateArgs),

    /// Change workshop details; omitted flags keep their current value.
    Update(UpdateArgs),

    /// Delete a workshop.
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Workshop id.
    pub id: i64,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Date as YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// Duration in hours.
    #[arg(long, default_value_t = 1)]
    pub duration: i64,

    /// Maximum number of participants.
    #[arg(long = "max")]
    pub max_participants: i64,

    /// presencial | online. Defaults to presencial.
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub event_type: Option<EventTypeArg>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Workshop id.
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Date as YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<String>,

    /// Duration in hours.
    #[arg(long)]
    pub duration: Option<i64>,

    /// Maximum number of participants.
    #[arg(long = "max")]
    pub max_participants: Option<i64>,

    /// presencial | online.
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub event_type: Option<EventTypeArg>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Workshop id.
    pub id: i64,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: WorkshopsCommand, api_url: Option<&str>) -> Result<()> {
    let api = connect(api_url)?;
    match cmd {
        WorkshopsCommand::List(args) => list(&api, args),
        WorkshopsCommand::Show(args) => show(&api, args),
        WorkshopsCommand::Create(args) => create(&api, args),
        WorkshopsCommand::Update(args) => update(&api, args),
        WorkshopsCommand::Delete(args) => delete(&api, args),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn list(api: &dyn WorkshopApi, args: ListArgs) -> Result<()> {
    let workshops = api.list_workshops().context("failed to list workshops")?;

    if args.json {
        return print_json(&workshops);
    }
    if workshops.is_empty() {
        println!("No workshops found.");
        println!("Run: oficina workshops create --title <title> --date <YYYY-MM-DD> --max <n>");
        return Ok(());
    }

    let rows: Vec<WorkshopRow> = workshops.iter().map(WorkshopRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn show(api: &dyn WorkshopApi, args: ShowArgs) -> Result<()> {
    let workshop = fetch(api, args.id)?;

    if args.json {
        return print_json(&workshop);
    }

    println!("{} {}", format!("#{}", workshop.id).bold(), workshop.title.bold());
    if let Some(description) = &workshop.description {
        println!("  {description}");
    }
    println!("  date:     {}", workshop.date);
    println!("  duration: {}h", workshop.duration_hours);
    println!("  type:     {}", workshop.event_type);
    println!(
        "  enrolled: {}",
        enrollment(workshop.participants.len(), workshop.max_participants)
    );
    for p in &workshop.participants {
        println!("    - {} {}", p.ra, p.name);
    }
    Ok(())
}

fn create(api: &dyn WorkshopApi, args: CreateArgs) -> Result<()> {
    let form = WorkshopForm {
        title: args.title,
        description: args.description,
        date: Some(args.date),
        duration_hours: Some(args.duration),
        max_participants: Some(args.max_participants),
        event_type: args.event_type.unwrap_or_default().into(),
    };
    let draft = validation::workshop(&form)?;
    let created = api
        .create_workshop(&draft)
        .with_context(|| format!("failed to create workshop '{}'", draft.title))?;

    println!("✓ Created workshop #{} '{}'", created.id, created.title);
    Ok(())
}

fn update(api: &dyn WorkshopApi, args: UpdateArgs) -> Result<()> {
    let current = fetch(api, args.id)?;

    let mut form = WorkshopForm::from(&current);
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(description) = args.description {
        form.description = Some(description);
    }
    if let Some(date) = args.date {
        form.date = Some(date);
    }
    if let Some(duration) = args.duration {
        form.duration_hours = Some(duration);
    }
    if let Some(max) = args.max_participants {
        form.max_participants = Some(max);
    }
    if let Some(event_type) = args.event_type {
        form.event_type = event_type.into();
    }

    let updated = validation::workshop(&form)?.into_workshop(current.id, current.participants);
    if updated.participants.len() > updated.max_participants as usize {
        tracing::warn!(
            workshop = %updated.id,
            enrolled = updated.participants.len(),
            max = updated.max_participants,
            "new limit is below current enrollment"
        );
    }
    api.update_workshop(&updated)
        .with_context(|| format!("failed to update workshop #{}", updated.id))?;

    println!("✓ Updated workshop #{} '{}'", updated.id, updated.title);
    Ok(())
}

fn delete(api: &dyn WorkshopApi, args: DeleteArgs) -> Result<()> {
    let workshop = fetch(api, args.id)?;

    if !args.yes && !confirm(&format!("Delete workshop #{} '{}'?", workshop.id, workshop.title))? {
        println!("Aborted.");
        return Ok(());
    }

    api.delete_workshop(workshop.id)
        .with_context(|| format!("failed to delete workshop #{}", workshop.id))?;
    println!("✓ Deleted workshop #{} '{}'", workshop.id, workshop.title);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn fetch(api: &dyn WorkshopApi, id: i64) -> Result<Workshop> {
    api.get_workshop(WorkshopId(id))
        .with_context(|| format!("failed to load workshop #{id}"))
}

/// `n/max`, red once the workshop is full.
pub(crate) fn enrollment(enrolled: usize, max: u32) -> String {
    let text = format!("{enrolled}/{max}");
    if enrolled >= max as usize {
        text.red().to_string()
    } else {
        text
    }
}

#[derive(Tabled)]
struct WorkshopRow {
    #[tabled(rename = "id")]
    id: i64,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "date")]
    date: String,
    #[tabled(rename = "hours")]
    hours: u32,
    #[tabled(rename = "type")]
    event_type: String,
    #[tabled(rename = "enrolled")]
    enrolled: String,
}

impl From<&Workshop> for WorkshopRow {
    fn from(w: &Workshop) -> Self {
        Self {
            id: w.id.0,
            title: w.title.clone(),
            date: w.date.to_string(),
            hours: w.duration_hours,
            event_type: w.event_type.to_string(),
            enrolled: enrollment(w.participants.len(), w.max_participants),
        }
    }
}
