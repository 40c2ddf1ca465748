//! `oficina participants list|register|update|delete`

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use oficina_client::WorkshopApi;
use oficina_core::types::{Participant, Ra};
use oficina_core::validation;

use super::{confirm, connect, print_json};

/// Manage the participant catalog.
#[derive(Subcommand, Debug)]
pub enum ParticipantsCommand {
    /// List every registered participant.
    List(ListArgs),

    /// Register a new participant.
    Register(RegisterArgs),

    /// Rename a participant.
    Update(UpdateArgs),

    /// Delete a participant.
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Academic registration (RA).
    #[arg(long)]
    pub ra: String,

    /// Full name.
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// RA of the participant to rename.
    pub ra: String,

    /// New full name.
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// RA of the participant to delete.
    pub ra: String,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: ParticipantsCommand, api_url: Option<&str>) -> Result<()> {
    let api = connect(api_url)?;
    match cmd {
        ParticipantsCommand::List(args) => list(&api, args),
        ParticipantsCommand::Register(args) => register(&api, args),
        ParticipantsCommand::Update(args) => update(&api, args),
        ParticipantsCommand::Delete(args) => delete(&api, args),
    }
}

fn list(api: &dyn WorkshopApi, args: ListArgs) -> Result<()> {
    let participants = catalog(api)?;

    if args.json {
        return print_json(&participants);
    }
    if participants.is_empty() {
        println!("No participants registered.");
        println!("Run: oficina participants register --ra <RA> --name <name>");
        return Ok(());
    }

    let rows: Vec<ParticipantRow> = participants
        .iter()
        .map(|p| ParticipantRow {
            ra: p.ra.to_string(),
            name: p.name.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn register(api: &dyn WorkshopApi, args: RegisterArgs) -> Result<()> {
    let existing = catalog(api)?;
    let participant = validation::participant(&args.ra, &args.name, &existing)?;

    let created = api
        .create_participant(&participant)
        .with_context(|| format!("failed to register participant {}", participant.ra))?;
    println!("✓ Registered {} ({})", created.name, created.ra);
    Ok(())
}

fn update(api: &dyn WorkshopApi, args: UpdateArgs) -> Result<()> {
    let existing = catalog(api)?;
    let current = find(&existing, &args.ra)?;

    let others: Vec<Participant> = existing
        .iter()
        .filter(|p| p.ra != current.ra)
        .cloned()
        .collect();
    let renamed = validation::participant(current.ra.as_str(), &args.name, &others)?;

    api.update_participant(&renamed)
        .with_context(|| format!("failed to update participant {}", renamed.ra))?;
    println!("✓ Updated {} ({})", renamed.name, renamed.ra);
    Ok(())
}

fn delete(api: &dyn WorkshopApi, args: DeleteArgs) -> Result<()> {
    let existing = catalog(api)?;
    let participant = find(&existing, &args.ra)?;

    if !args.yes && !confirm(&format!("Delete {} ({})?", participant.name, participant.ra))? {
        println!("Aborted.");
        return Ok(());
    }

    api.delete_participant(&participant.ra)
        .with_context(|| format!("failed to delete participant {}", participant.ra))?;
    println!("✓ Deleted {} ({})", participant.name, participant.ra);
    Ok(())
}

fn catalog(api: &dyn WorkshopApi) -> Result<Vec<Participant>> {
    api.list_participants().context("failed to list participants")
}

fn find<'a>(catalog: &'a [Participant], ra: &str) -> Result<&'a Participant> {
    let ra = Ra::from(ra.trim());
    catalog
        .iter()
        .find(|p| p.ra == ra)
        .ok_or_else(|| anyhow!("no participant with RA '{ra}'"))
}

#[derive(Tabled)]
struct ParticipantRow {
    #[tabled(rename = "RA")]
    ra: String,
    #[tabled(rename = "name")]
    name: String,
}
