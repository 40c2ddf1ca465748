//! `oficina roster show|edit|set`
//!
//! `edit` starts from the workshop's current roster, applies `--add`,
//! `--remove` and `--toggle` in that order, previews the difference and then
//! submits the whole resulting selection. `set` replaces the selection
//! outright. Both refuse RAs that are not in the participant catalog before
//! any request is sent.

use std::collections::BTreeSet;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use oficina_client::{RosterError, RosterReconciler, WorkshopApi};
use oficina_core::roster::{self, RosterDiff, SelectionState};
use oficina_core::types::{Participant, Ra, Workshop};

use super::workshops::{enrollment, fetch};
use super::{connect, print_json};

/// Inspect and change workshop rosters.
#[derive(Subcommand, Debug)]
pub enum RosterCommand {
    /// Show who is on a workshop roster.
    Show(ShowArgs),

    /// Add, remove or toggle participants on a roster.
    Edit(EditArgs),

    /// Replace a roster with exactly the given RAs.
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Workshop id.
    pub workshop: i64,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Workshop id.
    pub workshop: i64,

    /// Select this RA (repeatable).
    #[arg(long, value_name = "RA")]
    pub add: Vec<String>,

    /// Deselect this RA (repeatable).
    #[arg(long, value_name = "RA")]
    pub remove: Vec<String>,

    /// Flip this RA's selection (repeatable).
    #[arg(long, value_name = "RA")]
    pub toggle: Vec<String>,

    /// Print the changes without submitting them.
    #[arg(long)]
    pub dry_run: bool,

    /// Output the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Workshop id.
    pub workshop: i64,

    /// The complete new roster; none clears it.
    #[arg(value_name = "RA")]
    pub ras: Vec<String>,

    /// Print the changes without submitting them.
    #[arg(long)]
    pub dry_run: bool,

    /// Output the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(cmd: RosterCommand, api_url: Option<&str>) -> Result<()> {
    let api = connect(api_url)?;
    match cmd {
        RosterCommand::Show(args) => show(&api, args),
        RosterCommand::Edit(args) => edit(&api, args),
        RosterCommand::Set(args) => set(&api, args),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn show(api: &dyn WorkshopApi, args: ShowArgs) -> Result<()> {
    let workshop = fetch(api, args.workshop)?;

    if args.json {
        return print_json(&workshop.participants);
    }

    println!(
        "Workshop #{} '{}' ({})",
        workshop.id,
        workshop.title,
        enrollment(workshop.participants.len(), workshop.max_participants)
    );
    if workshop.participants.is_empty() {
        println!("  (no participants)");
    }
    for p in &workshop.participants {
        println!("  - {} {}", p.ra, p.name);
    }
    Ok(())
}

fn edit(api: &dyn WorkshopApi, args: EditArgs) -> Result<()> {
    let workshop = fetch(api, args.workshop)?;

    let mut selection = roster::initialize(&workshop);
    for ra in args.add.iter().map(|s| ra_arg(s)) {
        selection = selection.with(&ra);
    }
    for ra in args.remove.iter().map(|s| ra_arg(s)) {
        selection = selection.without(&ra);
    }
    for ra in args.toggle.iter().map(|s| ra_arg(s)) {
        selection = roster::toggle(&selection, &ra);
    }

    reconcile(api, &workshop, &selection, args.dry_run, args.json)
}

fn set(api: &dyn WorkshopApi, args: SetArgs) -> Result<()> {
    let workshop = fetch(api, args.workshop)?;
    let selection: SelectionState = args.ras.iter().map(|s| ra_arg(s)).collect();
    reconcile(api, &workshop, &selection, args.dry_run, args.json)
}

// ---------------------------------------------------------------------------
// Shared flow
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Outcome<'a> {
    workshop: i64,
    submitted: bool,
    dry_run: bool,
    added: &'a BTreeSet<Ra>,
    removed: &'a BTreeSet<Ra>,
    participants: Vec<&'a Participant>,
}

fn reconcile(
    api: &dyn WorkshopApi,
    workshop: &Workshop,
    selection: &SelectionState,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let reconciler = RosterReconciler::load(api).context("failed to load participant catalog")?;

    let unknown = reconciler.unknown(selection);
    if !unknown.is_empty() {
        let list: Vec<&str> = unknown.iter().map(Ra::as_str).collect();
        return Err(anyhow!(
            "unknown RA(s): {}; register them with `oficina participants register` first",
            list.join(", ")
        ));
    }

    let diff = reconciler.preview(workshop, selection);
    let submit = !diff.is_empty() && !dry_run;
    if !json {
        print_diff(workshop, reconciler.catalog(), &diff, dry_run);
    }

    let outcome_roster = if submit {
        match reconciler.submit(workshop, selection) {
            Ok(updated) => updated.participants,
            Err(err @ RosterError::CapacityExceeded { .. }) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("roster of workshop #{} was not changed", workshop.id)));
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!(
                    "roster of workshop #{} was not changed; retry the same command",
                    workshop.id
                )));
            }
        }
    } else {
        Vec::new()
    };

    if json {
        let participants: Vec<&Participant> = if submit {
            outcome_roster.iter().collect()
        } else {
            reconciler
                .catalog()
                .iter()
                .filter(|p| selection.contains(&p.ra))
                .collect()
        };
        return print_json(&Outcome {
            workshop: workshop.id.0,
            submitted: submit,
            dry_run,
            added: &diff.to_add,
            removed: &diff.to_remove,
            participants,
        });
    }

    if submit {
        println!(
            "✓ Roster of workshop #{} updated ({})",
            workshop.id,
            enrollment(outcome_roster.len(), workshop.max_participants)
        );
    }
    Ok(())
}

fn print_diff(workshop: &Workshop, catalog: &[Participant], diff: &RosterDiff, dry_run: bool) {
    if diff.is_empty() {
        println!("No roster changes for workshop #{}.", workshop.id);
        return;
    }

    let prefix = if dry_run { "[dry-run] " } else { "" };
    println!("{prefix}Roster changes for workshop #{}:", workshop.id);
    for ra in &diff.to_add {
        println!("  {}", format!("+ {ra} {}", name_of(catalog, ra)).green());
    }
    for ra in &diff.to_remove {
        let name = workshop
            .participants
            .iter()
            .find(|p| &p.ra == ra)
            .map(|p| p.name.as_str())
            .unwrap_or_else(|| name_of(catalog, ra));
        println!("  {}", format!("- {ra} {name}").red());
    }
}

fn name_of<'a>(catalog: &'a [Participant], ra: &Ra) -> &'a str {
    catalog
        .iter()
        .find(|p| &p.ra == ra)
        .map(|p| p.name.as_str())
        .unwrap_or("")
}

fn ra_arg(raw: &str) -> Ra {
    Ra::from(raw.trim())
}
