//! `oficina account check`

use anyhow::Result;
use clap::{Args, Subcommand};

use oficina_core::validation;

/// Instructor account helpers.
#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Check an email and password against the account rules.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Institutional email (@utfpr.edu.br).
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "OFICINA_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Repeat the password to check that both match.
    #[arg(long)]
    pub confirm: Option<String>,
}

pub fn run(cmd: AccountCommand) -> Result<()> {
    match cmd {
        AccountCommand::Check(args) => {
            validation::credentials(&args.email, &args.password, args.confirm.as_deref())?;
            println!("✓ Credentials meet the account rules");
            Ok(())
        }
    }
}
