use clap::{Parser, Subcommand};

use crate::commands::{interactive::InteractiveCmd, submit::SubmitCmd};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for the feedback form - submits feedback to the feedback server or directly to the store."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Submit(SubmitCmd),
    Interactive(InteractiveCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Submit(cmd) => cmd.run().await,
            Command::Interactive(cmd) => cmd.run().await,
        }
    }
}
