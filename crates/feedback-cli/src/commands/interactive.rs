use std::io::Write;

use anyhow::bail;
use clap::Parser;
use feedback_form::{FeedbackForm, FormStatus, FormView, Transport};
use feedback_types::Rating;
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, BufReader};

use crate::commands::{Executor, TargetArgs};

/// Fills the form in terminal, field by field
#[derive(Parser, Debug)]
pub struct InteractiveCmd {
    #[command(flatten)]
    target: TargetArgs,
}

impl Executor for InteractiveCmd {
    async fn run(self) -> anyhow::Result<()> {
        let transport = self.target.transport()?;
        let input = BufReader::new(tokio::io::stdin());
        let mut form = FeedbackForm::new();
        session(&mut form, input, std::io::stdout(), &transport).await
    }
}

struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: AsyncBufRead + Unpin, W: Write> Prompt<R, W> {
    async fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            bail!("Input closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    async fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]: ")).await?;
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn show(&mut self, form: &FeedbackForm) -> anyhow::Result<()> {
        writeln!(self.output, "\n{}\n", FormView::of(form))?;
        Ok(())
    }
}

async fn fill<R: AsyncBufRead + Unpin, W: Write>(
    prompt: &mut Prompt<R, W>,
    form: &mut FeedbackForm,
) -> anyhow::Result<()> {
    let name = prompt.ask("Name (Optional): ").await?;
    form.update_name(name.trim());

    loop {
        let current = form.draft().rating;
        let answer = prompt.ask(&format!("Rating 1-5 [{current}]: ")).await?;
        if answer.trim().is_empty() {
            break;
        }
        match answer.parse::<Rating>() {
            Ok(rating) => {
                form.update_rating(rating);
                break;
            }
            Err(e) => writeln!(prompt.output, "{e}")?,
        }
    }

    loop {
        let message = prompt.ask("Feedback: ").await?;
        if !message.is_empty() {
            form.update_message(message);
            break;
        }
        writeln!(prompt.output, "Feedback is required")?;
    }
    Ok(())
}

pub async fn session<R, W, T>(
    form: &mut FeedbackForm,
    input: R,
    output: W,
    transport: &T,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    T: Transport,
{
    let mut prompt = Prompt { input, output };
    loop {
        prompt.show(form)?;
        fill(&mut prompt, form).await?;

        loop {
            form.submit(transport).await;
            prompt.show(form)?;
            if form.status() != FormStatus::Error {
                break;
            }
            if !prompt.confirm("Try again?").await? {
                bail!("Feedback was not submitted");
            }
        }

        if !prompt.confirm("Send another response?").await? {
            return Ok(());
        }
        form.send_another();
    }
}
