use anyhow::bail;
use clap::Parser;
use feedback_form::{FeedbackForm, FormView, SubmitOutcome};
use feedback_types::Rating;
use tokio::io::AsyncReadExt as _;

use crate::commands::{Executor, TargetArgs};

#[derive(Parser, Debug)]
pub struct SubmitCmd {
    #[arg(short, long, default_value = "", help = "Your name, optional")]
    name: String,
    #[arg(
        short,
        long,
        default_value_t = Rating::DEFAULT,
        help = "Rating from 1 to 5 stars"
    )]
    rating: Rating,
    #[arg(short, long, help = "Feedback text, use - to read it from stdin")]
    message: String,
    #[command(flatten)]
    target: TargetArgs,
}

impl Executor for SubmitCmd {
    async fn run(self) -> anyhow::Result<()> {
        let message = if self.message == "-" {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text.trim_end().to_string()
        } else {
            self.message
        };

        let transport = self.target.transport()?;
        let mut form = FeedbackForm::new();
        form.update_name(self.name);
        form.update_rating(self.rating);
        form.update_message(message);

        let outcome = form.submit(&transport).await;
        println!("{}", FormView::of(&form));
        match outcome {
            SubmitOutcome::Submitted => Ok(()),
            SubmitOutcome::Failed => bail!("Feedback was not submitted"),
            SubmitOutcome::Ignored => bail!("Feedback message is required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cmd = SubmitCmd::try_parse_from([
            "submit",
            "--name",
            "Ana",
            "--rating",
            "4",
            "--message",
            "Great!",
        ])
        .unwrap();
        assert_eq!(cmd.name, "Ana");
        assert_eq!(cmd.rating.value(), 4);
        assert_eq!(cmd.message, "Great!");
        assert!(!cmd.target.direct);

        let cmd = SubmitCmd::try_parse_from(["submit", "-m", "ok"]).unwrap();
        assert_eq!(cmd.rating, Rating::DEFAULT);
        assert_eq!(cmd.name, "");

        assert!(SubmitCmd::try_parse_from(["submit", "-m", "ok", "-r", "6"]).is_err());
        assert!(SubmitCmd::try_parse_from(["submit", "-r", "3"]).is_err());
    }
}
