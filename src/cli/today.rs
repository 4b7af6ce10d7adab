use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use crate::{
    gate::{GateState, HomeController, SubmitOutcome},
    store::EntryStore,
    utils::clock::Clock,
};

use super::{
    output::{
        render_error, render_reminder, render_success, Painter, DAILY_QUESTION, DETAIL_QUESTION,
        DONE_TEXT, SUBMITTED_TEXT,
    },
    prompt::Prompt,
};

#[derive(Debug, Parser)]
pub struct SubmitCommand {
    #[arg(
        long,
        short,
        default_value = "",
        help = "What you did for yourself today. Empty answers are accepted"
    )]
    response: String,
}

/// Loads the gate and prints what every flow shows first: the streak reminder and, when today is
/// already recorded, the done message. Returns `true` when there is nothing left to ask.
async fn load_gate<S: EntryStore, C: Clock>(
    controller: &mut HomeController<S, C>,
    painter: Painter,
) -> Result<bool> {
    let outcome = controller.load().await?;

    if let Some(gap) = &outcome.streak_gap {
        println!("{}", render_reminder(gap, painter));
    }

    if outcome.state == GateState::AlreadySubmittedToday {
        println!("{}", render_success(DONE_TEXT, painter));
        return Ok(true);
    }
    Ok(false)
}

/// Interactive version of the home screen. Asks the daily question and keeps asking for the
/// answer until it's stored or input ends.
pub async fn process_today_command<S: EntryStore, C: Clock>(
    mut controller: HomeController<S, C>,
    painter: Painter,
) -> Result<()> {
    if load_gate(&mut controller, painter).await? {
        return Ok(());
    }

    let mut prompt = Prompt::new();
    if !prompt.confirm(DAILY_QUESTION).await? {
        info!("Daily question left unanswered");
        println!("Nothing recorded for today.");
        return Ok(());
    }
    controller.answer_yes()?;

    loop {
        let Some(response) = prompt.ask(DETAIL_QUESTION).await? else {
            println!();
            println!("Nothing recorded for today.");
            return Ok(());
        };

        match controller.submit(response).await? {
            SubmitOutcome::Done => {
                println!("{}", render_success(SUBMITTED_TEXT, painter));
                return Ok(());
            }
            SubmitOutcome::Rejected { message } => {
                eprintln!("{}", render_error(&message, painter));
            }
        }
    }
}

/// Non-interactive version of the home screen: answers "yes" and submits `response` right away.
pub async fn process_submit_command<S: EntryStore, C: Clock>(
    SubmitCommand { response }: SubmitCommand,
    mut controller: HomeController<S, C>,
    painter: Painter,
) -> Result<()> {
    if load_gate(&mut controller, painter).await? {
        return Ok(());
    }

    controller.answer_yes()?;
    match controller.submit(response).await? {
        SubmitOutcome::Done => {
            println!("{}", render_success(SUBMITTED_TEXT, painter));
            Ok(())
        }
        SubmitOutcome::Rejected { message } => bail!(message),
    }
}
