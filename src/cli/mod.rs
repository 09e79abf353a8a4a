//! Terminal interaction shared by the generator and viewer programs.
//! Everything is generic over async readers/writers so it runs against buffers in tests.

pub mod generator;
pub mod viewer;

pub use generator::run_generator;
pub use viewer::run_viewer;

use crate::error::AppError;
use crate::model::NumberRecord;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const ACTION_PROMPT: &str = "Select action (1: view history, 2: generate new): ";
pub const INVALID_CHOICE: &str = "Invalid choice. Please enter 1 or 2.";

/// What the generator should do this run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ViewHistory,
    Generate,
}

impl Action {
    pub fn parse(input: &str) -> Option<Action> {
        match input.trim() {
            "1" => Some(Action::ViewHistory),
            "2" => Some(Action::Generate),
            _ => None,
        }
    }
}

/// Prompt until the user enters a valid action. End of input is an error.
pub async fn choose_action<R, W>(input: &mut R, output: &mut W) -> Result<Action, AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        output.write_all(ACTION_PROMPT.as_bytes()).await?;
        output.flush().await?;
        let line = read_line(input).await?;
        if let Some(action) = Action::parse(&line) {
            return Ok(action);
        }
        output
            .write_all(format!("{}\n", INVALID_CHOICE).as_bytes())
            .await?;
    }
}

/// Newest-first listing used by the generator's history view.
pub fn format_history(records: &[NumberRecord]) -> String {
    if records.is_empty() {
        return "No numbers stored yet.\n".into();
    }
    let mut out = String::from("All stored numbers (newest first):\n");
    for r in records {
        out.push_str("- ");
        out.push_str(&r.value);
        out.push('\n');
    }
    out
}

/// Show `prompt` and block until a line (or end of input) arrives.
pub async fn wait_for_enter<R, W>(input: &mut R, output: &mut W, prompt: &str) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(prompt.as_bytes()).await?;
    output.flush().await?;
    let mut line = String::new();
    input.read_line(&mut line).await?;
    Ok(())
}

/// `Closing in N seconds...` rewritten in place once per `tick`, down to zero.
pub async fn countdown<W>(output: &mut W, seconds: u64, tick: Duration) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    for remaining in (1..=seconds).rev() {
        output
            .write_all(format!("Closing in {} seconds...\r", remaining).as_bytes())
            .await?;
        output.flush().await?;
        tokio::time::sleep(tick).await;
    }
    // Trailing spaces clear what is left of a longer previous line.
    output
        .write_all(b"Closing in 0 seconds...            \n")
        .await?;
    output.flush().await?;
    Ok(())
}

async fn read_line<R>(input: &mut R) -> Result<String, AppError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input closed before a choice was made",
        )));
    }
    Ok(line)
}
