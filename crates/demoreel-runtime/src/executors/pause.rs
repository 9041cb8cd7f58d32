//! Operator pause.

use async_trait::async_trait;
use tracing::info;

use demoreel_protocols::{ControlError, ControlSignal};
use demoreel_script::PauseStep;

use super::{ExecutionContext, StepExecutor};
use crate::error::StepError;

pub struct PauseExecutor;

impl PauseExecutor {
    fn prompt(step: &PauseStep) -> String {
        match &step.message {
            Some(message) => format!("Demo paused: {}", message),
            None => "Demo paused".to_string(),
        }
    }
}

#[async_trait]
impl StepExecutor<PauseStep> for PauseExecutor {
    async fn execute(&self, step: &PauseStep, ctx: &ExecutionContext) -> Result<(), StepError> {
        let prompt = Self::prompt(step);
        info!("{}", prompt);

        let control = ctx.control.clone();
        let read = tokio::task::spawn_blocking(move || control.read_confirmation(&prompt));

        // Listening for Ctrl-C replaces the default SIGINT action for the rest of
        // the process; the binary watches Ctrl-C for the whole run to compensate.
        let signal = tokio::select! {
            joined = read => match joined {
                Ok(result) => result?,
                Err(e) => return Err(StepError::Control(ControlError::Io(std::io::Error::other(e)))),
            },
            Ok(()) = tokio::signal::ctrl_c() => ControlSignal::Cancel,
        };

        match signal {
            ControlSignal::Continue => {
                info!("Resuming demo");
                Ok(())
            }
            ControlSignal::Cancel => Err(StepError::Cancelled),
        }
    }
}
