//! Line-based operator control.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use parking_lot::Mutex;

use demoreel_protocols::{ControlError, ControlInput, ControlSignal};

/// Prints the prompt to `output` and waits for one line on `input`.
///
/// End of input counts as a cancel.
pub struct LineControl<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl<R: BufRead, W: Write> LineControl<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

impl LineControl<BufReader<Stdin>, Stdout> {
    /// Terminal control on stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> ControlInput for LineControl<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn read_confirmation(&self, prompt: &str) -> Result<ControlSignal, ControlError> {
        {
            let mut output = self.output.lock();
            writeln!(output, "\n{}", prompt)?;
            writeln!(output, "Press Enter to continue...")?;
            output.flush()?;
        }

        let mut line = String::new();
        let read = self.input.lock().read_line(&mut line)?;
        Ok(if read == 0 {
            ControlSignal::Cancel
        } else {
            ControlSignal::Continue
        })
    }
}
