use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::Context;
use parking_lot::Mutex;

/// The console native methods talk to
pub trait Host {
    /// Read one line of input without its terminator. `None` at end of input.
    fn read_line(&mut self) -> anyhow::Result<Option<String>>;

    fn write(&mut self, text: &str) -> anyhow::Result<()>;

    fn write_line(&mut self, text: &str) -> anyhow::Result<()> {
        self.write(text)?;
        self.write("\n")
    }
}

/// The process' stdin and stdout
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("could not read from stdin")?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write(&mut self, text: &str) -> anyhow::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .context("could not write to stdout")?;

        // Prompts have no newline, they still need to show before we block on input
        stdout.flush().context("could not flush stdout")
    }
}

/// A host fed from a fixed list of input lines, recording everything written
#[derive(Debug, Default)]
pub struct ScriptedHost {
    input: VecDeque<String>,
    output: HostOutput,
}

impl ScriptedHost {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            output: HostOutput::default(),
        }
    }

    /// A handle onto the written output that outlives handing the host over
    pub fn output(&self) -> HostOutput {
        self.output.clone()
    }
}

impl Host for ScriptedHost {
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write(&mut self, text: &str) -> anyhow::Result<()> {
        self.output.buffer.lock().push_str(text);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HostOutput {
    buffer: Arc<Mutex<String>>,
}

impl HostOutput {
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(str::to_string).collect()
    }
}
