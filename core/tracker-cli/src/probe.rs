//! Screensaver probe backed by an external command.
//!
//! The command's exit status is the answer: success means a screensaver is
//! running. Spawn failures count as "not running" and are logged once per
//! sample.

use std::process::{Command, Stdio};
use timetrack_core::ScreenSaverProbe;

pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    /// Builds a probe from `[program, args...]`. Returns `None` when empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl ScreenSaverProbe for CommandProbe {
    fn is_running(&self) -> bool {
        match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(err) => {
                tracing::warn!(program = %self.program, error = %err, "Screensaver probe failed");
                false
            }
        }
    }
}
