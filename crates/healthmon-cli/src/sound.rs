use std::io::Write;

use healthmon_core::{AlertSound, SoundError};

/// Rings the terminal bell on stderr.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AlertSound for TerminalBell {
    fn play(&mut self) -> Result<(), SoundError> {
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }
}
