use std::io::BufRead;
use std::thread;

use crossbeam_channel::Sender;
use healthmon_core::Command;

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "ack" | "acknowledge" | "a" => Some(Command::Acknowledge),
        "dismiss" | "d" => Some(Command::DismissBanner),
        "close" | "c" => Some(Command::CloseModal),
        "quit" | "exit" | "q" => Some(Command::Shutdown),
        _ => None,
    }
}

/// Forward stdin lines as commands until EOF or a closed channel.
pub fn spawn_stdin_reader(tx: Sender<Command>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => log::warn!("unknown command `{}` (ack, dismiss, close, quit)", line.trim()),
            }
        }
        log::debug!("stdin closed");
    })
}
