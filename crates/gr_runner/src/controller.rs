//! Keyboard controller reading line-buffered terminal input.
//!
//! A background thread reads lines and forwards them over a channel, so the
//! frame loop never blocks on input. Every character of a line is one
//! command: `w`/`a`/`s`/`d` boost the ship, space or `f` fires, `p` toggles
//! pause and `q` quits. End of input also quits.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use gr_core::ports::{Controller, PlayerCommand};

use crate::scheduler::StopHandle;

/// One decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A game command.
    Command(PlayerCommand),
    /// End the match.
    Quit,
}

/// Decode one key. Unknown keys are ignored.
#[must_use]
pub fn parse_key(key: char) -> Option<KeyInput> {
    let command = match key.to_ascii_lowercase() {
        'w' => PlayerCommand::MoveShipUp,
        's' => PlayerCommand::MoveShipDown,
        'a' => PlayerCommand::MoveShipLeft,
        'd' => PlayerCommand::MoveShipRight,
        ' ' | 'f' => PlayerCommand::LaunchMissile,
        'p' => PlayerCommand::PauseGame,
        'q' => return Some(KeyInput::Quit),
        _ => return None,
    };
    Some(KeyInput::Command(command))
}

/// Decode a full input line. The word `quit` is accepted as well as `q`.
#[must_use]
pub fn parse_line(line: &str) -> Vec<KeyInput> {
    let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    if line.trim().eq_ignore_ascii_case("quit") {
        return vec![KeyInput::Quit];
    }
    line.chars().filter_map(parse_key).collect()
}

/// Controller fed by a reader on a background thread.
///
/// Commands are handed to the engine one per tick in the order they were
/// typed. `q`, `quit` or end of input sets the stop handle.
pub struct InputController {
    receiver: Receiver<KeyInput>,
    pending: VecDeque<PlayerCommand>,
    stop: StopHandle,
}

impl InputController {
    /// Controller reading from standard input.
    pub fn stdin(stop: StopHandle) -> Self {
        Self::spawn(BufReader::new(std::io::stdin()), stop)
    }

    /// Controller reading from `reader` on a background thread.
    pub fn spawn<R>(reader: R, stop: StopHandle) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else {
                    break;
                };
                for input in parse_line(&line) {
                    if sender.send(input).is_err() {
                        return;
                    }
                }
            }
            let _ = sender.send(KeyInput::Quit);
        });

        Self {
            receiver,
            pending: VecDeque::new(),
            stop,
        }
    }

    fn drain_channel(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(KeyInput::Command(command)) => self.pending.push_back(command),
                Ok(KeyInput::Quit) | Err(TryRecvError::Disconnected) => {
                    if !self.stop.is_stop_requested() {
                        tracing::info!("Input closed, stopping");
                    }
                    self.stop.request_stop();
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }
    }
}

impl Controller for InputController {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        self.drain_channel();
        self.pending.pop_front()
    }
}

/// Controller that never issues a command, for unattended runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleController;

impl Controller for IdleController {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            parse_line("wd f"),
            vec![
                KeyInput::Command(PlayerCommand::MoveShipUp),
                KeyInput::Command(PlayerCommand::MoveShipRight),
                KeyInput::Command(PlayerCommand::LaunchMissile),
                KeyInput::Command(PlayerCommand::LaunchMissile),
            ]
        );
        assert_eq!(parse_line("P"), vec![KeyInput::Command(PlayerCommand::PauseGame)]);
        assert_eq!(parse_line("QUIT\r\n"), vec![KeyInput::Quit]);
        assert!(parse_line("xyz").is_empty());
    }

    #[test]
    fn test_commands_arrive_in_order_then_stop_on_eof() {
        let stop = StopHandle::new();
        let mut controller = InputController::spawn(Cursor::new("w\np\n"), stop.clone());

        let mut seen = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !stop.is_stop_requested() || !controller.pending.is_empty() {
            if let Some(command) = controller.next_player_command() {
                seen.push(command);
            }
            assert!(Instant::now() < deadline, "input thread never finished");
            std::thread::yield_now();
        }

        assert_eq!(
            seen,
            vec![PlayerCommand::MoveShipUp, PlayerCommand::PauseGame]
        );
        assert!(stop.is_stop_requested());
    }
}
