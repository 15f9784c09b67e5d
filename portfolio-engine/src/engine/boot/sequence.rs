use std::time::Duration;

use constants::boot::{CURSOR_BLINK_MS, POST_COMMAND_DELAY_MS, TYPING_INTERVAL_MS};

/// Deterministic one-shot boot state machine.
///
/// The command string is revealed one character per typing interval. Once
/// fully typed the cursor hides, and after the post-command delay the
/// sequence reports completion exactly once. Pure `Duration` arithmetic so
/// tests drive virtual time; the Bevy system feeds it `Time::delta`.
pub struct BootSequence {
    command: &'static str,
    typed_len: usize,
    fully_typed: bool,
    completed: bool,
    cursor_visible: bool,
    type_accum: Duration,
    post_accum: Duration,
    blink_accum: Duration,
}

impl BootSequence {
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            typed_len: 0,
            fully_typed: false,
            completed: false,
            cursor_visible: true,
            type_accum: Duration::ZERO,
            post_accum: Duration::ZERO,
            blink_accum: Duration::ZERO,
        }
    }

    /// Advance virtual time. Returns `true` exactly once, on the tick the
    /// post-command delay elapses.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.completed {
            return false;
        }

        let typing_interval = Duration::from_millis(TYPING_INTERVAL_MS);
        let post_delay = Duration::from_millis(POST_COMMAND_DELAY_MS);
        let blink_period = Duration::from_millis(CURSOR_BLINK_MS);
        let command_len = self.command.chars().count();

        if !self.fully_typed {
            self.type_accum += dt;
            self.blink_accum += dt;

            while self.blink_accum >= blink_period {
                self.blink_accum -= blink_period;
                self.cursor_visible = !self.cursor_visible;
            }

            while self.type_accum >= typing_interval && self.typed_len < command_len {
                self.type_accum -= typing_interval;
                self.typed_len += 1;
            }

            if self.typed_len == command_len {
                self.fully_typed = true;
                self.cursor_visible = false;
                // Leftover time in the same frame counts toward the delay.
                self.post_accum = self.type_accum;
                self.type_accum = Duration::ZERO;
                return self.check_completion(post_delay);
            }
            return false;
        }

        self.post_accum += dt;
        self.check_completion(post_delay)
    }

    fn check_completion(&mut self, post_delay: Duration) -> bool {
        if self.post_accum >= post_delay {
            self.completed = true;
            true
        } else {
            false
        }
    }

    /// Revealed prefix of the command.
    pub fn typed(&self) -> &str {
        let end = self
            .command
            .char_indices()
            .nth(self.typed_len)
            .map(|(i, _)| i)
            .unwrap_or(self.command.len());
        &self.command[..end]
    }

    pub fn fully_typed(&self) -> bool {
        self.fully_typed
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMAND: &str = "./initialize-portfolio.sh";

    fn tick(seq: &mut BootSequence, ms: u64) -> bool {
        seq.advance(Duration::from_millis(ms))
    }

    #[test]
    fn reveals_one_character_per_interval() {
        let mut seq = BootSequence::new(COMMAND);
        assert_eq!(seq.typed(), "");
        tick(&mut seq, TYPING_INTERVAL_MS);
        assert_eq!(seq.typed(), ".");
        tick(&mut seq, TYPING_INTERVAL_MS);
        assert_eq!(seq.typed(), "./");
    }

    #[test]
    fn fully_typed_after_exactly_command_length_ticks() {
        let mut seq = BootSequence::new(COMMAND);
        let len = COMMAND.len() as u64;
        for _ in 0..len - 1 {
            tick(&mut seq, TYPING_INTERVAL_MS);
        }
        assert!(!seq.fully_typed());
        tick(&mut seq, TYPING_INTERVAL_MS);
        assert!(seq.fully_typed());
        assert_eq!(seq.typed(), COMMAND);
    }

    #[test]
    fn cursor_hides_once_fully_typed() {
        let mut seq = BootSequence::new(COMMAND);
        assert!(seq.cursor_visible());
        tick(&mut seq, TYPING_INTERVAL_MS * COMMAND.len() as u64);
        assert!(seq.fully_typed());
        assert!(!seq.cursor_visible());
        // Stays hidden through the post-command delay.
        tick(&mut seq, CURSOR_BLINK_MS * 2);
        assert!(!seq.cursor_visible());
    }

    #[test]
    fn cursor_blinks_while_typing() {
        let mut seq = BootSequence::new(COMMAND);
        assert!(seq.cursor_visible());
        tick(&mut seq, CURSOR_BLINK_MS);
        assert!(!seq.cursor_visible());
        tick(&mut seq, CURSOR_BLINK_MS);
        assert!(seq.cursor_visible());
    }

    #[test]
    fn completes_once_at_reveal_plus_delay() {
        // 25-char command at 80 ms/char types out at 2000 ms; completion
        // fires at 2000 + 750 ms, never earlier.
        let mut seq = BootSequence::new(COMMAND);
        let typed_at = TYPING_INTERVAL_MS * COMMAND.len() as u64;

        let mut elapsed = 0;
        let mut fired_at = None;
        while elapsed < 5_000 {
            elapsed += 10;
            if tick(&mut seq, 10) {
                assert!(fired_at.is_none(), "completion fired twice");
                fired_at = Some(elapsed);
            }
        }
        assert_eq!(fired_at, Some(typed_at + POST_COMMAND_DELAY_MS));
    }

    #[test]
    fn single_large_delta_still_completes_exactly_once() {
        let mut seq = BootSequence::new(COMMAND);
        assert!(tick(&mut seq, 60_000));
        assert!(seq.completed());
        assert_eq!(seq.typed(), COMMAND);
        assert!(!tick(&mut seq, 60_000));
    }

    #[test]
    fn leftover_frame_time_counts_toward_post_delay() {
        let mut seq = BootSequence::new(COMMAND);
        let typed_at = TYPING_INTERVAL_MS * COMMAND.len() as u64;
        // One oversized frame covering typing plus most of the delay.
        assert!(!tick(&mut seq, typed_at + POST_COMMAND_DELAY_MS - 1));
        assert!(tick(&mut seq, 1));
    }
}
