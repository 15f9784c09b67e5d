/// Terminal boot sequence timing and copy
pub const WELCOME_COMMAND: &str = "./initialize-portfolio.sh";
pub const SHELL_PROMPT: &str = "guest@portfolio:~$ ";
pub const STATUS_LINE: &str = "Initializing awesome content...";

/// One character of the welcome command is revealed per tick.
pub const TYPING_INTERVAL_MS: u64 = 80;
/// Pause between full reveal and boot completion.
pub const POST_COMMAND_DELAY_MS: u64 = 750;
/// Cursor block blink half-period while the command is still typing.
pub const CURSOR_BLINK_MS: u64 = 530;
/// Fade-out overlap between the boot overlay and the main content.
pub const FADE_OVERLAP_MS: u64 = 700;

pub const TERMINAL_FONT_SIZE: f32 = 22.0;
pub const STATUS_FONT_SIZE: f32 = 14.0;
pub const CURSOR_WIDTH: f32 = 11.0;
pub const CURSOR_HEIGHT: f32 = 24.0;
