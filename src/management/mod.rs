mod playback;
mod session;

pub use playback::MIN_REMAINING_MS;
pub use playback::PlaybackError;
pub use playback::PlaybackOutcome;
pub use playback::PlaybackSelector;
pub use playback::choose_command;
pub use playback::start_position;
pub use session::LOGIN_COOKIE;
pub use session::LOGIN_TTL_SECS;
pub use session::SESSION_COOKIE;
pub use session::SessionError;
pub use session::SessionManager;
pub use session::read_cookie;
