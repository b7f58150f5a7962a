//! Network-session collaborator interface.
//!
//! The dispatcher and its handlers never touch a connection directly; every
//! protocol effect goes through this trait. Sends are fire-and-forget:
//! returning from a method only means its synchronous portion completed, not
//! that the server confirmed anything.

use chrono::{DateTime, Local};

/// A channel member as reported by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub nick: String,
    /// Role marker shown before the nick, e.g. `@` for operators.
    pub role: Option<String>,
}

/// A channel topic with optional last-setter metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    pub text: String,
    pub set_by: Option<String>,
    pub set_at: Option<DateTime<Local>>,
}

pub trait Session {
    /// Own nickname on this session.
    fn nick(&self) -> &str;

    /// Whether the server-side capability with this name is active.
    /// Handlers only ask about `echo-message` to decide on local echo.
    fn has_capability(&self, name: &str) -> bool;

    /// Whether `name` refers to a channel rather than a user.
    fn is_channel(&self, name: &str) -> bool;

    fn send_privmsg(&mut self, target: &str, content: &str);
    fn send_raw(&mut self, line: &str);
    fn join(&mut self, channels: &str, keys: Option<&str>);
    fn part(&mut self, channel: &str, reason: &str);
    fn quit(&mut self, reason: &str);

    fn topic(&self, channel: &str) -> Option<TopicInfo>;
    fn set_topic(&mut self, channel: &str, text: &str);
    fn members(&self, channel: &str) -> Vec<Member>;
}
