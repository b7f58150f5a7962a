//! Offline application shell.
//!
//! Reads one input line at a time from stdin, dispatches it, and prints the
//! lines that commands append to buffers. The session collaborator is a
//! local loopback: joins and parts complete as queued events applied after
//! the dispatch that requested them, the same fire-and-forget shape a
//! network session has.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use chrono::Local;
use tracing::{debug, trace};

use crate::commands::{handle_input, CommandContext, Registry};
use crate::config::{load_config, Config};
use crate::session::{Member, Session, TopicInfo};
use crate::window::{Line, Window, HOME};

/// A deferred effect of a session call, applied between dispatches.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionEvent {
    Joined(String),
    Parted(String),
    /// A private message went to a user; remembered as the reply target.
    Queried(String),
}

/// Session collaborator with no network behind it.
struct LoopbackSession {
    nick: String,
    channels: Vec<String>,
    topics: HashMap<String, TopicInfo>,
    events: Vec<SessionEvent>,
    quit_reason: Option<String>,
}

impl LoopbackSession {
    fn new(nick: String) -> Self {
        Self {
            nick,
            channels: Vec::new(),
            topics: HashMap::new(),
            events: Vec::new(),
            quit_reason: None,
        }
    }

    /// Completed effects since the last drain.
    fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn quit_reason(&self) -> Option<&str> {
        self.quit_reason.as_deref()
    }
}

impl Session for LoopbackSession {
    fn nick(&self) -> &str {
        &self.nick
    }

    fn has_capability(&self, _name: &str) -> bool {
        // No server, so nothing echoes our messages back.
        false
    }

    fn is_channel(&self, name: &str) -> bool {
        name.starts_with('#') || name.starts_with('&')
    }

    fn send_privmsg(&mut self, target: &str, content: &str) {
        trace!(to = target, bytes = content.len(), "privmsg (offline, dropped)");
        if !self.is_channel(target) {
            self.events.push(SessionEvent::Queried(target.to_string()));
        }
    }

    fn send_raw(&mut self, line: &str) {
        trace!(line = line, "raw line (offline, dropped)");
    }

    fn join(&mut self, channels: &str, keys: Option<&str>) {
        if keys.is_some() {
            trace!("channel keys ignored offline");
        }
        for channel in channels.split(',') {
            if channel.is_empty() || self.channels.iter().any(|name| name == channel) {
                continue;
            }
            self.channels.push(channel.to_string());
            self.events.push(SessionEvent::Joined(channel.to_string()));
        }
    }

    fn part(&mut self, channel: &str, reason: &str) {
        trace!(channel = channel, reason = reason, "part");
        self.channels.retain(|name| name != channel);
        self.events.push(SessionEvent::Parted(channel.to_string()));
    }

    fn quit(&mut self, reason: &str) {
        self.quit_reason = Some(reason.to_string());
    }

    fn topic(&self, channel: &str) -> Option<TopicInfo> {
        self.topics.get(channel).cloned()
    }

    fn set_topic(&mut self, channel: &str, text: &str) {
        self.topics.insert(
            channel.to_string(),
            TopicInfo {
                text: text.to_string(),
                set_by: Some(self.nick.clone()),
                set_at: Some(Local::now()),
            },
        );
    }

    fn members(&self, channel: &str) -> Vec<Member> {
        if self.channels.iter().any(|name| name == channel) {
            vec![Member {
                nick: self.nick.clone(),
                role: Some("@".to_string()),
            }]
        } else {
            Vec::new()
        }
    }
}

struct Buffer {
    name: String,
    lines: Vec<Line>,
    printed: usize,
}

impl Buffer {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Vec::new(),
            printed: 0,
        }
    }
}

/// Window collaborator that stores buffers as plain line lists.
struct BufferWindow {
    buffers: Vec<Buffer>,
    current: usize,
    exited: bool,
}

impl BufferWindow {
    fn new() -> Self {
        Self {
            buffers: vec![Buffer::named(HOME)],
            current: 0,
            exited: false,
        }
    }

    fn exited(&self) -> bool {
        self.exited
    }

    /// Create the buffer if needed and make it current.
    fn open_buffer(&mut self, name: &str) {
        if let Some(index) = self.buffers.iter().position(|buffer| buffer.name == name) {
            self.current = index;
            return;
        }
        self.buffers.push(Buffer::named(name));
        self.current = self.buffers.len() - 1;
    }

    /// Remove the buffer; the home buffer at index zero stays.
    fn close_buffer(&mut self, name: &str) {
        let Some(index) = self.buffers.iter().position(|buffer| buffer.name == name) else {
            return;
        };
        if index == 0 {
            return;
        }
        self.buffers.remove(index);
        if self.current == index {
            self.current = 0;
        } else if self.current > index {
            self.current -= 1;
        }
    }

    /// Lines appended since the last call, oldest first per buffer.
    fn unprinted_lines(&mut self) -> Vec<(String, Line)> {
        let mut out = Vec::new();
        for buffer in &mut self.buffers {
            for line in &buffer.lines[buffer.printed..] {
                out.push((buffer.name.clone(), line.clone()));
            }
            buffer.printed = buffer.lines.len();
        }
        out
    }
}

impl Window for BufferWindow {
    fn current_buffer(&self) -> &str {
        &self.buffers[self.current].name
    }

    fn add_line(&mut self, buffer: &str, line: Line) {
        match self.buffers.iter_mut().find(|known| known.name == buffer) {
            Some(known) => known.lines.push(line),
            None => trace!(buffer = buffer, "dropped line for unknown buffer"),
        }
    }

    fn jump_buffer(&mut self, pattern: &str) -> bool {
        match self
            .buffers
            .iter()
            .position(|buffer| buffer.name.contains(pattern))
        {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    fn exit(&mut self) {
        self.exited = true;
    }
}

struct App {
    registry: Registry,
    session: LoopbackSession,
    window: BufferWindow,
    last_query: Option<String>,
}

impl App {
    fn new(config: Config) -> Self {
        let mut session = LoopbackSession::new(config.nick);
        for channel in &config.autojoin {
            session.join(channel, None);
        }
        Self {
            registry: Registry::builtin(),
            session,
            window: BufferWindow::new(),
            last_query: None,
        }
    }

    fn apply_session_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::Joined(channel) => self.window.open_buffer(&channel),
                SessionEvent::Parted(channel) => self.window.close_buffer(&channel),
                SessionEvent::Queried(target) => self.last_query = Some(target),
            }
        }
    }

    fn handle_line(&mut self, line: &str) {
        let buffer = self.window.current_buffer().to_string();
        let mut ctx = CommandContext {
            registry: &self.registry,
            session: &mut self.session,
            window: &mut self.window,
            last_query: self.last_query.as_deref(),
        };
        if let Err(error) = handle_input(&mut ctx, &buffer, line) {
            self.window.add_line(&buffer, Line::new("--", error.to_string()));
        }
        self.apply_session_events();
    }
}

pub fn run() -> io::Result<()> {
    let config = load_config();
    debug!(nick = %config.nick, "starting offline shell");
    let mut app = App::new(config);
    app.apply_session_events();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        app.handle_line(&line);
        for (buffer, line) in app.window.unprinted_lines() {
            let stamp = line.at.format("%H:%M:%S");
            if line.head.is_empty() {
                writeln!(stdout, "{stamp} [{buffer}] {}", line.body)?;
            } else {
                writeln!(stdout, "{stamp} [{buffer}] {} {}", line.head, line.body)?;
            }
        }
        if app.window.exited() {
            break;
        }
    }

    if let Some(reason) = app.session.quit_reason() {
        if !reason.is_empty() {
            writeln!(stdout, "quit: {reason}")?;
        }
    }
    Ok(())
}
