//! Command resolution and execution.
//!
//! [`handle_input`] takes one raw input line and runs it through prefix
//! resolution, argument splitting, arity and home-buffer validation, and the
//! resolved handler. Each stage either passes its output forward or fails
//! with a typed error that aborts the rest; nothing before the handler has
//! side effects.

use tracing::debug;

use crate::session::{Member, Session};
use crate::window::{Line, Window, HOME};

use super::error::{DispatchError, HandlerError};
use super::parse::{parse_command, split_args};
use super::registry::{CommandDescriptor, CommandKind, Registry};

/// Collaborators and per-dispatch state handed to command handlers.
pub struct CommandContext<'a> {
    pub registry: &'a Registry,
    pub session: &'a mut dyn Session,
    pub window: &'a mut dyn Window,
    /// Target of the most recent private-message exchange, for REPLY and for
    /// ME sent from home.
    pub last_query: Option<&'a str>,
}

/// Resolve and run one input line against the current buffer.
pub fn handle_input(
    ctx: &mut CommandContext,
    buffer: &str,
    line: &str,
) -> Result<(), DispatchError> {
    let parsed = parse_command(line);
    let descriptor = resolve(ctx.registry, &parsed.name)?;
    let args = split_args(parsed.rest, descriptor.max_args);
    if args.len() < descriptor.min_args {
        return Err(DispatchError::TooFewArguments {
            name: descriptor.name,
            usage: descriptor.usage,
        });
    }
    if buffer == HOME && !descriptor.allow_home {
        return Err(DispatchError::HomeNotAllowed {
            name: descriptor.name,
        });
    }
    debug!(command = descriptor.name, args = args.len(), "dispatching");
    run_handler(descriptor.kind, ctx, buffer, &args)
}

/// Resolve a command-name fragment to a unique descriptor by prefix.
///
/// The empty fragment only matches the default command; it must not
/// prefix-match everything. Candidates come out of the registry in name
/// order, so ambiguity errors are deterministic.
fn resolve<'r>(registry: &'r Registry, fragment: &str) -> Result<&'r CommandDescriptor, DispatchError> {
    let candidates: Vec<&CommandDescriptor> = registry
        .all()
        .filter(|descriptor| {
            if fragment.is_empty() {
                descriptor.name.is_empty()
            } else {
                descriptor.name.starts_with(fragment)
            }
        })
        .collect();
    match candidates.as_slice() {
        [] => Err(DispatchError::UnknownCommand {
            fragment: fragment.to_string(),
        }),
        [descriptor] => Ok(*descriptor),
        _ => Err(DispatchError::AmbiguousCommand {
            fragment: fragment.to_string(),
            candidates: candidates
                .iter()
                .map(|descriptor| descriptor.name.to_string())
                .collect(),
        }),
    }
}

fn run_handler(
    kind: CommandKind,
    ctx: &mut CommandContext,
    buffer: &str,
    args: &[String],
) -> Result<(), DispatchError> {
    let outcome = match kind {
        CommandKind::Chat => chat(ctx, buffer, args),
        CommandKind::Help => help(ctx, args),
        CommandKind::Join => join(ctx, args),
        CommandKind::Me => me(ctx, buffer, args),
        CommandKind::Msg => msg(ctx, args),
        CommandKind::Names => names(ctx, buffer),
        CommandKind::Part => part(ctx, buffer, args),
        CommandKind::Quit => quit(ctx, args),
        CommandKind::Quote => quote(ctx, args),
        CommandKind::Reply => reply(ctx, args),
        CommandKind::Topic => topic(ctx, buffer, args),
        CommandKind::Buffer => jump(ctx, args),
    };
    outcome.map_err(DispatchError::from)
}

/// Locally echo an outgoing message when the server won't echo it back.
fn echo_own_message(ctx: &mut CommandContext, target: &str, content: &str) {
    if ctx.session.has_capability("echo-message") {
        return;
    }
    let head = ctx.session.nick().to_string();
    ctx.window.add_line(target, Line::new(head, content));
}

fn chat(ctx: &mut CommandContext, buffer: &str, args: &[String]) -> Result<(), HandlerError> {
    if buffer == HOME {
        return Err(HandlerError::new("can't send messages to the home buffer"));
    }
    let content = &args[0];
    ctx.session.send_privmsg(buffer, content);
    echo_own_message(ctx, buffer, content);
    Ok(())
}

fn help(ctx: &mut CommandContext, args: &[String]) -> Result<(), HandlerError> {
    let current = ctx.window.current_buffer().to_string();
    match args.first() {
        None => {
            ctx.window
                .add_line(&current, Line::new("--", "Available commands:"));
            for text in ctx.registry.help_lines() {
                ctx.window.add_line(&current, Line::body_only(text));
            }
        }
        Some(argument) => {
            let search = argument.to_uppercase();
            ctx.window.add_line(
                &current,
                Line::new("--", format!("Commands that match \"{search}\":")),
            );
            let matches = ctx.registry.help_lines_matching(&search);
            if matches.is_empty() {
                ctx.window.add_line(
                    &current,
                    Line::body_only(format!("  no command matches {argument:?}")),
                );
            } else {
                for text in matches {
                    ctx.window.add_line(&current, Line::body_only(text));
                }
            }
        }
    }
    Ok(())
}

fn join(ctx: &mut CommandContext, args: &[String]) -> Result<(), HandlerError> {
    ctx.session.join(&args[0], args.get(1).map(String::as_str));
    Ok(())
}

fn me(ctx: &mut CommandContext, buffer: &str, args: &[String]) -> Result<(), HandlerError> {
    let target = if buffer == HOME {
        ctx.last_query
            .ok_or_else(|| HandlerError::new("no previous query to reply to"))?
    } else {
        buffer
    };
    let message = &args[0];
    let content = format!("\x01ACTION {message}\x01");
    ctx.session.send_privmsg(target, &content);
    if !ctx.session.has_capability("echo-message") {
        let body = format!("{} {message}", ctx.session.nick());
        ctx.window.add_line(target, Line::new("*", body));
    }
    Ok(())
}

fn msg(ctx: &mut CommandContext, args: &[String]) -> Result<(), HandlerError> {
    let target = &args[0];
    let content = &args[1];
    ctx.session.send_privmsg(target, content);
    echo_own_message(ctx, target, content);
    Ok(())
}

fn names(ctx: &mut CommandContext, buffer: &str) -> Result<(), HandlerError> {
    let members = ctx.session.members(buffer);
    let mut body = String::from("Names: ");
    for Member { nick, role } in &members {
        if let Some(role) = role {
            body.push_str(role);
        }
        body.push_str(nick);
        body.push(' ');
    }
    let body = body.trim_end().to_string();
    ctx.window.add_line(buffer, Line::new("--", body));
    Ok(())
}

fn part(ctx: &mut CommandContext, buffer: &str, args: &[String]) -> Result<(), HandlerError> {
    let mut channel = buffer;
    let mut reason = "";
    if let Some(first) = args.first() {
        if ctx.session.is_channel(first) {
            channel = first;
            if let Some(second) = args.get(1) {
                reason = second;
            }
        } else {
            reason = first;
        }
    }
    if channel == HOME {
        return Err(HandlerError::new("cannot part home"));
    }
    ctx.session.part(channel, reason);
    Ok(())
}

fn quit(ctx: &mut CommandContext, args: &[String]) -> Result<(), HandlerError> {
    let reason = args.first().map(String::as_str).unwrap_or("");
    ctx.session.quit(reason);
    ctx.window.exit();
    Ok(())
}

fn quote(ctx: &mut CommandContext, args: &[String]) -> Result<(), HandlerError> {
    ctx.session.send_raw(&args[0]);
    Ok(())
}

fn reply(ctx: &mut CommandContext, args: &[String]) -> Result<(), HandlerError> {
    let Some(target) = ctx.last_query else {
        return Err(HandlerError::new("no previous query to reply to"));
    };
    let content = &args[0];
    ctx.session.send_privmsg(target, content);
    echo_own_message(ctx, target, content);
    Ok(())
}

fn topic(ctx: &mut CommandContext, buffer: &str, args: &[String]) -> Result<(), HandlerError> {
    match args.first() {
        Some(text) => ctx.session.set_topic(buffer, text),
        None => {
            let body = match ctx.session.topic(buffer) {
                None => String::from("no topic is set"),
                Some(info) => match (&info.set_by, info.set_at) {
                    (Some(who), Some(at)) => format!(
                        "Topic (by {who}, {}): {}",
                        at.format("%a %b %e %H:%M:%S"),
                        info.text
                    ),
                    _ => format!("Topic: {}", info.text),
                },
            };
            ctx.window.add_line(buffer, Line::new("--", body));
        }
    }
    Ok(())
}

fn jump(ctx: &mut CommandContext, args: &[String]) -> Result<(), HandlerError> {
    let pattern = &args[0];
    if !ctx.window.jump_buffer(pattern) {
        return Err(HandlerError::new(format!(
            "none of the buffers match {pattern:?}"
        )));
    }
    Ok(())
}
