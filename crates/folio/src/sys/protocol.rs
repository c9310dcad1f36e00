use crate::events::{AppEvent, Rect};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Event(AppEvent),
    Frame,
    Modal,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("{command} expects {expected} argument(s), got {got}")]
    Arity {
        command: String,
        expected: &'static str,
        got: usize,
    },
    #[error("invalid number {0:?}")]
    Number(String),
}

fn number<T: FromStr>(s: &str) -> Result<T, CommandError> {
    s.parse().map_err(|_| CommandError::Number(s.to_string()))
}

/// Parses one control line. `now_ms` stamps `drag-move` lines that carry no
/// timestamp of their own.
pub fn parse_line(line: &str, now_ms: f64) -> Result<Request, CommandError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(CommandError::Empty)?;
    let args: Vec<&str> = words.collect();

    let arity = |expected: &'static str, ok: bool| {
        if ok {
            Ok(())
        } else {
            Err(CommandError::Arity {
                command: command.to_string(),
                expected,
                got: args.len(),
            })
        }
    };

    let request = match command {
        "drag-start" => {
            arity("1", args.len() == 1)?;
            Request::Event(AppEvent::DragStart(number(args[0])?))
        }
        "drag-move" => {
            arity("1 or 2", matches!(args.len(), 1 | 2))?;
            let timestamp_ms = match args.get(1) {
                Some(t) => number(t)?,
                None => now_ms,
            };
            Request::Event(AppEvent::DragMove {
                y: number(args[0])?,
                timestamp_ms,
            })
        }
        "drag-end" => {
            arity("0", args.is_empty())?;
            Request::Event(AppEvent::DragEnd)
        }
        "wheel" => {
            arity("1", args.len() == 1)?;
            Request::Event(AppEvent::Wheel(number(args[0])?))
        }
        "resize" => {
            arity("1", args.len() == 1)?;
            Request::Event(AppEvent::Resize(number(args[0])?))
        }
        "select" => {
            arity("1 or 5", matches!(args.len(), 1 | 5))?;
            let index = number(args[0])?;
            let origin = if args.len() == 5 {
                Rect::new(
                    number(args[1])?,
                    number(args[2])?,
                    number(args[3])?,
                    number(args[4])?,
                )
            } else {
                Rect::default()
            };
            Request::Event(AppEvent::Select { index, origin })
        }
        "close" => {
            arity("0", args.is_empty())?;
            Request::Event(AppEvent::CloseModal)
        }
        "reload" => {
            arity("0", args.is_empty())?;
            Request::Event(AppEvent::ContentReload)
        }
        "frame" => Request::Frame,
        "modal" => Request::Modal,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(request)
}
