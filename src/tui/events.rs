//! TUI events
//!
//! Everything the main loop reacts to arrives on one unbounded channel: terminal
//! input from the crossterm listener and stage results from request tasks.

use crate::api::ApiError;
use crate::wizard::{RequestTicket, StagePayload};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
    /// A stage request finished (successfully or not)
    StageFinished {
        ticket: RequestTicket,
        outcome: Result<StagePayload, ApiError>,
    },
}

pub struct EventHandler;

impl EventHandler {
    /// Forward terminal events into the app channel until the receiver is dropped
    pub fn start_terminal_listener(sender: UnboundedSender<TuiEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            while let Some(event) = reader.next().await {
                let event = match event {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => TuiEvent::Key(key),
                    Ok(Event::Paste(text)) => TuiEvent::Paste(text),
                    Ok(Event::Resize(_, _)) => TuiEvent::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!("Terminal event error: {}", e);
                        continue;
                    }
                };
                if sender.send(event).is_err() {
                    break;
                }
            }
        })
    }
}
