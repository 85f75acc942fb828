//! Weather controller: owns the `DisplayState` and runs lookups off the
//! caller's task. Results come back via mpsc and are applied one at a time.
//!
//! Every submission gets a `Ticket`. Messages carrying a ticket other than
//! the latest one are dropped, so a slow answer to an earlier query never
//! overwrites the state of a later one.

use std::sync::Arc;

use citycast_weather::{pipeline, PipelineEvent, PlaceQuery, WeatherSource};
use tokio::sync::{mpsc, watch};

use crate::display_state::DisplayState;

/// Identifies one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: PlaceQuery,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &PlaceQuery {
        &self.query
    }
}

/// Messages sent from lookup tasks back to the controller
#[derive(Debug)]
pub enum ControllerMessage {
    Event(Ticket, PipelineEvent),
    /// The lookup task has stopped, normally or not.
    Finished(Ticket),
}

impl ControllerMessage {
    pub fn ticket(&self) -> &Ticket {
        match self {
            Self::Event(ticket, _) | Self::Finished(ticket) => ticket,
        }
    }
}

pub struct WeatherController {
    source: Arc<dyn WeatherSource>,
    state: DisplayState,
    current: Option<Ticket>,
    next_generation: u64,
    tx: mpsc::UnboundedSender<ControllerMessage>,
    rx: mpsc::UnboundedReceiver<ControllerMessage>,
    state_tx: watch::Sender<DisplayState>,
}

impl WeatherController {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(DisplayState::Idle);
        Self {
            source,
            state: DisplayState::Idle,
            current: None,
            next_generation: 0,
            tx,
            rx,
            state_tx,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Receive every state the controller moves to.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state_tx.subscribe()
    }

    /// The submission still in flight, if any.
    pub fn current_ticket(&self) -> Option<&Ticket> {
        self.current.as_ref()
    }

    /// Start a lookup for `query`, superseding any lookup still in flight.
    ///
    /// The state is `Loading` when this returns. Must be called from within
    /// a tokio runtime.
    pub fn submit(&mut self, query: PlaceQuery) -> Ticket {
        self.next_generation += 1;
        let ticket = Ticket {
            generation: self.next_generation,
            query,
        };
        tracing::info!(
            "Looking up {:?} (generation {})",
            ticket.query.as_str(),
            ticket.generation
        );

        self.current = Some(ticket.clone());
        self.set_state(DisplayState::on_submit(&ticket.query));

        let source = self.source.clone();
        let events_tx = self.tx.clone();
        let task_ticket = ticket.clone();
        let lookup = tokio::spawn(async move {
            pipeline::run(source.as_ref(), &task_ticket.query, |event| {
                let _ = events_tx.send(ControllerMessage::Event(task_ticket.clone(), event));
            })
            .await;
        });

        let done_tx = self.tx.clone();
        let done_ticket = ticket.clone();
        tokio::spawn(async move {
            if let Err(e) = lookup.await {
                tracing::error!(
                    "Lookup task for generation {} ended abnormally: {}",
                    done_ticket.generation,
                    e
                );
            }
            let _ = done_tx.send(ControllerMessage::Finished(done_ticket));
        });

        ticket
    }

    /// Wait for the next message from any lookup task.
    pub async fn recv(&mut self) -> Option<ControllerMessage> {
        self.rx.recv().await
    }

    /// Apply a message. Returns false, leaving the state alone, when the
    /// message belongs to a superseded or already finished submission.
    pub fn apply(&mut self, message: ControllerMessage) -> bool {
        if self.current.as_ref() != Some(message.ticket()) {
            tracing::debug!(
                "Dropping stale result for {:?} (generation {})",
                message.ticket().query.as_str(),
                message.ticket().generation
            );
            return false;
        }

        let state = std::mem::take(&mut self.state);
        let next = match message {
            ControllerMessage::Event(_, event) => state.on_event(event),
            ControllerMessage::Finished(_) => {
                self.current = None;
                state.on_finished()
            }
        };
        self.set_state(next);
        true
    }

    /// Process messages until the current submission has finished.
    pub async fn settle(&mut self) -> &DisplayState {
        while self.current.is_some() {
            let Some(message) = self.recv().await else {
                break;
            };
            self.apply(message);
        }
        &self.state
    }

    fn set_state(&mut self, state: DisplayState) {
        self.state = state;
        self.state_tx.send_replace(self.state.clone());
    }
}
