use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use beacon_core::{RoomId, ServerMessage, SessionId, SignalPayload};

use crate::relay::RelayCommand;
use crate::signaling::SignalingOutput;

/// The relay actor. Owns all room membership and routes signaling messages
/// between sessions; it has no knowledge of media.
///
/// Commands arrive over a single mpsc channel and are processed strictly in
/// order. That ordering is what makes a join's membership snapshot atomic
/// with respect to concurrent joins and leaves on the same room.
pub struct Relay {
    /// Member sets per room. A room exists exactly while it has members.
    rooms: HashMap<RoomId, HashSet<SessionId>>,

    /// Reverse index: the rooms each connected session currently belongs
    /// to. Needed so a disconnect can leave every room the session was in.
    sessions: HashMap<SessionId, HashSet<RoomId>>,

    command_rx: mpsc::Receiver<RelayCommand>,

    /// Interface for delivering messages back to connected sessions.
    output: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>, output: Arc<dyn SignalingOutput>) -> Self {
        Self {
            rooms: HashMap::new(),
            sessions: HashMap::new(),
            command_rx,
            output,
        }
    }

    /// Spawn the actor and return its command sender.
    pub fn spawn(output: Arc<dyn SignalingOutput>) -> mpsc::Sender<RelayCommand> {
        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(Relay::new(rx, output).run());
        tx
    }

    /// Run the event loop until every command sender is dropped.
    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Relay event loop finished");
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Connect { session_id } => {
                debug!("Session {} connected", session_id);
                self.sessions.entry(session_id).or_default();
            }

            RelayCommand::Join {
                session_id,
                room_id,
            } => self.join(session_id, room_id).await,

            RelayCommand::Signal {
                session_id,
                room_id,
                to,
                data,
            } => self.signal(session_id, room_id, to, data).await,

            RelayCommand::Leave {
                session_id,
                room_id,
            } => {
                if let Some(rooms) = self.sessions.get_mut(&session_id) {
                    rooms.remove(&room_id);
                }
                self.leave_room(&session_id, &room_id).await;
            }

            RelayCommand::Disconnect { session_id } => {
                let Some(rooms) = self.sessions.remove(&session_id) else {
                    return;
                };
                debug!("Session {} disconnected ({} rooms)", session_id, rooms.len());
                for room_id in rooms {
                    self.leave_room(&session_id, &room_id).await;
                }
            }
        }
    }

    async fn join(&mut self, session_id: SessionId, room_id: RoomId) {
        let members = self.rooms.entry(room_id.clone()).or_default();

        // Snapshot the other members before admitting the joiner; this is
        // the exact set that existed at the moment of the join.
        let others: Vec<SessionId> = members
            .iter()
            .filter(|id| **id != session_id)
            .cloned()
            .collect();

        members.insert(session_id.clone());
        self.sessions
            .entry(session_id.clone())
            .or_default()
            .insert(room_id.clone());

        info!("Session {} joined room {}", session_id, room_id);

        for other in &others {
            self.output
                .deliver(
                    other.clone(),
                    ServerMessage::PeerJoined {
                        socket_id: session_id.clone(),
                    },
                )
                .await;
        }

        self.output
            .deliver(session_id, ServerMessage::PeersInRoom { peers: others })
            .await;
    }

    async fn signal(
        &mut self,
        session_id: SessionId,
        room_id: RoomId,
        to: Option<SessionId>,
        data: SignalPayload,
    ) {
        match to {
            Some(target) => {
                if !self.sessions.contains_key(&target) {
                    warn!(
                        "Dropping signal from {} to unknown session {}",
                        session_id, target
                    );
                    return;
                }
                self.output
                    .deliver(
                        target,
                        ServerMessage::Signal {
                            from: session_id,
                            data,
                        },
                    )
                    .await;
            }
            None => {
                let Some(members) = self.rooms.get(&room_id) else {
                    warn!(
                        "Dropping broadcast from {} to unknown room {}",
                        session_id, room_id
                    );
                    return;
                };
                let recipients: Vec<SessionId> = members
                    .iter()
                    .filter(|id| **id != session_id)
                    .cloned()
                    .collect();
                for recipient in recipients {
                    self.output
                        .deliver(
                            recipient,
                            ServerMessage::Signal {
                                from: session_id.clone(),
                                data: data.clone(),
                            },
                        )
                        .await;
                }
            }
        }
    }

    /// Remove a session from one room, notifying the remaining members and
    /// garbage-collecting the room once empty.
    async fn leave_room(&mut self, session_id: &SessionId, room_id: &RoomId) {
        let Some(members) = self.rooms.get_mut(room_id) else {
            return;
        };
        if !members.remove(session_id) {
            return;
        }

        info!("Session {} left room {}", session_id, room_id);

        if members.is_empty() {
            self.rooms.remove(room_id);
            debug!("Room {} is empty, destroying", room_id);
            return;
        }

        let remaining: Vec<SessionId> = members.iter().cloned().collect();
        for member in remaining {
            self.output
                .deliver(
                    member,
                    ServerMessage::PeerLeft {
                        socket_id: session_id.clone(),
                    },
                )
                .await;
        }
    }
}
