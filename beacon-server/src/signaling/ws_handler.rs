use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use beacon_core::{ClientMessage, ServerMessage, SessionId};

use crate::relay::RelayCommand;
use crate::signaling::SignalingService;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let session_id = SessionId::new();
    info!("New WebSocket connection: {}", session_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_session(session_id.clone(), tx);

    if service
        .relay_tx
        .send(RelayCommand::Connect {
            session_id: session_id.clone(),
        })
        .await
        .is_err()
    {
        error!("Relay is gone; refusing connection {}", session_id);
        service.remove_session(&session_id);
        return;
    }

    service.send(
        &session_id,
        ServerMessage::Welcome {
            socket_id: session_id.clone(),
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let session_id = session_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => {
                            let cmd = match message {
                                ClientMessage::Join { room_id } => RelayCommand::Join {
                                    session_id: session_id.clone(),
                                    room_id,
                                },
                                ClientMessage::Signal { room_id, to, data } => {
                                    RelayCommand::Signal {
                                        session_id: session_id.clone(),
                                        room_id,
                                        to,
                                        data,
                                    }
                                }
                                ClientMessage::Leave { room_id } => RelayCommand::Leave {
                                    session_id: session_id.clone(),
                                    room_id,
                                },
                            };
                            if let Err(e) = service.relay_tx.send(cmd).await {
                                error!("Relay died: {}", e);
                                break;
                            }
                        }
                        // Malformed frames are dropped; the connection and
                        // everyone else's stay untouched.
                        Err(e) => warn!("Invalid message from {}: {:?}", session_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_session(&session_id);

    // Whatever ended the connection, the relay must see exactly one
    // disconnect so remaining room members get their peer-left.
    let _ = service
        .relay_tx
        .send(RelayCommand::Disconnect {
            session_id: session_id.clone(),
        })
        .await;

    info!("WebSocket disconnected: {}", session_id);
}
