//! WebSocket server and connection handling.

use crate::config::ServerConfig;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::room::{GameRoom, RoomError};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use lexicube_core::{DrawSequence, Move, WordList};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// All running games
    pub rooms: DashMap<Uuid, GameRoom>,
    /// Mapping from player ID to their game ID
    pub player_rooms: DashMap<Uuid, Uuid>,
    /// Mapping from player ID to their message sender
    pub player_senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
    pub words: WordList,
    pub config: ServerConfig,
}

impl ServerState {
    pub fn new(config: ServerConfig, words: WordList) -> Self {
        Self {
            rooms: DashMap::new(),
            player_rooms: DashMap::new(),
            player_senders: DashMap::new(),
            words,
            config,
        }
    }

    /// Letter supply for a new game.
    fn draw_sequence(&self) -> DrawSequence {
        match &self.config.draw_pattern {
            Some(pattern) => DrawSequence::cycling(pattern),
            None => DrawSequence::shuffled_bag(&mut rand::thread_rng()),
        }
    }

    /// Send a message to a specific player.
    pub fn send_to_player(&self, player_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.player_senders.get(&player_id) {
            let _ = sender.send(msg);
        }
    }

    /// Broadcast a message to all players in a game.
    pub fn broadcast_to_room(&self, room_id: Uuid, msg: ServerMessage) {
        if let Some(room) = self.rooms.get(&room_id) {
            for player_id in room.players.keys() {
                self.send_to_player(*player_id, msg.clone());
            }
        }
    }

    /// Broadcast a message to all players in a game except one.
    pub fn broadcast_to_room_except(&self, room_id: Uuid, except: Uuid, msg: ServerMessage) {
        if let Some(room) = self.rooms.get(&room_id) {
            for player_id in room.players.keys() {
                if *player_id != except {
                    self.send_to_player(*player_id, msg.clone());
                }
            }
        }
    }

    fn send_error(&self, player_id: Uuid, message: impl Into<String>) {
        self.send_to_player(
            player_id,
            ServerMessage::Error {
                message: message.into(),
            },
        );
    }

    fn current_room(&self, player_id: Uuid) -> Option<Uuid> {
        self.player_rooms.get(&player_id).map(|r| *r)
    }
}

/// Run the WebSocket server.
pub async fn run_server(state: Arc<ServerState>) -> anyhow::Result<()> {
    let addr = state.config.addr;
    let listener = TcpListener::bind(addr).await?;
    info!("Lexicube server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Assign a player ID
    let player_id = Uuid::new_v4();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.player_senders.insert(player_id, tx);

    // Send welcome message
    let welcome = ServerMessage::Welcome { player_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text)).await?;

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to encode message for {}: {}", player_id, e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => handle_message(player_id, client_msg, &state),
                Err(e) => {
                    warn!("Invalid message from {}: {} ({})", player_id, text, e);
                    state.send_error(player_id, "Invalid message");
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", player_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                state.send_to_player(player_id, ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", player_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up on disconnect
    leave_room(player_id, &state);
    state.player_senders.remove(&player_id);
    send_task.abort();

    info!("Connection closed for {}", player_id);
    Ok(())
}

/// Handle a client message.
fn handle_message(player_id: Uuid, msg: ClientMessage, state: &Arc<ServerState>) {
    match msg {
        ClientMessage::CreateGame { player_name } => {
            if state.current_room(player_id).is_some() {
                state.send_error(player_id, "Already in a game");
                return;
            }

            let room_id = Uuid::new_v4();
            let room = GameRoom::new(
                room_id,
                player_id,
                player_name,
                state.config.max_players,
                state.draw_sequence(),
                &mut rand::thread_rng(),
            );
            let game_info = room.to_info();
            let rack = ServerMessage::rack(room.rack(player_id).unwrap_or_default());
            let board = ServerMessage::Board {
                tiles: room.tiles().to_vec(),
            };

            state.rooms.insert(room_id, room);
            state.player_rooms.insert(player_id, room_id);
            info!("Player {} created game {}", player_id, room_id);

            state.send_to_player(player_id, ServerMessage::GameCreated { game_id: room_id });
            state.send_to_player(player_id, ServerMessage::JoinedGame { game: game_info });
            state.send_to_player(player_id, board);
            state.send_to_player(player_id, rack);
        }

        ClientMessage::JoinGame { game_id, player_name } => {
            if state.current_room(player_id).is_some() {
                state.send_error(player_id, "Already in a game");
                return;
            }

            let Some(mut room) = state.rooms.get_mut(&game_id) else {
                state.send_error(player_id, "Game not found");
                return;
            };

            match room.add_player(player_id, player_name) {
                Ok(()) => {
                    let game_info = room.to_info();
                    let rack = ServerMessage::rack(room.rack(player_id).unwrap_or_default());
                    let board = ServerMessage::Board {
                        tiles: room.tiles().to_vec(),
                    };
                    state.player_rooms.insert(player_id, game_id);
                    info!(
                        "Player {} joined game {} ({} players)",
                        player_id,
                        game_id,
                        room.player_count()
                    );

                    // Release lock before broadcasting
                    drop(room);

                    state.send_to_player(
                        player_id,
                        ServerMessage::JoinedGame {
                            game: game_info.clone(),
                        },
                    );
                    state.send_to_player(player_id, board);
                    state.send_to_player(player_id, rack);

                    // Notify other players
                    state.broadcast_to_room_except(
                        game_id,
                        player_id,
                        ServerMessage::GameUpdated { game: game_info },
                    );
                }
                Err(e) => {
                    state.send_error(player_id, e.to_string());
                }
            }
        }

        ClientMessage::LeaveGame => {
            if leave_room(player_id, state) {
                state.send_to_player(player_id, ServerMessage::LeftGame);
            }
        }

        ClientMessage::GetRack => {
            let Some(room_id) = state.current_room(player_id) else {
                state.send_error(player_id, "Not in a game");
                return;
            };
            let reply = match state.rooms.get(&room_id) {
                Some(room) => match room.rack(player_id) {
                    Ok(rack) => ServerMessage::rack(rack),
                    Err(e) => ServerMessage::Error { message: e.to_string() },
                },
                None => ServerMessage::Error {
                    message: "Game not found".to_string(),
                },
            };
            state.send_to_player(player_id, reply);
        }

        ClientMessage::GetBoard => {
            let Some(room_id) = state.current_room(player_id) else {
                state.send_error(player_id, "Not in a game");
                return;
            };
            let tiles = state.rooms.get(&room_id).map(|room| room.tiles().to_vec());
            match tiles {
                Some(tiles) => state.send_to_player(player_id, ServerMessage::Board { tiles }),
                None => state.send_error(player_id, "Game not found"),
            }
        }

        msg @ ClientMessage::MakePlay { .. } => {
            if let Some(mv) = msg.into_move() {
                make_play(player_id, &mv, state);
            }
        }

        ClientMessage::Ping => {
            state.send_to_player(player_id, ServerMessage::Pong);
        }
    }
}

/// Evaluate and apply a play.
///
/// The room's map entry stays locked for the whole evaluation, so plays in
/// one game are handled one at a time.
fn make_play(player_id: Uuid, mv: &Move, state: &Arc<ServerState>) {
    let Some(room_id) = state.current_room(player_id) else {
        state.send_error(player_id, "Not in a game");
        return;
    };
    let Some(mut room) = state.rooms.get_mut(&room_id) else {
        state.send_error(player_id, "Game not found");
        return;
    };

    match room.make_play(player_id, mv, &state.words) {
        Ok(outcome) => {
            let rack = ServerMessage::rack(room.rack(player_id).unwrap_or_default());
            let game_info = room.to_info();

            drop(room);

            state.send_to_player(player_id, rack);
            state.broadcast_to_room(
                room_id,
                ServerMessage::TilesPlaced {
                    player_id,
                    player_name: outcome.player_name,
                    word: outcome.resolved.word,
                    tiles: outcome.resolved.placements,
                },
            );
            state.broadcast_to_room(room_id, ServerMessage::GameUpdated { game: game_info });
        }
        Err(RoomError::Placement(e)) => {
            drop(room);
            warn!("Rejected play from {} in {}: {}", player_id, room_id, e);
            state.send_to_player(player_id, ServerMessage::rejected(e));
        }
        Err(e) => {
            drop(room);
            state.send_error(player_id, e.to_string());
        }
    }
}

/// Take a player out of their game, closing it when it empties.
///
/// Returns false if the player was not in a game.
fn leave_room(player_id: Uuid, state: &Arc<ServerState>) -> bool {
    let Some((_, room_id)) = state.player_rooms.remove(&player_id) else {
        return false;
    };

    let Some(mut room) = state.rooms.get_mut(&room_id) else {
        return true;
    };

    let is_empty = match room.remove_player(player_id) {
        Ok(is_empty) => is_empty,
        Err(e) => {
            warn!("Player {} listed in game {} but not seated: {}", player_id, room_id, e);
            false
        }
    };
    if is_empty {
        drop(room);
        state.rooms.remove(&room_id);
        info!("Game {} closed", room_id);
    } else {
        let game_info = room.to_info();
        drop(room);
        state.broadcast_to_room(room_id, ServerMessage::GameUpdated { game: game_info });
    }
    true
}
