//! WebSocket session handler for a hosted maze.
//!
//! This actor manages one client connection to a maze session: it validates
//! incoming commands at the boundary (malformed directions never reach the maze),
//! relays valid ones to the `MazeSession`, and pushes state updates back.
use std::net::IpAddr;

use actix::prelude::*;
use actix_web::{web, http::StatusCode, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::game::types::Direction;
use crate::server::anti_spam::AntiSpamState;
use crate::server::error::{parse_session_id, MazeServiceError};
use crate::server::maze_session::messages::{
    ClientWsMessage, MazeCommand, MazeStateUpdate, ProcessClientMessage, ServerWsMessage,
    SessionClosed, Subscribe, Unsubscribe,
};
use crate::server::maze_session::server::{BanPeer, CheckBan, GetMazeSession, MazeSession, MazeSessionManager};
use crate::server::ws_actor_utils::WsActorUtils;
use crate::server::ws_error::http_error_response;

pub struct MazeWsSession {
    pub connection_id: Uuid,
    pub session_id: Uuid,
    pub session_addr: Addr<MazeSession>,
    /// Remote address, banned through the manager when this connection floods.
    pub peer: Option<IpAddr>,
    manager: Addr<MazeSessionManager>,
    anti_spam: AntiSpamState,
}

impl MazeWsSession {
    pub fn new(
        session_id: Uuid,
        session_addr: Addr<MazeSession>,
        peer: Option<IpAddr>,
        manager: Addr<MazeSessionManager>,
    ) -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            session_id,
            session_addr,
            peer,
            manager,
            anti_spam: AntiSpamState::new(),
        }
    }

    fn send_message(&self, msg: &ServerWsMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                error!("[MazeWs] Failed to serialize server message: {}", e);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }

    fn relay(&mut self, command: MazeCommand, ctx: &mut ws::WebsocketContext<Self>) {
        self.anti_spam.reset_on_valid_action();
        self.session_addr.do_send(ProcessClientMessage {
            command,
            connection_id: self.connection_id,
            addr: ctx.address(),
        });
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::from_str::<ClientWsMessage>(text) {
            Ok(ClientWsMessage::Move(raw)) => match raw.parse::<Direction>() {
                Ok(direction) => self.relay(MazeCommand::Move(direction), ctx),
                Err(e) => {
                    debug!(
                        "[MazeWs] Rejected direction {:?} from connection={} session_id={}",
                        raw, self.connection_id, self.session_id
                    );
                    self.send_error_and_maybe_ban(
                        ctx,
                        "INVALID_DIRECTION",
                        &e.to_string(),
                        Some(serde_json::json!({ "input": raw })),
                    );
                }
            },
            Ok(ClientWsMessage::Regenerate) => self.relay(MazeCommand::Regenerate, ctx),
            Ok(ClientWsMessage::Ping) => self.send_message(&ServerWsMessage::Pong, ctx),
            Err(e) => {
                self.send_error_and_maybe_ban(
                    ctx,
                    "INVALID_MESSAGE",
                    &format!("Invalid client message: {e}"),
                    None,
                );
            }
        }
    }
}

impl WsActorUtils for MazeWsSession {
    fn anti_spam(&mut self) -> &mut AntiSpamState {
        &mut self.anti_spam
    }

    fn connection_label(&self) -> String {
        self.connection_id.to_string()
    }

    fn on_banned(&mut self) {
        if let Some(peer) = self.peer {
            self.manager.do_send(BanPeer { peer });
        }
    }
}

impl Actor for MazeWsSession {
    type Context = ws::WebsocketContext<Self>;

    /// Registers the connection with its maze session, which replies with the current state.
    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "[MazeWs] Connected connection={} session_id={} peer={:?}",
            self.connection_id, self.session_id, self.peer
        );
        self.session_addr.do_send(Subscribe {
            connection_id: self.connection_id,
            addr: ctx.address(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.session_addr.do_send(Unsubscribe { connection_id: self.connection_id });
        info!("[MazeWs] Disconnected connection={} session_id={}", self.connection_id, self.session_id);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for MazeWsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                if self.check_flood(ctx) {
                    return;
                }
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                if self.check_flood(ctx) {
                    return;
                }
                self.send_error_and_maybe_ban(ctx, "UNSUPPORTED", "Binary messages are not supported", None);
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => (),
            Err(e) => {
                warn!(
                    "[MazeWs] Protocol error on connection={} session_id={}: {}",
                    self.connection_id, self.session_id, e
                );
                ctx.stop();
            }
        }
    }
}

impl Handler<MazeStateUpdate> for MazeWsSession {
    type Result = ();

    fn handle(&mut self, msg: MazeStateUpdate, ctx: &mut Self::Context) -> Self::Result {
        self.send_message(&ServerWsMessage::from(msg), ctx);
    }
}

impl Handler<SessionClosed> for MazeWsSession {
    type Result = ();

    fn handle(&mut self, msg: SessionClosed, ctx: &mut Self::Context) -> Self::Result {
        self.send_message(&ServerWsMessage::Closed { session_id: msg.session_id }, ctx);
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Normal,
            description: Some("Maze session closed".into()),
        }));
        ctx.stop();
    }
}

/// WebSocket endpoint for a maze session: `/ws/maze/{session_id}`.
pub async fn ws_maze(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<String>,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let session_id = parse_session_id(&path)?;
    let peer = req.peer_addr().map(|addr| addr.ip());

    if let Some(peer) = peer {
        let banned = data.session_manager
            .send(CheckBan { peer })
            .await
            .map_err(MazeServiceError::from)?;
        if let Some(ban_remaining_secs) = banned {
            debug!("[MazeWs] Refused banned peer={} for session_id={}", peer, session_id);
            return Ok(http_error_response(
                "BANNED",
                "You have been banned for flooding the maze. Please try again later.",
                Some(serde_json::json!({ "ban_remaining_secs": ban_remaining_secs })),
                StatusCode::FORBIDDEN,
            ));
        }
    }

    let session_addr = data.session_manager
        .send(GetMazeSession { session_id })
        .await
        .map_err(MazeServiceError::from)??;

    ws::start(
        MazeWsSession::new(session_id, session_addr, peer, data.session_manager.clone()),
        &req,
        stream,
    )
}
