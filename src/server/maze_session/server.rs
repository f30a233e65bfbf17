//! Maze session actors.
//!
//! A `MazeSession` owns one maze instance, its elapsed-time clock and its
//! WebSocket subscribers. The `MazeSessionManager` creates, looks up and closes
//! sessions. Every message to a session is processed sequentially, so moves,
//! ticks and regenerations never interleave.
//!
//! A session with no subscribers and no commands for `IDLE_TIMEOUT_SECS` stops
//! itself, taking its clock with it.

use actix::prelude::*;
use actix::MessageResult;
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::config::anti_spam::BAN_DURATION_SECONDS;
use crate::config::maze::{IDLE_TIMEOUT_SECS, MAZE_COLS, MAZE_ROWS, MAX_SESSIONS, TICK_INTERVAL_SECS};
use crate::game::state::MazeState;
use crate::game::types::{MazeError, MoveOutcome};
use crate::server::error::MazeServiceError;
use crate::server::maze_session::messages::{
    ApplyCommand, CommandResult, GetSnapshot, MazeCommand, MazeSnapshot, MazeStateUpdate,
    ProcessClientMessage, SessionClosed, Shutdown, Subscribe, Unsubscribe,
};
use crate::server::maze_session::session::MazeWsSession;

pub struct MazeSession {
    pub session_id: Uuid,
    pub level: u32,
    pub state: MazeState,
    pub subscribers: HashMap<Uuid, Addr<MazeWsSession>>,

    rng: StdRng,
    tick_interval: Duration,
    clock: Option<SpawnHandle>,
    idle_timeout: Duration,
    idle_timer: Option<SpawnHandle>,
}

impl MazeSession {
    /// Create a session with the configured maze size and tick cadence.
    pub fn new(session_id: Uuid, seed: Option<u64>) -> Result<Self, MazeError> {
        Self::with_dimensions(
            session_id,
            seed,
            MAZE_COLS,
            MAZE_ROWS,
            Duration::from_secs(TICK_INTERVAL_SECS),
        )
    }

    pub fn with_dimensions(
        session_id: Uuid,
        seed: Option<u64>,
        width: usize,
        height: usize,
        tick_interval: Duration,
    ) -> Result<Self, MazeError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = MazeState::generate(width, height, &mut rng)?;

        Ok(Self {
            session_id,
            level: 1,
            state,
            subscribers: HashMap::new(),
            rng,
            tick_interval,
            clock: None,
            idle_timeout: Duration::from_secs(IDLE_TIMEOUT_SECS),
            idle_timer: None,
        })
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn snapshot(&self) -> MazeSnapshot {
        MazeSnapshot::new(self.session_id, self.level, &self.state)
    }

    fn broadcast(&self, outcome: Option<MoveOutcome>) {
        let update = MazeStateUpdate { state: self.snapshot(), outcome };
        for addr in self.subscribers.values() {
            addr.do_send(update.clone());
        }
    }

    /// Start the elapsed-time clock, unless the maze is already solved.
    fn start_clock(&mut self, ctx: &mut Context<Self>) {
        self.stop_clock(ctx);
        if self.state.is_solved() {
            return;
        }
        let handle = ctx.run_interval(self.tick_interval, |act, ctx| {
            act.on_tick(ctx);
        });
        self.clock = Some(handle);
    }

    fn stop_clock(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.clock.take() {
            ctx.cancel_future(handle);
        }
    }

    /// Record activity: restart the idle countdown.
    fn touch(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.idle_timer.take() {
            ctx.cancel_future(handle);
        }
        let handle = ctx.run_later(self.idle_timeout, |act, ctx| {
            act.on_idle(ctx);
        });
        self.idle_timer = Some(handle);
    }

    fn on_idle(&mut self, ctx: &mut Context<Self>) {
        self.idle_timer = None;
        if self.subscribers.is_empty() {
            info!(
                "[MazeSession] Idle for {:?}, stopping session_id={}",
                self.idle_timeout, self.session_id
            );
            ctx.stop();
        } else {
            // Open sockets keep the maze alive.
            self.touch(ctx);
        }
    }

    fn on_tick(&mut self, ctx: &mut Context<Self>) {
        if self.state.tick() {
            debug!(
                "[MazeSession] Tick session_id={} elapsed={}s",
                self.session_id, self.state.elapsed_secs
            );
            self.broadcast(None);
        } else {
            self.stop_clock(ctx);
        }
    }

    fn apply_command(&mut self, command: MazeCommand, ctx: &mut Context<Self>) -> Option<MoveOutcome> {
        match command {
            MazeCommand::Move(direction) => {
                let outcome = self.state.apply_move(direction);
                debug!(
                    "[MazeSession] Move {} -> {:?} session_id={} pos=({}, {})",
                    direction, outcome, self.session_id, self.state.player.x, self.state.player.y
                );
                if outcome == MoveOutcome::Solved {
                    self.stop_clock(ctx);
                    info!(
                        "[MazeSession] Solved session_id={} level={} in {}s",
                        self.session_id, self.level, self.state.elapsed_secs
                    );
                }
                Some(outcome)
            }
            MazeCommand::Regenerate => {
                self.stop_clock(ctx);
                match self.state.regenerate(&mut self.rng) {
                    Ok(()) => {
                        self.level += 1;
                        info!("[MazeSession] Regenerated session_id={} level={}", self.session_id, self.level);
                    }
                    // Dimensions were validated when the session was created.
                    Err(e) => warn!("[MazeSession] Regeneration failed session_id={}: {}", self.session_id, e),
                }
                self.start_clock(ctx);
                None
            }
        }
    }
}

impl Actor for MazeSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "[MazeSession] Started session_id={} size={}x{}",
            self.session_id,
            self.state.grid.width(),
            self.state.grid.height()
        );
        self.start_clock(ctx);
        self.touch(ctx);
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        self.stop_clock(ctx);
        for addr in self.subscribers.values() {
            addr.do_send(SessionClosed { session_id: self.session_id });
        }
        info!("[MazeSession] Stopped session_id={}", self.session_id);
    }
}

impl Handler<ApplyCommand> for MazeSession {
    type Result = MessageResult<ApplyCommand>;

    fn handle(&mut self, msg: ApplyCommand, ctx: &mut Context<Self>) -> Self::Result {
        self.touch(ctx);
        let outcome = self.apply_command(msg.0, ctx);
        if outcome.is_none_or(MoveOutcome::changed_state) {
            self.broadcast(outcome);
        }
        MessageResult(CommandResult { outcome, state: self.snapshot() })
    }
}

impl Handler<ProcessClientMessage> for MazeSession {
    type Result = ();

    fn handle(&mut self, msg: ProcessClientMessage, ctx: &mut Context<Self>) -> Self::Result {
        if !self.subscribers.contains_key(&msg.connection_id) {
            warn!("[MazeSession] Command from unregistered connection {}", msg.connection_id);
            return;
        }
        self.touch(ctx);
        let outcome = self.apply_command(msg.command, ctx);
        if outcome.is_none_or(MoveOutcome::changed_state) {
            self.broadcast(outcome);
        } else {
            // Rejected moves are only echoed to the sender.
            msg.addr.do_send(MazeStateUpdate { state: self.snapshot(), outcome });
        }
    }
}

impl Handler<GetSnapshot> for MazeSession {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, ctx: &mut Context<Self>) -> Self::Result {
        self.touch(ctx);
        MessageResult(self.snapshot())
    }
}

impl Handler<Subscribe> for MazeSession {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, ctx: &mut Context<Self>) -> Self::Result {
        self.touch(ctx);
        msg.addr.do_send(MazeStateUpdate { state: self.snapshot(), outcome: None });
        self.subscribers.insert(msg.connection_id, msg.addr);
        debug!(
            "[MazeSession] Subscribed connection={} session_id={} subscribers={}",
            msg.connection_id,
            self.session_id,
            self.subscribers.len()
        );
    }
}

impl Handler<Unsubscribe> for MazeSession {
    type Result = ();

    fn handle(&mut self, msg: Unsubscribe, ctx: &mut Context<Self>) -> Self::Result {
        self.subscribers.remove(&msg.connection_id);
        // The idle countdown starts again from the last departure.
        self.touch(ctx);
    }
}

impl Handler<Shutdown> for MazeSession {
    type Result = ();

    fn handle(&mut self, _: Shutdown, ctx: &mut Context<Self>) -> Self::Result {
        ctx.stop();
    }
}

pub struct MazeSessionManager {
    sessions: HashMap<Uuid, Addr<MazeSession>>,
    max_sessions: usize,
    idle_timeout: Duration,
    // Peers banned for flooding, with the end of their ban.
    banned_peers: HashMap<IpAddr, Instant>,
}

#[derive(Message)]
#[rtype(result = "Result<(Uuid, Addr<MazeSession>), MazeServiceError>")]
pub struct CreateMaze {
    pub seed: Option<u64>,
}

#[derive(Message)]
#[rtype(result = "Result<Addr<MazeSession>, MazeServiceError>")]
pub struct GetMazeSession {
    pub session_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "Result<(), MazeServiceError>")]
pub struct CloseMaze {
    pub session_id: Uuid,
}

/// Ban a peer for `BAN_DURATION_SECONDS`, across all of its connections.
#[derive(Message)]
#[rtype(result = "()")]
pub struct BanPeer {
    pub peer: IpAddr,
}

/// Remaining ban in seconds, or `None` when the peer may connect.
#[derive(Message)]
#[rtype(result = "Option<u64>")]
pub struct CheckBan {
    pub peer: IpAddr,
}

impl MazeSessionManager {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }

    pub fn with_capacity(max_sessions: usize) -> Self {
        Self::with_limits(max_sessions, Duration::from_secs(IDLE_TIMEOUT_SECS))
    }

    pub fn with_limits(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            max_sessions,
            idle_timeout,
            banned_peers: HashMap::new(),
        }
    }

    pub fn ban_remaining_secs(&mut self, peer: IpAddr) -> Option<u64> {
        let now = Instant::now();
        self.banned_peers.retain(|_, until| *until > now);
        self.banned_peers
            .get(&peer)
            .map(|until| until.saturating_duration_since(now).as_secs().max(1))
    }

    pub fn create_maze(&mut self, seed: Option<u64>) -> Result<(Uuid, Addr<MazeSession>), MazeServiceError> {
        // Sessions that stopped on their own are no longer worth counting.
        self.sessions.retain(|_, addr| addr.connected());
        if self.sessions.len() >= self.max_sessions {
            warn!("[MazeSessionManager] Refusing new session, limit {} reached", self.max_sessions);
            return Err(MazeServiceError::TooManySessions(self.max_sessions));
        }

        let session_id = Uuid::new_v4();
        let session = MazeSession::new(session_id, seed)?
            .with_idle_timeout(self.idle_timeout)
            .start();
        self.sessions.insert(session_id, session.clone());
        info!("[MazeSessionManager] Created session_id={} seed={:?}", session_id, seed);
        Ok((session_id, session))
    }
}

impl Default for MazeSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for MazeSessionManager {
    type Context = Context<Self>;
}

impl Handler<CreateMaze> for MazeSessionManager {
    type Result = Result<(Uuid, Addr<MazeSession>), MazeServiceError>;

    fn handle(&mut self, msg: CreateMaze, _: &mut Context<Self>) -> Self::Result {
        self.create_maze(msg.seed)
    }
}

impl Handler<GetMazeSession> for MazeSessionManager {
    type Result = Result<Addr<MazeSession>, MazeServiceError>;

    fn handle(&mut self, msg: GetMazeSession, _: &mut Context<Self>) -> Self::Result {
        self.sessions.get(&msg.session_id)
            .filter(|addr| addr.connected())
            .cloned()
            .ok_or(MazeServiceError::SessionNotFound(msg.session_id))
    }
}

impl Handler<BanPeer> for MazeSessionManager {
    type Result = ();

    fn handle(&mut self, msg: BanPeer, _: &mut Context<Self>) -> Self::Result {
        let until = Instant::now() + Duration::from_secs(BAN_DURATION_SECONDS);
        self.banned_peers.insert(msg.peer, until);
        warn!("[MazeSessionManager] Banned peer={} for {}s", msg.peer, BAN_DURATION_SECONDS);
    }
}

impl Handler<CheckBan> for MazeSessionManager {
    type Result = Option<u64>;

    fn handle(&mut self, msg: CheckBan, _: &mut Context<Self>) -> Self::Result {
        self.ban_remaining_secs(msg.peer)
    }
}

impl Handler<CloseMaze> for MazeSessionManager {
    type Result = Result<(), MazeServiceError>;

    fn handle(&mut self, msg: CloseMaze, _: &mut Context<Self>) -> Self::Result {
        let session = self.sessions.remove(&msg.session_id)
            .ok_or(MazeServiceError::SessionNotFound(msg.session_id))?;
        session.do_send(Shutdown);
        info!("[MazeSessionManager] Closed session_id={}", msg.session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Direction, Position};

    fn quick_session(width: usize, height: usize, tick_ms: u64) -> MazeSession {
        MazeSession::with_dimensions(Uuid::new_v4(), Some(1), width, height, Duration::from_millis(tick_ms))
            .unwrap()
    }

    #[actix_web::test]
    async fn test_clock_ticks_while_active() {
        let addr = quick_session(5, 5, 10).start();
        actix_web::rt::time::sleep(Duration::from_millis(150)).await;
        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert!(snapshot.elapsed_secs > 0);
        assert!(!snapshot.solved);
    }

    #[actix_web::test]
    async fn test_solving_freezes_clock() {
        let addr = quick_session(2, 1, 10).start();
        let result = addr.send(ApplyCommand(MazeCommand::Move(Direction::Right))).await.unwrap();
        assert_eq!(result.outcome, Some(MoveOutcome::Solved));
        assert!(result.state.solved);

        let frozen = result.state.elapsed_secs;
        actix_web::rt::time::sleep(Duration::from_millis(100)).await;
        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.elapsed_secs, frozen);

        let ignored = addr.send(ApplyCommand(MazeCommand::Move(Direction::Left))).await.unwrap();
        assert_eq!(ignored.outcome, Some(MoveOutcome::Ignored));
        assert_eq!(ignored.state.player, Position::new(1, 0));
    }

    #[actix_web::test]
    async fn test_regenerate_resets_and_advances_level() {
        let addr = quick_session(2, 1, 1000).start();
        addr.send(ApplyCommand(MazeCommand::Move(Direction::Right))).await.unwrap();

        let result = addr.send(ApplyCommand(MazeCommand::Regenerate)).await.unwrap();
        assert_eq!(result.outcome, None);
        assert_eq!(result.state.level, 2);
        assert!(!result.state.solved);
        assert_eq!(result.state.player, Position::ORIGIN);
        assert_eq!(result.state.elapsed_secs, 0);
    }

    #[actix_web::test]
    async fn test_blocked_move_reports_without_moving() {
        let addr = quick_session(2, 1, 1000).start();
        let result = addr.send(ApplyCommand(MazeCommand::Move(Direction::Up))).await.unwrap();
        assert_eq!(result.outcome, Some(MoveOutcome::Blocked));
        assert_eq!(result.state.player, Position::ORIGIN);
    }

    #[actix_web::test]
    async fn test_manager_create_get_close() {
        let manager = MazeSessionManager::new().start();
        let (session_id, _) = manager.send(CreateMaze { seed: Some(5) }).await.unwrap().unwrap();

        let session = manager.send(GetMazeSession { session_id }).await.unwrap().unwrap();
        let snapshot = session.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.session_id, session_id);
        assert_eq!((snapshot.width, snapshot.height), (MAZE_COLS, MAZE_ROWS));
        assert_eq!(snapshot.level, 1);

        manager.send(CloseMaze { session_id }).await.unwrap().unwrap();
        let missing = manager.send(GetMazeSession { session_id }).await.unwrap();
        assert!(matches!(missing, Err(MazeServiceError::SessionNotFound(id)) if id == session_id));
    }

    #[actix_web::test]
    async fn test_manager_enforces_capacity() {
        let manager = MazeSessionManager::with_capacity(1).start();
        manager.send(CreateMaze { seed: None }).await.unwrap().unwrap();
        let refused = manager.send(CreateMaze { seed: None }).await.unwrap();
        assert!(matches!(refused, Err(MazeServiceError::TooManySessions(1))));
    }

    #[actix_web::test]
    async fn test_abandoned_session_stops_and_frees_slot() {
        let manager = MazeSessionManager::with_limits(1, Duration::from_millis(50)).start();
        let (_, abandoned) = manager.send(CreateMaze { seed: Some(2) }).await.unwrap().unwrap();

        actix_web::rt::time::sleep(Duration::from_millis(250)).await;
        assert!(abandoned.send(GetSnapshot).await.is_err());

        let reused = manager.send(CreateMaze { seed: Some(3) }).await.unwrap();
        assert!(reused.is_ok());
    }

    #[actix_web::test]
    async fn test_activity_keeps_session_alive() {
        let addr = quick_session(3, 3, 1000)
            .with_idle_timeout(Duration::from_millis(100))
            .start();
        for _ in 0..6 {
            actix_web::rt::time::sleep(Duration::from_millis(40)).await;
            assert!(addr.send(GetSnapshot).await.is_ok());
        }

        actix_web::rt::time::sleep(Duration::from_millis(300)).await;
        assert!(addr.send(GetSnapshot).await.is_err());
    }

    #[actix_web::test]
    async fn test_ban_applies_per_peer() {
        let manager = MazeSessionManager::new().start();
        let banned: IpAddr = "10.0.0.7".parse().unwrap();
        let other: IpAddr = "10.0.0.8".parse().unwrap();

        assert_eq!(manager.send(CheckBan { peer: banned }).await.unwrap(), None);
        manager.send(BanPeer { peer: banned }).await.unwrap();

        let remaining = manager.send(CheckBan { peer: banned }).await.unwrap();
        assert!(remaining.is_some_and(|secs| secs > 0 && secs <= BAN_DURATION_SECONDS));
        assert_eq!(manager.send(CheckBan { peer: other }).await.unwrap(), None);
    }
}
