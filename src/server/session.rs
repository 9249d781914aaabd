//! One game between two connected players.
//!
//! The session owns the authoritative `Position`. Each peer gets a reader
//! thread that forwards frames over a channel; the session thread handles
//! them one at a time, so the engine only ever sees one move at a time.

use std::fmt;
use std::io;
use std::net::{Shutdown, TcpStream};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::board::{Color, GameStatus, Move, Position};
use crate::protocol::{
    read_frame, write_frame, write_message, ErrorCode, Frame, GameFlags, Message, MessageType,
    ProtocolError,
};
use crate::sync::StopFlag;

/// How often an idle session checks the stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why a session ended. The color names the peer that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Resigned(Color),
    InvalidMove(Color),
    Disconnected(Color),
    ProtocolViolation(Color),
    Shutdown,
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Resigned(c) => write!(f, "{c} resigned"),
            SessionOutcome::InvalidMove(c) => write!(f, "{c} sent an invalid move"),
            SessionOutcome::Disconnected(c) => write!(f, "{c} disconnected"),
            SessionOutcome::ProtocolViolation(c) => write!(f, "{c} broke the protocol"),
            SessionOutcome::Shutdown => write!(f, "server shutting down"),
        }
    }
}

struct PeerEvent {
    color: Color,
    frame: Result<Frame, ProtocolError>,
}

/// A running game: two peer connections and the engine that referees them.
pub struct GameSession {
    lobby_id: u32,
    /// Indexed by color: the lobby creator plays White.
    peers: [TcpStream; 2],
    position: Mutex<Position>,
    stop: StopFlag,
}

impl GameSession {
    #[must_use]
    pub fn new(lobby_id: u32, white: TcpStream, black: TcpStream, stop: StopFlag) -> Self {
        GameSession {
            lobby_id,
            peers: [white, black],
            position: Mutex::new(Position::starting()),
            stop,
        }
    }

    #[must_use]
    pub fn lobby_id(&self) -> u32 {
        self.lobby_id
    }

    /// Snapshot of the authoritative position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position.lock().clone()
    }

    fn peer(&self, color: Color) -> &TcpStream {
        &self.peers[color.index()]
    }

    fn send(&self, color: Color, message: &Message) -> Result<(), ProtocolError> {
        debug!("lobby {}: -> {color}: {message}", self.lobby_id);
        let mut stream = self.peer(color);
        write_message(&mut stream, message)
    }

    /// Best-effort error report; the session is ending anyway.
    fn notify(&self, color: Color, code: ErrorCode) {
        if let Err(e) = self.send(color, &Message::Error(code)) {
            warn!("lobby {}: could not send {code} to {color}: {e}", self.lobby_id);
        }
    }

    fn relay(&self, from: Color, frame: &Frame) -> Result<(), ProtocolError> {
        let to = from.opponent();
        debug!("lobby {}: {from} -> {to}: {frame}", self.lobby_id);
        let mut stream = self.peer(to);
        write_frame(&mut stream, frame)
    }

    fn spawn_reader(&self, color: Color, events: Sender<PeerEvent>) -> io::Result<JoinHandle<()>> {
        let mut stream = self.peer(color).try_clone()?;
        thread::Builder::new()
            .name(format!("lobby-{}-{color}", self.lobby_id))
            .spawn(move || loop {
                let frame = read_frame(&mut stream);
                let done = frame.is_err();
                if events.send(PeerEvent { color, frame }).is_err() || done {
                    break;
                }
            })
    }

    fn close(&self) {
        for stream in &self.peers {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }

    /// Play the game to its end and close both connections.
    pub fn run(&self) -> SessionOutcome {
        info!("lobby {}: game started", self.lobby_id);
        let outcome = self.play_out();
        self.close();
        info!("lobby {}: session ended, {outcome}", self.lobby_id);
        outcome
    }

    fn play_out(&self) -> SessionOutcome {
        for (color, flags) in [(Color::White, GameFlags::IM_WHITE), (Color::Black, GameFlags::NONE)] {
            if let Err(e) = self.send(color, &Message::GameStarted(flags)) {
                error!("lobby {}: {color} unreachable: {e}", self.lobby_id);
                self.notify(color.opponent(), ErrorCode::OpponentDisconnected);
                return SessionOutcome::Disconnected(color);
            }
        }

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        for color in Color::BOTH {
            match self.spawn_reader(color, tx.clone()) {
                Ok(handle) => readers.push(handle),
                Err(e) => {
                    error!("lobby {}: cannot read from {color}: {e}", self.lobby_id);
                    self.notify(color.opponent(), ErrorCode::OpponentDisconnected);
                    self.close();
                    readers.into_iter().for_each(|r| {
                        let _ = r.join();
                    });
                    return SessionOutcome::Disconnected(color);
                }
            }
        }
        drop(tx);

        let outcome = self.event_loop(&rx);
        self.close();
        for reader in readers {
            let _ = reader.join();
        }
        outcome
    }

    fn event_loop(&self, events: &Receiver<PeerEvent>) -> SessionOutcome {
        loop {
            match events.recv_timeout(POLL_INTERVAL) {
                Ok(PeerEvent { color, frame }) => {
                    if let Some(outcome) = self.handle(color, frame) {
                        return outcome;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if self.stop.is_stopped() {
                        for color in Color::BOTH {
                            self.notify(color, ErrorCode::ServerDisconnected);
                        }
                        return SessionOutcome::Shutdown;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("lobby {}: both readers gone", self.lobby_id);
                    return SessionOutcome::Shutdown;
                }
            }
        }
    }

    fn handle(&self, color: Color, frame: Result<Frame, ProtocolError>) -> Option<SessionOutcome> {
        let opponent = color.opponent();
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) if e.is_disconnect() => {
                info!("lobby {}: {color} disconnected: {e}", self.lobby_id);
                self.notify(opponent, ErrorCode::OpponentDisconnected);
                return Some(SessionOutcome::Disconnected(color));
            }
            Err(e) => {
                warn!("lobby {}: unreadable frame from {color}: {e}", self.lobby_id);
                self.notify(opponent, ErrorCode::ServerError);
                return Some(SessionOutcome::ProtocolViolation(color));
            }
        };
        debug!("lobby {}: <- {color}: {frame}", self.lobby_id);

        match Message::decode(&frame) {
            Ok(Message::Move(mv)) => self.play(color, mv, &frame),
            Err(ProtocolError::InvalidMove { .. })
            | Err(ProtocolError::ShortPayload {
                message: MessageType::Move,
                ..
            }) => self.reject(color, &frame),
            Ok(Message::Resign) => {
                info!("lobby {}: {color} resigned", self.lobby_id);
                if let Err(e) = self.relay(color, &frame) {
                    warn!("lobby {}: could not relay resignation: {e}", self.lobby_id);
                }
                Some(SessionOutcome::Resigned(color))
            }
            Ok(Message::Disconnect) => {
                info!("lobby {}: {color} left the game", self.lobby_id);
                self.notify(opponent, ErrorCode::OpponentDisconnected);
                Some(SessionOutcome::Disconnected(color))
            }
            Ok(other) => {
                warn!("lobby {}: unexpected {other} from {color}", self.lobby_id);
                self.notify(opponent, ErrorCode::ServerError);
                Some(SessionOutcome::ProtocolViolation(color))
            }
            Err(e) => {
                warn!("lobby {}: bad message from {color}: {e}", self.lobby_id);
                self.notify(opponent, ErrorCode::ServerError);
                Some(SessionOutcome::ProtocolViolation(color))
            }
        }
    }

    /// Validate and apply a move from `color`, then forward the received frame.
    fn play(&self, color: Color, mv: Move, frame: &Frame) -> Option<SessionOutcome> {
        {
            let mut position = self.position.lock();
            if position.turn() != Some(color) || !position.is_valid(mv) {
                drop(position);
                return self.reject(color, frame);
            }
            position.apply_move(mv);
            debug!("lobby {}: {color} played {mv}\n{}", self.lobby_id, *position);
            if let GameStatus::Won(winner) = position.status() {
                info!("lobby {}: {winner} has won", self.lobby_id);
            }
        }

        match self.relay(color, frame) {
            Ok(()) => None,
            Err(e) => {
                error!("lobby {}: relay to {} failed: {e}", self.lobby_id, color.opponent());
                self.notify(color, ErrorCode::OpponentDisconnected);
                Some(SessionOutcome::Disconnected(color.opponent()))
            }
        }
    }

    fn reject(&self, color: Color, frame: &Frame) -> Option<SessionOutcome> {
        warn!("lobby {}: invalid move from {color}: {frame}", self.lobby_id);
        for peer in Color::BOTH {
            self.notify(peer, ErrorCode::InvalidMove);
        }
        Some(SessionOutcome::InvalidMove(color))
    }
}
