//! TCP front door: accepts connections, runs handshakes and starts games.

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use super::lobby::LobbyRegistry;
use super::session::GameSession;
use crate::protocol::{read_message, write_message, ErrorCode, Handshake, Message};
use crate::sync::StopFlag;

const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Connections that have not finished their handshake yet.
#[derive(Default)]
struct Handshakes {
    next_id: u64,
    streams: HashMap<u64, TcpStream>,
}

/// State shared by the accept loop and the connection threads.
struct Shared {
    lobbies: LobbyRegistry<TcpStream>,
    handshakes: Mutex<Handshakes>,
    stop: StopFlag,
}

impl Shared {
    /// Track `stream` until its handshake ends. `None` once shutdown has begun.
    fn begin_handshake(&self, stream: &TcpStream) -> Option<u64> {
        let mut handshakes = self.handshakes.lock();
        if self.stop.is_stopped() {
            return None;
        }
        let id = handshakes.next_id;
        handshakes.next_id += 1;
        match stream.try_clone() {
            Ok(clone) => {
                handshakes.streams.insert(id, clone);
            }
            Err(e) => warn!("cannot track handshake {id}: {e}"),
        }
        Some(id)
    }

    fn end_handshake(&self, id: u64) {
        self.handshakes.lock().streams.remove(&id);
    }

    /// Close every connection still in its handshake.
    fn abort_handshakes(&self) {
        let mut handshakes = self.handshakes.lock();
        for (_, stream) in handshakes.streams.drain() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

/// The relay server. Share it behind an `Arc` to call `shutdown` from
/// another thread while `run` blocks.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    shared: Arc<Shared>,
}

impl Server {
    /// Bind the listening socket. Port 0 picks a free port.
    pub fn bind(addr: SocketAddr) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;
        Ok(Server {
            listener,
            local_addr,
            shared: Arc::new(Shared {
                lobbies: LobbyRegistry::new(),
                handshakes: Mutex::new(Handshakes::default()),
                stop: StopFlag::new(),
            }),
        })
    }

    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of lobbies waiting for a second player.
    #[must_use]
    pub fn open_lobbies(&self) -> usize {
        self.shared.lobbies.len()
    }

    /// Accept connections until `shutdown`, then wait for every game to end.
    pub fn run(&self) {
        info!("listening on {}", self.local_addr);
        let mut connections: Vec<JoinHandle<()>> = Vec::new();
        for stream in self.listener.incoming() {
            if self.shared.stop.is_stopped() {
                break;
            }
            match stream {
                Ok(stream) => {
                    let shared = Arc::clone(&self.shared);
                    let spawned = thread::Builder::new()
                        .name("connection".to_string())
                        .spawn(move || handle_connection(stream, &shared));
                    match spawned {
                        Ok(handle) => connections.push(handle),
                        Err(e) => error!("cannot start connection thread: {e}"),
                    }
                }
                Err(e) => error!("accept failed: {e}"),
            }
            connections.retain(|handle| !handle.is_finished());
        }

        info!("shutting down, closing {} open lobbies", self.shared.lobbies.len());
        self.shared.abort_handshakes();
        close_lobbies(&self.shared);
        for handle in connections {
            let _ = handle.join();
        }
        info!("server stopped");
    }

    /// Stop accepting, end running games and release waiting players.
    pub fn shutdown(&self) {
        self.shared.stop.stop();
        let wake = match self.local_addr.ip() {
            IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            ip => ip,
        };
        // Unblocks `accept` so the loop sees the flag.
        let addr = SocketAddr::new(wake, self.local_addr.port());
        if let Err(e) = TcpStream::connect_timeout(&addr, WAKE_TIMEOUT) {
            warn!("could not wake the accept loop: {e}");
        }
    }
}

fn reply_error(stream: &mut TcpStream, code: ErrorCode) {
    if let Err(e) = write_message(stream, &Message::Error(code)) {
        warn!("could not send {code}: {e}");
    }
    let _ = stream.shutdown(Shutdown::Both);
}

/// Whether a lobby creator is still connected and silent, as it must be
/// until the game starts.
fn creator_waiting(creator: &TcpStream) -> bool {
    if let Err(e) = creator.set_nonblocking(true) {
        warn!("cannot poll lobby creator: {e}");
        return false;
    }
    let mut buf = [0u8; 1];
    let waiting = match creator.peek(&mut buf) {
        Err(e) => e.kind() == io::ErrorKind::WouldBlock,
        Ok(_) => false,
    };
    waiting && creator.set_nonblocking(false).is_ok()
}

fn close_lobbies(shared: &Shared) {
    for (lobby_id, mut creator) in shared.lobbies.drain() {
        info!("closing lobby {lobby_id}");
        reply_error(&mut creator, ErrorCode::ServerDisconnected);
    }
}

/// Read the handshake and either open a lobby or run the joined game.
fn handle_connection(mut stream: TcpStream, shared: &Shared) {
    let peer = stream
        .peer_addr()
        .map_or_else(|_| "unknown peer".to_string(), |addr| addr.to_string());
    info!("new connection from {peer}");

    let Some(handshake) = shared.begin_handshake(&stream) else {
        reply_error(&mut stream, ErrorCode::ServerDisconnected);
        return;
    };
    let hello = read_message(&mut stream);
    shared.end_handshake(handshake);

    match hello {
        Ok(Message::Handshake(Handshake::CreateSession)) => open_lobby(stream, &peer, shared),
        Ok(Message::Handshake(Handshake::ConnectToSession { lobby_id })) => {
            join_lobby(stream, lobby_id, &peer, shared);
        }
        Ok(other) => {
            warn!("{peer} opened with {other} instead of a handshake");
            reply_error(&mut stream, ErrorCode::ServerError);
        }
        Err(e) if e.is_disconnect() => {
            if shared.stop.is_stopped() {
                info!("closed {peer} during its handshake");
            } else {
                info!("{peer} left before the handshake: {e}");
            }
        }
        Err(e) => {
            warn!("bad handshake from {peer}: {e}");
            reply_error(&mut stream, ErrorCode::ServerError);
        }
    }
}

fn open_lobby(mut stream: TcpStream, peer: &str, shared: &Shared) {
    let waiting = match stream.try_clone() {
        Ok(waiting) => waiting,
        Err(e) => {
            error!("cannot keep connection from {peer}: {e}");
            reply_error(&mut stream, ErrorCode::ServerError);
            return;
        }
    };
    let stale = shared.lobbies.prune(creator_waiting);
    if stale > 0 {
        debug!("dropped {stale} abandoned lobbies");
    }
    let lobby_id = shared.lobbies.create(waiting);
    if shared.stop.is_stopped() {
        shared.lobbies.join(lobby_id);
        reply_error(&mut stream, ErrorCode::ServerDisconnected);
        return;
    }
    info!("{peer} opened lobby {lobby_id} ({lobby_id:08X})");
    if let Err(e) = write_message(&mut stream, &Message::LobbyCreated { lobby_id }) {
        error!("could not confirm lobby {lobby_id} to {peer}: {e}");
        shared.lobbies.join(lobby_id);
    }
}

fn join_lobby(mut stream: TcpStream, lobby_id: u32, peer: &str, shared: &Shared) {
    let Some(creator) = shared.lobbies.join(lobby_id) else {
        warn!("{peer} asked for lobby {lobby_id}, which does not exist");
        reply_error(&mut stream, ErrorCode::LobbyNotExists);
        return;
    };
    if !creator_waiting(&creator) {
        warn!("{peer} asked for lobby {lobby_id}, whose creator has gone");
        let _ = creator.shutdown(Shutdown::Both);
        reply_error(&mut stream, ErrorCode::LobbyNotExists);
        return;
    }
    info!("{peer} joined lobby {lobby_id}");
    let session = GameSession::new(lobby_id, creator, stream, shared.stop.clone());
    session.run();
}
