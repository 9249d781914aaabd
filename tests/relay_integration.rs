use std::io::{BufRead, BufReader};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use checkers_relay::board::{Move, MoveKind, Spot};
use checkers_relay::protocol::{
    read_frame, read_message, write_frame, write_message, ErrorCode, GameFlags, Handshake,
    Message, ProtocolError,
};
use checkers_relay::server::Server;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

fn start_server() -> (Arc<Server>, JoinHandle<()>) {
    let server = Arc::new(Server::bind("127.0.0.1:0".parse().unwrap()).unwrap());
    let runner = Arc::clone(&server);
    let handle = thread::spawn(move || runner.run());
    (server, handle)
}

fn connect(addr: SocketAddr) -> TcpStream {
    let stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(IO_TIMEOUT)).unwrap();
    stream
}

fn create_lobby(addr: SocketAddr) -> (TcpStream, u32) {
    let mut creator = connect(addr);
    write_message(&mut creator, &Message::Handshake(Handshake::CreateSession)).unwrap();
    match read_message(&mut creator).unwrap() {
        Message::LobbyCreated { lobby_id } => (creator, lobby_id),
        other => panic!("expected LOBBY_CREATED, got {other}"),
    }
}

fn join_lobby(addr: SocketAddr, lobby_id: u32) -> TcpStream {
    let mut joiner = connect(addr);
    let hello = Message::Handshake(Handshake::ConnectToSession { lobby_id });
    write_message(&mut joiner, &hello).unwrap();
    joiner
}

fn game_flags(stream: &mut TcpStream) -> GameFlags {
    match read_message(stream).unwrap() {
        Message::GameStarted(flags) => flags,
        other => panic!("expected GAME_STARTED, got {other}"),
    }
}

fn move_message(from: u8, to: u8) -> Message {
    Message::Move(Move::new(
        Spot::new(from).unwrap(),
        Spot::new(to).unwrap(),
        MoveKind::NORMAL,
    ))
}

fn assert_closed(stream: &mut TcpStream) {
    assert!(matches!(
        read_message(stream),
        Err(ProtocolError::Closed | ProtocolError::Io(_))
    ));
}

#[test]
fn two_players_play_until_an_invalid_move() {
    let (server, handle) = start_server();
    let addr = server.local_addr();

    let (mut first, lobby_id) = create_lobby(addr);
    assert_ne!(lobby_id, 0);
    assert_eq!(server.open_lobbies(), 1);
    let mut second = join_lobby(addr, lobby_id);

    let first_flags = game_flags(&mut first);
    let second_flags = game_flags(&mut second);
    assert!(first_flags.is_white() != second_flags.is_white());
    let (mut white, mut black) = if first_flags.is_white() {
        (first, second)
    } else {
        (second, first)
    };
    assert_eq!(server.open_lobbies(), 0);

    // White's move reaches Black byte for byte.
    let sent = move_message(22, 18).encode();
    write_frame(&mut white, &sent).unwrap();
    assert_eq!(read_frame(&mut black).unwrap(), sent);

    // Black is now to move on the server.
    write_message(&mut black, &move_message(9, 14)).unwrap();
    assert_eq!(read_message(&mut white).unwrap(), move_message(9, 14));

    // 18 can capture 14, so a quiet move is illegal.
    write_message(&mut white, &move_message(21, 17)).unwrap();
    let invalid = Message::Error(ErrorCode::InvalidMove);
    assert_eq!(read_message(&mut white).unwrap(), invalid);
    assert_eq!(read_message(&mut black).unwrap(), invalid);
    assert_closed(&mut white);
    assert_closed(&mut black);

    server.shutdown();
    handle.join().unwrap();
}

#[test]
fn resignation_is_relayed() {
    let (server, handle) = start_server();
    let addr = server.local_addr();

    let (mut creator, lobby_id) = create_lobby(addr);
    let mut joiner = join_lobby(addr, lobby_id);
    assert!(game_flags(&mut creator).is_white());
    assert!(!game_flags(&mut joiner).is_white());

    write_message(&mut joiner, &Message::Resign).unwrap();
    assert_eq!(read_message(&mut creator).unwrap(), Message::Resign);
    assert_closed(&mut creator);

    server.shutdown();
    handle.join().unwrap();
}

#[test]
fn joining_a_missing_lobby_fails() {
    let (server, handle) = start_server();
    let mut stream = join_lobby(server.local_addr(), 0xdead_beef);
    assert_eq!(
        read_message(&mut stream).unwrap(),
        Message::Error(ErrorCode::LobbyNotExists)
    );
    assert_closed(&mut stream);

    server.shutdown();
    handle.join().unwrap();
}

#[test]
fn opening_without_handshake_is_rejected() {
    let (server, handle) = start_server();
    let mut stream = connect(server.local_addr());
    write_message(&mut stream, &Message::Resign).unwrap();
    assert_eq!(
        read_message(&mut stream).unwrap(),
        Message::Error(ErrorCode::ServerError)
    );

    server.shutdown();
    handle.join().unwrap();
}

#[test]
fn shutdown_releases_everyone() {
    let (server, handle) = start_server();
    let addr = server.local_addr();

    let (mut waiting, _) = create_lobby(addr);
    let (mut white, lobby_id) = create_lobby(addr);
    let mut black = join_lobby(addr, lobby_id);
    game_flags(&mut white);
    game_flags(&mut black);

    server.shutdown();
    handle.join().unwrap();

    let gone = Message::Error(ErrorCode::ServerDisconnected);
    assert_eq!(read_message(&mut waiting).unwrap(), gone);
    assert_eq!(read_message(&mut white).unwrap(), gone);
    assert_eq!(read_message(&mut black).unwrap(), gone);
}

#[test]
fn shutdown_closes_silent_connections() {
    let (server, handle) = start_server();
    let mut silent = connect(server.local_addr());
    // Let the server pick the connection up before shutting down.
    thread::sleep(Duration::from_millis(100));

    server.shutdown();
    handle.join().unwrap();
    match read_message(&mut silent) {
        Ok(message) => assert_eq!(message, Message::Error(ErrorCode::ServerDisconnected)),
        Err(e) => assert!(e.is_disconnect(), "unexpected error: {e}"),
    }
}

#[test]
fn abandoned_lobby_cannot_be_joined() {
    let (server, handle) = start_server();
    let addr = server.local_addr();

    let (creator, lobby_id) = create_lobby(addr);
    creator.shutdown(Shutdown::Both).unwrap();
    drop(creator);
    thread::sleep(Duration::from_millis(100));

    let mut joiner = join_lobby(addr, lobby_id);
    assert_eq!(
        read_message(&mut joiner).unwrap(),
        Message::Error(ErrorCode::LobbyNotExists)
    );
    assert_eq!(server.open_lobbies(), 0);

    server.shutdown();
    handle.join().unwrap();
}

#[test]
fn abandoned_lobbies_are_dropped_on_create() {
    let (server, handle) = start_server();
    let addr = server.local_addr();

    let (creator, _) = create_lobby(addr);
    drop(creator);
    thread::sleep(Duration::from_millis(100));

    let (_waiting, _) = create_lobby(addr);
    assert_eq!(server.open_lobbies(), 1);

    server.shutdown();
    handle.join().unwrap();
}

#[test]
fn binary_prints_usage() {
    let exe = env!("CARGO_BIN_EXE_checkers_relay");
    let output = Command::new(exe).arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--port"));

    let output = Command::new(exe).arg("--bogus").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn binary_accepts_a_lobby() {
    let exe = env!("CARGO_BIN_EXE_checkers_relay");
    let mut child = Command::new(exe)
        .args(["--bind", "127.0.0.1", "--port", "0", "--log-level", "info"])
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn relay binary");

    let stderr = child.stderr.take().unwrap();
    let mut reader = BufReader::new(stderr);
    let mut addr = None;
    let mut line = String::new();
    while reader.read_line(&mut line).unwrap() > 0 {
        if let Some((_, rest)) = line.split_once("listening on ") {
            addr = rest.trim().parse::<SocketAddr>().ok();
            break;
        }
        line.clear();
    }
    let addr = addr.expect("server never reported its address");

    let (_creator, lobby_id) = create_lobby(addr);
    assert_ne!(lobby_id, 0);

    child.kill().unwrap();
    child.wait().unwrap();
}
