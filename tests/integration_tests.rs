//! End-to-end tests: the real command router over the real TCP
//! transport, against a local listener bound on an OS-assigned port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;

use chatline::{
    CommandRouter, Disposition, SessionEvent, SessionState, TcpTransport, ViewRenderer,
};

/// Display surface capturing everything the router renders.
#[derive(Clone, Default)]
struct RecordingView {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingView {
    fn last(&self) -> Option<String> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl ViewRenderer for RecordingView {
    fn display(&mut self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Bind a listener on an OS-assigned port.
async fn setup_server() -> (TcpListener, String, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().unwrap();
    (listener, addr.ip().to_string(), addr.port())
}

fn client_for(
    host: &str,
    port: u16,
) -> (
    CommandRouter<TcpTransport, RecordingView>,
    RecordingView,
    mpsc::Receiver<SessionEvent>,
) {
    let (tx, rx) = mpsc::channel(10);
    let view = RecordingView::default();
    let router = CommandRouter::new(
        SessionState::new(host, port),
        TcpTransport::new(tx),
        view.clone(),
    );
    (router, view, rx)
}

#[tokio::test]
async fn payload_round_trip_through_real_sockets() {
    let (listener, host, port) = setup_server().await;
    let (mut router, view, mut events) = client_for(&host, port);

    router.connect().await.expect("eager connect");
    let (server_stream, _) = listener.accept().await.unwrap();
    let (read_half, mut write_half) = server_stream.into_split();

    // Client -> server: forwarded verbatim, one line per payload.
    let disposition = router.handle("hello over tcp").await;
    assert_eq!(disposition, Disposition::Continue);
    let mut server_lines = BufReader::new(read_half).lines();
    let received = timeout(Duration::from_secs(1), server_lines.next_line())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(received.as_deref(), Some("hello over tcp"));

    // Server -> client: surfaces as an inbound event, displayed as-is.
    write_half.write_all(b"welcome aboard\n").await.unwrap();
    let event = timeout(Duration::from_secs(1), events.recv())
        .await
        .unwrap()
        .unwrap();
    router.on_event(event).await;
    assert_eq!(view.last().as_deref(), Some("welcome aboard"));
}

#[tokio::test]
async fn logoff_reconfigure_login_against_second_server() {
    let (first, host, port) = setup_server().await;
    let (second, second_host, second_port) = setup_server().await;
    let (mut router, view, mut events) = client_for(&host, port);

    router.connect().await.expect("eager connect");
    let _first_conn = first.accept().await.unwrap();

    router.handle("#logoff").await;
    assert_eq!(view.last().as_deref(), Some("Logged off"));

    router.handle(&format!("#sethost {second_host}")).await;
    router.handle(&format!("#setport {second_port}")).await;
    router.handle("#login").await;
    assert!(!router.session().is_logged_out());

    let (mut conn, _) = second.accept().await.unwrap();
    router.handle("routed to the new server").await;
    let mut buf = vec![0u8; b"routed to the new server\n".len()];
    timeout(Duration::from_secs(1), conn.read_exact(&mut buf))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(buf, b"routed to the new server\n");

    // The logoff earlier must not have produced an unsolicited-close
    // event.
    assert!(timeout(Duration::from_millis(200), events.recv())
        .await
        .is_err());
}

#[tokio::test]
async fn peer_shutdown_notifies_and_keeps_running() {
    let (listener, host, port) = setup_server().await;
    let (mut router, view, mut events) = client_for(&host, port);

    router.connect().await.expect("eager connect");
    let (server_stream, _) = listener.accept().await.unwrap();
    drop(server_stream);

    let event = timeout(Duration::from_secs(1), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, SessionEvent::Closed);

    let disposition = router.on_event(event).await;
    assert_eq!(disposition, Disposition::Continue);
    assert_eq!(view.last().as_deref(), Some("Connection has been closed"));
}

#[tokio::test]
async fn login_against_dead_server_reports_and_stays_logged_out() {
    let (listener, host, port) = setup_server().await;
    let (mut router, view, _events) = client_for(&host, port);

    router.connect().await.expect("eager connect");
    let first_conn = listener.accept().await.unwrap();
    router.handle("#logoff").await;
    drop(first_conn);
    drop(listener);

    router.handle("#login").await;
    assert!(router.session().is_logged_out());
    let last = view.last().unwrap();
    assert!(
        last.starts_with("Error connecting"),
        "unexpected message: {last}"
    );
}

#[tokio::test]
async fn quit_closes_the_socket() {
    let (listener, host, port) = setup_server().await;
    let (mut router, _view, _events) = client_for(&host, port);

    router.connect().await.expect("eager connect");
    let (mut server_stream, _) = listener.accept().await.unwrap();

    let disposition = router.handle("#quit").await;
    assert_eq!(disposition, Disposition::Quit);

    // The server observes EOF once the client side is gone.
    let mut buf = [0u8; 1];
    let n = timeout(Duration::from_secs(1), server_stream.read(&mut buf))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(n, 0);
}
