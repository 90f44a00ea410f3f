//! Integration tests for IRCv3 capability negotiation.

mod common;

use common::client::numeric;
use common::{TestClient, TestServer};
use nomad_proto::Message;

/// Parameters of a CAP reply after the target: `[sub, list]`.
fn cap_params(msg: &Message) -> (String, String) {
    let params = msg.command.params();
    assert_eq!(msg.command.name(), "CAP", "not a CAP reply: {msg:?}");
    (params[1].clone(), params[2].clone())
}

async fn recv_cap(client: &mut TestClient) -> (String, String) {
    let msg = client.recv().await.unwrap();
    cap_params(&msg)
}

#[tokio::test]
async fn ls_suspends_registration_until_end() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("CAP LS 302").await.unwrap();
    let ls = client.recv().await.unwrap();
    assert_eq!(ls.command.params()[0], "*");
    assert_eq!(cap_params(&ls), ("LS".into(), "multi-prefix".into()));

    client.send("NICK dan").await.unwrap();
    client.send("USER dan 0 * :Dan").await.unwrap();
    client.assert_silent().await;

    client.send("CAP REQ :multi-prefix").await.unwrap();
    let ack = client.recv().await.unwrap();
    assert_eq!(ack.command.params()[0], "dan");
    assert_eq!(cap_params(&ack), ("ACK".into(), "multi-prefix".into()));
    client.assert_silent().await;

    client.send("CAP END").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(1));
}

#[tokio::test]
async fn req_alone_also_suspends_registration() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("NICK dan").await.unwrap();
    client.send("CAP REQ :multi-prefix").await.unwrap();
    assert_eq!(recv_cap(&mut client).await.0, "ACK");
    client.send("USER dan 0 * :Dan").await.unwrap();
    client.assert_silent().await;

    client.send("CAP END").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(1));
}

#[tokio::test]
async fn unsupported_names_are_naked() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("CAP REQ :multi-prefix sasl bogus").await.unwrap();
    assert_eq!(
        recv_cap(&mut client).await,
        ("ACK".into(), "multi-prefix".into())
    );
    assert_eq!(
        recv_cap(&mut client).await,
        ("NAK".into(), "sasl bogus".into())
    );

    client.send("CAP LIST").await.unwrap();
    assert_eq!(
        recv_cap(&mut client).await,
        ("LIST".into(), "multi-prefix".into())
    );
}

#[tokio::test]
async fn disable_and_clear() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("CAP REQ :multi-prefix").await.unwrap();
    recv_cap(&mut client).await;
    client.send("CAP REQ :-multi-prefix").await.unwrap();
    assert_eq!(
        recv_cap(&mut client).await,
        ("ACK".into(), "-multi-prefix".into())
    );
    client.send("CAP LIST").await.unwrap();
    assert_eq!(recv_cap(&mut client).await, ("LIST".into(), String::new()));

    client.send("CAP REQ :multi-prefix").await.unwrap();
    recv_cap(&mut client).await;
    client.send("CAP CLEAR").await.unwrap();
    assert_eq!(recv_cap(&mut client).await, ("ACK".into(), String::new()));
}

#[tokio::test]
async fn sticky_capabilities_survive_clear() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("CAP REQ :=multi-prefix").await.unwrap();
    assert_eq!(
        recv_cap(&mut client).await,
        ("ACK".into(), "=multi-prefix".into())
    );

    client.send("CAP REQ :-multi-prefix").await.unwrap();
    assert_eq!(
        recv_cap(&mut client).await,
        ("NAK".into(), "-multi-prefix".into())
    );

    client.send("CAP CLEAR").await.unwrap();
    assert_eq!(
        recv_cap(&mut client).await,
        ("ACK".into(), "multi-prefix".into())
    );
}

#[tokio::test]
async fn ack_modifier_waits_for_client_ack() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("CAP REQ :~multi-prefix").await.unwrap();
    assert_eq!(
        recv_cap(&mut client).await,
        ("ACK".into(), "~multi-prefix".into())
    );
    client.send("CAP LIST").await.unwrap();
    assert_eq!(recv_cap(&mut client).await, ("LIST".into(), String::new()));

    client.send("CAP ACK :multi-prefix").await.unwrap();
    client.send("CAP LIST").await.unwrap();
    assert_eq!(
        recv_cap(&mut client).await,
        ("LIST".into(), "multi-prefix".into())
    );
}

#[tokio::test]
async fn invalid_subcommands() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("CAP FROB").await.unwrap();
    let reply = client.recv().await.unwrap();
    assert_eq!(numeric(&reply), Some(410));
    assert_eq!(reply.command.params()[1], "FROB");

    client.send("CAP NAK :multi-prefix").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(410));

    client.send("CAP").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(461));
}

#[tokio::test]
async fn ls_after_registration_is_rejected() {
    let server = TestServer::new();
    let mut dan = server.register("dan").await;

    dan.send("CAP LS").await.unwrap();
    let reply = dan.recv().await.unwrap();
    assert_eq!(numeric(&reply), Some(410));
    assert_eq!(reply.command.params()[1], "LS");

    dan.send("CAP LIST").await.unwrap();
    assert_eq!(recv_cap(&mut dan).await, ("LIST".into(), String::new()));
}

#[tokio::test]
async fn multi_prefix_changes_names() {
    let server = TestServer::new();
    let mut alice = server.register("alice").await;
    alice.join("#nomad").await.unwrap();
    alice.send("MODE #nomad +v alice").await.unwrap();
    assert_eq!(
        alice.recv_line().await.unwrap(),
        ":alice!alice@127.0.0.1 MODE #nomad +v alice"
    );

    let mut plain = server.register("plain").await;
    let names = plain.join("#nomad").await.unwrap();
    let reply = names.iter().find(|m| numeric(m) == Some(353)).unwrap();
    assert_eq!(reply.command.params()[3], "@alice plain");

    let (mut multi, _task) = server.connect();
    multi.send("CAP REQ :multi-prefix").await.unwrap();
    recv_cap(&mut multi).await;
    multi.send("CAP END").await.unwrap();
    multi.register("multi").await.unwrap();
    let names = multi.join("#nomad").await.unwrap();
    let reply = names.iter().find(|m| numeric(m) == Some(353)).unwrap();
    assert_eq!(reply.command.params()[2], "#nomad");
    assert_eq!(reply.command.params()[3], "@+alice multi plain");
}
