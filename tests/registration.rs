//! Integration tests for connection registration.
//!
//! Covers the NICK/USER/PASS sequence, the welcome burst, and the errors a
//! client can hit before and after it is registered.

mod common;

use common::client::{codes, numeric};
use common::{TestClient, TestServer};

const PASSWORD_CONFIG: &str = r#"
    [server]
    name = "irc.test"
    network = "TestNet"
    password = "sekrit"
"#;

const MOTD_CONFIG: &str = r#"
    [server]
    name = "irc.test"
    network = "TestNet"

    [motd]
    lines = ["Be excellent", "to each other"]
"#;

/// Read until the `ERROR` line and return it.
async fn recv_error(client: &mut TestClient) -> String {
    loop {
        let line = client.recv_line().await.expect("ERROR line before close");
        if line.starts_with("ERROR") {
            return line;
        }
    }
}

#[tokio::test]
async fn welcome_burst_in_order() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    let burst = client.register("dan").await.unwrap();
    assert_eq!(
        codes(&burst),
        vec![1, 2, 3, 4, 251, 252, 253, 254, 255, 422]
    );

    let welcome = &burst[0];
    assert_eq!(welcome.command.params()[0], "dan");
    assert_eq!(
        welcome.command.params()[1],
        "Welcome to the TestNet Internet Relay Chat Network dan!dan@127.0.0.1"
    );
    assert_eq!(
        burst[1].command.params()[1],
        "Your host is irc.test, running version nomad-test"
    );
    assert_eq!(
        burst[4].command.params()[1],
        "There are 1 users and 0 invisible on 1 servers"
    );

    let myinfo = burst[3].command.params();
    assert_eq!(myinfo[1], "irc.test");
    assert_eq!(myinfo[2], "nomad-test");
    assert!(myinfo[3].contains('i'));
    assert!(myinfo[4].contains('k'));
}

#[tokio::test]
async fn user_before_nick_also_registers() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("USER dan 0 * :Dan").await.unwrap();
    client.assert_silent().await;
    client.send("NICK dan").await.unwrap();
    let first = client.recv().await.unwrap();
    assert_eq!(numeric(&first), Some(1));
}

#[tokio::test]
async fn motd_lines_close_the_burst() {
    let server = TestServer::with_config(MOTD_CONFIG);
    let (mut client, _task) = server.connect();

    let burst = client.register("dan").await.unwrap();
    let tail: Vec<_> = burst.iter().skip_while(|m| numeric(m) != Some(375)).collect();
    assert_eq!(tail.len(), 4);
    assert_eq!(tail[0].command.params()[1], "- irc.test Message of the day - ");
    assert_eq!(tail[1].command.params()[1], "- Be excellent");
    assert_eq!(tail[2].command.params()[1], "- to each other");
    assert_eq!(numeric(tail[3]), Some(376));
}

#[tokio::test]
async fn commands_before_registration_are_refused() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("JOIN #nomad").await.unwrap();
    let reply = client.recv().await.unwrap();
    assert_eq!(numeric(&reply), Some(451));
    assert_eq!(reply.command.params()[0], "*");

    client.send("FROBNICATE now").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(451));

    // PING is allowed before registration.
    client.send("PING :abc").await.unwrap();
    let pong = client.recv_line().await.unwrap();
    assert_eq!(pong, ":irc.test PONG irc.test abc");
}

#[tokio::test]
async fn nickname_validation() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("NICK").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(431));

    client.send("NICK 9lives").await.unwrap();
    let reply = client.recv().await.unwrap();
    assert_eq!(numeric(&reply), Some(432));
    assert_eq!(reply.command.params()[1], "9lives");

    client.send("USER dan 0 *").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(461));
}

#[tokio::test]
async fn erroneous_nickname_with_spaces_is_not_echoed() {
    let server = TestServer::new();
    let (mut client, _task) = server.connect();

    client.send("NICK :a b").await.unwrap();
    assert_eq!(
        client.recv_line().await.unwrap(),
        ":irc.test 432 * * :Erroneous nickname"
    );

    client.send("NICK ::lead").await.unwrap();
    let reply = client.recv().await.unwrap();
    assert_eq!(numeric(&reply), Some(432));
    assert_eq!(reply.command.params(), ["*", "*", "Erroneous nickname"]);
}

#[tokio::test]
async fn nick_collision_during_registration_is_fatal() {
    let server = TestServer::new();
    let _dan = server.register("dan").await;

    let (mut late, task) = server.connect();
    late.send("NICK DAN").await.unwrap();
    let reply = late.recv().await.unwrap();
    assert_eq!(numeric(&reply), Some(433));

    let error = recv_error(&mut late).await;
    assert_eq!(error, "ERROR :Closing Link: 127.0.0.1 (Nickname collision)");
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn nick_change_once_registered() {
    let server = TestServer::new();
    let mut dan = server.register("dan").await;
    let _eve = server.register("eve").await;

    dan.send("NICK eve").await.unwrap();
    assert_eq!(numeric(&dan.recv().await.unwrap()), Some(433));

    dan.send("NICK daniel").await.unwrap();
    assert_eq!(dan.recv_line().await.unwrap(), ":dan!dan@127.0.0.1 NICK daniel");

    // The old nickname is free again.
    let (mut other, _task) = server.connect();
    let burst = other.register("dan").await.unwrap();
    assert_eq!(numeric(&burst[0]), Some(1));
}

#[tokio::test]
async fn reregistration_is_refused() {
    let server = TestServer::new();
    let mut dan = server.register("dan").await;

    dan.send("USER again 0 * :Again").await.unwrap();
    assert_eq!(numeric(&dan.recv().await.unwrap()), Some(462));

    dan.send("PASS whatever").await.unwrap();
    assert_eq!(numeric(&dan.recv().await.unwrap()), Some(462));
}

#[tokio::test]
async fn missing_password_is_fatal() {
    let server = TestServer::with_config(PASSWORD_CONFIG);
    let (mut client, task) = server.connect();

    client.send("NICK dan").await.unwrap();
    client.send("USER dan 0 * :Dan").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(464));
    assert_eq!(
        recv_error(&mut client).await,
        "ERROR :Closing Link: 127.0.0.1 (Bad password)"
    );
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn wrong_password_is_fatal() {
    let server = TestServer::with_config(PASSWORD_CONFIG);
    let (mut client, task) = server.connect();

    client.send("PASS nope").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(464));
    recv_error(&mut client).await;
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn correct_password_registers() {
    let server = TestServer::with_config(PASSWORD_CONFIG);
    let (mut client, _task) = server.connect();

    client.send("PASS sekrit").await.unwrap();
    let burst = client.register("dan").await.unwrap();
    assert_eq!(numeric(&burst[0]), Some(1));
}

#[tokio::test]
async fn pass_after_nick_is_refused() {
    let server = TestServer::with_config(PASSWORD_CONFIG);
    let (mut client, _task) = server.connect();

    client.send("NICK dan").await.unwrap();
    client.send("PASS sekrit").await.unwrap();
    assert_eq!(numeric(&client.recv().await.unwrap()), Some(462));
}

#[tokio::test]
async fn quit_closes_with_error_line() {
    let server = TestServer::new();
    let (mut client, task) = server.connect();
    client.register("dan").await.unwrap();

    client.send("QUIT :gone fishing").await.unwrap();
    assert_eq!(
        client.recv_line().await.unwrap(),
        "ERROR :Closing Link: 127.0.0.1 (Quit: gone fishing)"
    );
    task.await.unwrap().unwrap();
    assert!(server.matrix.nick_owner("dan").is_none());
}

#[tokio::test]
async fn unknown_command_after_registration() {
    let server = TestServer::new();
    let mut dan = server.register("dan").await;

    dan.send("FROBNICATE").await.unwrap();
    let reply = dan.recv().await.unwrap();
    assert_eq!(numeric(&reply), Some(421));
    assert_eq!(reply.command.params()[1], "FROBNICATE");

    dan.send("PRIVMSG eve :hi").await.unwrap();
    assert_eq!(numeric(&dan.recv().await.unwrap()), Some(421));
}

#[tokio::test]
async fn overlong_line_is_reported_not_fatal() {
    let server = TestServer::new();
    let mut dan = server.register("dan").await;

    let long = format!("AWAY :{}", "x".repeat(600));
    dan.send(&long).await.unwrap();
    assert_eq!(numeric(&dan.recv().await.unwrap()), Some(417));

    dan.send("PING :still-here").await.unwrap();
    assert_eq!(
        dan.recv_line().await.unwrap(),
        ":irc.test PONG irc.test still-here"
    );
}
