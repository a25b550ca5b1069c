//! Registration handshake, password handling, and nickname legality.

mod common;

use common::TestServer;

const HOST: &str = "wormnet.local";

#[tokio::test]
async fn welcome_burst_is_byte_exact() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    let lines = client
        .register("testplayer", "test", "48 0 US 3.8.1")
        .await
        .unwrap();

    assert_eq!(lines[0], format!(":{HOST} 001 testplayer :Welcome testplayer"));
    assert_eq!(lines[1], format!(":{HOST} 002 testplayer :Your host is {HOST}"));
    assert_eq!(
        lines[2],
        format!(":{HOST} 003 testplayer :This server was created today")
    );
    assert_eq!(lines[3], format!(":{HOST} 004 testplayer {HOST} WormNET 0 0 0"));
    assert_eq!(
        lines[4],
        format!(":{HOST} 005 testplayer CHANTYPES=# :are supported by this server")
    );
    assert_eq!(
        lines[5],
        format!(":{HOST} 375 testplayer :- {HOST} Message of the Day -")
    );
    assert_eq!(lines[6], format!(":{HOST} 372 testplayer :- Welcome to WormNET"));
    assert_eq!(
        lines[7],
        format!(":{HOST} 372 testplayer :- Have fun playing Worms Armageddon!")
    );
    assert_eq!(
        lines[8],
        format!(":{HOST} 376 testplayer :End of /MOTD command.")
    );
    assert_eq!(lines.len(), 9);
}

#[tokio::test]
async fn registration_works_with_nick_before_pass() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("NICK ordertest").await.unwrap();
    client.send_raw("PASS ELSILRACLIHP").await.unwrap();
    client
        .send_raw("USER tester host server :48 0 US 3.8.1")
        .await
        .unwrap();

    let lines = client.recv_until(|l| l.contains(" 376 ")).await.unwrap();
    assert_eq!(lines[0], format!(":{HOST} 001 ordertest :Welcome ordertest"));
}

#[tokio::test]
async fn registration_works_with_user_before_nick() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("PASS ELSILRACLIHP").await.unwrap();
    client
        .send_raw("USER tester host server :48 0 US 3.8.1")
        .await
        .unwrap();
    client.send_raw("NICK latenick").await.unwrap();

    let lines = client.recv_until(|l| l.contains(" 376 ")).await.unwrap();
    assert_eq!(lines[0], format!(":{HOST} 001 latenick :Welcome latenick"));
}

#[tokio::test]
async fn wrong_password_gets_one_464_then_disconnect() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("PASS WRONG").await.unwrap();
    client.send_raw("NICK intruder").await.unwrap();
    client
        .send_raw("USER intruder host server :x")
        .await
        .unwrap();

    assert_eq!(
        client.recv().await.unwrap(),
        format!(":{HOST} 464 * :Password incorrect")
    );
    // Nothing after the 464 - the connection is gone and later commands
    // are never processed.
    let _ = client.send_raw("LIST").await;
    client.expect_closed().await.unwrap();
}

#[tokio::test]
async fn missing_pass_is_rejected_like_a_wrong_one() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("NICK nopass").await.unwrap();
    client.send_raw("USER nopass host server :x").await.unwrap();

    assert_eq!(
        client.recv().await.unwrap(),
        format!(":{HOST} 464 * :Password incorrect")
    );
    client.expect_closed().await.unwrap();
}

#[tokio::test]
async fn illegal_nickname_is_dropped_without_any_numeral() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("PASS ELSILRACLIHP").await.unwrap();
    client.send_raw("NICK 1bad").await.unwrap();
    client.send_raw("USER tester host server :x").await.unwrap();

    // No welcome, no rejection - the nickname just never took.
    assert_eq!(client.barrier().await.unwrap(), Vec::<String>::new());

    // A legal nickname completes the pending registration.
    client.send_raw("NICK goodnick").await.unwrap();
    let lines = client.recv_until(|l| l.contains(" 376 ")).await.unwrap();
    assert_eq!(lines[0], format!(":{HOST} 001 goodnick :Welcome goodnick"));
}

#[tokio::test]
async fn nickname_length_is_capped_at_fifteen() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("PASS ELSILRACLIHP").await.unwrap();
    client.send_raw("NICK abcdefghijklmnop").await.unwrap(); // 16 chars
    assert_eq!(client.barrier().await.unwrap(), Vec::<String>::new());

    client.send_raw("NICK abcdefghijklmno").await.unwrap(); // 15 chars
    client.send_raw("USER tester host server :x").await.unwrap();
    let lines = client.recv_until(|l| l.contains(" 376 ")).await.unwrap();
    assert!(lines[0].contains(" 001 abcdefghijklmno "));
}

#[tokio::test]
async fn empty_username_token_does_not_complete_registration() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("PASS ELSILRACLIHP").await.unwrap();
    client.send_raw("NICK halfway").await.unwrap();
    // Two spaces: four tokens, but the username one is empty.
    client.send_raw("USER  host server :x").await.unwrap();
    assert_eq!(client.barrier().await.unwrap(), Vec::<String>::new());

    client.send_raw("USER real host server :x").await.unwrap();
    let lines = client.recv_until(|l| l.contains(" 376 ")).await.unwrap();
    assert_eq!(lines[0], format!(":{HOST} 001 halfway :Welcome halfway"));
}

#[tokio::test]
async fn duplicate_nicknames_are_both_accepted() {
    let server = TestServer::spawn().await.unwrap();
    let mut first = server.connect().await.unwrap();
    let mut second = server.connect().await.unwrap();

    first.register("dup", "one", "r1").await.unwrap();
    second.register("dup", "two", "r2").await.unwrap();

    // Both sessions are registered and visible.
    first.send_raw("WHO").await.unwrap();
    let lines = first.recv_until(|l| l.contains(" 315 ")).await.unwrap();
    let rows = lines.iter().filter(|l| l.contains(" 352 ")).count();
    assert_eq!(rows, 2);
}

#[tokio::test]
async fn ping_is_answered_before_registration() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("PING 12345").await.unwrap();
    assert_eq!(client.recv().await.unwrap(), format!("PONG {HOST}"));
}

#[tokio::test]
async fn gated_commands_are_silent_before_registration() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("JOIN #AnythingGoes").await.unwrap();
    client.send_raw("LIST").await.unwrap();
    client.send_raw("WHO #AnythingGoes").await.unwrap();
    client.send_raw("NAMES #AnythingGoes").await.unwrap();
    client.send_raw("MODE #AnythingGoes").await.unwrap();
    client.send_raw("MOTD").await.unwrap();
    client
        .send_raw("PRIVMSG #AnythingGoes :anyone?")
        .await
        .unwrap();

    assert_eq!(client.barrier().await.unwrap(), Vec::<String>::new());
}

#[tokio::test]
async fn unknown_commands_are_silent() {
    let server = TestServer::spawn().await.unwrap();
    let mut client = server.connect().await.unwrap();
    client.register("curious", "c", "r").await.unwrap();

    client.send_raw("CAP LS 302").await.unwrap();
    client.send_raw("WHOIS curious").await.unwrap();
    client.send_raw("FROBNICATE now").await.unwrap();

    assert_eq!(client.barrier().await.unwrap(), Vec::<String>::new());
}
