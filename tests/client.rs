mod common;

use std::time::Duration;

use anyhow::Result;
use serde_json::{Value, json};
use tokio::{test, time::sleep};
use utopia_api::{
    Client, ClientOptions, Error, Params, RequestEnvelope, Transport, TransportError,
};

use common::{Echo, Log, Scripted, TOKEN, methods};

async fn echo_client() -> Result<(Client, Log)> {
    let echo = Echo::default();
    let log = echo.log.clone();
    Ok((
        Client::with_transport(TOKEN, ClientOptions::default(), echo).await?,
        log,
    ))
}

#[test]
async fn invalid_token_makes_no_request() {
    for token in ["", "not-hex", "12 34", "abcg"] {
        let (transport, log) = Scripted::new(vec![Ok(json!({"result": 20001}))]);
        let options = ClientOptions {
            notifications: true,
            ..ClientOptions::default()
        };
        let r = Client::with_transport(token, options, transport).await;
        assert!(matches!(r, Err(Error::InvalidCredential(_))), "{token:?}");
        assert!(log.lock().unwrap().is_empty());
    }
}

#[test]
async fn token_is_uppercased_in_envelope() -> Result<()> {
    let (client, _log) = echo_client().await?;
    assert_eq!(client.token().as_str(), "0123456789ABCDEF");
    let echoed = client.send(Some("getContacts"), None).await?;
    assert_eq!(echoed["token"], "0123456789ABCDEF");
    Ok(())
}

#[test]
async fn send_defaults() -> Result<()> {
    let (client, _log) = echo_client().await?;
    let echoed = client.send(None, None).await?;
    assert_eq!(
        echoed,
        json!({"token": "0123456789ABCDEF", "method": "getSystemInfo", "params": {}})
    );
    Ok(())
}

#[test]
async fn operation_round_trip() -> Result<()> {
    let (client, _log) = echo_client().await?;
    let echoed = client
        .call("set_contact_nick")?
        .arg("pk", "ABC")
        .arg("new_nick", "Bob")
        .send()
        .await?;
    assert_eq!(echoed["method"], "setContactNick");
    assert_eq!(
        echoed["params"],
        json!({"contactPublicKey": "ABC", "newNick": "Bob"})
    );
    Ok(())
}

#[test]
async fn omitted_optionals_get_defaults() -> Result<()> {
    let (client, _log) = echo_client().await?;
    let echoed = client.invoke("get_contacts", Params::new()).await?;
    assert_eq!(echoed["params"], json!({"filter": ""}));

    let echoed = client
        .call("ucode_encode")?
        .arg("hex_code", "FF00")
        .send()
        .await?;
    assert_eq!(echoed["method"], "ucodeEncode");
    assert_eq!(
        echoed["params"],
        json!({"hex_code": "FF00", "size_image": 128, "coder": "BASE64", "format": "PNG"})
    );
    Ok(())
}

#[test]
async fn call_errors_are_raised_before_sending() -> Result<()> {
    let (client, log) = echo_client().await?;
    assert!(matches!(
        client.call("getContacts"),
        Err(Error::UnknownOperation(name)) if name == "getContacts"
    ));
    let r = client.call("create_voucher")?.send().await;
    assert!(matches!(r, Err(Error::MissingParam { param: "amount", .. })));
    let r = client.call("get_contacts")?.arg("query", "x").send().await;
    assert!(matches!(r, Err(Error::UnknownParam { .. })));
    assert!(methods(&log).is_empty());
    Ok(())
}

#[test]
async fn call_params_preview() -> Result<()> {
    let (client, log) = echo_client().await?;
    let call = client.call("join_channel")?.arg("ident", "CHAN");
    assert_eq!(call.operation().method, "joinChannel");
    assert_eq!(
        Value::Object(call.params()?),
        json!({"ident": "CHAN", "password": ""})
    );
    assert!(methods(&log).is_empty());
    Ok(())
}

/// Delays the first request so that later ones would overtake it without serialization.
struct SlowFirst {
    log: Log,
}
impl Transport for SlowFirst {
    async fn post(&mut self, envelope: &RequestEnvelope) -> Result<Value, TransportError> {
        if envelope.method == "first" {
            sleep(Duration::from_millis(50)).await;
        }
        self.log.lock().unwrap().push(envelope.clone());
        Ok(Value::Null)
    }
}

#[test]
async fn requests_are_sent_in_issue_order() -> Result<()> {
    let log = Log::default();
    let client = Client::with_transport(
        TOKEN,
        ClientOptions::default(),
        SlowFirst { log: log.clone() },
    )
    .await?;
    let (a, b, c) = tokio::join!(
        client.send(Some("first"), None),
        client.send(Some("second"), None),
        client.send(Some("third"), None),
    );
    a?;
    b?;
    c?;
    assert_eq!(methods(&log), ["first", "second", "third"]);
    Ok(())
}

#[test]
async fn without_notifications_subscriptions_are_inert() -> Result<()> {
    let (client, log) = echo_client().await?;
    assert!(!client.notifications_active());
    assert_eq!(client.channel_state(), utopia_api::ChannelState::Unopened);
    let id = client.on(utopia_api::Category::Any, |_| {});
    assert!(!client.remove_listener(utopia_api::Category::Any, id));
    let mut sub = client.subscribe(utopia_api::Category::Message);
    assert!(matches!(sub.recv().await, Err(Error::ChannelClosed)));
    client.closed().await;
    assert!(methods(&log).is_empty());
    Ok(())
}
