//! Philips Hue backend, speaking the bridge's v1 REST API over HTTP.
//!
//! [`HueSystem::connect`] either verifies a configured username or pairs a
//! new one, which requires the bridge's link button to have been pressed.
//! Every read goes to the bridge; nothing is cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};

use crate::errors::Error;
use crate::light::{Capability, ColorCapable, Dimmable, Light, Switchable};
use crate::system::LightSystem;
use crate::types::HsbColor;

mod payload;
mod response;

pub use payload::{BRIGHTNESS_FACTOR, HUE_FACTOR, SATURATION_FACTOR};

use payload::{StateUpdate, from_native};
use response::LightState;

type Result<T> = std::result::Result<T, Error>;

/// Identifies this application when pairing.
const DEVICE_TYPE: &str = "lights-rs#cli";

/// HTTP access to one bridge.
///
/// Each request times out after 3 s. GET and PUT requests that fail at the
/// transport level are retried up to three times, after 750, 1500 and
/// 3000 ms. POST requests and errors reported by the bridge are not retried.
struct Bridge {
    http: reqwest::Client,
    base: String,
}

impl Bridge {
    const TIMEOUT_MS: u64 = 3000;
    const MAX_RETRIES: u32 = 3;
    const RETRY_DELAYS_MS: [u64; 3] = [750, 1500, 3000];

    fn new(address: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("http://{address}/api"),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base.clone()
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<Value> {
        let body = serde_json::to_value(body).map_err(Error::JsonDump)?;
        self.send(Method::POST, path, Some(&body)).await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> Result<Value> {
        let body = serde_json::to_value(body).map_err(Error::JsonDump)?;
        self.send(Method::PUT, path, Some(&body)).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.url(path);
        // POST creates a user on the bridge and must not be repeated.
        let retry = method != Method::POST;
        let mut attempt = 0;

        loop {
            debug!("{} {} {:?}", method, url, body);
            match self.send_http(method.clone(), &url, body).await {
                Ok(response) => {
                    debug!("response: {}", response);
                    return response::check(response);
                }
                Err(e) if e.is_transient() && retry && attempt < Self::MAX_RETRIES => {
                    let delay_idx = (attempt as usize).min(Self::RETRY_DELAYS_MS.len() - 1);
                    let delay = Self::RETRY_DELAYS_MS[delay_idx];
                    warn!("{} {} failed, retrying in {}ms: {}", method, url, delay, e);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_http(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value> {
        let mut request = self
            .http
            .request(method, url)
            .timeout(Duration::from_millis(Self::TIMEOUT_MS));
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|e| Error::http("send", e))?
            .error_for_status()
            .map_err(|e| Error::http("status", e))?
            .json::<Value>()
            .await
            .map_err(|e| Error::http("decode", e))
    }
}

/// A Hue bridge on the local network.
///
/// # Example
///
/// ```no_run
/// use lights_rs::{HueSystem, Light, LightSystem};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), lights_rs::Error> {
///     let mut bridge = HueSystem::new("192.168.1.20", Some("83b7780291a6ceffbe0bd049104df".into()));
///     bridge.connect().await?;
///     for light in bridge.lights().await? {
///         println!("{}: {:?}", light.name(), light.capabilities());
///     }
///     Ok(())
/// }
/// ```
pub struct HueSystem {
    name: String,
    address: String,
    username: Option<String>,
    connected: bool,
    bridge: Arc<Bridge>,
}

impl std::fmt::Debug for HueSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HueSystem")
            .field("address", &self.address)
            .field("connected", &self.connected)
            .finish()
    }
}

impl HueSystem {
    /// Create a handle for the bridge at `address` (`host` or `host:port`).
    ///
    /// Without a username, [`connect`](LightSystem::connect) pairs a new one.
    pub fn new(address: &str, username: Option<String>) -> Self {
        Self {
            name: format!("hue bridge at {address}"),
            address: address.to_string(),
            username,
            connected: false,
            bridge: Arc::new(Bridge::new(address)),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// The username in use, including one issued by pairing.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn session(&self) -> Result<&str> {
        match (&self.username, self.connected) {
            (Some(username), true) => Ok(username),
            _ => Err(Error::NotConnected(self.name.clone())),
        }
    }

    async fn pair(&self) -> Result<String> {
        let response = self
            .bridge
            .post("", &json!({ "devicetype": DEVICE_TYPE }))
            .await?;
        response::parse_username(response)
    }
}

#[async_trait]
impl LightSystem for HueSystem {
    fn name(&self) -> &str {
        &self.name
    }

    async fn connect(&mut self) -> Result<()> {
        if self.connected {
            return Ok(());
        }

        let username = match self.username.clone() {
            Some(username) => {
                self.bridge
                    .get(&format!("{username}/lights"))
                    .await
                    .map_err(|e| Error::connect(&self.name, e.to_string()))?;
                username
            }
            None => {
                let username = self
                    .pair()
                    .await
                    .map_err(|e| Error::connect(&self.name, e.to_string()))?;
                warn!(
                    "{}: paired as new user {}, save it in the config to skip pairing next time",
                    self.name, username
                );
                username
            }
        };

        info!("connected to {}", self.name);
        self.username = Some(username);
        self.connected = true;
        Ok(())
    }

    async fn lights(&self) -> Result<Vec<Box<dyn Light>>> {
        let username = self.session()?;
        let listing = self.bridge.get(&format!("{username}/lights")).await?;

        Ok(response::parse_lights(listing)?
            .into_iter()
            .map(|(id, info)| {
                Box::new(HueLight {
                    bridge: self.bridge.clone(),
                    path: format!("{username}/lights/{id}"),
                    power: info.state.has_power(),
                    dimming: info.state.has_brightness(),
                    color: info.state.has_color(),
                    id,
                    name: info.name,
                }) as Box<dyn Light>
            })
            .collect())
    }
}

/// A light behind a Hue bridge.
///
/// Capabilities are fixed from the state fields the bridge reported when the
/// light was listed. Reads always query the bridge.
pub struct HueLight {
    bridge: Arc<Bridge>,
    path: String,
    id: String,
    name: String,
    power: bool,
    dimming: bool,
    color: bool,
}

impl std::fmt::Debug for HueLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HueLight")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

impl HueLight {
    /// The bridge's id for this light.
    pub fn id(&self) -> &str {
        &self.id
    }

    async fn state(&self) -> Result<LightState> {
        let response = self.bridge.get(&self.path).await?;
        Ok(response::parse_light(response)?.state)
    }

    async fn update(&self, update: &StateUpdate) -> Result<()> {
        if !update.is_valid() {
            return Err(Error::NoAttribute);
        }
        debug!("{}: {:?}", self.name, update);
        self.bridge
            .put(&format!("{}/state", self.path), update)
            .await
            .map(|_| ())
    }

    fn field<T>(&self, value: Option<T>, capability: Capability) -> Result<T> {
        value.ok_or_else(|| Error::not_supported(&self.name, capability))
    }
}

impl Light for HueLight {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_switchable(&self) -> Option<&dyn Switchable> {
        self.power.then_some(self as &dyn Switchable)
    }

    fn as_dimmable(&self) -> Option<&dyn Dimmable> {
        self.dimming.then_some(self as &dyn Dimmable)
    }

    fn as_colorable(&self) -> Option<&dyn ColorCapable> {
        self.color.then_some(self as &dyn ColorCapable)
    }
}

#[async_trait]
impl Switchable for HueLight {
    async fn is_on(&self) -> Result<bool> {
        let state = self.state().await?;
        self.field(state.on, Capability::Power)
    }

    async fn set_on(&self, on: bool) -> Result<()> {
        self.update(StateUpdate::new().power(on)).await
    }
}

#[async_trait]
impl Dimmable for HueLight {
    async fn brightness(&self) -> Result<f64> {
        let state = self.state().await?;
        let bri = self.field(state.bri, Capability::Brightness)?;
        Ok(from_native(bri, BRIGHTNESS_FACTOR))
    }

    async fn set_brightness(&self, brightness: f64) -> Result<()> {
        self.update(StateUpdate::new().brightness(brightness)).await
    }
}

#[async_trait]
impl ColorCapable for HueLight {
    async fn color(&self) -> Result<HsbColor> {
        let state = self.state().await?;
        let hue = self.field(state.hue, Capability::Color)?;
        let sat = self.field(state.sat, Capability::Color)?;
        let brightness = state
            .bri
            .map_or(1.0, |bri| from_native(bri, BRIGHTNESS_FACTOR));

        Ok(HsbColor::new(
            from_native(hue, HUE_FACTOR),
            from_native(sat, SATURATION_FACTOR),
            brightness,
        ))
    }

    async fn set_color(&self, color: HsbColor) -> Result<()> {
        self.update(StateUpdate::new().color(&color)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    use super::*;
    use crate::types::ColorComponents;

    /// A request as received by [`FakeBridge`].
    #[derive(Debug, Clone, PartialEq)]
    struct Received {
        method: String,
        path: String,
        body: Option<Value>,
    }

    /// A local HTTP server answering like a bridge.
    ///
    /// `reply` picks the JSON body for each request. `None` closes the
    /// connection without answering.
    struct FakeBridge {
        address: String,
        received: Arc<Mutex<Vec<Received>>>,
    }

    impl FakeBridge {
        async fn start<F>(reply: F) -> Self
        where
            F: Fn(&Received) -> Option<Value> + Send + 'static,
        {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let address = listener.local_addr().unwrap().to_string();
            let received = Arc::new(Mutex::new(Vec::new()));

            let log = received.clone();
            tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let request = read_request(&mut stream).await;
                    log.lock().unwrap().push(request.clone());

                    if let Some(body) = reply(&request) {
                        let body = body.to_string();
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = stream.write_all(response.as_bytes()).await;
                    }
                }
            });

            Self { address, received }
        }

        fn received(&self) -> Vec<Received> {
            self.received.lock().unwrap().clone()
        }
    }

    async fn read_request(stream: &mut TcpStream) -> Received {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed mid-request");
            buf.extend_from_slice(&chunk[..n]);
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.lines();
        let mut request_line = lines.next().unwrap().split_whitespace();
        let method = request_line.next().unwrap().to_string();
        let path = request_line.next().unwrap().to_string();
        let length = lines
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .map_or(0, |(_, value)| value.trim().parse::<usize>().unwrap());

        while buf.len() < header_end + length {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed mid-body");
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = (length > 0)
            .then(|| serde_json::from_slice(&buf[header_end..header_end + length]).unwrap());

        Received { method, path, body }
    }

    fn received(method: &str, path: &str, body: Option<Value>) -> Received {
        Received {
            method: method.to_string(),
            path: path.to_string(),
            body,
        }
    }

    /// A bridge with user `abc` and one color light, id 1, at hue 0.5,
    /// full saturation and half brightness.
    fn desk_bridge(request: &Received) -> Option<Value> {
        let state = json!({"on": true, "bri": 127, "hue": 28317, "sat": 254});
        match (request.method.as_str(), request.path.as_str()) {
            ("GET", "/api/abc/lights") => Some(json!({"1": {"name": "Desk", "state": state}})),
            ("GET", "/api/abc/lights/1") => Some(json!({"name": "Desk", "state": state})),
            ("PUT", "/api/abc/lights/1/state") => {
                Some(json!([{"success": {"/lights/1/state": request.body}}]))
            }
            _ => Some(json!([
                {"error": {"type": 3, "address": request.path, "description": "resource not available"}}
            ])),
        }
    }

    async fn connected_desk() -> (FakeBridge, HueSystem, Box<dyn Light>) {
        let bridge = FakeBridge::start(desk_bridge).await;
        let mut system = HueSystem::new(&bridge.address, Some("abc".to_string()));
        system.connect().await.unwrap();
        let mut lights = system.lights().await.unwrap();
        let desk = lights.remove(0);
        (bridge, system, desk)
    }

    #[test]
    fn test_urls() {
        let bridge = Bridge::new("192.168.1.20");
        assert_eq!(bridge.url(""), "http://192.168.1.20/api");
        assert_eq!(
            bridge.url("abc/lights/3/state"),
            "http://192.168.1.20/api/abc/lights/3/state"
        );

        let bridge = Bridge::new("localhost:8080");
        assert_eq!(bridge.url("abc/lights"), "http://localhost:8080/api/abc/lights");
    }

    #[tokio::test]
    async fn test_lights_before_connect() {
        let system = HueSystem::new("192.168.1.20", Some("abc".to_string()));
        assert!(!system.is_connected());
        assert_eq!(system.username(), Some("abc"));
        assert_eq!(
            system.lights().await.unwrap_err(),
            Error::NotConnected("hue bridge at 192.168.1.20".to_string())
        );
    }

    #[test]
    fn test_capabilities_from_state() {
        let light = HueLight {
            bridge: Arc::new(Bridge::new("192.168.1.20")),
            path: "abc/lights/2".to_string(),
            id: "2".to_string(),
            name: "Hall".to_string(),
            power: true,
            dimming: true,
            color: false,
        };
        assert_eq!(light.id(), "2");
        assert_eq!(light.capabilities(), [Capability::Power, Capability::Brightness]);
        assert_eq!(
            light.colorable().err(),
            Some(Error::not_supported("Hall", Capability::Color))
        );
    }

    #[tokio::test]
    async fn test_pairing() {
        let bridge = FakeBridge::start(|request| match request.method.as_str() {
            "POST" => Some(json!([{"success": {"username": "newuser"}}])),
            _ => None,
        })
        .await;

        let mut system = HueSystem::new(&bridge.address, None);
        system.connect().await.unwrap();
        assert!(system.is_connected());
        assert_eq!(system.username(), Some("newuser"));

        system.connect().await.unwrap();
        assert_eq!(
            bridge.received(),
            [received("POST", "/api", Some(json!({"devicetype": "lights-rs#cli"})))]
        );
    }

    #[tokio::test]
    async fn test_pairing_link_button_not_pressed() {
        let bridge = FakeBridge::start(|_| {
            Some(json!([
                {"error": {"type": 101, "address": "", "description": "link button not pressed"}}
            ]))
        })
        .await;

        let mut system = HueSystem::new(&bridge.address, None);
        let err = system.connect().await.unwrap_err();
        assert!(matches!(err, Error::Connect { .. }), "{err}");
        assert!(err.to_string().contains("link button not pressed"), "{err}");
        assert!(!system.is_connected());
        assert_eq!(system.username(), None);
    }

    #[tokio::test]
    async fn test_pairing_is_not_retried() {
        let bridge = FakeBridge::start(|_| None).await;

        let mut system = HueSystem::new(&bridge.address, None);
        let err = system.connect().await.unwrap_err();
        assert!(matches!(err, Error::Connect { .. }), "{err}");
        assert_eq!(bridge.received().len(), 1);
    }

    #[tokio::test]
    async fn test_connect_verifies_username() {
        let (bridge, system, _) = connected_desk().await;
        assert_eq!(system.username(), Some("abc"));
        assert_eq!(bridge.received()[0], received("GET", "/api/abc/lights", None));

        let bridge = FakeBridge::start(|_| {
            Some(json!([
                {"error": {"type": 1, "address": "/lights", "description": "unauthorized user"}}
            ]))
        })
        .await;
        let mut system = HueSystem::new(&bridge.address, Some("stale".to_string()));
        let err = system.connect().await.unwrap_err();
        assert!(err.to_string().contains("unauthorized user"), "{err}");
        assert!(!system.is_connected());
    }

    #[tokio::test]
    async fn test_listed_lights() {
        let (_bridge, _system, desk) = connected_desk().await;
        assert_eq!(desk.name(), "Desk");
        assert_eq!(
            desk.capabilities(),
            [Capability::Power, Capability::Brightness, Capability::Color]
        );
    }

    #[tokio::test]
    async fn test_toggle_reads_then_writes() {
        let (bridge, _system, desk) = connected_desk().await;
        let before = bridge.received().len();

        assert!(!desk.switchable().unwrap().toggle().await.unwrap());
        assert_eq!(
            bridge.received()[before..],
            [
                received("GET", "/api/abc/lights/1", None),
                received("PUT", "/api/abc/lights/1/state", Some(json!({"on": false}))),
            ]
        );
    }

    #[tokio::test]
    async fn test_reads_are_scaled() {
        let (_bridge, _system, desk) = connected_desk().await;

        let color = desk.colorable().unwrap().color().await.unwrap();
        assert!(
            color.approximately(&HsbColor::new(0.5, 1.0, 0.5)),
            "{color}"
        );
        assert_eq!(desk.dimmable().unwrap().brightness().await.unwrap(), 0.5);
        assert!(desk.switchable().unwrap().is_on().await.unwrap());
    }

    #[tokio::test]
    async fn test_writes_carry_only_set_fields() {
        let (bridge, _system, desk) = connected_desk().await;
        let before = bridge.received().len();

        desk.dimmable().unwrap().set_brightness(0.5).await.unwrap();
        desk.colorable()
            .unwrap()
            .set_color(HsbColor::new(0.5, 1.0, 1.0))
            .await
            .unwrap();

        let bodies: Vec<Option<Value>> = bridge.received()[before..]
            .iter()
            .map(|request| request.body.clone())
            .collect();
        assert_eq!(
            bodies,
            [
                Some(json!({"bri": 127})),
                Some(json!({"hue": 28317, "sat": 254, "bri": 254})),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let bridge = FakeBridge::start(desk_bridge).await;
        let light = HueLight {
            bridge: Arc::new(Bridge::new(&bridge.address)),
            path: "abc/lights/1".to_string(),
            id: "1".to_string(),
            name: "Desk".to_string(),
            power: true,
            dimming: true,
            color: true,
        };

        assert_eq!(
            light.update(&StateUpdate::new()).await.unwrap_err(),
            Error::NoAttribute
        );
        assert!(bridge.received().is_empty());
    }

    #[tokio::test]
    async fn test_get_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let bridge = FakeBridge::start(move |_| {
            // Drop the first request unanswered.
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 => None,
                _ => Some(json!({})),
            }
        })
        .await;

        let mut system = HueSystem::new(&bridge.address, Some("abc".to_string()));
        system.connect().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(system.lights().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_bridge() {
        let address = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().to_string()
        };

        let started = Instant::now();
        let mut system = HueSystem::new(&address, Some("abc".to_string()));
        let err = system.connect().await.unwrap_err();

        assert!(matches!(err, Error::Connect { .. }), "{err}");
        assert!(err.to_string().contains("http send error"), "{err}");
        let backoff: u64 = Bridge::RETRY_DELAYS_MS.iter().sum();
        assert!(started.elapsed() >= Duration::from_millis(backoff));
        assert!(!system.is_connected());
    }
}
