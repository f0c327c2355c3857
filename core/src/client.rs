//! The base client.
//!
//! # Design
//! `Client` owns nothing mutable. Configuration and transport are built once,
//! frozen behind an `Arc`, and every resource service holds a handle to the
//! same shared state. Cloning a client is cheap and clones share the
//! transport (and therefore its connection pool).

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::service::{RelationshipService, BLOCKS_PREFIX, MUTES_PREFIX};
use crate::transport::{Transport, UreqTransport};

/// State shared read-only by all services of one client.
pub(crate) struct Shared {
    pub(crate) config: Config,
    pub(crate) transport: Box<dyn Transport>,
}

/// Entry point: one service handle per resource group.
///
/// ```no_run
/// use twitter_core::{Client, Config, CreateParams};
///
/// let config = Config::from_env()?;
/// let client = Client::new(config);
/// let user = client.mute.create(&CreateParams::screen_name("golang"))?.data;
/// println!("muted @{}", user.screen_name);
/// # Ok::<(), twitter_core::Error>(())
/// ```
#[derive(Clone)]
pub struct Client {
    /// `blocks/` operations.
    pub block: RelationshipService,
    /// `mutes/users/` operations.
    pub mute: RelationshipService,
    shared: Arc<Shared>,
}

impl Client {
    /// Client over the bundled ureq transport, honoring `config.timeout()`.
    pub fn new(config: Config) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        log::debug!("creating client for {}", config.base_url());
        let shared = Arc::new(Shared {
            config,
            transport: Box::new(transport),
        });
        Self {
            block: RelationshipService::new(shared.clone(), BLOCKS_PREFIX),
            mute: RelationshipService::new(shared.clone(), MUTES_PREFIX),
            shared,
        }
    }

    /// `Client::new(Config::from_env()?)`.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(Config::from_env()?))
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("config", &self.shared.config).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::params::CreateParams;
    use crate::types::User;

    /// Plays the part of `POST /1.1/mutes/users/create.json?screen_name=golang`.
    struct MuteGolang {
        seen: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl Transport for MuteGolang {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            self.seen.lock().unwrap().push(request.clone());
            let expected = "http://127.0.0.1:8080/1.1/mutes/users/create.json?screen_name=golang";
            if request.method != HttpMethod::Post || request.url != expected {
                return Ok(HttpResponse {
                    status: 404,
                    headers: Vec::new(),
                    body: r#"{"errors":[{"code":34,"message":"Sorry, that page does not exist."}]}"#.to_string(),
                });
            }
            Ok(HttpResponse {
                status: 200,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: r#"{"screen_name": "golang"}"#.to_string(),
            })
        }
    }

    #[test]
    fn mute_create_end_to_end() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let config = Config::new("http://127.0.0.1:8080/1.1/").unwrap();
        let client = Client::with_transport(config, MuteGolang { seen: seen.clone() });

        let reply = client.mute.create(&CreateParams::screen_name("golang")).unwrap();
        let expected = User {
            screen_name: "golang".to_string(),
            ..Default::default()
        };
        assert_eq!(reply.data, expected);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn services_share_configuration() {
        let config = Config::new("http://127.0.0.1:8080/1.1/").unwrap().with_bearer_token("t0ken");
        let client = Client::with_transport(config, MuteGolang { seen: Arc::default() });
        let block = client.block.build_create(&CreateParams::screen_name("golang")).unwrap();
        let mute = client.mute.build_create(&CreateParams::screen_name("golang")).unwrap();
        assert_eq!(block.headers, mute.headers);
        assert!(block
            .headers
            .contains(&("authorization".to_string(), "Bearer t0ken".to_string())));
        assert_eq!(client.block.prefix(), "blocks/");
        assert_eq!(client.mute.prefix(), "mutes/users/");
    }

    #[test]
    fn clones_share_state() {
        let client = Client::with_transport(Config::default(), MuteGolang { seen: Arc::default() });
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.shared, &clone.shared));
    }

    #[test]
    fn debug_output_hides_token() {
        let config = Config::default().with_bearer_token("secret-token");
        let client = Client::new(config);
        assert!(!format!("{client:?}").contains("secret-token"));
    }
}
