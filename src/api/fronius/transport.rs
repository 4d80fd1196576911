use std::time::Duration;

use ureq::Agent;

use crate::{
    api::fronius::{FetchError, Request},
    prelude::*,
};

/// Raw Solar API transport: one blocking request, one response body.
pub trait Fetch {
    fn fetch(&self, request: &Request) -> Result<String, FetchError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, request: &Request) -> Result<String, FetchError> {
        (**self).fetch(request)
    }
}

/// Plain HTTP transport to the device's embedded web server.
pub struct HttpTransport {
    client: Agent,
    base_url: String,
}

impl HttpTransport {
    pub fn new(host: &str, port: u16) -> Self {
        let client =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(10))).build().into();
        Self { client, base_url: format!("http://{host}:{port}/solar_api/v1") }
    }
}

impl Fetch for HttpTransport {
    #[instrument(skip_all, level = Level::DEBUG, fields(base_url = %self.base_url))]
    fn fetch(&self, request: &Request) -> Result<String, FetchError> {
        let url = format!("{}/{}", self.base_url, request.path);
        debug!(%request, "fetching…");
        request
            .query
            .iter()
            .fold(self.client.get(url.as_str()), |builder, (key, value)| builder.query(*key, value))
            .call()
            .map_err(FetchError::transport)?
            .body_mut()
            .read_to_string()
            .map_err(FetchError::transport)
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn test_connection_refused_is_transport_error() -> Result {
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
        let error = HttpTransport::new("127.0.0.1", port)
            .fetch(&Request::new("GetAPIVersion.cgi"))
            .unwrap_err();
        assert!(matches!(error, FetchError::Transport(_)), "{error}");
        Ok(())
    }
}
