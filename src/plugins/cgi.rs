//! CGI request hand-off to the plugin's web runner.

use std::env;
use std::io::Read;

use tracing::debug;

use crate::error::Result;

/// True when the process was started by a web server as a CGI script.
pub fn is_cgi_environment() -> bool {
    env::var_os("GATEWAY_INTERFACE").is_some()
}

/// A CGI request as seen by a web runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CgiRequest {
    /// `REQUEST_METHOD`, if set.
    pub method: Option<String>,
    /// Environment for the request: the process environment with the
    /// plugin's configured `Env` entries layered on top.
    pub env: Vec<(String, String)>,
    /// Request body. Only read for `POST`.
    pub body: Vec<u8>,
}

impl CgiRequest {
    /// Build a request from the current process environment and stdin.
    pub fn from_process(extra_env: &[(String, String)]) -> Result<Self> {
        Self::build(env::vars(), extra_env, std::io::stdin().lock())
    }

    /// Build a request from an explicit environment and body source.
    ///
    /// `extra_env` entries replace same-named base entries. A `GET` request
    /// gets `CONTENT_LENGTH=0`.
    pub fn build(
        base_env: impl IntoIterator<Item = (String, String)>,
        extra_env: &[(String, String)],
        mut body: impl Read,
    ) -> Result<Self> {
        let mut request = Self {
            env: base_env.into_iter().collect(),
            ..Self::default()
        };
        for (name, value) in extra_env {
            request.set_var(name, value);
        }

        let method = request.var("REQUEST_METHOD").map(str::to_string);
        request.method = method.clone();
        match method.as_deref() {
            Some("POST") => {
                body.read_to_end(&mut request.body)?;
            }
            Some("GET") => request.set_var("CONTENT_LENGTH", "0"),
            _ => {}
        }

        debug!(
            method = request.method.as_deref().unwrap_or("-"),
            env_len = request.env.len(),
            body_len = request.body.len(),
            "Prepared CGI request"
        );
        Ok(request)
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_var(&mut self, name: &str, value: &str) {
        match self.env.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.env.push((name.to_string(), value.to_string())),
        }
    }
}
