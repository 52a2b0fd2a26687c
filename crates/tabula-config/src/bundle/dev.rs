//! Development server options exposed to the external dev server.

use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOptions {
    /// Forwarding rules, matched in order
    pub proxy: Vec<ProxyRule>,

    /// Directory served as static content
    pub content_base: PathBuf,

    pub port: u16,

    pub hot: bool,

    pub inline: bool,
}

impl DevServerOptions {
    pub fn api_rule(&self) -> Option<&ProxyRule> {
        self.proxy.iter().find(|rule| rule.options.change_origin)
    }

    pub fn socket_rule(&self) -> Option<&ProxyRule> {
        self.proxy.iter().find(|rule| rule.options.websocket)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyRule {
    #[serde(rename = "context")]
    pub path_pattern: String,

    pub target: String,

    #[serde(flatten)]
    pub options: ProxyOptions,
}

impl ProxyRule {
    pub fn new(path_pattern: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path_pattern: path_pattern.into(),
            target: target.into(),
            options: ProxyOptions::default(),
        }
    }

    /// Rewrite the Host header to the target origin
    pub fn change_origin(mut self) -> Self {
        self.options.change_origin = true;
        self
    }

    /// Forward WebSocket upgrades
    pub fn websocket(mut self) -> Self {
        self.options.websocket = true;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyOptions {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub change_origin: bool,

    #[serde(rename = "ws", skip_serializing_if = "std::ops::Not::not")]
    pub websocket: bool,
}
