//! Lifecycle events the panel sends as the first argument.

use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;

/// An event the panel invokes the plugin with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    PreInstall,
    PostInstall,
    PreUpdate,
    PostUpdate,
    PreDelete,
    /// Serve a web request through the plugin's web runner.
    RunCgi,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 6] = [
        LifecycleEvent::PreInstall,
        LifecycleEvent::PostInstall,
        LifecycleEvent::PreUpdate,
        LifecycleEvent::PostUpdate,
        LifecycleEvent::PreDelete,
        LifecycleEvent::RunCgi,
    ];

    /// The command name as it appears on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleEvent::PreInstall => "preinstall",
            LifecycleEvent::PostInstall => "postinstall",
            LifecycleEvent::PreUpdate => "preupdate",
            LifecycleEvent::PostUpdate => "postupdate",
            LifecycleEvent::PreDelete => "predelete",
            LifecycleEvent::RunCgi => "run-cgi",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| PanelError::Runner(format!("Unsupported command {}", s)))
    }
}
