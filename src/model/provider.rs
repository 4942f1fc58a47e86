//! Hosted chat providers the web view can display.

use crate::error::{OverlayError, Result};

/// One entry of the provider table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provider {
    pub name: &'static str,
    pub url: &'static str,
}

/// Fixed provider table, in menu order.
pub const PROVIDERS: [Provider; 5] = [
    Provider {
        name: "ChatGPT",
        url: "https://chat.openai.com",
    },
    Provider {
        name: "Gemini",
        url: "https://gemini.google.com/app",
    },
    Provider {
        name: "AIStudio",
        url: "https://aistudio.google.com",
    },
    Provider {
        name: "Claude",
        url: "https://claude.ai/chats",
    },
    Provider {
        name: "Grok",
        url: "https://grok.com/chat",
    },
];

/// Provider selected when nothing valid has been persisted.
pub const DEFAULT_PROVIDER_NAME: &str = "AIStudio";

/// Find a provider by exact display name.
pub fn find(name: &str) -> Result<&'static Provider> {
    PROVIDERS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| OverlayError::UnknownProvider(name.to_string()))
}

pub fn default_provider() -> &'static Provider {
    PROVIDERS
        .iter()
        .find(|p| p.name == DEFAULT_PROVIDER_NAME)
        .unwrap_or(&PROVIDERS[0])
}

/// Resolve a persisted selection, falling back to the default for a missing
/// or unknown name.
pub fn resolve_selected(saved: Option<&str>) -> &'static Provider {
    match saved {
        Some(name) => find(name).unwrap_or_else(|_| {
            tracing::warn!("[Provider] Saved provider {name:?} is unknown, using default");
            default_provider()
        }),
        None => default_provider(),
    }
}
