use serde::{Deserialize, Serialize};
use skypass_shared::NavigationPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Home,
    /// The two-step landing wizard
    Landing,
    Journey,
    Payment,
    Settings,
    Adventure,
    Logout,
}

impl Screen {
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Home => "/",
            Screen::Landing => "/transfer",
            Screen::Journey => "/journey",
            Screen::Payment => "/payment",
            Screen::Settings => "/settings",
            Screen::Adventure => "/adventure",
            Screen::Logout => "/logout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub screen: Screen,
    pub payload: Option<NavigationPayload>,
}

/// Moves between screens, carrying an optional context payload
#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_screen(&self) -> Option<Screen> {
        self.current.as_ref().map(|r| r.screen)
    }

    /// Replace the current route. The previous route and any payload it
    /// still held are dropped.
    pub fn navigate(&mut self, screen: Screen, payload: Option<NavigationPayload>) {
        tracing::debug!("Navigating to {}", screen.path());
        self.current = Some(Route { screen, payload });
    }

    /// Hand the payload to the screen that was just entered. Later calls
    /// return `None`.
    pub fn take_payload(&mut self) -> Option<NavigationPayload> {
        self.current.as_mut().and_then(|r| r.payload.take())
    }
}
