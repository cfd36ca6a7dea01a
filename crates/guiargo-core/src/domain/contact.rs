//! Contact status shared by clients and companies

use serde::{Deserialize, Serialize};

/// Sales pipeline status of a client or company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContactStatus {
    #[default]
    #[serde(rename = "Por contactar")]
    PorContactar,
    #[serde(rename = "En seguimiento")]
    EnSeguimiento,
    #[serde(rename = "Agendado")]
    Agendado,
    #[serde(rename = "Cliente cerrado")]
    ClienteCerrado,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::PorContactar,
        ContactStatus::EnSeguimiento,
        ContactStatus::Agendado,
        ContactStatus::ClienteCerrado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::PorContactar => "Por contactar",
            ContactStatus::EnSeguimiento => "En seguimiento",
            ContactStatus::Agendado => "Agendado",
            ContactStatus::ClienteCerrado => "Cliente cerrado",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// `status-badge status-por-contactar`, `status-badge status-en-seguimiento`, ...
    pub fn css_class(&self) -> String {
        format!("status-badge status-{}", self.as_str().to_lowercase().replace(' ', "-"))
    }
}

/// `{id, nombre, ciudad}` projection used by pick-lists and the entities endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ciudad")]
    pub city: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_closed() {
        for status in ContactStatus::ALL {
            assert_eq!(ContactStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ContactStatus::from_str("en seguimiento"), None);
        assert_eq!(ContactStatus::from_str(""), None);
    }

    #[test]
    fn test_css_class() {
        assert_eq!(ContactStatus::ClienteCerrado.css_class(), "status-badge status-cliente-cerrado");
        assert_eq!(ContactStatus::Agendado.css_class(), "status-badge status-agendado");
    }
}
