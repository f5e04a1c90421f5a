use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Feature areas of the dashboard. Only [`Tab::AiAssistant`] has a live
/// panel, the rest render a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    AiAssistant,
    Protocols,
    DrugCalc,
    Triage,
    MedSearch,
    Files,
}

const ALL_TABS: [Tab; 6] = [
    Tab::AiAssistant,
    Tab::Protocols,
    Tab::DrugCalc,
    Tab::Triage,
    Tab::MedSearch,
    Tab::Files,
];

impl Tab {
    pub fn all() -> &'static [Tab] {
        &ALL_TABS
    }

    pub fn key(&self) -> &'static str {
        match self {
            Tab::AiAssistant => "ai-assistant",
            Tab::Protocols => "protocols",
            Tab::DrugCalc => "drug-calc",
            Tab::Triage => "triage",
            Tab::MedSearch => "med-search",
            Tab::Files => "files",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::AiAssistant => "AI Assistant",
            Tab::Protocols => "Protocols",
            Tab::DrugCalc => "Drug Calc",
            Tab::Triage => "Triage",
            Tab::MedSearch => "Med Search",
            Tab::Files => "Files",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Tab::AiAssistant)
    }
}

impl Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
