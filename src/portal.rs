//! The merchant's archive: tabbed cards shown when the merchant is
//! activated. The core only tracks which tab is open; the overlay draws it.

use std::fmt;

pub const PORTAL_TITLE: &str = "THE MERCHANT'S ARCHIVE";

/// Delay between successive card entrances, seconds.
pub const CARD_STAGGER: f32 = 0.15;
pub const CARD_ENTRANCE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PortalTab {
    #[default]
    Overview,
    TechnicalStack,
    LegacyTrade,
}

impl PortalTab {
    pub const ALL: [PortalTab; 3] = [Self::Overview, Self::TechnicalStack, Self::LegacyTrade];

    /// Sidebar label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "OVERVIEW",
            Self::TechnicalStack => "TECHNICAL_STK",
            Self::LegacyTrade => "LEGACY_TRD",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.label() == label.trim())
    }

    #[must_use]
    pub fn cards(self) -> &'static [Card] {
        match self {
            Self::Overview => &OVERVIEW,
            Self::TechnicalStack => &TECHNICAL_STACK,
            Self::LegacyTrade => &LEGACY_TRADE,
        }
    }
}

impl fmt::Display for PortalTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub heading: &'static str,
    pub body: &'static str,
    pub tag: &'static str,
}

impl Card {
    const fn new(heading: &'static str, body: &'static str, tag: &'static str) -> Self {
        Self { heading, body, tag }
    }

    /// When the card at `index` starts sliding in after the tab opens.
    #[must_use]
    pub fn entrance_delay(index: usize) -> f32 {
        index as f32 * CARD_STAGGER
    }
}

const OVERVIEW: [Card; 2] = [
    Card::new(
        "Ouassim El Bachiri",
        "Multi-disciplinary developer specializing in high-fidelity 3D and cloud architectures.",
        "PROFILE_V1",
    ),
    Card::new(
        "The Ochre Protocol",
        "Marrakech isn't just a place; it's a technical philosophy of layering and complexity.",
        "CORE_MISSION",
    ),
];

const TECHNICAL_STACK: [Card; 2] = [
    Card::new(
        "Engine Architecture",
        "Three.js, GLSL, WebGPU and customized post-processing pipelines.",
        "FRONTEND",
    ),
    Card::new(
        "Systems Cloud",
        "AWS Solutions Architecture, Terraform, Lambda, and Scalable Node.js clusters.",
        "BACKEND",
    ),
];

const LEGACY_TRADE: [Card; 2] = [
    Card::new(
        "Moroccan Zellige",
        "Applying ancient geometric patterns into modern vector-based UI systems.",
        "DESIGN",
    ),
    Card::new(
        "The Medina Labyrinth",
        "Architecture as a model for scalable API design: complex yet navigable.",
        "ANALOGY",
    ),
];

/// Open/closed state of the archive panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Portal {
    open: bool,
    tab: PortalTab,
}

impl Portal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    #[must_use]
    pub fn tab(&self) -> PortalTab {
        self.tab
    }

    /// Opens on the overview tab, also when already open.
    pub fn open(&mut self) {
        self.open = true;
        self.tab = PortalTab::Overview;
    }

    /// Returns false if the panel was already closed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Switches tabs. Returns false when closed or already on `tab`.
    pub fn select(&mut self, tab: PortalTab) -> bool {
        if !self.open || self.tab == tab {
            return false;
        }
        self.tab = tab;
        true
    }

    #[must_use]
    pub fn cards(&self) -> &'static [Card] {
        self.tab.cards()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for tab in PortalTab::ALL {
            assert_eq!(PortalTab::from_label(tab.label()), Some(tab));
            assert_eq!(tab.cards().len(), 2);
        }
        assert_eq!(PortalTab::from_label(" OVERVIEW "), Some(PortalTab::Overview));
        assert_eq!(PortalTab::from_label("CONTACT"), None);
    }

    #[test]
    fn reopening_resets_to_overview() {
        let mut portal = Portal::new();
        assert!(!portal.select(PortalTab::LegacyTrade));
        portal.open();
        assert!(portal.select(PortalTab::LegacyTrade));
        assert!(portal.close());
        assert!(!portal.close());
        portal.open();
        assert_eq!(portal.tab(), PortalTab::Overview);
    }
}
