//! Semantic node metadata.
//!
//! Behaviour is dispatched on what a node *declares* at construction time,
//! never on the shape of its geometry:
//!
//! - [`NodeTags`]: additive labels (`interactive`, `animated:*`)
//! - [`Motion`]: the per-node animation payload the scheduler integrates
//! - [`InteractiveTarget`]: what a click on the node (or a descendant) means

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Additive semantic labels on a scene node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeTags: u32 {
        const INTERACTIVE = 1 << 0;
        /// Scrolls its appearance's texture every frame.
        const WATER       = 1 << 1;
        const SPLASH      = 1 << 2;
        const DUST        = 1 << 3;
        /// Waterfall column breathing on X/Z.
        const PULSE       = 1 << 4;
        /// Slow global bob of the diorama root.
        const VIBRATE     = 1 << 5;
    }
}

impl NodeTags {
    const LABELS: [(&'static str, NodeTags); 6] = [
        ("interactive", NodeTags::INTERACTIVE),
        ("animated:water", NodeTags::WATER),
        ("animated:splash", NodeTags::SPLASH),
        ("animated:dust", NodeTags::DUST),
        ("animated:pulse", NodeTags::PULSE),
        ("animated:vibrate", NodeTags::VIBRATE),
    ];

    /// Parses a single label such as `"animated:water"`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, tag)| *tag)
    }

    /// Labels of every set flag, in declaration order.
    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        Self::LABELS
            .into_iter()
            .filter(move |(_, tag)| self.contains(*tag))
            .map(|(name, _)| name)
    }
}

/// Per-node animation state, assigned once when the node is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Bobbing mist droplet. `phase` is drawn once at build time.
    Splash { phase: f32, rest: Vec3 },
    /// Free-floating particle. `velocity` is in units per 60 Hz frame.
    Dust { velocity: Vec3 },
    Pulse { rest_scale: Vec3 },
    Vibrate { rest: Vec3, amplitude: f32, rate: f32 },
}

impl Motion {
    /// The tag the scheduler dispatches this motion on.
    #[must_use]
    pub fn tag(&self) -> NodeTags {
        match self {
            Self::Splash { .. } => NodeTags::SPLASH,
            Self::Dust { .. } => NodeTags::DUST,
            Self::Pulse { .. } => NodeTags::PULSE,
            Self::Vibrate { .. } => NodeTags::VIBRATE,
        }
    }
}

/// Domain id carried by an interactive node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId(Cow<'static, str>);

impl TargetId {
    pub const MERCHANT: TargetId = TargetId(Cow::Borrowed("merchant"));

    #[must_use]
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marks a node as clickable.
///
/// `reaction_part` names a descendant (e.g. the merchant's head) animated
/// when the target is activated. It is looked up by name in the target's
/// subtree at activation time and never stored as a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveTarget {
    pub id: TargetId,
    pub reaction_part: Option<Cow<'static, str>>,
}

impl InteractiveTarget {
    #[must_use]
    pub fn new(id: TargetId) -> Self {
        Self {
            id,
            reaction_part: None,
        }
    }

    #[must_use]
    pub fn with_reaction_part(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.reaction_part = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for (label, tag) in NodeTags::LABELS {
            assert_eq!(NodeTags::from_label(label), Some(tag));
        }
        assert_eq!(NodeTags::from_label("animated:fire"), None);
    }

    #[test]
    fn labels_of_combined_tags() {
        let tags = NodeTags::WATER | NodeTags::PULSE;
        let labels: Vec<_> = tags.labels().collect();
        assert_eq!(labels, ["animated:water", "animated:pulse"]);
    }
}
