//! Decoration sites and their diagnostic names
//!
//! A site identifies where a decorator is being applied: a target, an
//! optional member, and an optional parameter index. The `Display` form is
//! the human-readable identifier used in error messages.

use std::fmt;

use sigil_reflect::{ClassRegistry, Target, TargetSite};

use crate::map::CONSTRUCTOR_KEY;

/// A single decoration application site.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationSite {
    /// Target being decorated.
    pub target: Target,
    /// Member name; `None` (or the empty string) for class-level decoration.
    pub member: Option<String>,
    /// Parameter index for parameter-kind decoration.
    pub index: Option<usize>,
}

impl DecorationSite {
    /// Class-level site.
    pub fn class(target: Target) -> Self {
        Self {
            target,
            member: None,
            index: None,
        }
    }

    /// Method (or property) site.
    pub fn method(target: Target, member: impl Into<String>) -> Self {
        Self {
            target,
            member: Some(member.into()),
            index: None,
        }
    }

    /// Parameter site; pass [`CONSTRUCTOR_KEY`] as the member for
    /// constructor parameters.
    pub fn parameter(target: Target, member: impl Into<String>, index: usize) -> Self {
        Self {
            target,
            member: Some(member.into()),
            index: Some(index),
        }
    }

    /// Slot key inside the metadata map for this site.
    pub fn member_key(&self) -> &str {
        self.member.as_deref().unwrap_or(CONSTRUCTOR_KEY)
    }
}

impl fmt::Display for DecorationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = ClassRegistry::global()
            .class_name(self.target.class)
            .unwrap_or_else(|| "<unregistered>".to_string());
        match self.member.as_deref() {
            None | Some(CONSTRUCTOR_KEY) => write!(f, "class {class}")?,
            Some(member) => match self.target.site {
                TargetSite::Prototype => write!(f, "{class}.prototype.{member}")?,
                TargetSite::Constructor => write!(f, "{class}.{member}")?,
            },
        }
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}
