//! Elemental power: the resource spent to summon characters and cast skills

use crate::error::IllegalMove;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card affinity and resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Element {
    Water,
    Fire,
    Earth,
    Air,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Water, Element::Fire, Element::Earth, Element::Air];

    fn index(self) -> usize {
        match self {
            Element::Water => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Air => 3,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Water => write!(f, "WATER"),
            Element::Fire => write!(f, "FIRE"),
            Element::Earth => write!(f, "EARTH"),
            Element::Air => write!(f, "AIR"),
        }
    }
}

impl FromStr for Element {
    type Err = String;

    /// Parse the element token used in card records (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WATER" => Ok(Element::Water),
            "FIRE" => Ok(Element::Fire),
            "EARTH" => Ok(Element::Earth),
            "AIR" => Ok(Element::Air),
            other => Err(format!("unknown element '{other}'")),
        }
    }
}

/// Per-element power ledger for one player
///
/// Two tiers per element: `total` is everything lands have produced so far,
/// `current` is what is still spendable this turn. `current <= total` holds
/// after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerManager {
    total: [u32; 4],
    current: [u32; 4],
}

impl PowerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow both tiers of an element (a land was played); saturates at `u32::MAX`
    pub fn add(&mut self, element: Element, amount: u32) {
        let i = element.index();
        self.total[i] = self.total[i].saturating_add(amount);
        self.current[i] = self.current[i].saturating_add(amount);
    }

    pub fn total(&self, element: Element) -> u32 {
        self.total[element.index()]
    }

    pub fn current(&self, element: Element) -> u32 {
        self.current[element.index()]
    }

    pub fn can_spend(&self, element: Element, amount: u32) -> bool {
        self.current(element) >= amount
    }

    /// Check that `amount` of `element` is available, without spending it
    pub fn check_spend(&self, element: Element, amount: u32) -> Result<(), IllegalMove> {
        if self.can_spend(element, amount) {
            Ok(())
        } else {
            Err(IllegalMove::InsufficientPower {
                element,
                needed: amount,
                available: self.current(element),
            })
        }
    }

    /// Spend power for a cost; leaves the ledger unchanged on failure
    pub fn spend(&mut self, element: Element, amount: u32) -> Result<(), IllegalMove> {
        self.check_spend(element, amount)?;
        self.current[element.index()] -= amount;
        Ok(())
    }

    /// Turn-boundary refresh: all accumulated power is spendable again
    pub fn refresh(&mut self) {
        self.current = self.total;
    }
}

impl fmt::Display for PowerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for element in Element::ALL {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{}:{}/{}", element, self.current(element), self.total(element))?;
        }
        Ok(())
    }
}
