//! Attached energy and move affordability.
//!
//! An `EnergyPool` keeps one entry per element in insertion order. Entries
//! exist only while their count is positive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::element::Element;

/// Energy attached to one creature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyPool {
    entries: SmallVec<[(Element, u32); 4]>,
}

impl EnergyPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` energy of `element`.
    pub fn attach(&mut self, element: Element, amount: u32) {
        if amount == 0 {
            return;
        }
        match self.entries.iter_mut().find(|(e, _)| *e == element) {
            Some((_, count)) => *count += amount,
            None => self.entries.push((element, amount)),
        }
    }

    /// Remove up to `amount` energy.
    ///
    /// With an element, only that entry is touched. Without one, only the
    /// first-inserted entry is touched, even if it holds less than `amount`.
    /// Counts clamp at zero and the entry disappears when it gets there.
    pub fn remove(&mut self, amount: u32, element: Option<Element>) {
        let position = match element {
            Some(element) => self.entries.iter().position(|(e, _)| *e == element),
            None if self.entries.is_empty() => None,
            None => Some(0),
        };
        let Some(i) = position else {
            return;
        };
        let count = &mut self.entries[i].1;
        *count = count.saturating_sub(amount);
        if *count == 0 {
            self.entries.remove(i);
        }
    }

    /// Energy of one element.
    #[must_use]
    pub fn get(&self, element: Element) -> u32 {
        self.entries
            .iter()
            .find(|(e, _)| *e == element)
            .map_or(0, |(_, count)| *count)
    }

    /// Energy of all elements.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Can this pool pay `cost` without touching the pool itself?
    ///
    /// Typed costs must be met by energy of exactly that type. The generic
    /// (`Normal`) cost is then paid from whatever is left, of any type.
    #[must_use]
    pub fn can_afford(&self, cost: &BTreeMap<Element, u32>) -> bool {
        let mut working = self.entries.clone();

        for (&element, &needed) in cost {
            if element.is_generic() {
                continue;
            }
            match working.iter_mut().find(|(e, _)| *e == element) {
                Some((_, have)) if *have >= needed => *have -= needed,
                _ if needed == 0 => {}
                _ => return false,
            }
        }

        let leftover: u32 = working.iter().map(|(_, count)| count).sum();
        leftover >= cost.get(&Element::Normal).copied().unwrap_or(0)
    }
}
