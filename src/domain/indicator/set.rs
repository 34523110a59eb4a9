//! Per-position slot map holding at most one overlay per border

use super::IndicatorPosition;

/// Mapping from border position to an optional live entry.
///
/// A slot is occupied iff an overlay exists for that border. `occupy` refuses
/// to overwrite, so a position can never hold two entries.
#[derive(Debug)]
pub struct IndicatorSet<T> {
    slots: [Option<T>; 4],
}

impl<T> IndicatorSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None],
        }
    }

    /// Entry at `position`, if any
    pub fn get(&self, position: IndicatorPosition) -> Option<&T> {
        self.slots[position.index()].as_ref()
    }

    /// Mutable entry at `position`, if any
    pub fn get_mut(&mut self, position: IndicatorPosition) -> Option<&mut T> {
        self.slots[position.index()].as_mut()
    }

    /// Check whether `position` holds an entry
    pub fn is_occupied(&self, position: IndicatorPosition) -> bool {
        self.slots[position.index()].is_some()
    }

    /// Store `entry` at a vacant `position`.
    ///
    /// Returns the entry back if the slot is already occupied.
    pub fn occupy(&mut self, position: IndicatorPosition, entry: T) -> Result<(), T> {
        let slot = &mut self.slots[position.index()];
        if slot.is_some() {
            return Err(entry);
        }
        *slot = Some(entry);
        Ok(())
    }

    /// Remove and return the entry at `position`
    pub fn vacate(&mut self, position: IndicatorPosition) -> Option<T> {
        self.slots[position.index()].take()
    }

    /// Positions without an entry
    pub fn vacant_positions(&self) -> Vec<IndicatorPosition> {
        IndicatorPosition::ALL
            .into_iter()
            .filter(|p| !self.is_occupied(*p))
            .collect()
    }

    /// Iterate occupied slots
    pub fn iter(&self) -> impl Iterator<Item = (IndicatorPosition, &T)> {
        IndicatorPosition::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|entry| (p, entry)))
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty every slot, returning the removed entries
    pub fn drain(&mut self) -> Vec<(IndicatorPosition, T)> {
        IndicatorPosition::ALL
            .into_iter()
            .filter_map(|p| self.vacate(p).map(|entry| (p, entry)))
            .collect()
    }
}

impl<T> Default for IndicatorSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_is_empty() {
        let set: IndicatorSet<u32> = IndicatorSet::new();
        assert!(set.is_empty());
        assert_eq!(set.vacant_positions().len(), 4);
    }

    #[test]
    fn occupy_rejects_duplicates() {
        let mut set = IndicatorSet::new();
        assert!(set.occupy(IndicatorPosition::Top, 1).is_ok());
        assert_eq!(set.occupy(IndicatorPosition::Top, 2), Err(2));
        assert_eq!(set.get(IndicatorPosition::Top), Some(&1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn vacate_clears_slot() {
        let mut set = IndicatorSet::new();
        set.occupy(IndicatorPosition::Left, 7).unwrap();
        assert_eq!(set.vacate(IndicatorPosition::Left), Some(7));
        assert_eq!(set.vacate(IndicatorPosition::Left), None);
        assert!(set.is_empty());
    }

    #[test]
    fn drain_returns_all_in_order() {
        let mut set = IndicatorSet::new();
        set.occupy(IndicatorPosition::Right, 'r').unwrap();
        set.occupy(IndicatorPosition::Top, 't').unwrap();

        let drained = set.drain();
        assert_eq!(
            drained,
            vec![(IndicatorPosition::Top, 't'), (IndicatorPosition::Right, 'r')]
        );
        assert!(set.is_empty());
    }

    #[test]
    fn vacant_positions_excludes_occupied() {
        let mut set = IndicatorSet::new();
        set.occupy(IndicatorPosition::Bottom, ()).unwrap();
        assert_eq!(
            set.vacant_positions(),
            vec![IndicatorPosition::Top, IndicatorPosition::Left, IndicatorPosition::Right]
        );
    }
}
