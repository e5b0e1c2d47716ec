//! Observable collections of plottables and axes.
//!
//! A user interface subscribes to a collection and gets notified of every structural change
//! (items added, removed, moved, replaced, cleared) and of every item mutated through
//! [`ObservableCollection::get_mut`]. This is enough to know when the plot must be rendered again.
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::axis::{Axis, Edge};
use crate::plottable::Plottable;
use crate::ColorU8;

/// Identifies a subscription, to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A list of callbacks invoked on each emitted value
pub struct Signal<T> {
    next_id: u64,
    slots: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.slots.len())
            .finish()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Signal {
            next_id: 0,
            slots: Vec::new(),
        }
    }
}

impl<T> Signal<T> {
    /// A signal without subscriber
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.slots.len();
        self.slots.retain(|(sid, _)| *sid != id);
        self.slots.len() != len
    }

    /// Invoke every callback with `value`, in subscription order
    pub fn emit(&mut self, value: &T) {
        for (_, slot) in self.slots.iter_mut() {
            slot(value);
        }
    }

    /// Number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.slots.len()
    }
}

/// A change notified by an [`ObservableCollection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// `count` items were inserted starting at `index`
    Added {
        /// Position of the first new item
        index: usize,
        /// Number of new items
        count: usize,
    },
    /// `count` items were removed starting at `index`
    Removed {
        /// Former position of the first removed item
        index: usize,
        /// Number of removed items
        count: usize,
    },
    /// The item at `index` was swapped for another one
    Replaced {
        /// Position of the item
        index: usize,
    },
    /// An item was moved
    Moved {
        /// Former position
        from: usize,
        /// New position
        to: usize,
    },
    /// The whole collection changed
    Reset,
    /// The item at `index` was mutated in place
    ItemChanged {
        /// Position of the item
        index: usize,
    },
}

/// Errors of collection operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// The index does not designate an item
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The collection length
        len: usize,
    },
    /// Axis indices 0 and 1 belong to the default axes
    ReservedAxisIndex(usize),
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for a collection of {} items", index, len)
            }
            CollectionError::ReservedAxisIndex(index) => {
                write!(f, "axis index {} is reserved for default axes", index)
            }
        }
    }
}

impl std::error::Error for CollectionError {}

/// A vector notifying subscribers of its changes
pub struct ObservableCollection<T> {
    items: Vec<T>,
    changed: Signal<Change>,
}

impl<T: fmt::Debug> fmt::Debug for ObservableCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCollection")
            .field("items", &self.items)
            .field("changed", &self.changed)
            .finish()
    }
}

impl<T> Default for ObservableCollection<T> {
    fn default() -> Self {
        ObservableCollection {
            items: Vec::new(),
            changed: Signal::new(),
        }
    }
}

impl<T> ObservableCollection<T> {
    /// An empty collection
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&mut self, change: Change) {
        log::trace!("collection change: {:?}", change);
        self.changed.emit(&change);
    }

    fn check(&self, index: usize, len: usize) -> Result<(), CollectionError> {
        if index < len {
            Ok(())
        } else {
            Err(CollectionError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Subscribe to changes
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Change) + 'static,
    {
        self.changed.subscribe(callback)
    }

    /// Unsubscribe from changes
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item and return its index
    pub fn push(&mut self, item: T) -> usize {
        let index = self.items.len();
        self.items.push(item);
        self.notify(Change::Added { index, count: 1 });
        index
    }

    /// Append several items, notified as one change
    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let index = self.items.len();
        self.items.extend(items);
        let count = self.items.len() - index;
        if count > 0 {
            self.notify(Change::Added { index, count });
        }
    }

    /// Insert an item at `index`, which may be the length of the collection
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), CollectionError> {
        self.check(index, self.items.len() + 1)?;
        self.items.insert(index, item);
        self.notify(Change::Added { index, count: 1 });
        Ok(())
    }

    /// Remove and return the item at `index`
    pub fn remove(&mut self, index: usize) -> Result<T, CollectionError> {
        self.check(index, self.items.len())?;
        let item = self.items.remove(index);
        self.notify(Change::Removed { index, count: 1 });
        Ok(item)
    }

    /// Move the item at `from` so that it ends up at `to`
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), CollectionError> {
        self.check(from, self.items.len())?;
        self.check(to, self.items.len())?;
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
            self.notify(Change::Moved { from, to });
        }
        Ok(())
    }

    /// Swap the item at `index` for `item` and return the former one
    pub fn replace(&mut self, index: usize, item: T) -> Result<T, CollectionError> {
        self.check(index, self.items.len())?;
        let old = std::mem::replace(&mut self.items[index], item);
        self.notify(Change::Replaced { index });
        Ok(old)
    }

    /// Remove all items
    pub fn clear(&mut self) {
        self.items.clear();
        self.notify(Change::Reset);
    }

    /// The item at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable access to the item at `index`.
    /// [`Change::ItemChanged`] is notified when the returned guard is dropped.
    pub fn get_mut(&mut self, index: usize) -> Option<ItemMut<'_, T>> {
        if index < self.items.len() {
            Some(ItemMut {
                collection: self,
                index,
            })
        } else {
            None
        }
    }

    /// Iterate over the items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The items as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Mutable access without notification, for state that doesn't affect rendering
    /// such as layout results or the index recorded by hit-testing.
    pub(crate) fn get_mut_quiet(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub(crate) fn iter_mut_quiet(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<'a, T> IntoIterator for &'a ObservableCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Mutable access to a collection item, notifying the change when dropped
pub struct ItemMut<'a, T> {
    collection: &'a mut ObservableCollection<T>,
    index: usize,
}

impl<T: fmt::Debug> fmt::Debug for ItemMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemMut")
            .field("index", &self.index)
            .field("item", self.deref())
            .finish()
    }
}

impl<T> ItemMut<'_, T> {
    /// Position of the item in its collection
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Deref for ItemMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.collection.items[self.index]
    }
}

impl<T> DerefMut for ItemMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.collection.items[self.index]
    }
}

impl<T> Drop for ItemMut<'_, T> {
    fn drop(&mut self) {
        let index = self.index;
        self.collection.notify(Change::ItemChanged { index });
    }
}

/// The plottables of a plot, in render order
pub type PlottableCollection = ObservableCollection<Box<dyn Plottable>>;

impl ObservableCollection<Box<dyn Plottable>> {
    /// The plottables of concrete type `T`, with their index
    pub fn by_type<T: Plottable>(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_any().downcast_ref::<T>().map(|t| (i, t)))
    }

    /// Mutable access to the plottable at `index` if it is of concrete type `T`.
    /// [`Change::ItemChanged`] is notified when the returned guard is dropped.
    pub fn by_type_mut<T: Plottable>(&mut self, index: usize) -> Option<TypedItemMut<'_, T>> {
        let is_t = self
            .items
            .get(index)
            .is_some_and(|p| p.as_any().is::<T>());
        if !is_t {
            return None;
        }
        self.get_mut(index).map(|inner| TypedItemMut {
            inner,
            _marker: std::marker::PhantomData,
        })
    }
}

/// Typed mutable access to a plottable, notifying the change when dropped
pub struct TypedItemMut<'a, T> {
    inner: ItemMut<'a, Box<dyn Plottable>>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: fmt::Debug + Plottable> fmt::Debug for TypedItemMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedItemMut")
            .field("index", &self.inner.index())
            .finish()
    }
}

impl<T: Plottable> Deref for TypedItemMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.inner.as_any().downcast_ref::<T>() {
            Some(t) => t,
            None => unreachable!("type checked at construction"),
        }
    }
}

impl<T: Plottable> DerefMut for TypedItemMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.inner.as_any_mut().downcast_mut::<T>() {
            Some(t) => t,
            None => unreachable!("type checked at construction"),
        }
    }
}

/// The axes of a plot.
///
/// Always contains the four default axes: left and bottom with index 0 (the primary axes),
/// right and top with index 1 (the secondary axes). Additional axes are added with index 2 and above.
#[derive(Debug)]
pub struct AxisCollection {
    axes: ObservableCollection<Axis>,
}

impl Default for AxisCollection {
    fn default() -> Self {
        AxisCollection::new()
    }
}

impl AxisCollection {
    /// A collection holding the four default axes
    pub fn new() -> Self {
        let mut left = Axis::new(Edge::Left, 0);
        left.ticks.major_grid_visible = true;

        let mut right = Axis::new(Edge::Right, 1);
        right.ticks.major_tick_visible = false;
        right.ticks.tick_label_visible = false;
        right.ticks.minor_tick_visible = false;
        right.ticks.major_grid_visible = false;

        let mut bottom = Axis::new(Edge::Bottom, 0);
        bottom.ticks.major_grid_visible = true;

        let mut top = Axis::new(Edge::Top, 1);
        top.ticks.major_tick_visible = false;
        top.ticks.tick_label_visible = false;
        top.ticks.minor_tick_visible = false;
        top.ticks.major_grid_visible = false;

        let mut axes = ObservableCollection::new();
        axes.items = vec![left, right, bottom, top];
        AxisCollection { axes }
    }

    /// Add an axis on `edge` with the given index, title and color.
    ///
    /// Index 0 and 1 are reserved for default axes. The color applies to the title,
    /// the tick labels, the tick marks and the spine.
    pub fn add_axis(
        &mut self,
        edge: Edge,
        index: usize,
        title: Option<&str>,
        color: Option<ColorU8>,
    ) -> Result<usize, CollectionError> {
        if index <= 1 {
            return Err(CollectionError::ReservedAxisIndex(index));
        }
        let mut axis = Axis::new(edge, index);
        axis.label.label = title.map(str::to_string);
        axis.ticks.major_tick_visible = true;
        axis.ticks.tick_label_visible = true;
        axis.ticks.minor_tick_visible = true;
        axis.ticks.major_grid_visible = false;
        if let Some(color) = color {
            axis.set_color(color);
        }
        Ok(self.axes.push(axis))
    }

    /// The horizontal axis with the given index
    pub fn horizontal(&self, index: usize) -> Option<&Axis> {
        self.axes
            .iter()
            .find(|a| a.edge.is_horizontal() && a.index == index)
    }

    /// The vertical axis with the given index
    pub fn vertical(&self, index: usize) -> Option<&Axis> {
        self.axes
            .iter()
            .find(|a| !a.edge.is_horizontal() && a.index == index)
    }

    /// Position of the horizontal (or vertical) axis with the given index.
    /// Falls back to the primary axis of the same orientation.
    pub(crate) fn position_or_primary(&self, horizontal: bool, index: usize) -> usize {
        let find = |idx: usize| {
            self.axes
                .iter()
                .position(|a| a.edge.is_horizontal() == horizontal && a.index == idx)
        };
        match find(index) {
            Some(pos) => pos,
            None => {
                log::warn!(
                    "no {} axis with index {}, using the primary axis",
                    if horizontal { "horizontal" } else { "vertical" },
                    index
                );
                find(0).unwrap_or(if horizontal { 2 } else { 0 })
            }
        }
    }

    /// Remove an axis added with [`add_axis`](Self::add_axis). Default axes cannot be removed.
    pub fn remove(&mut self, position: usize) -> Result<Axis, CollectionError> {
        match self.axes.get(position) {
            Some(axis) if axis.index <= 1 => Err(CollectionError::ReservedAxisIndex(axis.index)),
            _ => self.axes.remove(position),
        }
    }

    /// Number of axes
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Always false, the default axes cannot be removed
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// The axis at `position`
    pub fn get(&self, position: usize) -> Option<&Axis> {
        self.axes.get(position)
    }

    /// Mutable access to the axis at `position`, notified when the guard is dropped
    pub fn get_mut(&mut self, position: usize) -> Option<ItemMut<'_, Axis>> {
        self.axes.get_mut(position)
    }

    /// Iterate over the axes
    pub fn iter(&self) -> std::slice::Iter<'_, Axis> {
        self.axes.iter()
    }

    /// Subscribe to changes
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Change) + 'static,
    {
        self.axes.subscribe(callback)
    }

    /// Unsubscribe from changes
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.axes.unsubscribe(id)
    }

    pub(crate) fn get_mut_quiet(&mut self, position: usize) -> Option<&mut Axis> {
        self.axes.get_mut_quiet(position)
    }

    pub(crate) fn iter_mut_quiet(&mut self) -> std::slice::IterMut<'_, Axis> {
        self.axes.iter_mut_quiet()
    }
}

impl<'a> IntoIterator for &'a AxisCollection {
    type Item = &'a Axis;
    type IntoIter = std::slice::Iter<'a, Axis>;

    fn into_iter(self) -> Self::IntoIter {
        self.axes.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::color;

    fn recorded() -> (ObservableCollection<i32>, Rc<RefCell<Vec<Change>>>) {
        let mut c = ObservableCollection::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log2 = log.clone();
        c.subscribe(move |ch: &Change| log2.borrow_mut().push(*ch));
        (c, log)
    }

    #[test]
    fn structural_changes_are_notified() {
        let (mut c, log) = recorded();
        c.push(1);
        c.push(2);
        c.insert(0, 0).unwrap();
        c.move_item(0, 2).unwrap();
        assert_eq!(c.as_slice(), &[1, 2, 0]);
        assert_eq!(c.replace(1, 5).unwrap(), 2);
        assert_eq!(c.remove(0).unwrap(), 1);
        c.clear();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Change::Added { index: 0, count: 1 },
                Change::Added { index: 1, count: 1 },
                Change::Added { index: 0, count: 1 },
                Change::Moved { from: 0, to: 2 },
                Change::Replaced { index: 1 },
                Change::Removed { index: 0, count: 1 },
                Change::Reset,
            ]
        );
    }

    #[test]
    fn item_mut_notifies_on_drop() {
        let (mut c, log) = recorded();
        c.push(1);
        {
            let mut item = c.get_mut(0).unwrap();
            *item += 41;
            assert!(log.borrow().len() == 1);
        }
        assert_eq!(c.get(0), Some(&42));
        assert_eq!(log.borrow().last(), Some(&Change::ItemChanged { index: 0 }));
    }

    #[test]
    fn out_of_range() {
        let (mut c, log) = recorded();
        c.push(1);
        assert_eq!(
            c.remove(3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert!(c.insert(2, 0).is_err());
        assert!(c.insert(1, 0).is_ok());
        assert!(c.get_mut(5).is_none());
        assert!(c.move_item(0, 2).is_err());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut c = ObservableCollection::new();
        let count = Rc::new(RefCell::new(0));
        let count2 = count.clone();
        let id = c.subscribe(move |_: &Change| *count2.borrow_mut() += 1);
        c.push(1);
        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        c.push(2);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn default_axes() {
        let axes = AxisCollection::new();
        assert_eq!(axes.len(), 4);
        let left = axes.vertical(0).unwrap();
        assert_eq!(left.edge, Edge::Left);
        assert!(left.ticks.major_grid_visible);
        let right = axes.vertical(1).unwrap();
        assert!(!right.ticks.tick_label_visible);
        assert!(!right.ticks.major_grid_visible);
        let top = axes.horizontal(1).unwrap();
        assert_eq!(top.edge, Edge::Top);
        assert!(!top.ticks.major_tick_visible);
        assert!(axes.horizontal(0).unwrap().ticks.major_grid_visible);
    }

    #[test]
    fn add_axis_rejects_reserved_index() {
        let mut axes = AxisCollection::new();
        assert_eq!(
            axes.add_axis(Edge::Right, 1, None, None),
            Err(CollectionError::ReservedAxisIndex(1))
        );
        let pos = axes
            .add_axis(Edge::Right, 2, Some("extra"), Some(color::RED))
            .unwrap();
        let axis = axes.get(pos).unwrap();
        assert_eq!(axis.index, 2);
        assert_eq!(axis.label.font.color, color::RED);
        assert_eq!(axis.ticks.tick_label_font.color, color::RED);
        assert_eq!(axis.line.color, color::RED);
        assert!(!axis.ticks.major_grid_visible);
        assert!(axes.remove(0).is_err());
        assert!(axes.remove(pos).is_ok());
    }

    #[test]
    fn missing_axis_falls_back_to_primary() {
        let axes = AxisCollection::new();
        let pos = axes.position_or_primary(false, 7);
        assert_eq!(axes.get(pos).unwrap().index, 0);
        assert_eq!(axes.get(pos).unwrap().edge, Edge::Left);
    }
}
