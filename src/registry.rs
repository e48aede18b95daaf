//! Compilation-scoped options registry
//!
//! Associates validated [`HtmlPluginOptions`] with a `(compilation, uid)`
//! pair so later build stages can look them up without threading them
//! through every call.
//!
//! The registry never owns a compilation. Each compilation gets one slot,
//! keyed by the address of its `Arc` and holding only a [`Weak`] back
//! reference. While that `Weak` exists the allocation cannot be reused, so
//! the address stays a unique identity for the slot's lifetime. Once the
//! build drops its last strong reference the compilation is freed, the slot
//! becomes unobservable, and [`OptionsRegistry::sweep`] reclaims it.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use html_plugin_options::options::HtmlPluginOptions;
//! use html_plugin_options::registry::OptionsRegistry;
//!
//! struct Compilation;
//!
//! let registry = OptionsRegistry::<Compilation>::new();
//! let compilation = Arc::new(Compilation);
//!
//! let options = HtmlPluginOptions {
//!     title: Some("Docs".to_string()),
//!     ..Default::default()
//! };
//! registry.register_typed(&compilation, 0, options);
//!
//! let stored = registry.lookup_typed(&compilation, 0).unwrap();
//! assert_eq!(stored.title.as_deref(), Some("Docs"));
//! assert!(registry.lookup_typed(&compilation, 1).is_none());
//! ```

use log::debug;
use parking_lot::Mutex;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::HtmlPluginError;
use crate::options::HtmlPluginOptions;

/// Plugin instance identifier, unique within one compilation
pub type Uid = u32;

/// Untyped handle the host passes in place of a compilation
pub type HostObject = Arc<dyn Any + Send + Sync>;

struct Slot<C> {
    compilation: Weak<C>,
    entries: HashMap<Uid, Arc<HtmlPluginOptions>>,
}

impl<C> Slot<C> {
    fn is_live(&self) -> bool {
        self.compilation.strong_count() > 0
    }
}

/// Store of validated options keyed by compilation and plugin instance
pub struct OptionsRegistry<C> {
    slots: Mutex<HashMap<usize, Slot<C>>>,
}

impl<C> Default for OptionsRegistry<C> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<C> fmt::Debug for OptionsRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsRegistry")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

fn identity<C>(compilation: &Arc<C>) -> usize {
    Arc::as_ptr(compilation).cast::<()>() as usize
}

fn sweep_dead<C>(slots: &mut HashMap<usize, Slot<C>>) -> usize {
    let before = slots.len();
    slots.retain(|_, slot| slot.is_live());
    before - slots.len()
}

impl<C: Send + Sync + 'static> OptionsRegistry<C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn downcast(
        compilation: &HostObject,
        operation: &'static str,
    ) -> Result<Arc<C>, HtmlPluginError> {
        Arc::clone(compilation)
            .downcast::<C>()
            .map_err(|_| HtmlPluginError::ContractViolation {
                expected: type_name::<C>(),
                operation,
            })
    }

    /// Store options for `uid`, replacing any earlier entry for the same key
    ///
    /// Fails with [`HtmlPluginError::ContractViolation`] when `compilation`
    /// is not a `C`; the registry is left untouched in that case.
    pub fn register(
        &self,
        compilation: &HostObject,
        uid: Uid,
        options: HtmlPluginOptions,
    ) -> Result<(), HtmlPluginError> {
        let compilation = Self::downcast(compilation, "register")?;
        self.register_typed(&compilation, uid, options);
        Ok(())
    }

    /// Options registered for `uid`, or `None`
    pub fn lookup(
        &self,
        compilation: &HostObject,
        uid: Uid,
    ) -> Result<Option<Arc<HtmlPluginOptions>>, HtmlPluginError> {
        let compilation = Self::downcast(compilation, "lookup")?;
        Ok(self.lookup_typed(&compilation, uid))
    }

    /// Drop the entry for `uid` if there is one
    pub fn remove(&self, compilation: &HostObject, uid: Uid) -> Result<(), HtmlPluginError> {
        let compilation = Self::downcast(compilation, "remove")?;
        self.remove_typed(&compilation, uid);
        Ok(())
    }

    /// Drop every entry of a compilation at once
    ///
    /// For hosts that tear compilations down explicitly instead of relying
    /// on [`sweep`](Self::sweep). Returns the number of entries dropped.
    pub fn release(&self, compilation: &HostObject) -> Result<usize, HtmlPluginError> {
        let compilation = Self::downcast(compilation, "release")?;
        Ok(self.release_typed(&compilation))
    }

    /// Typed form of [`register`](Self::register)
    pub fn register_typed(&self, compilation: &Arc<C>, uid: Uid, options: HtmlPluginOptions) {
        let mut slots = self.slots.lock();
        let key = identity(compilation);

        // Sweep only when a new compilation adds a slot
        if !slots.contains_key(&key) {
            let reclaimed = sweep_dead(&mut slots);
            if reclaimed > 0 {
                debug!("reclaimed {} dropped compilation(s) from options registry", reclaimed);
            }
        }

        let slot = slots.entry(key).or_insert_with(|| Slot {
            compilation: Arc::downgrade(compilation),
            entries: HashMap::new(),
        });

        // TODO: decide whether a second registration for the same uid should warn
        // instead of silently replacing; it can mask a uid collision.
        if slot.entries.insert(uid, Arc::new(options)).is_some() {
            debug!("replaced HTML plugin options for uid {}", uid);
        }
    }

    /// Typed form of [`lookup`](Self::lookup)
    pub fn lookup_typed(&self, compilation: &Arc<C>, uid: Uid) -> Option<Arc<HtmlPluginOptions>> {
        let slots = self.slots.lock();
        slots
            .get(&identity(compilation))
            .filter(|slot| slot.is_live())
            .and_then(|slot| slot.entries.get(&uid))
            .cloned()
    }

    /// Typed form of [`remove`](Self::remove)
    ///
    /// Removing the last entry drops the compilation's slot too.
    pub fn remove_typed(&self, compilation: &Arc<C>, uid: Uid) {
        let mut slots = self.slots.lock();
        let key = identity(compilation);

        let Some(slot) = slots.get_mut(&key) else {
            return;
        };
        slot.entries.remove(&uid);
        if slot.entries.is_empty() {
            slots.remove(&key);
        }
    }

    /// Typed form of [`release`](Self::release)
    pub fn release_typed(&self, compilation: &Arc<C>) -> usize {
        self.slots
            .lock()
            .remove(&identity(compilation))
            .map_or(0, |slot| slot.entries.len())
    }

    /// Reclaim slots whose compilation has been dropped
    ///
    /// Returns the number of slots reclaimed. [`register`](Self::register)
    /// also sweeps whenever it adds a slot for a new compilation, so a
    /// long-running host only needs to call this when it stops registering.
    pub fn sweep(&self) -> usize {
        let reclaimed = sweep_dead(&mut self.slots.lock());
        if reclaimed > 0 {
            debug!("reclaimed {} dropped compilation(s) from options registry", reclaimed);
        }
        reclaimed
    }

    /// Number of compilations that still hold at least one entry
    pub fn tracked_compilations(&self) -> usize {
        self.slots.lock().values().filter(|s| s.is_live()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Compilation {
        assets: Arc<()>,
    }

    impl Compilation {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                assets: Arc::new(()),
            })
        }
    }

    fn titled(title: &str) -> HtmlPluginOptions {
        HtmlPluginOptions {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    fn host(compilation: &Arc<Compilation>) -> HostObject {
        compilation.clone()
    }

    #[test]
    fn test_register_then_lookup_returns_options() {
        let registry = OptionsRegistry::<Compilation>::new();
        let c = Compilation::new();

        registry.register(&host(&c), 1, titled("a")).unwrap();

        let stored = registry.lookup(&host(&c), 1).unwrap().unwrap();
        assert_eq!(*stored, titled("a"));
    }

    #[test]
    fn test_uids_are_isolated() {
        let registry = OptionsRegistry::new();
        let c = Compilation::new();

        registry.register_typed(&c, 1, titled("a"));
        registry.register_typed(&c, 2, titled("b"));

        assert_eq!(*registry.lookup_typed(&c, 1).unwrap(), titled("a"));
        assert_eq!(*registry.lookup_typed(&c, 2).unwrap(), titled("b"));
    }

    #[test]
    fn test_compilations_are_isolated() {
        let registry = OptionsRegistry::new();
        let first = Compilation::new();
        let second = Compilation::new();

        registry.register_typed(&first, 1, titled("first"));

        assert!(registry.lookup_typed(&second, 1).is_none());
        assert_eq!(registry.tracked_compilations(), 1);
    }

    #[test]
    fn test_register_overwrites_same_key() {
        let registry = OptionsRegistry::new();
        let c = Compilation::new();

        registry.register_typed(&c, 1, titled("a"));
        registry.register_typed(&c, 1, titled("b"));

        assert_eq!(*registry.lookup_typed(&c, 1).unwrap(), titled("b"));
    }

    #[test]
    fn test_remove_then_lookup_is_absent() {
        let registry = OptionsRegistry::new();
        let c = Compilation::new();

        registry.register_typed(&c, 1, titled("a"));
        registry.remove(&host(&c), 1).unwrap();

        assert!(registry.lookup(&host(&c), 1).unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let registry = OptionsRegistry::new();
        let c = Compilation::new();

        registry.remove_typed(&c, 9);
        registry.register_typed(&c, 1, titled("a"));
        registry.remove_typed(&c, 9);

        assert!(registry.lookup_typed(&c, 1).is_some());
    }

    #[test]
    fn test_removing_last_entry_drops_slot() {
        let registry = OptionsRegistry::new();
        let c = Compilation::new();

        registry.register_typed(&c, 1, titled("a"));
        registry.register_typed(&c, 2, titled("b"));
        registry.remove_typed(&c, 1);
        assert_eq!(registry.tracked_compilations(), 1);

        registry.remove_typed(&c, 2);
        assert_eq!(registry.tracked_compilations(), 0);
        assert_eq!(registry.slots.lock().len(), 0);
        assert!(registry.lookup_typed(&c, 2).is_none());
    }

    #[test]
    fn test_non_compilation_is_contract_violation() {
        let registry = OptionsRegistry::<Compilation>::new();
        let not_a_compilation: HostObject = Arc::new("compilation");

        let err = registry
            .register(&not_a_compilation, 1, titled("a"))
            .unwrap_err();
        assert!(matches!(
            err,
            HtmlPluginError::ContractViolation {
                operation: "register",
                ..
            }
        ));
        assert_eq!(registry.slots.lock().len(), 0);

        assert!(registry.lookup(&not_a_compilation, 1).is_err());
        assert!(registry.remove(&not_a_compilation, 1).is_err());
        assert!(registry.release(&not_a_compilation).is_err());
    }

    #[test]
    fn test_registry_does_not_keep_compilation_alive() {
        let registry = OptionsRegistry::new();
        let c = Compilation::new();
        let assets = Arc::downgrade(&c.assets);

        registry.register_typed(&c, 1, titled("a"));
        drop(c);

        // Everything the compilation owned is gone even though its slot remains
        assert!(assets.upgrade().is_none());
        assert_eq!(registry.tracked_compilations(), 0);
        assert_eq!(registry.sweep(), 1);
        assert_eq!(registry.slots.lock().len(), 0);
    }

    #[test]
    fn test_register_sweeps_dropped_compilations() {
        let registry = OptionsRegistry::new();
        for _ in 0..100 {
            let c = Compilation::new();
            registry.register_typed(&c, 0, titled("page"));
        }

        let live = Compilation::new();
        registry.register_typed(&live, 0, titled("page"));
        assert_eq!(registry.slots.lock().len(), 1);
    }

    #[test]
    fn test_register_into_known_compilation_skips_sweep() {
        let registry = OptionsRegistry::new();
        let live = Compilation::new();
        registry.register_typed(&live, 0, titled("index"));

        let dropped = Compilation::new();
        registry.register_typed(&dropped, 0, titled("index"));
        drop(dropped);

        registry.register_typed(&live, 1, titled("admin"));
        assert_eq!(registry.slots.lock().len(), 2);
        assert_eq!(registry.tracked_compilations(), 1);

        let next = Compilation::new();
        registry.register_typed(&next, 0, titled("index"));
        assert_eq!(registry.slots.lock().len(), 2);
        assert_eq!(registry.tracked_compilations(), 2);
    }

    #[test]
    fn test_release_drops_all_entries() {
        let registry = OptionsRegistry::new();
        let c = Compilation::new();

        registry.register_typed(&c, 1, titled("a"));
        registry.register_typed(&c, 2, titled("b"));

        assert_eq!(registry.release(&host(&c)).unwrap(), 2);
        assert_eq!(registry.release_typed(&c), 0);
        assert!(registry.lookup_typed(&c, 1).is_none());
    }

    #[test]
    fn test_lookup_returns_shared_handle() {
        let registry = OptionsRegistry::new();
        let c = Compilation::new();

        registry.register_typed(&c, 1, titled("a"));
        let first = registry.lookup_typed(&c, 1).unwrap();
        let second = registry.lookup_typed(&c, 1).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(OptionsRegistry::new());
        let c = Compilation::new();

        let handles: Vec<_> = (0..4)
            .map(|uid| {
                let registry = Arc::clone(&registry);
                let c = Arc::clone(&c);
                std::thread::spawn(move || registry.register_typed(&c, uid, titled("t")))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for uid in 0..4 {
            assert!(registry.lookup_typed(&c, uid).is_some());
        }
    }

    use proptest::prelude::*;

    proptest! {
        /// Property: the last registration for a uid wins
        #[test]
        fn prop_last_write_wins(writes in proptest::collection::vec((0u32..4, "[a-z]{1,5}"), 1..20)) {
            let registry = OptionsRegistry::new();
            let c = Compilation::new();
            let mut expected = HashMap::new();

            for (uid, title) in &writes {
                registry.register_typed(&c, *uid, titled(title));
                expected.insert(*uid, title.clone());
            }

            for uid in 0..4 {
                let stored = registry.lookup_typed(&c, uid).and_then(|o| o.title.clone());
                prop_assert_eq!(stored, expected.get(&uid).cloned());
            }
        }
    }
}
