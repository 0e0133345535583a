//! Type registry mapping field-specification type names to variable kinds.
//!
//! Core kinds are always available. Plugin kinds (`Name`, `Address`,
//! `DateTime`, `Number`) are registered up front with an explicit
//! availability probe, so a missing plugin never breaks registry
//! construction. The probe runs only when that type name is resolved.
//!
//! # Example
//!
//! ```
//! use dedupe_prep::registry::{TypeRegistry, TypeStatus};
//!
//! let registry = TypeRegistry::new();
//! assert_eq!(registry.status("String"), Some(TypeStatus::Available));
//! assert!(registry.status("NotARealType").is_none());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use dedupe_model::{VariableDescriptor, VariableKind, VariableOptions};
use tracing::debug;

use crate::error::{PrepError, Result};

/// Availability check for a plugin kind.
pub type PluginProbe = fn() -> bool;

/// Where the implementation of a kind comes from.
#[derive(Debug, Clone, Copy)]
pub enum TypeSource {
    /// Shipped with every matching engine.
    Core,
    /// Provided by an optional plugin package.
    Plugin {
        package: &'static str,
        feature: &'static str,
        probe: PluginProbe,
    },
}

/// Availability of a registered type name at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeStatus {
    Available,
    Unavailable {
        package: &'static str,
        feature: &'static str,
    },
}

/// One registry entry: a kind and the source of its implementation.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
    kind: VariableKind,
    source: TypeSource,
}

impl TypeEntry {
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn source(&self) -> TypeSource {
        self.source
    }

    /// Builds a descriptor of this entry's kind.
    pub fn build(&self, column: &str, options: VariableOptions) -> VariableDescriptor {
        VariableDescriptor::new(self.kind, column, options)
    }
}

fn name_plugin_linked() -> bool {
    cfg!(feature = "plugin-name")
}

fn address_plugin_linked() -> bool {
    cfg!(feature = "plugin-address")
}

fn datetime_plugin_linked() -> bool {
    cfg!(feature = "plugin-datetime")
}

fn number_plugin_linked() -> bool {
    cfg!(feature = "plugin-number")
}

fn plugin_source(kind: VariableKind) -> TypeSource {
    let (package, feature, probe): (&'static str, &'static str, PluginProbe) = match kind {
        VariableKind::Name => (
            "dedupe-variable-name",
            "plugin-name",
            name_plugin_linked as PluginProbe,
        ),
        VariableKind::Address => (
            "dedupe-variable-address",
            "plugin-address",
            address_plugin_linked as PluginProbe,
        ),
        VariableKind::DateTime => (
            "dedupe-variable-datetime",
            "plugin-datetime",
            datetime_plugin_linked as PluginProbe,
        ),
        VariableKind::Number => (
            "dedupe-variable-number",
            "plugin-number",
            number_plugin_linked as PluginProbe,
        ),
        _ => return TypeSource::Core,
    };
    TypeSource::Plugin {
        package,
        feature,
        probe,
    }
}

/// Registry of known type names.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: BTreeMap<&'static str, TypeEntry>,
    installed: BTreeSet<VariableKind>,
}

impl TypeRegistry {
    /// Creates a registry with every core and plugin kind.
    pub fn new() -> Self {
        let entries = VariableKind::ALL
            .into_iter()
            .map(|kind| {
                let source = if kind.is_plugin() {
                    plugin_source(kind)
                } else {
                    TypeSource::Core
                };
                (kind.as_str(), TypeEntry { kind, source })
            })
            .collect();
        Self {
            entries,
            installed: BTreeSet::new(),
        }
    }

    /// Marks a plugin kind as installed at run time.
    ///
    /// Used when the matching engine provides the plugin comparator itself.
    /// Returns false for core kinds, which need no installation.
    pub fn install_plugin(&mut self, kind: VariableKind) -> bool {
        if !kind.is_plugin() {
            return false;
        }
        debug!(kind = %kind, "plugin marked as installed");
        self.installed.insert(kind)
    }

    /// Returns true if the type name is registered, available or not.
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeEntry> {
        self.entries.get(type_name)
    }

    /// Availability of a type name; `None` if it is not registered.
    pub fn status(&self, type_name: &str) -> Option<TypeStatus> {
        let entry = self.entries.get(type_name)?;
        Some(self.entry_status(entry))
    }

    fn entry_status(&self, entry: &TypeEntry) -> TypeStatus {
        match entry.source {
            TypeSource::Core => TypeStatus::Available,
            TypeSource::Plugin {
                package,
                feature,
                probe,
            } => {
                if self.installed.contains(&entry.kind) || probe() {
                    TypeStatus::Available
                } else {
                    TypeStatus::Unavailable { package, feature }
                }
            }
        }
    }

    /// Resolves a type name to an available entry.
    ///
    /// # Errors
    ///
    /// - [`PrepError::UnknownType`] if the name is not registered
    /// - [`PrepError::UnavailableType`] if it names a plugin that is not installed
    pub fn resolve(&self, type_name: &str) -> Result<&TypeEntry> {
        let entry = self
            .entries
            .get(type_name)
            .ok_or_else(|| PrepError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        match self.entry_status(entry) {
            TypeStatus::Available => Ok(entry),
            TypeStatus::Unavailable { package, feature } => Err(PrepError::UnavailableType {
                type_name: type_name.to_string(),
                package,
                feature,
            }),
        }
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Kinds that resolve successfully right now.
    pub fn available_kinds(&self) -> Vec<VariableKind> {
        self.entries
            .values()
            .filter(|entry| self.entry_status(entry) == TypeStatus::Available)
            .map(TypeEntry::kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Returns the shared registry, with plugin availability decided by cargo features.
pub fn default_registry() -> &'static TypeRegistry {
    DEFAULT_REGISTRY.get_or_init(TypeRegistry::new)
}
