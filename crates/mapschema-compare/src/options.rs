//! # Compare Options
//!
//! [`CompareOptions`] carries the two extension hooks of the comparison
//! engine:
//!
//! - a [`Convertible`] predicate deciding whether a source value fits a
//!   declared type, and
//! - a [`TypeNamer`] rendering types in mismatch reports.
//!
//! Either hook may be left unset. Unset hooks fall back to
//! [`DefaultCanConvert`] and [`NamingPolicy::Detailed`] independently, so a
//! caller can override just one. Resolution only borrows the caller's
//! options; one `CompareOptions` can be shared by any number of concurrent
//! comparisons.

use std::fmt;
use std::sync::Arc;

use mapschema_core::{FieldType, NamingPolicy, SourceValue};

use crate::convert::DefaultCanConvert;

/// Decides whether `observed` can be converted to `declared` without loss.
pub trait Convertible: Send + Sync {
    fn can_convert(&self, declared: &FieldType, observed: &SourceValue) -> bool;
}

impl<F> Convertible for F
where
    F: Fn(&FieldType, &SourceValue) -> bool + Send + Sync,
{
    fn can_convert(&self, declared: &FieldType, observed: &SourceValue) -> bool {
        self(declared, observed)
    }
}

/// Renders a type for mismatch reports.
pub trait TypeNamer: Send + Sync {
    fn type_name(&self, ty: &FieldType) -> String;
}

impl<F> TypeNamer for F
where
    F: Fn(&FieldType) -> String + Send + Sync,
{
    fn type_name(&self, ty: &FieldType) -> String {
        self(ty)
    }
}

impl TypeNamer for NamingPolicy {
    fn type_name(&self, ty: &FieldType) -> String {
        NamingPolicy::type_name(self, ty)
    }
}

/// Configures how a comparison checks and names types.
#[derive(Clone, Default)]
pub struct CompareOptions {
    /// Convertibility predicate. `None` means [`DefaultCanConvert`].
    pub convertible: Option<Arc<dyn Convertible>>,
    /// Type naming function. `None` means [`NamingPolicy::Detailed`].
    pub type_name: Option<Arc<dyn TypeNamer>>,
}

impl CompareOptions {
    /// Options with both hooks unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `f` as the convertibility predicate.
    pub fn with_convertible<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldType, &SourceValue) -> bool + Send + Sync + 'static,
    {
        self.convertible = Some(Arc::new(f));
        self
    }

    /// Use `f` to name types.
    pub fn with_type_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldType) -> String + Send + Sync + 'static,
    {
        self.type_name = Some(Arc::new(f));
        self
    }

    /// Name types with one of the built-in policies.
    pub fn with_naming_policy(mut self, policy: NamingPolicy) -> Self {
        self.type_name = Some(Arc::new(policy));
        self
    }

    /// Fill unset hooks with defaults without touching `options`.
    pub(crate) fn resolve(options: Option<&CompareOptions>) -> ResolvedOptions<'_> {
        let convertible: &dyn Convertible = match options.and_then(|o| o.convertible.as_deref()) {
            Some(hook) => hook,
            None => &DefaultCanConvert,
        };
        let type_name: &dyn TypeNamer = match options.and_then(|o| o.type_name.as_deref()) {
            Some(hook) => hook,
            None => &NamingPolicy::Detailed,
        };
        ResolvedOptions {
            convertible,
            type_name,
        }
    }
}

impl fmt::Debug for CompareOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompareOptions")
            .field("convertible", &self.convertible.as_ref().map(|_| "custom"))
            .field("type_name", &self.type_name.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Options with every hook present, borrowed for one comparison.
#[derive(Clone, Copy)]
pub(crate) struct ResolvedOptions<'a> {
    pub(crate) convertible: &'a dyn Convertible,
    pub(crate) type_name: &'a dyn TypeNamer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_options_resolve_to_defaults() {
        let resolved = CompareOptions::resolve(None);
        assert_eq!(resolved.type_name.type_name(&FieldType::Int8), "int8");
        assert!(!resolved
            .convertible
            .can_convert(&FieldType::Int, &SourceValue::Float(1.5)));
    }

    #[test]
    fn partially_set_options_keep_the_caller_hook() {
        let opts = CompareOptions::new().with_naming_policy(NamingPolicy::Simple);
        let resolved = CompareOptions::resolve(Some(&opts));
        assert_eq!(resolved.type_name.type_name(&FieldType::Int8), "int");
        assert!(resolved
            .convertible
            .can_convert(&FieldType::Int, &SourceValue::Float(2.0)));

        let opts = CompareOptions::new().with_convertible(|_, _| false);
        let resolved = CompareOptions::resolve(Some(&opts));
        assert!(!resolved
            .convertible
            .can_convert(&FieldType::String, &SourceValue::from("x")));
        assert_eq!(resolved.type_name.type_name(&FieldType::Int8), "int8");
    }

    #[test]
    fn resolving_does_not_fill_in_the_callers_options() {
        let opts = CompareOptions::new();
        let _ = CompareOptions::resolve(Some(&opts));
        assert!(opts.convertible.is_none());
        assert!(opts.type_name.is_none());
    }

    #[test]
    fn debug_hides_closures() {
        let opts = CompareOptions::new().with_type_name(|_| String::new());
        let rendered = format!("{opts:?}");
        assert!(rendered.contains("convertible: None"));
        assert!(rendered.contains("type_name: Some(\"custom\")"));
    }
}
