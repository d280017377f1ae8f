//! Declarations accumulated across one translation: namespace, usings and
//! lifted anonymous classes. Consumed once by the back end.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::options::BASE_PLACEHOLDER;

/// A synthesized top-level class hoisted out of an anonymous class
/// expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiftedClass {
    pub name: String,
    pub base_types: Vec<String>,
    pub modifiers: Vec<String>,
    /// Rendered body, braces included.
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalState {
    namespace: String,
    usings: BTreeSet<String>,
    using_statics: BTreeSet<String>,
    /// In registration order.
    lifted_classes: Vec<LiftedClass>,
    #[serde(skip)]
    class_index: FxHashMap<String, usize>,
    #[serde(skip)]
    name_format: String,
}

impl GlobalState {
    /// `name_format` names lifted classes; `{base}` is replaced with the
    /// base type's simple name.
    pub fn new(name_format: &str) -> Self {
        Self {
            namespace: String::new(),
            usings: BTreeSet::new(),
            using_statics: BTreeSet::new(),
            lifted_classes: Vec::new(),
            class_index: FxHashMap::default(),
            name_format: name_format.to_string(),
        }
    }

    /// Returns false if the using was already present.
    pub fn add_using(&mut self, namespace: &str) -> bool {
        let added = self.usings.insert(namespace.to_string());
        if added {
            tracing::debug!(target: "decaf::translate", namespace, "using");
        }
        added
    }

    pub fn add_using_static(&mut self, type_name: &str) -> bool {
        let added = self.using_statics.insert(type_name.to_string());
        if added {
            tracing::debug!(target: "decaf::translate", type_name, "using static");
        }
        added
    }

    /// Last writer wins.
    pub fn set_namespace(&mut self, namespace: &str) {
        tracing::debug!(target: "decaf::translate", namespace, "namespace");
        self.namespace = namespace.to_string();
    }

    /// Register a lifted class deriving from `base_type` and return its name.
    ///
    /// The name comes from the format with `base_type_name` substituted. On
    /// collision the suffixes 2, 3, ... are tried in turn.
    pub fn add_anonymous_class(&mut self, base_type_name: &str, base_type: &str, body: String) -> String {
        let stem = self.name_format.replace(BASE_PLACEHOLDER, base_type_name);
        let mut name = stem.clone();
        let mut suffix = 2;
        while self.class_index.contains_key(&name) {
            name = format!("{stem}{suffix}");
            suffix += 1;
        }

        tracing::debug!(target: "decaf::translate", %name, base_type, "lifted anonymous class");
        self.class_index.insert(name.clone(), self.lifted_classes.len());
        self.lifted_classes.push(LiftedClass {
            name: name.clone(),
            base_types: vec![base_type.to_string()],
            modifiers: vec!["internal".to_string()],
            body,
        });
        name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Sorted.
    pub fn usings(&self) -> impl Iterator<Item = &str> {
        self.usings.iter().map(String::as_str)
    }

    /// Sorted.
    pub fn using_statics(&self) -> impl Iterator<Item = &str> {
        self.using_statics.iter().map(String::as_str)
    }

    pub fn lifted_classes(&self) -> &[LiftedClass] {
        &self.lifted_classes
    }

    pub fn lifted_class(&self, name: &str) -> Option<&LiftedClass> {
        self.class_index.get(name).map(|&i| &self.lifted_classes[i])
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new(&format!("Anonymous{BASE_PLACEHOLDER}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usings_are_unique_and_sorted() {
        let mut globals = GlobalState::default();
        assert!(globals.add_using("System.Diagnostics"));
        assert!(globals.add_using("Java.IO"));
        assert!(!globals.add_using("System.Diagnostics"));
        assert_eq!(globals.usings().collect::<Vec<_>>(), ["Java.IO", "System.Diagnostics"]);
    }

    #[test]
    fn namespace_last_writer_wins() {
        let mut globals = GlobalState::default();
        assert_eq!(globals.namespace(), "");
        globals.set_namespace("A");
        globals.set_namespace("B");
        assert_eq!(globals.namespace(), "B");
    }

    #[test]
    fn anonymous_class_names_get_suffixes_on_collision() {
        let mut globals = GlobalState::new("Lifted{base}");
        assert_eq!(globals.add_anonymous_class("Runnable", "Runnable", "{ }".into()), "LiftedRunnable");
        assert_eq!(globals.add_anonymous_class("Runnable", "Runnable", "{ }".into()), "LiftedRunnable2");
        assert_eq!(globals.add_anonymous_class("Thread", "Thread", "{ }".into()), "LiftedThread");
        assert_eq!(globals.add_anonymous_class("Runnable", "Runnable", "{ }".into()), "LiftedRunnable3");

        let names: Vec<&str> = globals.lifted_classes().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["LiftedRunnable", "LiftedRunnable2", "LiftedThread", "LiftedRunnable3"]);

        let class = globals.lifted_class("LiftedThread").unwrap();
        assert_eq!(class.base_types, ["Thread"]);
        assert_eq!(class.modifiers, ["internal"]);
    }

    #[test]
    fn serializes_for_external_formatters() {
        let mut globals = GlobalState::default();
        globals.set_namespace("Com.Example");
        globals.add_using("Java.Util");
        globals.add_anonymous_class("Foo", "Foo", "{ }".into());
        let json = serde_json::to_value(&globals).unwrap();
        assert_eq!(json["namespace"], "Com.Example");
        assert_eq!(json["usings"][0], "Java.Util");
        assert_eq!(json["lifted_classes"][0]["name"], "AnonymousFoo");
        assert!(json.get("class_index").is_none());
    }
}
