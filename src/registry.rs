//! The test registry: descriptor storage, suite capture, and deterministic
//! iteration.
//!
//! Registration is an explicit initialization phase run by the host program
//! before the session starts; there are no load-time side effects. The
//! registry is the single source of truth for test descriptors: construct it
//! once, populate it, then hand it to [`crate::session::Session`].
//!
//! Registry Invariant: descriptor identity is the (file, line) pair. A second
//! registration at an already-known location is ignored and the first
//! descriptor kept - the same source location can legitimately be evaluated
//! more than once during setup replay, and that must not be an error.

use std::collections::HashMap;

use crate::context::TestContext;

/// The body of a registered test case.
pub type TestBody = Box<dyn Fn(&mut TestContext<'_>)>;

/// Opaque identity of a registered test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseId(usize);

/// One registered test case.
///
/// Created at registration, immutable afterwards, owned exclusively by the
/// registry for the rest of the process.
pub struct TestDescriptor {
    pub suite: String,
    pub name: String,
    pub file: &'static str,
    pub line: u32,
    pub(crate) body: TestBody,
}

impl TestDescriptor {
    pub fn new(
        suite: impl Into<String>,
        name: impl Into<String>,
        file: &'static str,
        line: u32,
        body: impl Fn(&mut TestContext<'_>) + 'static,
    ) -> Self {
        Self {
            suite: suite.into(),
            name: name.into(),
            file,
            line,
            body: Box::new(body),
        }
    }
}

impl std::fmt::Debug for TestDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestDescriptor")
            .field("suite", &self.suite)
            .field("name", &self.name)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish()
    }
}

/// Holds every registered test descriptor plus the mutable "current suite"
/// captured by subsequent registrations.
#[derive(Default)]
pub struct TestRegistry {
    descriptors: Vec<TestDescriptor>,
    by_location: HashMap<(&'static str, u32), CaseId>,
    current_suite: String,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the suite name captured by subsequent [`TestRegistry::add`]
    /// calls. An empty string clears it.
    pub fn set_suite(&mut self, name: impl Into<String>) {
        self.current_suite = name.into();
    }

    /// Runs `f` with the given suite current, then restores the previous one.
    pub fn suite(&mut self, name: impl Into<String>, f: impl FnOnce(&mut Self)) {
        let previous = std::mem::replace(&mut self.current_suite, name.into());
        f(self);
        self.current_suite = previous;
    }

    /// Registers a test body under the current suite.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        file: &'static str,
        line: u32,
        body: impl Fn(&mut TestContext<'_>) + 'static,
    ) -> CaseId {
        self.register(TestDescriptor::new(
            self.current_suite.clone(),
            name,
            file,
            line,
            body,
        ))
    }

    /// Registers a fully built descriptor.
    ///
    /// Duplicate (file, line) registrations are ignored, not an error; the
    /// id of the first descriptor at that location is returned.
    pub fn register(&mut self, desc: TestDescriptor) -> CaseId {
        let key = (desc.file, desc.line);
        if let Some(existing) = self.by_location.get(&key) {
            return *existing;
        }
        let id = CaseId(self.descriptors.len());
        self.by_location.insert(key, id);
        self.descriptors.push(desc);
        id
    }

    pub fn get(&self, id: CaseId) -> Option<&TestDescriptor> {
        self.descriptors.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors passing `filter`, sorted by suite name, then source file,
    /// then line number, for full run-to-run determinism.
    pub fn matching(&self, filter: &crate::filter::TestFilter) -> Vec<&TestDescriptor> {
        let mut selected: Vec<&TestDescriptor> = self
            .descriptors
            .iter()
            .filter(|d| filter.allows(d))
            .collect();
        selected.sort_by(|a, b| {
            (a.suite.as_str(), a.file, a.line).cmp(&(b.suite.as_str(), b.file, b.line))
        });
        selected
    }
}
