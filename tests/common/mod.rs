#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use phpantom_deduce::error::{IndexError, IndexResult};
use phpantom_deduce::{
    ClassInfo, ClassInfoIndex, Collaborators, SharedIndex, SourceContext, SymbolIndex,
    TypeDeducer, VariableTypeLookup,
};

/// A variable-type lookup with a fixed answer per variable name,
/// independent of file and offset.
#[derive(Debug, Default)]
pub struct FixedVariables {
    types: HashMap<String, String>,
}

impl FixedVariables {
    pub fn new(types: &[(&str, &str)]) -> Self {
        Self {
            types: types
                .iter()
                .map(|(var, ty)| (var.to_string(), ty.to_string()))
                .collect(),
        }
    }
}

impl VariableTypeLookup for FixedVariables {
    fn variable_type(
        &self,
        _file: Option<&str>,
        _source: &str,
        variable: &str,
        _offset: usize,
    ) -> IndexResult<Option<String>> {
        Ok(self.types.get(variable).cloned())
    }
}

/// Wraps a class-info index and counts how often it is queried.
pub struct CountingClassInfo {
    inner: SharedIndex,
    pub calls: AtomicUsize,
}

impl CountingClassInfo {
    pub fn new(inner: SharedIndex) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClassInfoIndex for CountingClassInfo {
    fn class_info(&self, fqn: &str) -> IndexResult<Option<ClassInfo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.class_info(fqn)
    }
}

/// A class-info index whose backing store is down.
pub struct UnavailableClassInfo;

impl ClassInfoIndex for UnavailableClassInfo {
    fn class_info(&self, _fqn: &str) -> IndexResult<Option<ClassInfo>> {
        Err(IndexError::Unavailable("database is locked".to_string()))
    }
}

/// Build a deducer over `index` whose variable types come from `variables`.
pub fn create_deducer(index: SymbolIndex, variables: &[(&str, &str)]) -> TypeDeducer {
    let shared = SharedIndex::new(index);
    let mut collaborators = Collaborators::from_index(&shared);
    collaborators.variables = Arc::new(FixedVariables::new(variables));
    TypeDeducer::new(collaborators)
}

/// Byte offset of the first occurrence of `needle` in `source`.
pub fn offset_of(source: &str, needle: &str) -> usize {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in source"))
}

/// Deduce `parts` in `file` at `offset`, panicking on index errors.
pub fn deduce(
    deducer: &TypeDeducer,
    file: Option<&str>,
    source: &str,
    parts: &[&str],
    offset: usize,
) -> Option<String> {
    let context = SourceContext::new(file, source, offset);
    deducer
        .deduce_type(&context, parts)
        .expect("index lookups should not fail")
}
