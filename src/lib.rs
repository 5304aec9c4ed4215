//! PHPantom type deduction.
//!
//! Determines the static type of a PHP expression given as an ordered
//! list of fragments (`["$order", "getCustomer()", "address"]`) at a
//! cursor position in a source file, using a symbol index for class
//! members, class line ranges, global functions and name resolution.
//!
//! ```no_run
//! use phpantom_deduce::{SharedIndex, SourceContext, SymbolIndex, TypeDeducer};
//!
//! # fn main() -> Result<(), phpantom_deduce::error::IndexError> {
//! let index = SymbolIndex::load(std::path::Path::new("phpantom-index.json"))?;
//! let deducer = TypeDeducer::with_index(SharedIndex::new(index));
//!
//! let source = std::fs::read_to_string("src/Order.php").unwrap_or_default();
//! let context = SourceContext::new(Some("src/Order.php"), &source, 120);
//! let ty = deducer.deduce_type(&context, &["$this", "customer()", "address"])?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod deduce;
pub mod error;
pub mod index;
pub mod resolution;
pub mod type_analyzer;
pub mod types;
pub mod util;
pub mod variable;

pub use deduce::{Collaborators, RootExpression, TypeDeducer};
pub use index::{
    ClassInfoIndex, ClassListIndex, FileIndex, GlobalFunctionIndex, NameResolver, SharedIndex,
    SymbolIndex, VariableTypeLookup,
};
pub use type_analyzer::{SpecialTypeClassifier, TypeAnalyzer, is_special_type};
pub use types::{ClassInfo, ClassRange, FunctionInfo, ReturnInfo, SourceContext};
