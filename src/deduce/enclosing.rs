//! Enclosing-class lookup.

use crate::error::IndexResult;
use crate::index::ClassListIndex;
use crate::types::{ClassRange, SourceContext};
use crate::util::{find_class_at_line, offset_to_line};

use super::TypeDeducer;

/// Find the class-like declaration whose line range contains the cursor.
///
/// The cursor's line is derived from `context.offset`; the file's class
/// ranges are scanned in the index's enumeration order and the first
/// range containing that line (inclusive on both ends) wins.
pub fn enclosing_class(
    classes: &dyn ClassListIndex,
    context: &SourceContext<'_>,
) -> IndexResult<Option<ClassRange>> {
    let line = offset_to_line(context.source, context.offset);
    let ranges = classes.class_list(context.file)?;
    let found = find_class_at_line(&ranges, line).cloned();
    tracing::trace!(line, class = ?found.as_ref().map(|c| &c.fqn), "enclosing class");
    Ok(found)
}

impl TypeDeducer {
    pub(super) fn current_class_at(
        &self,
        context: &SourceContext<'_>,
    ) -> IndexResult<Option<ClassRange>> {
        enclosing_class(self.collaborators.class_list.as_ref(), context)
    }
}
