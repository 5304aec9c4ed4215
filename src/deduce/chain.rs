/// Member-access chain traversal.
///
/// Starting from the root's type, each accessor narrows the type through
/// the class index:
///
///   - `name()` (anything containing `()`) → method return type
///   - an exact constant name → constant type
///   - otherwise → property type
///
/// After a static root (`self`, `static`, `parent`, `ClassName`) the first
/// accessor is a `::` member reference, so a property must be written with
/// its `$` (`self::$instance`) and the sigil is stripped before lookup.
/// Every later accessor is an instance access (`->name`).
use crate::error::IndexResult;
use crate::types::{ClassInfo, ReturnInfo};
use crate::util::with_namespace_root;

use super::TypeDeducer;

impl TypeDeducer {
    /// Walk `accessors` starting from `start`.
    ///
    /// A special type (`int`, `array`, …) has no members, so reaching one
    /// before the chain is exhausted makes the whole result unknown.  An
    /// unknown intermediate type keeps failing every later step without
    /// querying the index.
    pub(super) fn walk_chain<S: AsRef<str>>(
        &self,
        start: String,
        accessors: &[S],
        mut property_needs_dollar_sign: bool,
    ) -> IndexResult<Option<String>> {
        let special = self.collaborators.special_types.as_ref();
        let mut current = Some(start);

        for accessor in accessors {
            let accessor = accessor.as_ref();
            let Some(class_name) = current.as_deref() else {
                break;
            };

            if special.is_special_type(class_name) {
                tracing::trace!(accessor, class_name, "special type has no members");
                current = None;
                break;
            }

            current = match self.collaborators.class_info.class_info(class_name)? {
                Some(info) => member_type(&info, accessor, property_needs_dollar_sign),
                None => None,
            };
            tracing::trace!(accessor, current = ?current, "chain step");

            property_needs_dollar_sign = false;
        }

        Ok(current.filter(|t| !t.is_empty()).map(|t| {
            if special.is_special_type(&t) {
                t
            } else {
                with_namespace_root(&t)
            }
        }))
    }
}

/// The type of the member `accessor` refers to in `info`.
fn member_type(
    info: &ClassInfo,
    accessor: &str,
    property_needs_dollar_sign: bool,
) -> Option<String> {
    let member: Option<&ReturnInfo> = if accessor.contains("()") {
        info.methods.get(&accessor.replace("()", ""))
    } else if let Some(constant) = info.constants.get(accessor) {
        Some(constant)
    } else {
        let property = if property_needs_dollar_sign {
            accessor.strip_prefix('$')?
        } else {
            accessor
        };
        info.properties.get(property)
    };
    member.and_then(|m| m.resolved_type.clone())
}
