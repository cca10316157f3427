//! Names referenced by a parsed selector.
//!
//! Only type selectors, classes and ids decide whether a rule is used.
//! Arguments of `:not()`, `:is()`, `:where()` and `:has()`, attribute
//! selectors and pseudo-elements are not consulted.

use lightningcss::selector::{Component, Selector};

use super::content::UsedNames;

/// Names referenced by one complex selector.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SelectorNames {
    pub tags: Vec<String>,
    pub classes: Vec<String>,
    pub ids: Vec<String>,
}

impl SelectorNames {
    /// True when every referenced name is used. A selector without any
    /// names (`*`, `:root`, `[hidden]`) is always used.
    pub fn is_used_by(&self, used: &UsedNames) -> bool {
        self.tags.iter().all(|tag| used.has_tag(tag))
            && self.classes.iter().all(|class| used.has_class(class))
            && self.ids.iter().all(|id| used.has_id(id))
    }
}

pub fn selector_is_used(selector: &Selector<'_>, used: &UsedNames) -> bool {
    selector_names(selector).is_used_by(used)
}

/// Collect the type, class and id names of `selector`, in match order.
///
/// Namespace prefixes (`*|section`, `svg|circle`) are separate components,
/// so the local name is still collected.
pub fn selector_names(selector: &Selector<'_>) -> SelectorNames {
    let mut names = SelectorNames::default();

    for component in selector.iter_raw_match_order() {
        match component {
            Component::LocalName(name) => names.tags.push(name.lower_name.0.to_string()),
            Component::Class(class) => names.classes.push(class.0.to_string()),
            Component::ID(id) => names.ids.push(id.0.to_string()),
            _ => {}
        }
    }

    names
}
