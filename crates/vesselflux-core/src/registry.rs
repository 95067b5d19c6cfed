//! Handler registry: maps a component's declared module name to the handler
//! implementation for a flow domain.
//!
//! The supported set is the closed [`HandlerKind`] enumeration of the
//! domain. Components whose name is not in the enumeration, or whose handler
//! refuses to initialize, are skipped; resolution never fails loudly.

use crate::handler::{DataHandler, HandlerKind};
use crate::vessel::Component;

/// Outcome of resolving a single component, for callers that want to know
/// why nothing was produced.
#[derive(Debug)]
pub enum Resolution<K> {
    Resolved(K, Box<dyn DataHandler>),
    Unsupported,
    Inapplicable(K),
}

/// Resolve a component to an initialized handler, with the reason on skip.
pub fn resolve_detailed<K: HandlerKind>(component: Component<'_>) -> Resolution<K> {
    let Some(kind) = K::from_module_name(component.module_name()) else {
        tracing::debug!(
            module = component.module_name(),
            resource = ?K::RESOURCE,
            "unsupported component, skipping"
        );
        return Resolution::Unsupported;
    };

    let mut handler = kind.instantiate(component.id);
    match handler.initialize(component) {
        Ok(()) => {
            tracing::debug!(?kind, module = ?component.id, "resolved handler");
            Resolution::Resolved(kind, handler)
        }
        Err(err) => {
            tracing::debug!(?kind, %err, "inapplicable component, discarding handler");
            Resolution::Inapplicable(kind)
        }
    }
}

/// Resolve a component to an initialized handler, or `None` if the component
/// is unsupported or inapplicable.
pub fn resolve<K: HandlerKind>(component: Component<'_>) -> Option<Box<dyn DataHandler>> {
    match resolve_detailed::<K>(component) {
        Resolution::Resolved(_, handler) => Some(handler),
        Resolution::Unsupported | Resolution::Inapplicable(_) => None,
    }
}
