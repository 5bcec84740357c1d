//! Route model binding resolution.

use tracing::warn;

use crate::error::BindingError;
use crate::model::ModelRegistry;
use crate::route::{BindingMap, RouteDescriptor, RouteRegistry};
use crate::source::ParameterKind;

/// Routes with their bindings attached, plus the per-route failures that
/// were recovered from along the way.
#[derive(Debug, Clone, Default)]
pub struct BindingResolution {
    /// The annotated routes, in the input order.
    pub routes: RouteRegistry,
    /// Parameters whose entity type could not be resolved.
    pub errors: Vec<BindingError>,
}

/// Attaches a [`BindingMap`] to every route in `registry`.
///
/// For each entity-bound parameter the key field is the entity's route key
/// name, `"id"` unless the entity overrides it. Scoped fields declared by a
/// bound entity are merged next, for parameters named in the URI template
/// or the handler signature. The fields written in the URI template
/// (`{post:slug}`) come last, each layer winning over the previous one.
///
/// A parameter whose entity type cannot be resolved is left out of the map
/// and reported in [`BindingResolution::errors`]; the route itself is kept.
pub fn resolve_bindings(registry: &RouteRegistry, models: &ModelRegistry) -> BindingResolution {
    let mut errors = Vec::new();

    let routes = registry
        .iter()
        .map(|(name, route)| {
            let bindings = bindings_for(name, route, models, &mut errors);
            (name.to_string(), route.with_bindings(bindings))
        })
        .collect();

    BindingResolution { routes, errors }
}

fn bindings_for(
    name: &str,
    route: &RouteDescriptor,
    models: &ModelRegistry,
    errors: &mut Vec<BindingError>,
) -> BindingMap {
    let mut bindings = BindingMap::new();
    let mut scoped = BindingMap::new();

    for param in route.parameters() {
        let model = match &param.kind {
            ParameterKind::Plain => continue,
            ParameterKind::Model(model) => model,
            ParameterKind::Unresolved => {
                errors.push(unresolvable(
                    name,
                    &param.name,
                    "parameter is not bound to a single named type",
                ));
                continue;
            }
        };

        let Some(binding) = models.get(model) else {
            errors.push(unresolvable(
                name,
                &param.name,
                &format!("type '{model}' is not registered"),
            ));
            continue;
        };

        bindings.insert(param.name.clone(), binding.route_key_name());
        scoped.extend(binding.scoped_binding_fields());
    }

    for (param, field) in scoped {
        if route.declares_parameter(&param) {
            bindings.insert(param, field);
        }
    }

    bindings.extend(
        route
            .binding_fields()
            .iter()
            .map(|(param, field)| (param.clone(), field.clone())),
    );

    bindings
}

fn unresolvable(route: &str, parameter: &str, reason: &str) -> BindingError {
    let error = BindingError::UnresolvableParameterType {
        route: route.to_string(),
        parameter: parameter.to_string(),
        reason: reason.to_string(),
    };
    warn!(error = %error, "Skipping route parameter binding");
    error
}
