//=========================================================================
// Services
//=========================================================================
//
// Type-keyed registry of shared application objects.
//
// Architecture:
//   add<T>(value) → HashMap<TypeId, Box<dyn Any + Send>> → get<T>() / get_mut<T>()
//
// Owned by GlobalContext, so its lifetime is the session's lifetime:
// GlobalContext::reset() clears it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use log::debug;
use thiserror::Error;

//=== ServiceError ========================================================

/// Lookup failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ServiceError {
    /// No service of the requested type has been added.
    #[error("service `{type_name}` does not exist")]
    Missing { type_name: &'static str },
}

//=== Services ============================================================

/// Registry holding at most one instance per type.
///
/// # Example
///
/// ```
/// use kami_engine::core::services::{ServiceError, Services};
///
/// struct HighScores(Vec<u32>);
///
/// let mut services = Services::new();
/// services.add(HighScores(vec![300, 120]));
///
/// assert_eq!(services.get::<HighScores>()?.0[0], 300);
/// # Ok::<(), ServiceError>(())
/// ```
pub struct Services {
    services: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl Services {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Adds `service`, returning the instance it replaced, if any.
    pub fn add<T: Send + 'static>(&mut self, service: T) -> Option<T> {
        debug!(target: "services", "Adding service {}", type_name::<T>());

        self.services
            .insert(TypeId::of::<T>(), Box::new(service))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Returns the service of type `T`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Missing`] if no `T` was added.
    pub fn get<T: Send + 'static>(&self) -> Result<&T, ServiceError> {
        self.try_get::<T>().ok_or_else(missing::<T>)
    }

    /// Returns the service of type `T` mutably.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Missing`] if no `T` was added.
    pub fn get_mut<T: Send + 'static>(&mut self) -> Result<&mut T, ServiceError> {
        self.services
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut::<T>())
            .ok_or_else(missing::<T>)
    }

    /// Returns the service of type `T`, or `None` if absent.
    pub fn try_get<T: Send + 'static>(&self) -> Option<&T> {
        self.services
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// Returns true if a service of type `T` is registered.
    pub fn contains<T: Send + 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Removes and returns the service of type `T`. No-op when absent.
    pub fn remove<T: Send + 'static>(&mut self) -> Option<T> {
        self.services
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Removes every service.
    pub fn clear(&mut self) {
        self.services.clear();
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

fn missing<T>() -> ServiceError {
    ServiceError::Missing {
        type_name: type_name::<T>(),
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("count", &self.services.len())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
