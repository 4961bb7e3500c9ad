//! Identity boundary.
//!
//! Identity and role resolution live outside this crate. The repository only
//! needs an opaque actor string to stamp audit entries; it trusts whatever
//! the collaborator supplies and never authenticates.

/// Supplies the identity of the actor performing the current operation.
pub trait ActorProvider {
    /// Returns an opaque identity string, typically an email address.
    fn current_actor(&self) -> String;
}

/// An actor provider that always returns the same identity.
///
/// Fits single-operator embeddings and tests; server embeddings implement
/// [`ActorProvider`] over their own session state.
#[derive(Debug, Clone)]
pub struct FixedActor(pub String);

impl FixedActor {
    /// Creates a provider for the given identity.
    pub fn new(actor: impl Into<String>) -> Self {
        Self(actor.into())
    }
}

impl ActorProvider for FixedActor {
    fn current_actor(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_actor() {
        let actor = FixedActor::new("secretaria@escola.gov.br");
        assert_eq!(actor.current_actor(), "secretaria@escola.gov.br");
    }
}
