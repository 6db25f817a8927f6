//! Stack-identity collaborator
//!
//! Monitors are scoped to one deployed stack by an opaque identity string.
//! Looking that identity up (a CloudFormation describe-stacks call in
//! practice) lives behind [`StackIdSource`]: implementations never fail and
//! return an empty string when the identity cannot be obtained, so a broken
//! lookup degrades monitor ownership instead of blocking deployment.

/// Produces the deployment's cloud-stack identity.
pub trait StackIdSource: Send + Sync {
    /// The stack identity, or an empty string when unobtainable
    fn stack_id(&self) -> String;
}

/// A stack identity known up front (from configuration or CLI flag)
#[derive(Debug, Clone, Default)]
pub struct FixedStackId(String);

impl FixedStackId {
    pub fn new(stack_id: impl Into<String>) -> Self {
        Self(stack_id.into())
    }
}

impl StackIdSource for FixedStackId {
    fn stack_id(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_stack_id() {
        assert_eq!(FixedStackId::new("stack-123").stack_id(), "stack-123");
        assert_eq!(FixedStackId::default().stack_id(), "");
    }
}
