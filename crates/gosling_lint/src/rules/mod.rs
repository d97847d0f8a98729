//! Built-in rules.

mod duplicated_branches;
mod package_collisions;
mod unused_param;

pub use duplicated_branches::DuplicatedBranches;
pub use package_collisions::PackageCollisions;
pub use unused_param::UnusedParam;

use crate::rule::RuleRegistry;

/// Registers every built-in rule.
pub fn register_builtin_rules(registry: &mut RuleRegistry) {
    registry.register(DuplicatedBranches::default());
    registry.register(UnusedParam::default());
    registry.register(PackageCollisions::default());
}
