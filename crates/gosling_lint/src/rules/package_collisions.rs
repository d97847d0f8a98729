//! Reports a function name declared in two files of the same package.
//!
//! Files of one package are linted concurrently, so the name registry
//! lives in the package's mutex-guarded side table rather than in the
//! rule instance. The finding set is order-independent: each colliding
//! pair of files is reported exactly once, positioned in whichever file
//! sorts later by path and naming the one that sorts earlier.

use crate::finding::{Category, Finding};
use crate::rule::Rule;
use crate::unit::Unit;
use gosling_source::Location;
use gosling_syntax::Decl;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

#[derive(Default)]
struct NameRegistry {
    declarations: HashMap<String, Vec<Location>>,
    /// File pairs already reported, keyed by (name, earlier path, later
    /// path). A name redeclared within one file collides with a second
    /// file through every copy; only the first copy gets a finding.
    reported: HashSet<(String, PathBuf, PathBuf)>,
}

/// Flags a plain function name declared in more than one file of a package.
#[derive(Default)]
pub struct PackageCollisions;

impl Rule for PackageCollisions {
    fn name(&self) -> &'static str {
        "package-collisions"
    }

    fn category(&self) -> Category {
        Category::Naming
    }

    fn apply(&self, unit: &Unit, _args: &[toml::Value]) -> Vec<Finding> {
        let Some(pkg) = unit.package() else {
            return Vec::new();
        };
        let mut findings = Vec::new();
        for decl in &unit.ast.decls {
            let Decl::Func(f) = decl else { continue };
            if f.receiver.is_some() {
                continue;
            }
            let here = unit.locate(f.span.start);
            pkg.with_side_table::<NameRegistry, _>(|registry| {
                let seen = registry.declarations.entry(f.name.clone()).or_default();
                for earlier in seen.iter() {
                    if earlier.path == here.path {
                        continue;
                    }
                    // One finding per file pair, anchored at the
                    // lexically later path so concurrent visit order
                    // cannot change the emitted set.
                    let (anchor, other) = if here.path > earlier.path {
                        (here.clone(), earlier.clone())
                    } else {
                        (earlier.clone(), here.clone())
                    };
                    let key = (f.name.clone(), other.path.clone(), anchor.path.clone());
                    if !registry.reported.insert(key) {
                        continue;
                    }
                    findings.push(Finding::new(
                        self.name(),
                        self.category(),
                        format!(
                            "function '{}' is also declared in {}",
                            f.name,
                            other.path.display()
                        ),
                        anchor.clone(),
                        anchor,
                    ));
                }
                seen.push(here.clone());
            });
        }
        findings
    }
}
