//! The package model: shared, lazily computed facts over a set of units.

use crate::unit::Unit;
use gosling_syntax::{Decl, File, FrontEnd, LanguageVersion, TypeCheckOutcome};
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, RwLock};

/// The three-method shape identifying a sortable collection type.
const SORTABLE_METHODS: [&str; 3] = ["Len", "Less", "Swap"];

/// One compilation package: a named set of compilation units plus cached
/// package-level facts.
///
/// The package owns the front end so rules reaching it through a unit's
/// back-reference can trigger type resolution or query the language
/// version mid-run. Units of a package are linted concurrently, so every
/// lazily computed fact is guarded by a once-cell: the first caller
/// computes, later and concurrent callers block until the result is
/// cached and then share it. Type resolution in particular is never
/// triggered twice.
pub struct Package {
    name: String,
    front_end: Arc<dyn FrontEnd>,
    units: RwLock<BTreeMap<PathBuf, Arc<Unit>>>,
    types: OnceLock<TypeCheckOutcome>,
    is_main: OnceLock<bool>,
    sortable: OnceLock<BTreeSet<String>>,
    version: OnceLock<LanguageVersion>,
    side_tables: Mutex<HashMap<TypeId, Box<dyn Any + Send>>>,
}

impl Package {
    /// Creates an empty package with the given name, backed by the given
    /// front end.
    pub fn new(name: impl Into<String>, front_end: Arc<dyn FrontEnd>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            front_end,
            units: RwLock::new(BTreeMap::new()),
            types: OnceLock::new(),
            is_main: OnceLock::new(),
            sortable: OnceLock::new(),
            version: OnceLock::new(),
            side_tables: Mutex::new(HashMap::new()),
        })
    }

    /// The package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a unit with this package, keyed by its path.
    pub fn add_unit(&self, unit: Arc<Unit>) {
        let mut units = self.units.write().unwrap();
        units.insert(unit.path().to_path_buf(), unit);
    }

    /// Returns all units, in path order.
    pub fn units(&self) -> Vec<Arc<Unit>> {
        self.units.read().unwrap().values().cloned().collect()
    }

    /// Looks a unit up by its path.
    pub fn unit_at(&self, path: &Path) -> Option<Arc<Unit>> {
        self.units.read().unwrap().get(path).cloned()
    }

    /// Returns the number of registered units.
    pub fn unit_count(&self) -> usize {
        self.units.read().unwrap().len()
    }

    /// Runs type resolution over all units, exactly once.
    ///
    /// Concurrent first callers block until the single underlying pass
    /// finishes; everyone then shares the same cached outcome, including
    /// its collected errors. Resolution is best-effort and never aborts
    /// other packages.
    pub fn type_check(&self) -> &TypeCheckOutcome {
        self.types.get_or_init(|| {
            let units = self.units.read().unwrap();
            let files: Vec<&File> = units.values().map(|u| &u.ast).collect();
            self.front_end.resolve_types(&files)
        })
    }

    /// Returns `true` if this is an entry-point package: named `main` and
    /// declaring a top-level `func main()`. Computed once and cached.
    pub fn is_main(&self) -> bool {
        *self.is_main.get_or_init(|| {
            let units = self.units.read().unwrap();
            units.values().any(|unit| {
                unit.ast.package_name == "main"
                    && unit.ast.decls.iter().any(|decl| {
                        matches!(decl, Decl::Func(f) if f.name == "main" && f.receiver.is_none())
                    })
            })
        })
    }

    /// Returns the names of types exposing the Len/Less/Swap shape,
    /// scanning every unit's method declarations once.
    pub fn sortable_types(&self) -> &BTreeSet<String> {
        self.sortable.get_or_init(|| {
            let mut methods: HashMap<String, BTreeSet<&str>> = HashMap::new();
            let units = self.units.read().unwrap();
            for unit in units.values() {
                for decl in &unit.ast.decls {
                    let Decl::Func(f) = decl else { continue };
                    let Some(recv) = f.receiver_type() else {
                        continue;
                    };
                    if let Some(known) = SORTABLE_METHODS.iter().find(|m| **m == f.name) {
                        methods.entry(recv.to_string()).or_default().insert(known);
                    }
                }
            }
            methods
                .into_iter()
                .filter(|(_, ms)| ms.len() == SORTABLE_METHODS.len())
                .map(|(ty, _)| ty)
                .collect()
        })
    }

    /// The language version in effect for this package, cached.
    pub fn language_version(&self) -> LanguageVersion {
        *self
            .version
            .get_or_init(|| self.front_end.language_version(&self.name))
    }

    /// Runs `f` with exclusive access to the package's side table of type
    /// `T`, creating it on first use.
    ///
    /// Rules that need package-wide bookkeeping across concurrently linted
    /// files (name registries, cross-file duplicate tracking) keep it here
    /// instead of in process-wide state; the table lives and dies with the
    /// package model.
    pub fn with_side_table<T, R>(&self, f: impl FnOnce(&mut T) -> R) -> R
    where
        T: Default + Send + 'static,
    {
        let mut tables = self.side_tables.lock().unwrap();
        let entry = tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()));
        let table = entry
            .downcast_mut::<T>()
            .expect("side table type mismatch");
        f(table)
    }
}
