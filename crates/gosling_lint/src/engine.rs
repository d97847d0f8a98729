//! The concurrent rule-evaluation engine.
//!
//! `Linter::lint` fans out one worker thread per package; within a
//! package, units are linted concurrently on scoped threads while rules
//! run sequentially per unit. All findings converge on one channel whose
//! sending half is dropped only after every worker finished, so the
//! resulting [`FindingStream`] ends exactly when the run is complete.

use crate::filter::FileFilter;
use crate::finding::{Category, Finding};
use crate::gate::ReadGate;
use crate::package::Package;
use crate::rule::{Rule, RuleRegistry};
use crate::stream::FindingStream;
use crate::unit::Unit;
use crossbeam_channel::Sender;
use gosling_common::{GoslingResult, InternalError};
use gosling_config::{ConfigError, LintOptions};
use gosling_source::{FileId, Location, SourceFile};
use gosling_syntax::{FrontEnd, ParseError};
use regex::Regex;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use tracing::{debug, debug_span, trace};

/// The rule name attached to synthetic parse-failure findings.
const INVALID_FILE_RULE: &str = "invalid-file";

/// Provides file contents to the engine.
///
/// The default implementation reads from disk; tests substitute an
/// in-memory loader to observe read concurrency deterministically.
pub trait SourceLoader: Send + Sync {
    /// Reads the full contents of one file.
    fn load(&self, path: &Path) -> io::Result<String>;
}

/// The filesystem-backed [`SourceLoader`].
#[derive(Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// One file to lint.
#[derive(Clone, Debug)]
pub struct UnitInput {
    /// Path of the source file, as reported in findings.
    pub path: PathBuf,
}

impl UnitInput {
    /// Creates an input for one file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// One package to lint: a name and the files belonging to it.
#[derive(Clone, Debug)]
pub struct PackageInput {
    /// The package name.
    pub name: String,
    /// The package's files.
    pub units: Vec<UnitInput>,
}

impl PackageInput {
    /// Creates a package input from a name and file paths.
    pub fn new(name: impl Into<String>, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            name: name.into(),
            units: paths.into_iter().map(UnitInput::new).collect(),
        }
    }
}

/// Returns `true` if the file carries the machine-generated marker
/// comment (`// Code generated ... DO NOT EDIT.` on a line of its own).
pub fn is_generated(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.starts_with("// Code generated ") && line.ends_with(" DO NOT EDIT."))
}

/// The lint engine.
pub struct Linter {
    front_end: Arc<dyn FrontEnd>,
    loader: Arc<dyn SourceLoader>,
    read_limit: usize,
}

struct ActiveRule {
    rule: Arc<dyn Rule>,
    args: Vec<toml::Value>,
    excludes: Vec<FileFilter>,
}

struct RunState {
    front_end: Arc<dyn FrontEnd>,
    loader: Arc<dyn SourceLoader>,
    gate: ReadGate,
    rules: Vec<ActiveRule>,
    global_excludes: Vec<FileFilter>,
    ignore_generated: bool,
    next_file_id: AtomicU32,
}

impl Linter {
    /// Creates a linter over the given front-end, reading sources from
    /// the filesystem with no open-file bound.
    pub fn new(front_end: Arc<dyn FrontEnd>) -> Self {
        Self {
            front_end,
            loader: Arc::new(FsLoader),
            read_limit: 0,
        }
    }

    /// Substitutes the source loader.
    pub fn with_loader(mut self, loader: Arc<dyn SourceLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Bounds the number of files open for reading at once; 0 means
    /// unbounded. `LintOptions::max_open_files` takes precedence when set.
    pub fn with_read_limit(mut self, limit: usize) -> Self {
        self.read_limit = limit;
        self
    }

    /// Runs every enabled rule over every package and returns the finding
    /// stream.
    ///
    /// Configuration problems detectable up front (an unparseable
    /// exclusion filter) fail the call; a rule whose `configure` fails is
    /// reported as one internal finding and removed from the run. All
    /// later failures surface either as findings or through
    /// [`FindingStream::finish`].
    pub fn lint(
        &self,
        packages: Vec<PackageInput>,
        registry: &RuleRegistry,
        options: &LintOptions,
    ) -> Result<FindingStream, ConfigError> {
        let global_excludes = parse_filters(&options.exclude)?;

        let (sender, receiver) = crossbeam_channel::unbounded();
        let mut active = Vec::new();
        for rule in registry.rules() {
            let name = rule.name();
            if options.rule_disabled(name) {
                continue;
            }
            let excludes = match options.rule(name) {
                Some(settings) => parse_filters(&settings.exclude)?,
                None => Vec::new(),
            };
            let args = options.rule_arguments(name).to_vec();
            if let Err(err) = rule.configure(&args) {
                debug!(rule = name, %err, "rule removed from run");
                let _ = sender.send(config_failure_finding(name, &err));
                continue;
            }
            active.push(ActiveRule {
                rule: Arc::clone(rule),
                args,
                excludes,
            });
        }

        let limit = if options.max_open_files > 0 {
            options.max_open_files
        } else {
            self.read_limit
        };
        let state = Arc::new(RunState {
            front_end: Arc::clone(&self.front_end),
            loader: Arc::clone(&self.loader),
            gate: ReadGate::new(limit),
            rules: active,
            global_excludes,
            ignore_generated: options.ignore_generated_files,
            next_file_id: AtomicU32::new(0),
        });

        let coordinator = thread::spawn(move || run(state, packages, sender));
        Ok(FindingStream::new(receiver, coordinator))
    }
}

fn parse_filters(texts: &[String]) -> Result<Vec<FileFilter>, ConfigError> {
    texts.iter().map(|t| FileFilter::parse(t)).collect()
}

fn run(
    state: Arc<RunState>,
    packages: Vec<PackageInput>,
    sender: Sender<Finding>,
) -> GoslingResult<()> {
    let mut handles = Vec::with_capacity(packages.len());
    for input in packages {
        let state = Arc::clone(&state);
        let sender = sender.clone();
        handles.push(thread::spawn(move || lint_package(&state, input, &sender)));
    }
    drop(sender);

    let mut first_err: Option<InternalError> = None;
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                first_err.get_or_insert(e);
            }
            Err(_) => {
                first_err.get_or_insert(InternalError::new("package worker panicked"));
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn lint_package(
    state: &Arc<RunState>,
    input: PackageInput,
    sender: &Sender<Finding>,
) -> GoslingResult<()> {
    let span = debug_span!("package", name = %input.name);
    let _guard = span.enter();

    let pkg = Package::new(&input.name, Arc::clone(&state.front_end));
    let mut first_err: Option<InternalError> = None;

    for unit_input in input.units {
        let path = unit_input.path;
        let path_text = path.to_string_lossy();
        if state.global_excludes.iter().any(|f| f.matches(&path_text)) {
            trace!(file = %path.display(), "excluded");
            continue;
        }

        let loaded = {
            let _permit = state.gate.acquire();
            state.loader.load(&path)
        };
        let content = match loaded {
            Ok(content) => content,
            Err(e) => {
                first_err
                    .get_or_insert_with(|| InternalError::new(format!(
                        "failed to read {}: {e}",
                        path.display()
                    )));
                continue;
            }
        };

        if state.ignore_generated && is_generated(&content) {
            trace!(file = %path.display(), "generated, skipped");
            continue;
        }

        let id = FileId::from_raw(state.next_file_id.fetch_add(1, Ordering::SeqCst));
        match state.front_end.parse(id, &path, &content) {
            Ok(ast) => {
                let source = SourceFile::new(id, path, content);
                let unit = Unit::new(source, ast, &pkg);
                pkg.add_unit(unit);
            }
            Err(err) => {
                debug!(file = %path.display(), %err, "parse failed");
                let _ = sender.send(invalid_file_finding(&path, &err));
            }
        }
    }

    let units = pkg.units();
    if !units.is_empty() {
        pkg.sortable_types();
        thread::scope(|scope| {
            for unit in units {
                let sender = sender.clone();
                let state = Arc::clone(state);
                scope.spawn(move || lint_unit(&state, &unit, &sender));
            }
        });
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn lint_unit(state: &RunState, unit: &Unit, sender: &Sender<Finding>) {
    let path_text = unit.path().to_string_lossy();
    for active in &state.rules {
        if active.excludes.iter().any(|f| f.matches(&path_text)) {
            continue;
        }
        trace!(rule = active.rule.name(), file = %unit.path().display(), "apply");
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| active.rule.apply(unit, &active.args)));
        let findings = match outcome {
            Ok(findings) => findings,
            Err(_) => vec![panic_finding(active.rule.name(), unit.path())],
        };

        let suppressions = unit.suppressions();
        for finding in findings {
            // A cross-file finding is governed by the directives of the
            // file it is anchored in, not of the unit that produced it.
            let suppressed = if finding.start.path == unit.path() {
                suppressions.is_suppressed(&finding.rule_name, finding.start.line)
            } else {
                unit.package()
                    .and_then(|pkg| pkg.unit_at(&finding.start.path))
                    .is_some_and(|anchor| {
                        anchor
                            .suppressions()
                            .is_suppressed(&finding.rule_name, finding.start.line)
                    })
            };
            if suppressed {
                continue;
            }
            if sender.send(finding).is_err() {
                return;
            }
        }
    }
}

fn config_failure_finding(rule: &str, err: &ConfigError) -> Finding {
    let at = Location::new("", 0, 0, 0);
    Finding::new(
        rule,
        Category::Internal,
        format!("invalid configuration for rule '{rule}': {err}"),
        at.clone(),
        at,
    )
}

fn panic_finding(rule: &str, path: &Path) -> Finding {
    let at = Location::new(path, 1, 1, 0);
    Finding::new(
        rule,
        Category::Internal,
        format!("rule '{rule}' failed on {}", path.display()),
        at.clone(),
        at,
    )
}

fn invalid_file_finding(path: &Path, err: &ParseError) -> Finding {
    let (line, column) = recover_position(&err.message).unwrap_or((1, 1));
    let at = Location::new(path, line, column, 0);
    Finding::new(
        INVALID_FILE_RULE,
        Category::Validity,
        err.to_string(),
        at.clone(),
        at,
    )
}

/// Pulls a `:<line>:<col>` position out of a parse-error message.
fn recover_position(message: &str) -> Option<(u32, u32)> {
    static POSITION: OnceLock<Option<Regex>> = OnceLock::new();
    let re = POSITION
        .get_or_init(|| Regex::new(r":(\d+):(\d+)").ok())
        .as_ref()?;
    let caps = re.captures(message)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{PackageCollisions, UnusedParam};
    use gosling_config::RuleSettings;
    use gosling_source::Span;
    use gosling_syntax::{
        Comment, CommentGroup, Decl, File, FuncDecl, LanguageVersion, TypeCheckOutcome,
    };
    use std::collections::{BTreeSet, HashMap};
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    /// Builds an AST from two line shapes: `//` comments become comment
    /// groups (so directive parsing works end to end) and `func <name>`
    /// lines become bodiless function declarations.
    struct StubFrontEnd;

    impl FrontEnd for StubFrontEnd {
        fn parse(&self, id: FileId, path: &Path, content: &str) -> Result<File, ParseError> {
            if content.contains("PARSE-ERROR") {
                return Err(ParseError::new(format!(
                    "{}:3:7: expected declaration",
                    path.display()
                )));
            }
            let mut comments = Vec::new();
            let mut decls = Vec::new();
            let mut offset = 0u32;
            for line in content.lines() {
                if let Some(pos) = line.find("//") {
                    let start = offset + pos as u32;
                    let span = Span::new(id, start, offset + line.len() as u32);
                    comments.push(CommentGroup {
                        comments: vec![Comment {
                            text: line[pos..].to_string(),
                            span,
                        }],
                        span,
                    });
                } else if let Some(name) = line.strip_prefix("func ") {
                    decls.push(Decl::Func(FuncDecl {
                        name: name.trim().to_string(),
                        receiver: None,
                        params: Vec::new(),
                        results: Vec::new(),
                        body: None,
                        span: Span::new(id, offset, offset + line.len() as u32),
                    }));
                }
                offset += line.len() as u32 + 1;
            }
            Ok(File {
                package_name: "demo".to_string(),
                decls,
                comments,
                span: Span::new(id, 0, content.len() as u32),
            })
        }

        fn resolve_types(&self, _files: &[&File]) -> TypeCheckOutcome {
            TypeCheckOutcome::default()
        }

        fn language_version(&self, _package_name: &str) -> LanguageVersion {
            LanguageVersion { major: 1, minor: 22 }
        }
    }

    /// In-memory loader tracking peak read concurrency.
    #[derive(Default)]
    struct MemLoader {
        files: HashMap<PathBuf, String>,
        concurrent: AtomicUsize,
        peak: AtomicUsize,
    }

    impl MemLoader {
        fn with(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, c)| (PathBuf::from(p), c.to_string()))
                    .collect(),
                concurrent: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    impl SourceLoader for MemLoader {
        fn load(&self, path: &Path) -> io::Result<String> {
            let now = self.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            thread::yield_now();
            let result = self
                .files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"));
            self.concurrent.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    /// Emits one finding per line containing `TRIGGER`.
    struct TriggerRule;

    impl Rule for TriggerRule {
        fn name(&self) -> &'static str {
            "trigger"
        }

        fn category(&self) -> Category {
            Category::Style
        }

        fn apply(&self, unit: &Unit, _args: &[toml::Value]) -> Vec<Finding> {
            let mut findings = Vec::new();
            let mut offset = 0u32;
            for line in unit.content().lines() {
                if let Some(pos) = line.find("TRIGGER") {
                    let at = unit.locate(offset + pos as u32);
                    findings.push(Finding::new(
                        self.name(),
                        self.category(),
                        "trigger found",
                        at.clone(),
                        at,
                    ));
                }
                offset += line.len() as u32 + 1;
            }
            findings
        }
    }

    struct PanicRule;

    impl Rule for PanicRule {
        fn name(&self) -> &'static str {
            "panicky"
        }

        fn category(&self) -> Category {
            Category::Logic
        }

        fn apply(&self, _unit: &Unit, _args: &[toml::Value]) -> Vec<Finding> {
            panic!("unexpected tree shape");
        }
    }

    /// Emits, from `a.go`'s task only, a finding anchored in `b.go`.
    struct NeighborNoteRule;

    impl Rule for NeighborNoteRule {
        fn name(&self) -> &'static str {
            "neighbor-note"
        }

        fn category(&self) -> Category {
            Category::Style
        }

        fn apply(&self, unit: &Unit, _args: &[toml::Value]) -> Vec<Finding> {
            if unit.path() != Path::new("a.go") {
                return Vec::new();
            }
            let at = Location::new("b.go", 2, 1, 0);
            vec![Finding::new(
                self.name(),
                self.category(),
                "note about the neighboring file",
                at.clone(),
                at,
            )]
        }
    }

    /// Reports the package-level type facts, exercising the shared
    /// resolution pass from inside a rule.
    struct TypeFactsRule;

    impl Rule for TypeFactsRule {
        fn name(&self) -> &'static str {
            "type-facts"
        }

        fn category(&self) -> Category {
            Category::Errors
        }

        fn apply(&self, unit: &Unit, _args: &[toml::Value]) -> Vec<Finding> {
            let pkg = unit.package().expect("package alive during lint");
            let outcome = pkg.type_check();
            let at = unit.locate(0);
            vec![Finding::new(
                self.name(),
                self.category(),
                format!(
                    "{} type errors under {}",
                    outcome.errors.len(),
                    pkg.language_version()
                ),
                at.clone(),
                at,
            )]
        }
    }

    /// Delegates parsing to [`StubFrontEnd`] while counting resolution
    /// passes.
    struct ResolvingFrontEnd {
        resolutions: AtomicUsize,
    }

    impl FrontEnd for ResolvingFrontEnd {
        fn parse(&self, id: FileId, path: &Path, content: &str) -> Result<File, ParseError> {
            StubFrontEnd.parse(id, path, content)
        }

        fn resolve_types(&self, _files: &[&File]) -> TypeCheckOutcome {
            self.resolutions.fetch_add(1, Ordering::SeqCst);
            TypeCheckOutcome {
                table: Default::default(),
                errors: vec![gosling_syntax::TypeError::new("undeclared name: y")],
            }
        }

        fn language_version(&self, _package_name: &str) -> LanguageVersion {
            LanguageVersion { major: 1, minor: 22 }
        }
    }

    struct BadConfigRule {
        applied: Arc<AtomicBool>,
    }

    impl Rule for BadConfigRule {
        fn name(&self) -> &'static str {
            "bad-config"
        }

        fn category(&self) -> Category {
            Category::Style
        }

        fn configure(&self, _args: &[toml::Value]) -> Result<(), ConfigError> {
            Err(ConfigError::BadRuleArgument {
                rule: self.name().to_string(),
                reason: "always invalid".to_string(),
            })
        }

        fn apply(&self, _unit: &Unit, _args: &[toml::Value]) -> Vec<Finding> {
            self.applied.store(true, Ordering::SeqCst);
            Vec::new()
        }
    }

    fn linter(loader: MemLoader) -> Linter {
        Linter::new(Arc::new(StubFrontEnd)).with_loader(Arc::new(loader))
    }

    fn trigger_registry() -> RuleRegistry {
        let mut reg = RuleRegistry::new();
        reg.register(TriggerRule);
        reg
    }

    fn finding_keys(findings: &[Finding]) -> BTreeSet<(String, String, u32, String)> {
        findings
            .iter()
            .map(|f| {
                (
                    f.rule_name.clone(),
                    f.start.path.display().to_string(),
                    f.start.line,
                    f.message.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn findings_flow_from_all_packages() {
        let loader = MemLoader::with(&[
            ("one/a.go", "TRIGGER\nplain\nTRIGGER\n"),
            ("two/b.go", "plain\nTRIGGER\n"),
        ]);
        let packages = vec![
            PackageInput::new("one", ["one/a.go"]),
            PackageInput::new("two", ["two/b.go"]),
        ];
        let stream = linter(loader)
            .lint(packages, &trigger_registry(), &LintOptions::default())
            .unwrap();
        let findings = stream.collect_all().unwrap();
        assert_eq!(findings.len(), 3);
        let lines: BTreeSet<_> = findings
            .iter()
            .map(|f| (f.start.path.display().to_string(), f.start.line))
            .collect();
        assert!(lines.contains(&("one/a.go".to_string(), 1)));
        assert!(lines.contains(&("one/a.go".to_string(), 3)));
        assert!(lines.contains(&("two/b.go".to_string(), 2)));
    }

    #[test]
    fn directive_suppression_applies() {
        let content = "TRIGGER // gosling:disable-line:trigger\nTRIGGER\n\
                       // gosling:disable-next-line:trigger\nTRIGGER\n";
        let loader = MemLoader::with(&[("a.go", content)]);
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go"])],
                &trigger_registry(),
                &LintOptions::default(),
            )
            .unwrap();
        let findings = stream.collect_all().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].start.line, 2);
    }

    #[test]
    fn cross_file_finding_respects_anchor_file_directives() {
        // The finding is produced while linting a.go but anchored in
        // b.go, so b.go's directives decide its fate.
        let run = |b_content: &str| {
            let loader = MemLoader::with(&[("a.go", "plain\n"), ("b.go", b_content)]);
            let mut reg = RuleRegistry::new();
            reg.register(NeighborNoteRule);
            linter(loader)
                .lint(
                    vec![PackageInput::new("demo", ["a.go", "b.go"])],
                    &reg,
                    &LintOptions::default(),
                )
                .unwrap()
                .collect_all()
                .unwrap()
        };
        assert!(run("// gosling:disable\nplain\n").is_empty());
        let kept = run("plain\nplain\n");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].start.path.display().to_string(), "b.go");
    }

    #[test]
    fn collision_finding_suppressed_by_anchor_file_blanket_disable() {
        // b.go sorts after a.go, so the collision is anchored there;
        // its leading disable must swallow it no matter which file's
        // task reports it.
        let loader = MemLoader::with(&[
            ("a.go", "func Handle\n"),
            ("b.go", "// gosling:disable\nfunc Handle\n"),
        ]);
        let mut reg = RuleRegistry::new();
        reg.register(PackageCollisions::default());
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go", "b.go"])],
                &reg,
                &LintOptions::default(),
            )
            .unwrap();
        assert!(stream.collect_all().unwrap().is_empty());
    }

    #[test]
    fn type_resolution_shared_and_reachable_from_rules() {
        let fe = Arc::new(ResolvingFrontEnd {
            resolutions: AtomicUsize::new(0),
        });
        let loader = MemLoader::with(&[("a.go", "plain\n"), ("b.go", "plain\n")]);
        let mut reg = RuleRegistry::new();
        reg.register(TypeFactsRule);
        let stream = Linter::new(Arc::clone(&fe) as Arc<dyn FrontEnd>)
            .with_loader(Arc::new(loader))
            .lint(
                vec![PackageInput::new("demo", ["a.go", "b.go"])],
                &reg,
                &LintOptions::default(),
            )
            .unwrap();
        let findings = stream.collect_all().unwrap();
        assert_eq!(findings.len(), 2, "one report per unit");
        for f in &findings {
            assert_eq!(f.message, "1 type errors under go1.22");
        }
        assert_eq!(fe.resolutions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn parse_failure_yields_invalid_file_finding() {
        let loader = MemLoader::with(&[("a.go", "PARSE-ERROR with TRIGGER\n")]);
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go"])],
                &trigger_registry(),
                &LintOptions::default(),
            )
            .unwrap();
        let findings = stream.collect_all().unwrap();
        assert_eq!(findings.len(), 1, "no rule ran on the invalid file");
        let f = &findings[0];
        assert_eq!(f.rule_name, INVALID_FILE_RULE);
        assert_eq!(f.category, Category::Validity);
        assert_eq!((f.start.line, f.start.column), (3, 7));
    }

    #[test]
    fn generated_files_skipped_when_configured() {
        let content = "// Code generated by stub. DO NOT EDIT.\nTRIGGER\n";
        let run = |ignore: bool| {
            let loader = MemLoader::with(&[("a.go", content)]);
            let options = LintOptions {
                ignore_generated_files: ignore,
                ..Default::default()
            };
            linter(loader)
                .lint(
                    vec![PackageInput::new("demo", ["a.go"])],
                    &trigger_registry(),
                    &options,
                )
                .unwrap()
                .collect_all()
                .unwrap()
                .len()
        };
        assert_eq!(run(true), 0);
        assert_eq!(run(false), 1);
    }

    #[test]
    fn configure_failure_reported_and_rule_removed() {
        let applied = Arc::new(AtomicBool::new(false));
        let mut reg = RuleRegistry::new();
        reg.register(BadConfigRule {
            applied: Arc::clone(&applied),
        });
        let loader = MemLoader::with(&[("a.go", "plain\n")]);
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go"])],
                &reg,
                &LintOptions::default(),
            )
            .unwrap();
        let findings = stream.collect_all().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Internal);
        assert_eq!(findings[0].rule_name, "bad-config");
        assert!(!applied.load(Ordering::SeqCst), "removed rule never ran");
    }

    #[test]
    fn panicking_rule_becomes_internal_finding() {
        let mut reg = trigger_registry();
        reg.register(PanicRule);
        let loader = MemLoader::with(&[("a.go", "TRIGGER\n")]);
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go"])],
                &reg,
                &LintOptions::default(),
            )
            .unwrap();
        let findings = stream.collect_all().unwrap();
        let keys = finding_keys(&findings);
        assert_eq!(findings.len(), 2, "trigger finding plus internal finding");
        assert!(keys
            .iter()
            .any(|(rule, _, _, msg)| rule == "panicky" && msg.contains("failed on a.go")));
        assert!(keys.iter().any(|(rule, _, _, _)| rule == "trigger"));
    }

    #[test]
    fn disabled_rule_not_run() {
        let loader = MemLoader::with(&[("a.go", "TRIGGER\n")]);
        let mut options = LintOptions::default();
        options.rules.insert(
            "trigger".to_string(),
            RuleSettings {
                disabled: true,
                ..Default::default()
            },
        );
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go"])],
                &trigger_registry(),
                &options,
            )
            .unwrap();
        assert!(stream.collect_all().unwrap().is_empty());
    }

    #[test]
    fn global_exclude_skips_file_entirely() {
        let loader = MemLoader::with(&[("a.go", "TRIGGER\n"), ("gen/b.go", "TRIGGER\n")]);
        let options = LintOptions {
            exclude: vec!["gen/*.go".to_string()],
            ..Default::default()
        };
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go", "gen/b.go"])],
                &trigger_registry(),
                &options,
            )
            .unwrap();
        let findings = stream.collect_all().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].start.path.display().to_string(), "a.go");
    }

    #[test]
    fn rule_exclude_skips_rule_for_matching_files() {
        let loader = MemLoader::with(&[("a.go", "TRIGGER\n"), ("b.go", "TRIGGER\n")]);
        let mut options = LintOptions::default();
        options.rules.insert(
            "trigger".to_string(),
            RuleSettings {
                exclude: vec!["b.go".to_string()],
                ..Default::default()
            },
        );
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go", "b.go"])],
                &trigger_registry(),
                &options,
            )
            .unwrap();
        let findings = stream.collect_all().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].start.path.display().to_string(), "a.go");
    }

    #[test]
    fn bad_exclude_pattern_fails_the_call() {
        let loader = MemLoader::with(&[]);
        let options = LintOptions {
            exclude: vec!["~[".to_string()],
            ..Default::default()
        };
        let err = linter(loader)
            .lint(Vec::new(), &trigger_registry(), &options)
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::BadPattern { .. }));
    }

    #[test]
    fn missing_file_surfaces_through_finish() {
        let loader = MemLoader::with(&[("a.go", "TRIGGER\n")]);
        let stream = linter(loader)
            .lint(
                vec![PackageInput::new("demo", ["a.go", "gone.go"])],
                &trigger_registry(),
                &LintOptions::default(),
            )
            .unwrap();
        let err = stream.finish().unwrap_err();
        assert!(err.to_string().contains("gone.go"));
    }

    #[test]
    fn read_gate_bounds_concurrent_loads() {
        let files: Vec<(String, String)> = (0..12)
            .map(|i| (format!("p{}/f.go", i), "plain\n".to_string()))
            .collect();
        let pairs: Vec<(&str, &str)> = files
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        let loader = Arc::new(MemLoader::with(&pairs));
        let packages: Vec<PackageInput> = (0..12)
            .map(|i| PackageInput::new(format!("p{i}"), [format!("p{i}/f.go")]))
            .collect();
        let options = LintOptions {
            max_open_files: 1,
            ..Default::default()
        };
        let stream = Linter::new(Arc::new(StubFrontEnd))
            .with_loader(Arc::clone(&loader) as Arc<dyn SourceLoader>)
            .lint(packages, &trigger_registry(), &options)
            .unwrap();
        stream.finish().unwrap();
        assert_eq!(loader.peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn finding_set_is_deterministic_across_runs() {
        let files = [
            ("one/a.go", "TRIGGER\nTRIGGER\n"),
            ("one/b.go", "TRIGGER\n"),
            ("two/c.go", "x\nTRIGGER\n"),
        ];
        let run = || {
            let loader = MemLoader::with(&files);
            let packages = vec![
                PackageInput::new("one", ["one/a.go", "one/b.go"]),
                PackageInput::new("two", ["two/c.go"]),
            ];
            let stream = linter(loader)
                .lint(packages, &trigger_registry(), &LintOptions::default())
                .unwrap();
            finding_keys(&stream.collect_all().unwrap())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn unused_param_allow_pattern_wired_through_options() {
        // End-to-end check that rule arguments reach `configure`.
        let rule = UnusedParam::default();
        let mut options = LintOptions::default();
        options.rules.insert(
            "unused-param".to_string(),
            RuleSettings {
                arguments: vec![toml::Value::String("^ignored".to_string())],
                ..Default::default()
            },
        );
        rule.configure(options.rule_arguments("unused-param")).unwrap();
    }

    #[test]
    fn generated_marker_detection() {
        assert!(is_generated(
            "// Code generated by protoc-gen-go. DO NOT EDIT.\npackage x\n"
        ));
        assert!(is_generated(
            "package x\n// Code generated by stringer. DO NOT EDIT.\n"
        ));
        assert!(!is_generated("// Code generated manually\npackage x\n"));
        assert!(!is_generated("package x\n"));
    }

    #[test]
    fn position_recovery_from_error_text() {
        assert_eq!(recover_position("a.go:12:34: bad token"), Some((12, 34)));
        assert_eq!(recover_position("no position here"), None);
    }
}
