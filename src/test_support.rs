use crate::config::Config;
use crate::context::{DevContext, Platform, ProjectLayout};
use crate::error::{DevError, Result};
use crate::process::{Invocation, ProcessRunner, ProcessStatus};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The working directory is process-global; serialize every change to it.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

type Matcher = Box<dyn Fn(&Invocation) -> bool>;
type Effect = Box<dyn Fn(&Invocation)>;

/// Scripted stand-in for the external toolchain.
///
/// Every invocation is recorded. Unless a rule says otherwise, every program
/// exits 0 and every tool is "installed".
pub(crate) struct FakeRunner {
    calls: RefCell<Vec<Invocation>>,
    missing: HashSet<String>,
    rules: Vec<(Matcher, ProcessStatus)>,
    effects: Vec<Effect>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            missing: HashSet::new(),
            rules: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Treat `tool` as not installed: lookups fail and spawning it is `ToolMissing`.
    pub(crate) fn without_tool(mut self, tool: &str) -> Self {
        self.missing.insert(tool.to_string());
        self
    }

    /// Exit with `code` for invocations matching `matcher`.
    pub(crate) fn fail_when(
        mut self,
        matcher: impl Fn(&Invocation) -> bool + 'static,
        code: i32,
    ) -> Self {
        self.rules
            .push((Box::new(matcher), ProcessStatus::exited(code)));
        self
    }

    /// Exit 0 with `stdout` for invocations matching `matcher`.
    pub(crate) fn respond_with(
        mut self,
        matcher: impl Fn(&Invocation) -> bool + 'static,
        stdout: &str,
    ) -> Self {
        let status = ProcessStatus {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        };
        self.rules.push((Box::new(matcher), status));
        self
    }

    /// Run `effect` for every invocation (e.g. to create build output on disk).
    pub(crate) fn on_invoke(mut self, effect: impl Fn(&Invocation) + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub(crate) fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }

    /// Invocations whose program is `program`.
    pub(crate) fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessStatus> {
        self.calls.borrow_mut().push(invocation.clone());

        if self.missing.contains(&invocation.program) {
            return Err(DevError::tool_missing(&invocation.program, "not installed"));
        }

        for effect in &self.effects {
            effect(invocation);
        }

        let status = self
            .rules
            .iter()
            .find(|(matcher, _)| matcher(invocation))
            .map(|(_, status)| status.clone())
            .unwrap_or_else(|| ProcessStatus::exited(0));
        Ok(status)
    }

    fn find_tool(&self, name: &str) -> Option<PathBuf> {
        if self.missing.contains(name) {
            None
        } else {
            Some(PathBuf::from("/usr/bin").join(name))
        }
    }
}

/// Matches `cmake` configure invocations for the build directory named `dir`.
pub(crate) fn is_configure(inv: &Invocation, dir: &str) -> bool {
    inv.program == "cmake"
        && inv.has_arg("-S")
        && inv.arg_after("-B").is_some_and(|b| b.ends_with(dir))
}

/// Matches `cmake --build` invocations for the build directory named `dir`.
pub(crate) fn is_compile(inv: &Invocation, dir: &str) -> bool {
    inv.program == "cmake" && inv.arg_after("--build").is_some_and(|b| b.ends_with(dir))
}

/// Matches `ctest` invocations against the build directory named `dir`.
pub(crate) fn is_test_run(inv: &Invocation, dir: &str) -> bool {
    inv.program == "ctest" && inv.arg_after("--test-dir").is_some_and(|b| b.ends_with(dir))
}

/// A project root with a minimal `CMakeLists.txt` declaring version 1.2.3.
pub(crate) fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("CMakeLists.txt"),
        "cmake_minimum_required(VERSION 3.20)\nproject(demo VERSION 1.2.3 LANGUAGES CXX)\n",
    )
    .unwrap();
    temp_dir
}

/// A Unix context over `root` whose artifact is called `app`.
pub(crate) fn test_context<'a>(root: &Path, runner: &'a FakeRunner) -> DevContext<'a> {
    let config = Config {
        artifact_name: Some("app".to_string()),
        ..Config::default()
    };
    DevContext::new(ProjectLayout::at(root), config, runner).with_platform(Platform::Unix)
}

/// Create the artifact `app` where a Unix build would put it.
pub(crate) fn place_unix_artifact(root: &Path, build_dir: &str) -> PathBuf {
    let bin = root.join(build_dir).join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let artifact = bin.join("app");
    std::fs::write(&artifact, "").unwrap();
    artifact
}
